//! Service Layer
//!
//! Query evaluation and the search facade that orchestrates the index
//! through the ports.

pub mod evaluator;
pub mod search_service;

pub use evaluator::{Candidates, QueryEvaluator};
pub use search_service::PrivateSearchService;
