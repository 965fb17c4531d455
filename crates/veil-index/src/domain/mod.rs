//! Domain Layer - Pure logic
//!
//! This layer contains:
//! - Approximate set (Bloom filter) and its parameter math
//! - Seeded position hashing
//! - Error-rate composition
//! - Keyed digest oracle and salt
//! - Documents and the boolean query AST
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Randomness is always passed in, never drawn ambiently

pub mod approximate_set;
pub mod config;
pub mod document;
pub mod error_rate;
pub mod hash_functions;
pub mod oracle;
pub mod parameters;
pub mod query;

pub use approximate_set::ApproximateSet;
pub use config::{IndexConfig, IndexConfigBuilder};
pub use document::Document;
pub use error_rate::ErrorRate;
pub use oracle::{canonical_pair, Digest, KeyedDigestOracle, Salt, SALT_LEN};
pub use parameters::{calculate_fpr, calculate_optimal_parameters, SetParams};
pub use query::Query;
