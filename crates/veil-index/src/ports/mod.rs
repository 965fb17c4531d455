//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - API for external callers
//! - Driven Ports (outbound) - Dependencies on external collaborators

pub mod inbound;
pub mod outbound;

pub use inbound::PrivateSearchApi;
pub use outbound::Tokenizer;
