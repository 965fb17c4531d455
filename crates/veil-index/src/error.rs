//! Error types for the private search index

use thiserror::Error;

/// Errors that can occur while building or querying the index
#[derive(Debug, Error)]
pub enum IndexError {
    /// Two approximate sets with different bit-array lengths were combined.
    /// Mis-sized sets indicate a build-time bug; the caller must fix the sizing.
    #[error("Approximate set size mismatch: m={left} vs m={right}")]
    ParameterMismatch { left: usize, right: usize },

    #[error("Invalid false positive rate: {fpr} (must be strictly between 0 and 1)")]
    InvalidFalsePositiveRate { fpr: f64 },

    #[error("Invalid expected item capacity: must be greater than 0")]
    InvalidCapacity,

    #[error("Invalid frequency for term '{term}': {frequency} (must be in (0, 1])")]
    InvalidFrequency { term: String, frequency: f64 },

    #[error("Invalid alternate cap: must be greater than 0")]
    InvalidAlternateCap,

    #[error("Invalid noise rate: {rate} (must be finite and non-negative)")]
    InvalidNoiseRate { rate: f64 },

    #[error("Invalid term pair: {0}")]
    InvalidPair(String),

    #[error("Empty query")]
    EmptyQuery,

    #[error("Unsupported query: {0}")]
    UnsupportedQuery(String),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}
