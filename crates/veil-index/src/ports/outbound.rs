//! Outbound Ports (Driven Ports)
//!
//! Dependencies the index needs from external components.

use std::collections::BTreeSet;

/// Keyword extraction from raw text (Driven Port)
///
/// Output must already be normalized (case-folded, stop words removed):
/// the index digests keywords exactly as returned.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> BTreeSet<String>;
}
