//! Inbound Ports (Driving Ports)
//!
//! The API external callers use to index documents and run queries.

use crate::domain::{Document, Query};
use crate::error::IndexError;
use crate::index::IndexingReport;

/// Primary private search API (Driving Port)
///
/// Methods take `&mut self`: indexing mutates the single-writer index and
/// every query draws from the service's randomness source.
pub trait PrivateSearchApi {
    /// Tokenize `text` and index the resulting keywords under `id`.
    fn add_document(&mut self, id: &str, text: &str) -> IndexingReport;

    /// Index an already-tokenized document.
    fn index_document(&mut self, doc: Document) -> IndexingReport;

    /// Parse and run a single term or two-operand `AND`/`OR` query.
    ///
    /// # Returns
    /// Matching document ids in insertion order. May contain false
    /// positives, never drops a true match.
    fn search(&mut self, query: &str) -> Result<Vec<String>, IndexError>;

    /// Run an already-built query tree.
    fn search_query(&mut self, query: &Query) -> Result<Vec<String>, IndexError>;

    /// Pad `real_queries` with decoys at the configured noise rate and
    /// shuffle the batch.
    fn noisy_batch(&mut self, real_queries: &[String]) -> Result<Vec<String>, IndexError>;
}
