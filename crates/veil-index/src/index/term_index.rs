//! Term index: term digest -> approximate set of document ids

use tracing::debug;

use super::store::SetStore;
use crate::domain::{ApproximateSet, Digest, Document, KeyedDigestOracle};
use crate::error::IndexError;

/// Maps each term's digest to the set of documents containing it.
///
/// Plaintext terms are never stored; every lookup goes through the oracle.
#[derive(Clone, Debug)]
pub struct TermIndex {
    oracle: KeyedDigestOracle,
    store: SetStore,
}

impl TermIndex {
    pub fn new(
        oracle: KeyedDigestOracle,
        expected_items: usize,
        target_fpr: f64,
    ) -> Result<Self, IndexError> {
        Ok(Self {
            oracle,
            store: SetStore::new(expected_items, target_fpr)?,
        })
    }

    /// Add the document id under every keyword's digest.
    ///
    /// Returns the number of sets created.
    pub fn index_document(&mut self, doc: &Document) -> usize {
        let created = doc
            .keywords()
            .iter()
            .filter(|keyword| self.index_term(keyword, doc.id()))
            .count();
        debug!(
            keywords = doc.keywords().len(),
            created, "Indexed document terms"
        );
        created
    }

    /// Add `doc_id` under the canonical digest of `term`.
    pub fn index_term(&mut self, term: &str, doc_id: &str) -> bool {
        let digest = self.oracle.encode(term);
        self.store.add(digest, doc_id)
    }

    /// Add `doc_id` under an already-resolved digest (e.g. an alternate).
    pub fn index_digest(&mut self, digest: Digest, doc_id: &str) -> bool {
        self.store.add(digest, doc_id)
    }

    /// Set of documents for `term`, or `None` if the term was never indexed.
    pub fn search(&self, term: &str) -> Option<&ApproximateSet> {
        self.search_digest(&self.oracle.encode(term))
    }

    pub fn search_digest(&self, digest: &Digest) -> Option<&ApproximateSet> {
        self.store.get(digest)
    }

    pub fn oracle(&self) -> &KeyedDigestOracle {
        &self.oracle
    }

    /// Number of digests with a set
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
