//! Correlation-hiding pair index
//!
//! Intersecting two independently queried term sets, again and again, lets
//! an observer learn that the terms co-occur. Pairs on the allow-list are
//! encoded as one atomic digest with their own set, so querying them never
//! touches the per-term sets.

use std::collections::BTreeSet;

use tracing::debug;

use super::store::SetStore;
use crate::domain::{canonical_pair, ApproximateSet, Document, KeyedDigestOracle};
use crate::error::IndexError;

#[derive(Clone, Debug)]
pub struct PairIndex {
    oracle: KeyedDigestOracle,
    /// Canonically sorted pairs
    allow_list: BTreeSet<(String, String)>,
    store: SetStore,
}

impl PairIndex {
    /// `allow_list` pairs are sorted on the way in.
    pub fn new<I>(
        oracle: KeyedDigestOracle,
        allow_list: I,
        expected_items: usize,
        target_fpr: f64,
    ) -> Result<Self, IndexError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let allow_list = allow_list
            .into_iter()
            .map(|(first, second)| {
                let (a, b) = canonical_pair(&first, &second);
                (a.to_string(), b.to_string())
            })
            .collect();

        Ok(Self {
            oracle,
            allow_list,
            store: SetStore::new(expected_items, target_fpr)?,
        })
    }

    /// Whether `(first, second)`, in either order, is on the allow-list.
    pub fn is_allowed(&self, first: &str, second: &str) -> bool {
        let (a, b) = canonical_pair(first, second);
        self.allow_list
            .contains(&(a.to_string(), b.to_string()))
    }

    /// Add the document id under every allowed pair of its keywords.
    ///
    /// Returns the number of allowed pairs found in the document.
    pub fn index_document(&mut self, doc: &Document) -> usize {
        let mut indexed = 0;
        for (first, second) in doc.keyword_pairs() {
            if !self.is_allowed(first, second) {
                continue;
            }
            let digest = self.oracle.encode_pair(first, second);
            self.store.add(digest, doc.id());
            indexed += 1;
        }
        if indexed > 0 {
            debug!(pairs = indexed, "Indexed document pairs");
        }
        indexed
    }

    /// Dedicated set for an allowed pair.
    ///
    /// `None` if the pair is not on the allow-list or no document held it.
    pub fn search_pair(&self, first: &str, second: &str) -> Option<&ApproximateSet> {
        if !self.is_allowed(first, second) {
            return None;
        }
        self.store.get(&self.oracle.encode_pair(first, second))
    }

    pub fn allow_list(&self) -> &BTreeSet<(String, String)> {
        &self.allow_list
    }

    /// Number of pair sets
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
