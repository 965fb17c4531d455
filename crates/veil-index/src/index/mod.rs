//! Index Layer - term sets, pair sets and frequency hiding, kept consistent
//!
//! [`PrivateIndex`] is the single writer over all three structures. Creating
//! a per-term or per-pair set is not safe under concurrent writers, so every
//! mutation goes through `&mut PrivateIndex`.

pub mod frequency;
pub mod pair_index;
pub mod store;
pub mod term_index;

pub use frequency::{encoding_count, FrequencyHidingLayer};
pub use pair_index::PairIndex;
pub use store::SetStore;
pub use term_index::TermIndex;

use rand::Rng;
use tracing::instrument;

use crate::domain::{ApproximateSet, Document, IndexConfig, KeyedDigestOracle, Salt};
use crate::error::IndexError;

/// What one `index_document` call touched
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IndexingReport {
    /// Keywords added under their canonical digest
    pub terms: usize,
    /// Alternate digests updated for frequency-tracked keywords
    pub alternates: usize,
    /// Allow-listed pairs added
    pub pairs: usize,
    /// Sets (canonical, alternate and pair) created by this call
    pub sets_created: usize,
}

impl IndexingReport {
    /// Total set insertions
    pub fn postings(&self) -> usize {
        self.terms + self.alternates + self.pairs
    }
}

/// Term index, pair index and frequency-hiding layer sharing one oracle.
#[derive(Clone, Debug)]
pub struct PrivateIndex {
    terms: TermIndex,
    pairs: PairIndex,
    frequency: FrequencyHidingLayer,
}

impl PrivateIndex {
    pub fn new(config: &IndexConfig, salt: Salt) -> Result<Self, IndexError> {
        config.validate()?;

        let oracle = KeyedDigestOracle::new(salt);
        let frequency = FrequencyHidingLayer::new(
            &oracle,
            config.term_frequencies.clone(),
            config.max_alternates,
        )?;
        let pairs = PairIndex::new(
            oracle.clone(),
            config.canonical_pairs(),
            config.expected_items_per_term,
            config.target_fpr,
        )?;
        let terms = TermIndex::new(oracle, config.expected_items_per_term, config.target_fpr)?;

        Ok(Self {
            terms,
            pairs,
            frequency,
        })
    }

    /// Index every keyword (canonical digest and all alternates) and every
    /// allow-listed keyword pair of `doc`.
    #[instrument(skip_all, fields(keywords = doc.keywords().len()))]
    pub fn index_document(&mut self, doc: &Document) -> IndexingReport {
        let sets_before = self.terms.len() + self.pairs.len();
        self.terms.index_document(doc);
        let alternates = doc
            .keywords()
            .iter()
            .map(|keyword| {
                self.frequency
                    .index_alternates(&mut self.terms, keyword, doc.id())
            })
            .sum();
        let pairs = self.pairs.index_document(doc);

        IndexingReport {
            terms: doc.keywords().len(),
            alternates,
            pairs,
            sets_created: self.terms.len() + self.pairs.len() - sets_before,
        }
    }

    /// Canonical-digest lookup.
    pub fn search(&self, term: &str) -> Option<&ApproximateSet> {
        self.terms.search(term)
    }

    /// Lookup through a uniformly chosen alternate digest.
    pub fn search_uniform<R: Rng + ?Sized>(
        &self,
        term: &str,
        rng: &mut R,
    ) -> Option<&ApproximateSet> {
        self.frequency.search_uniform(&self.terms, term, rng)
    }

    /// Dedicated set of an allow-listed pair.
    pub fn search_pair(&self, first: &str, second: &str) -> Option<&ApproximateSet> {
        self.pairs.search_pair(first, second)
    }

    /// Pad a batch of real queries with decoys from the frequency table.
    pub fn add_noise_queries<S, R>(
        &self,
        real_queries: &[S],
        noise_rate: f64,
        rng: &mut R,
    ) -> Result<Vec<String>, IndexError>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        self.frequency.add_noise_queries(real_queries, noise_rate, rng)
    }

    pub fn terms(&self) -> &TermIndex {
        &self.terms
    }

    pub fn pairs(&self) -> &PairIndex {
        &self.pairs
    }

    pub fn frequency(&self) -> &FrequencyHidingLayer {
        &self.frequency
    }

    pub fn oracle(&self) -> &KeyedDigestOracle {
        self.terms.oracle()
    }
}
