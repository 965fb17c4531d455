//! Frequency-hiding layer
//!
//! A stable digest is a pseudonym: querying it repeatedly leaks how often a
//! term is searched. Each term in the frequency table therefore gets
//! `max(1, floor(1/frequency))` alternate digests, capped by the configured
//! `max_alternates`, so rare (identifying) terms spread their lookups over
//! more digests. A query picks one alternate
//! uniformly at random. Batches of real queries can also be padded with decoy
//! terms drawn from the same vocabulary.
//!
//! INVARIANT: every alternate of a term is populated with exactly the
//! documents of the term itself; indexing must update all of them.

use std::collections::BTreeMap;

use rand::seq::index::sample;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::term_index::TermIndex;
use crate::domain::{ApproximateSet, Digest, KeyedDigestOracle};
use crate::error::IndexError;

/// Number of alternate digests for a term of the given frequency, at most
/// `max_alternates`.
pub fn encoding_count(frequency: f64, max_alternates: usize) -> usize {
    let count = (1.0 / frequency).floor().min(max_alternates as f64);
    (count as usize).max(1)
}

#[derive(Clone, Debug, Default)]
pub struct FrequencyHidingLayer {
    /// Term -> estimated frequency in (0, 1]
    frequencies: BTreeMap<String, f64>,
    /// Term -> ordered alternate digests
    encodings: BTreeMap<String, Vec<Digest>>,
}

impl FrequencyHidingLayer {
    /// Build the encoding map for every term in `frequencies`.
    pub fn new(
        oracle: &KeyedDigestOracle,
        frequencies: BTreeMap<String, f64>,
        max_alternates: usize,
    ) -> Result<Self, IndexError> {
        if max_alternates == 0 {
            return Err(IndexError::InvalidAlternateCap);
        }
        let mut encodings = BTreeMap::new();
        for (term, &frequency) in &frequencies {
            if !(frequency > 0.0 && frequency <= 1.0) {
                return Err(IndexError::InvalidFrequency {
                    term: term.clone(),
                    frequency,
                });
            }
            let count = encoding_count(frequency, max_alternates);
            encodings.insert(term.clone(), oracle.encode_multiple(term, count));
        }

        debug!(
            terms = encodings.len(),
            digests = encodings.values().map(Vec::len).sum::<usize>(),
            "Built frequency-hiding encodings"
        );

        Ok(Self {
            frequencies,
            encodings,
        })
    }

    /// Alternate digests of `term`, or `None` if it has no frequency entry.
    pub fn alternates(&self, term: &str) -> Option<&[Digest]> {
        self.encodings.get(term).map(Vec::as_slice)
    }

    /// Terms known to the frequency table, in lexicographic order.
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.frequencies.keys().map(String::as_str)
    }

    pub fn frequency(&self, term: &str) -> Option<f64> {
        self.frequencies.get(term).copied()
    }

    /// Add `doc_id` under every alternate of `term`.
    ///
    /// Returns the number of alternates updated (0 for untracked terms).
    pub fn index_alternates(&self, index: &mut TermIndex, term: &str, doc_id: &str) -> usize {
        let Some(alternates) = self.encodings.get(term) else {
            return 0;
        };
        for digest in alternates {
            index.index_digest(*digest, doc_id);
        }
        alternates.len()
    }

    /// Look `term` up through one uniformly chosen alternate.
    ///
    /// Terms without a frequency entry fall back to their canonical digest.
    pub fn search_uniform<'a, R: Rng + ?Sized>(
        &self,
        index: &'a TermIndex,
        term: &str,
        rng: &mut R,
    ) -> Option<&'a ApproximateSet> {
        match self.encodings.get(term).and_then(|alts| alts.choose(rng)) {
            Some(digest) => index.search_digest(digest),
            None => index.search(term),
        }
    }

    /// Pad `real_queries` with `floor(len * noise_rate)` decoys sampled
    /// without replacement from the vocabulary, then shuffle the batch.
    ///
    /// The decoy count is capped by the vocabulary size.
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
        if !noise_rate.is_finite() || noise_rate < 0.0 {
            return Err(IndexError::InvalidNoiseRate { rate: noise_rate });
        }

        let vocabulary: Vec<&str> = self.vocabulary().collect();
        let wanted = (real_queries.len() as f64 * noise_rate).floor() as usize;
        let amount = wanted.min(vocabulary.len());

        let mut batch: Vec<String> = real_queries
            .iter()
            .map(|q| q.as_ref().to_string())
            .collect();
        batch.extend(
            sample(rng, vocabulary.len(), amount)
                .into_iter()
                .map(|i| vocabulary[i].to_string()),
        );
        batch.shuffle(rng);

        debug!(
            real = real_queries.len(),
            decoys = amount,
            "Injected noise queries"
        );
        Ok(batch)
    }
}
