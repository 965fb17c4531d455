//! Index configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use veil_index::domain::IndexConfigBuilder;
//!
//! let config = IndexConfigBuilder::new()
//!     .target_fpr(0.01)
//!     .expected_items_per_term(1_000)
//!     .allow_pair("covid", "vaccine")
//!     .term_frequency("backdoor", 0.02)
//!     .build()
//!     .expect("Valid config");
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::oracle::canonical_pair;
use crate::error::IndexError;

/// Index configuration
///
/// The salt is deliberately not part of this structure; it is handed to the
/// digest oracle separately so it never lands in a config file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Target false positive rate of every per-term and per-pair set
    pub target_fpr: f64,
    /// Expected number of documents per term or pair set
    pub expected_items_per_term: usize,
    /// Decoys added per real query in a noisy batch
    pub noise_rate: f64,
    /// Term pairs indexed jointly to hide their co-occurrence
    pub pair_allow_list: Vec<(String, String)>,
    /// Estimated relative frequency of each term, in (0, 1]
    pub term_frequencies: BTreeMap<String, f64>,
    /// Upper bound on alternate digests per term, however rare it is
    pub max_alternates: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            target_fpr: 0.01,
            expected_items_per_term: 10_000,
            noise_rate: 0.2,
            pair_allow_list: Vec::new(),
            term_frequencies: BTreeMap::new(),
            max_alternates: 256,
        }
    }
}

impl IndexConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, IndexError> {
        let config: IndexConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, IndexError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), IndexError> {
        if !(self.target_fpr > 0.0 && self.target_fpr < 1.0) {
            return Err(IndexError::InvalidFalsePositiveRate {
                fpr: self.target_fpr,
            });
        }

        if self.expected_items_per_term == 0 {
            return Err(IndexError::InvalidCapacity);
        }

        if self.max_alternates == 0 {
            return Err(IndexError::InvalidAlternateCap);
        }

        if !self.noise_rate.is_finite() || self.noise_rate < 0.0 {
            return Err(IndexError::InvalidNoiseRate {
                rate: self.noise_rate,
            });
        }

        for (first, second) in &self.pair_allow_list {
            if first.is_empty() || second.is_empty() {
                return Err(IndexError::InvalidPair(format!(
                    "({first},{second}) has an empty member"
                )));
            }
            if first == second {
                return Err(IndexError::InvalidPair(format!(
                    "({first},{second}) pairs a term with itself"
                )));
            }
        }

        for (term, &frequency) in &self.term_frequencies {
            if !(frequency > 0.0 && frequency <= 1.0) {
                return Err(IndexError::InvalidFrequency {
                    term: term.clone(),
                    frequency,
                });
            }
        }

        Ok(())
    }

    /// Allow-list with every pair sorted lexicographically.
    pub fn canonical_pairs(&self) -> BTreeSet<(String, String)> {
        self.pair_allow_list
            .iter()
            .map(|(first, second)| {
                let (a, b) = canonical_pair(first, second);
                (a.to_string(), b.to_string())
            })
            .collect()
    }
}

/// Builder for IndexConfig with validation
#[derive(Default)]
pub struct IndexConfigBuilder {
    target_fpr: Option<f64>,
    expected_items_per_term: Option<usize>,
    noise_rate: Option<f64>,
    pair_allow_list: Vec<(String, String)>,
    term_frequencies: BTreeMap<String, f64>,
    max_alternates: Option<usize>,
}

impl IndexConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target_fpr(mut self, fpr: f64) -> Self {
        self.target_fpr = Some(fpr);
        self
    }

    pub fn expected_items_per_term(mut self, items: usize) -> Self {
        self.expected_items_per_term = Some(items);
        self
    }

    pub fn noise_rate(mut self, rate: f64) -> Self {
        self.noise_rate = Some(rate);
        self
    }

    pub fn max_alternates(mut self, cap: usize) -> Self {
        self.max_alternates = Some(cap);
        self
    }

    /// Index the pair `(first, second)` jointly. Order does not matter.
    pub fn allow_pair(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.pair_allow_list.push((first.into(), second.into()));
        self
    }

    pub fn allow_pairs<I, S>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        pairs
            .into_iter()
            .fold(self, |builder, (first, second)| builder.allow_pair(first, second))
    }

    pub fn term_frequency(mut self, term: impl Into<String>, frequency: f64) -> Self {
        self.term_frequencies.insert(term.into(), frequency);
        self
    }

    pub fn term_frequencies<I, S>(mut self, frequencies: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        self.term_frequencies
            .extend(frequencies.into_iter().map(|(t, f)| (t.into(), f)));
        self
    }

    /// Build the IndexConfig, validating all parameters
    pub fn build(self) -> Result<IndexConfig, IndexError> {
        let defaults = IndexConfig::default();

        let config = IndexConfig {
            target_fpr: self.target_fpr.unwrap_or(defaults.target_fpr),
            expected_items_per_term: self
                .expected_items_per_term
                .unwrap_or(defaults.expected_items_per_term),
            noise_rate: self.noise_rate.unwrap_or(defaults.noise_rate),
            pair_allow_list: self.pair_allow_list,
            term_frequencies: self.term_frequencies,
            max_alternates: self.max_alternates.unwrap_or(defaults.max_alternates),
        };

        config.validate()?;
        Ok(config)
    }
}
