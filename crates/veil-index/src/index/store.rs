//! Digest-keyed storage of approximate sets
//!
//! Every set in a store shares one `(m, k)`, so any two of them can be
//! combined with `union`/`intersect`.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{calculate_optimal_parameters, ApproximateSet, Digest, SetParams};
use crate::error::IndexError;

#[derive(Clone, Debug)]
pub struct SetStore {
    sets: HashMap<Digest, ApproximateSet>,
    params: SetParams,
}

impl SetStore {
    /// Create a store whose sets hold `expected_items` at `target_fpr`.
    pub fn new(expected_items: usize, target_fpr: f64) -> Result<Self, IndexError> {
        if expected_items == 0 {
            return Err(IndexError::InvalidCapacity);
        }
        if !(target_fpr > 0.0 && target_fpr < 1.0) {
            return Err(IndexError::InvalidFalsePositiveRate { fpr: target_fpr });
        }

        Ok(Self {
            sets: HashMap::new(),
            params: calculate_optimal_parameters(expected_items, target_fpr),
        })
    }

    /// Add `item` to the set under `digest`, creating the set on first use.
    ///
    /// Returns `true` if a new set was created.
    pub fn add(&mut self, digest: Digest, item: &str) -> bool {
        let mut created = false;
        let params = &self.params;
        let set = self.sets.entry(digest).or_insert_with(|| {
            created = true;
            debug!(
                digest = %digest.short(),
                m = params.size_bits,
                k = params.hash_count,
                "Created approximate set"
            );
            ApproximateSet::new(params.size_bits, params.hash_count)
        });
        set.add(item);
        created
    }

    /// The set under `digest`, or `None` if nothing was ever added to it.
    pub fn get(&self, digest: &Digest) -> Option<&ApproximateSet> {
        self.sets.get(digest)
    }

    pub fn contains_digest(&self, digest: &Digest) -> bool {
        self.sets.contains_key(digest)
    }

    /// Number of sets
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn params(&self) -> &SetParams {
        &self.params
    }
}
