//! Approximate set (Bloom filter) over a bit-packed word arena
//!
//! INVARIANTS:
//! - No false negatives: once added, `contains()` MUST return true
//! - Bits are only ever set, never cleared; `m` and `k` are fixed at construction
//! - FPR = (1 - e^(-kn/m))^k is derived, never stored

use bitvec::prelude::*;
use tracing::warn;

use super::hash_functions::compute_positions;
use super::parameters::{calculate_fpr, calculate_optimal_parameters};
use crate::error::IndexError;

/// Probabilistic membership structure with a tunable false positive rate.
///
/// Sets combined through [`union`](Self::union) or
/// [`intersect`](Self::intersect) must share the same bit length `m`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApproximateSet {
    /// Bit array, packed into 64-bit words
    bits: BitVec<u64, Lsb0>,
    /// Number of hash seeds (k)
    k: usize,
    /// Size in bits (m)
    m: usize,
    /// Logical number of items added (n); informational only
    n: usize,
}

impl ApproximateSet {
    /// Create an empty set with explicit parameters.
    ///
    /// `m` and `k` are raised to at least 1.
    pub fn new(m: usize, k: usize) -> Self {
        let m = m.max(1);
        Self {
            bits: bitvec![u64, Lsb0; 0; m],
            k: k.max(1),
            m,
            n: 0,
        }
    }

    /// Create an empty set sized for `expected_items` at `target_fpr`.
    pub fn with_capacity(expected_items: usize, target_fpr: f64) -> Result<Self, IndexError> {
        if expected_items == 0 {
            return Err(IndexError::InvalidCapacity);
        }
        if !(target_fpr > 0.0 && target_fpr < 1.0) {
            return Err(IndexError::InvalidFalsePositiveRate { fpr: target_fpr });
        }

        let params = calculate_optimal_parameters(expected_items, target_fpr);
        Ok(Self::new(params.size_bits, params.hash_count))
    }

    /// Add an item. Re-adding an item leaves the bits unchanged but still
    /// increments the logical count.
    pub fn add(&mut self, item: impl AsRef<[u8]>) {
        for pos in compute_positions(item.as_ref(), self.k, self.m) {
            self.bits.set(pos, true);
        }
        self.n += 1;
    }

    /// Test membership.
    ///
    /// Returns `false` only if the item was definitely never added.
    pub fn contains(&self, item: impl AsRef<[u8]>) -> bool {
        compute_positions(item.as_ref(), self.k, self.m).all(|pos| self.bits[pos])
    }

    /// Bitwise OR of two sets with the same `m`.
    ///
    /// Every item either operand reports as present is present in the result.
    /// The result uses `k' = max(k, other.k)`; when the operands' `k` differ
    /// later membership math on the result is skewed.
    pub fn union(&self, other: &ApproximateSet) -> Result<ApproximateSet, IndexError> {
        let mut result = self.combine_with(other)?;
        for (s, o) in result
            .bits
            .as_raw_mut_slice()
            .iter_mut()
            .zip(other.bits.as_raw_slice())
        {
            *s |= *o;
        }
        result.n = self.n + other.n;
        Ok(result)
    }

    /// Bitwise AND of two sets with the same `m`.
    ///
    /// Items present in both operands always test positive in the result.
    /// For non-members the false positive rate is roughly the product of the
    /// operands' rates.
    pub fn intersect(&self, other: &ApproximateSet) -> Result<ApproximateSet, IndexError> {
        let mut result = self.combine_with(other)?;
        for (s, o) in result
            .bits
            .as_raw_mut_slice()
            .iter_mut()
            .zip(other.bits.as_raw_slice())
        {
            *s &= *o;
        }
        result.n = self.n.min(other.n);
        Ok(result)
    }

    fn combine_with(&self, other: &ApproximateSet) -> Result<ApproximateSet, IndexError> {
        if self.m != other.m {
            return Err(IndexError::ParameterMismatch {
                left: self.m,
                right: other.m,
            });
        }
        if self.k != other.k {
            warn!(
                left_k = self.k,
                right_k = other.k,
                "Combining approximate sets with different hash counts"
            );
        }

        let mut result = self.clone();
        result.k = self.k.max(other.k);
        Ok(result)
    }

    /// Current false positive rate: (1 - e^(-kn/m))^k
    pub fn false_positive_rate(&self) -> f64 {
        calculate_fpr(self.m, self.n, self.k)
    }

    /// Number of bits set
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Size in bits (m)
    pub fn size_bits(&self) -> usize {
        self.m
    }

    /// Number of hash seeds (k)
    pub fn hash_count(&self) -> usize {
        self.k
    }

    /// Logical number of items added (n)
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }
}
