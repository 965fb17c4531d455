//! Optimal approximate set parameter calculation
//!
//! Formulas:
//! - m = ceil(-n*ln(p) / (ln(2)^2))  -- bits
//! - k = max(1, round((m/n) * ln(2))) -- hash seeds
//! - p ~ (1 - e^(-kn/m))^k            -- false positive rate

use std::f64::consts::LN_2;

/// Approximate set sizing parameters
#[derive(Clone, Debug, PartialEq)]
pub struct SetParams {
    /// Number of bits in the set (m)
    pub size_bits: usize,
    /// Number of hash seeds (k)
    pub hash_count: usize,
    /// False positive rate once `n` items have been added
    pub expected_fpr: f64,
}

/// Calculate optimal parameters for `num_items` expected items at `target_fpr`.
///
/// Callers validate their inputs; a zero capacity degenerates to a one-bit,
/// one-seed set.
pub fn calculate_optimal_parameters(num_items: usize, target_fpr: f64) -> SetParams {
    if num_items == 0 {
        return SetParams {
            size_bits: 1,
            hash_count: 1,
            expected_fpr: 1.0,
        };
    }

    let n = num_items as f64;
    let ln2_squared = LN_2 * LN_2;

    let m = ((-n * target_fpr.ln() / ln2_squared).ceil() as usize).max(1);
    let k = (((m as f64 / n) * LN_2).round() as usize).max(1);

    SetParams {
        size_bits: m,
        hash_count: k,
        expected_fpr: calculate_fpr(m, num_items, k),
    }
}

/// False positive rate of a set with `m` bits, `n` items and `k` seeds.
///
/// Formula: p = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}
