//! Error-rate composition across boolean operators
//!
//! Assumes the operands' errors are independent:
//! - AND: e = e_l * e_r
//! - OR:  e = e_l + e_r - e_l * e_r

use std::fmt;

/// Probability that an observed membership answer is wrong, in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct ErrorRate(f64);

impl ErrorRate {
    pub const ZERO: ErrorRate = ErrorRate(0.0);
    pub const ONE: ErrorRate = ErrorRate(1.0);

    /// Create a rate, clamped into `[0, 1]`. NaN maps to 1.
    pub fn new(rate: f64) -> Self {
        if rate.is_nan() {
            return Self::ONE;
        }
        Self(rate.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Error of a conjunction of two independent observations.
    pub fn and(self, other: ErrorRate) -> ErrorRate {
        Self::new(self.0 * other.0)
    }

    /// Error of a disjunction of two independent observations.
    pub fn or(self, other: ErrorRate) -> ErrorRate {
        Self::new(self.0 + other.0 - self.0 * other.0)
    }

    pub fn complement(self) -> ErrorRate {
        Self::new(1.0 - self.0)
    }
}

impl fmt::Display for ErrorRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

impl From<f64> for ErrorRate {
    fn from(rate: f64) -> Self {
        Self::new(rate)
    }
}
