//! # Veil Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/   # Scenarios across service, index and oracle
//! │   ├── end_to_end.rs
//! │   ├── privacy.rs
//! │   └── accuracy.rs
//! └── benches/           # Criterion benchmarks
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p veil-tests
//!
//! # By category
//! cargo test -p veil-tests integration::privacy::
//!
//! # Benchmarks
//! cargo bench -p veil-tests
//! ```

pub mod integration;
