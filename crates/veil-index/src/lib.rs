//! # Veil Index
//!
//! Privacy-preserving inverted search index. Answers keyword and two-operand
//! boolean queries over a document collection while bounding what the
//! server learns: which documents match (up to a false-positive rate), which
//! keywords co-occur, and which queries are real.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `ApproximateSet`: Bloom filter over a bit-packed arena
//!   - `KeyedDigestOracle`: HMAC-SHA256 term digests under a shared `Salt`
//!   - `ErrorRate`: error composition across AND/OR
//!   - `Query`, `Document`, `IndexConfig`
//!
//! - **Index Layer** (`index/`): Term sets, pair sets, frequency hiding
//!   - `PrivateIndex`: single writer keeping all three consistent
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `PrivateSearchApi`: Driving port (inbound API)
//!   - `Tokenizer`: Driven port (keyword extraction)
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `QueryEvaluator`: recursive AND/OR evaluation to `Candidates`
//!   - `PrivateSearchService`: Implements `PrivateSearchApi`
//!
//! - **Adapters Layer** (`adapters/`): `StopWordTokenizer`
//!
//! ## Invariants
//!
//! - No false negatives: an added item always tests present
//! - Every alternate digest of a term holds the term's full document set
//! - Sets are only combined when their bit lengths match
//!
//! ## Salt
//!
//! Builder and query issuer must share the salt. A mismatch is not an
//! error: every lookup silently misses. Compare `Salt::fingerprint()`
//! out-of-band.
//!
//! ## Usage Example
//!
//! ```ignore
//! use veil_index::{IndexConfigBuilder, PrivateSearchApi, PrivateSearchService, Salt};
//!
//! let config = IndexConfigBuilder::new()
//!     .allow_pair("covid", "vaccine")
//!     .term_frequency("covid", 0.3)
//!     .build()?;
//!
//! let mut service = PrivateSearchService::new(config, Salt::generate(&mut rand::thread_rng()))?;
//! service.add_document("d1", "covid vaccine research");
//! service.add_document("d3", "covid treatment");
//!
//! assert_eq!(service.search("covid AND vaccine")?, vec!["d1"]);
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod index;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::StopWordTokenizer;
pub use domain::{
    ApproximateSet, Digest, Document, ErrorRate, IndexConfig, IndexConfigBuilder,
    KeyedDigestOracle, Query, Salt,
};
pub use error::IndexError;
pub use index::{IndexingReport, PrivateIndex};
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::{PrivateSearchApi, Tokenizer};
pub use service::{Candidates, PrivateSearchService, QueryEvaluator};
