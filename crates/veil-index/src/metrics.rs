//! Metrics hooks for indexing and query evaluation
//!
//! Counters record outcomes only, never plaintext terms.
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use veil_index::metrics::Metrics;
//!
//! let metrics = Arc::new(Metrics::new());
//! let mut service = PrivateSearchService::new(config, salt)?.with_metrics(metrics.clone());
//! service.add_document("d1", "covid vaccine research");
//! service.search("covid")?;
//!
//! let snapshot = metrics.snapshot();
//! assert_eq!(snapshot.documents_indexed, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::index::IndexingReport;

/// Thread-safe counters for index activity
#[derive(Default)]
pub struct Metrics {
    /// Documents passed to the index
    pub documents_indexed: AtomicU64,
    /// Set insertions (canonical, alternate and pair)
    pub postings_inserted: AtomicU64,
    /// Approximate sets created (canonical, alternate and pair)
    pub sets_created: AtomicU64,
    /// Term or pair lookups
    pub lookups_performed: AtomicU64,
    /// Lookups that found no set
    pub lookup_misses: AtomicU64,
    /// Queries resolved to candidates
    pub queries_evaluated: AtomicU64,
    /// Document ids tested against candidate sets
    pub candidates_tested: AtomicU64,
    /// Document ids emitted as matches
    pub matches_emitted: AtomicU64,
    /// Decoy queries injected into batches
    pub noise_queries_injected: AtomicU64,
    /// Cumulative query time in nanoseconds
    pub query_time_ns: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_document_indexed(&self, report: &IndexingReport) {
        self.documents_indexed.fetch_add(1, Ordering::Relaxed);
        self.postings_inserted
            .fetch_add(report.postings() as u64, Ordering::Relaxed);
        self.sets_created
            .fetch_add(report.sets_created as u64, Ordering::Relaxed);
    }

    pub fn record_lookup(&self, found: bool) {
        self.lookups_performed.fetch_add(1, Ordering::Relaxed);
        if !found {
            self.lookup_misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record one resolved query
    ///
    /// # Arguments
    /// * `duration` - Time from parse to match extraction
    /// * `tested` - Document ids tested against the candidate set
    /// * `matched` - Document ids that passed
    pub fn record_query(&self, duration: Duration, tested: usize, matched: usize) {
        self.queries_evaluated.fetch_add(1, Ordering::Relaxed);
        self.query_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        self.candidates_tested
            .fetch_add(tested as u64, Ordering::Relaxed);
        self.matches_emitted
            .fetch_add(matched as u64, Ordering::Relaxed);
    }

    pub fn record_noise(&self, decoys: usize) {
        self.noise_queries_injected
            .fetch_add(decoys as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            documents_indexed: self.documents_indexed.load(Ordering::Relaxed),
            postings_inserted: self.postings_inserted.load(Ordering::Relaxed),
            sets_created: self.sets_created.load(Ordering::Relaxed),
            lookups_performed: self.lookups_performed.load(Ordering::Relaxed),
            lookup_misses: self.lookup_misses.load(Ordering::Relaxed),
            queries_evaluated: self.queries_evaluated.load(Ordering::Relaxed),
            candidates_tested: self.candidates_tested.load(Ordering::Relaxed),
            matches_emitted: self.matches_emitted.load(Ordering::Relaxed),
            noise_queries_injected: self.noise_queries_injected.load(Ordering::Relaxed),
            avg_query_ns: self.avg_query_time_ns(),
        }
    }

    pub fn avg_query_time_ns(&self) -> u64 {
        let total = self.query_time_ns.load(Ordering::Relaxed);
        let count = self.queries_evaluated.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Fraction of tested document ids that matched.
    ///
    /// Includes false positives, so it upper-bounds the true match rate.
    pub fn observed_match_rate(&self) -> f64 {
        let tested = self.candidates_tested.load(Ordering::Relaxed);
        let matched = self.matches_emitted.load(Ordering::Relaxed);
        if tested > 0 {
            matched as f64 / tested as f64
        } else {
            0.0
        }
    }

    pub fn reset(&self) {
        self.documents_indexed.store(0, Ordering::Relaxed);
        self.postings_inserted.store(0, Ordering::Relaxed);
        self.sets_created.store(0, Ordering::Relaxed);
        self.lookups_performed.store(0, Ordering::Relaxed);
        self.lookup_misses.store(0, Ordering::Relaxed);
        self.queries_evaluated.store(0, Ordering::Relaxed);
        self.candidates_tested.store(0, Ordering::Relaxed);
        self.matches_emitted.store(0, Ordering::Relaxed);
        self.noise_queries_injected.store(0, Ordering::Relaxed);
        self.query_time_ns.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub documents_indexed: u64,
    pub postings_inserted: u64,
    pub sets_created: u64,
    pub lookups_performed: u64,
    pub lookup_misses: u64,
    pub queries_evaluated: u64,
    pub candidates_tested: u64,
    pub matches_emitted: u64,
    pub noise_queries_injected: u64,
    pub avg_query_ns: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this to forward counters to an external metrics system.
pub trait MetricsRecorder: Send + Sync {
    fn record_document_indexed(&self, report: &IndexingReport);

    fn record_lookup(&self, found: bool);

    fn record_query(&self, duration: Duration, tested: usize, matched: usize);

    fn record_noise(&self, decoys: usize);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_document_indexed(&self, _: &IndexingReport) {}
    fn record_lookup(&self, _: bool) {}
    fn record_query(&self, _: Duration, _: usize, _: usize) {}
    fn record_noise(&self, _: usize) {}
}

impl MetricsRecorder for Metrics {
    fn record_document_indexed(&self, report: &IndexingReport) {
        Metrics::record_document_indexed(self, report);
    }

    fn record_lookup(&self, found: bool) {
        Metrics::record_lookup(self, found);
    }

    fn record_query(&self, duration: Duration, tested: usize, matched: usize) {
        Metrics::record_query(self, duration, tested, matched);
    }

    fn record_noise(&self, decoys: usize) {
        Metrics::record_noise(self, decoys);
    }
}
