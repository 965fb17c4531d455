//! Private Search Service
//!
//! Ties tokenizer, index, evaluator, randomness and metrics together behind
//! [`PrivateSearchApi`].

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, instrument};

use super::evaluator::{Candidates, QueryEvaluator};
use crate::adapters::StopWordTokenizer;
use crate::domain::{Document, IndexConfig, Query, Salt};
use crate::error::IndexError;
use crate::index::{IndexingReport, PrivateIndex};
use crate::metrics::{MetricsRecorder, NoOpMetrics};
use crate::ports::{PrivateSearchApi, Tokenizer};

/// Private search service implementation
///
/// Implements the `PrivateSearchApi` port over an injected tokenizer.
pub struct PrivateSearchService<T: Tokenizer = StopWordTokenizer> {
    config: IndexConfig,
    index: PrivateIndex,
    tokenizer: T,
    /// Document ids in insertion order, tested against every candidate set
    documents: Vec<String>,
    known: HashSet<String>,
    rng: StdRng,
    metrics: Arc<dyn MetricsRecorder>,
}

impl PrivateSearchService<StopWordTokenizer> {
    /// Create a service with the default stop-word tokenizer.
    pub fn new(config: IndexConfig, salt: Salt) -> Result<Self, IndexError> {
        Self::with_tokenizer(config, salt, StopWordTokenizer::default())
    }
}

impl<T: Tokenizer> PrivateSearchService<T> {
    /// Create a service with a custom tokenizer.
    ///
    /// Randomness is seeded from OS entropy; use [`Self::with_seed`] for
    /// reproducible alternate selection and noise.
    pub fn with_tokenizer(config: IndexConfig, salt: Salt, tokenizer: T) -> Result<Self, IndexError> {
        let index = PrivateIndex::new(&config, salt)?;

        info!(
            salt = %index.oracle().salt().fingerprint(),
            pairs = index.pairs().allow_list().len(),
            tracked_terms = index.frequency().vocabulary().count(),
            target_fpr = config.target_fpr,
            "Private search service ready"
        );

        Ok(Self {
            config,
            index,
            tokenizer,
            documents: Vec::new(),
            known: HashSet::new(),
            rng: StdRng::from_entropy(),
            metrics: Arc::new(NoOpMetrics),
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsRecorder>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Resolve `query` to candidates without testing documents.
    ///
    /// An `AND` of two plain terms on the allow-list is answered from the
    /// dedicated pair set when one exists.
    pub fn evaluate_query(&mut self, query: &Query) -> Result<Candidates<'_>, IndexError> {
        resolve(&self.index, self.metrics.as_ref(), &mut self.rng, query)
    }

    /// Checksum of the salt, to compare with the query issuer's out-of-band.
    pub fn salt_fingerprint(&self) -> String {
        self.index.oracle().salt().fingerprint()
    }

    pub fn metrics(&self) -> &Arc<dyn MetricsRecorder> {
        &self.metrics
    }

    pub fn index(&self) -> &PrivateIndex {
        &self.index
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Known document ids in insertion order.
    pub fn documents(&self) -> &[String] {
        &self.documents
    }
}

fn resolve<'a>(
    index: &'a PrivateIndex,
    metrics: &'a dyn MetricsRecorder,
    rng: &mut StdRng,
    query: &Query,
) -> Result<Candidates<'a>, IndexError> {
    if let Some((first, second)) = query.as_term_pair() {
        if index.pairs().is_allowed(first, second) {
            let found = index.search_pair(first, second);
            metrics.record_lookup(found.is_some());
            if let Some(set) = found {
                debug!("Answered from pair set");
                return Ok(Candidates::from_set(set));
            }
        }
    }
    QueryEvaluator::new(index)
        .with_metrics(metrics)
        .evaluate(query, rng)
}

impl<T: Tokenizer> PrivateSearchApi for PrivateSearchService<T> {
    fn add_document(&mut self, id: &str, text: &str) -> IndexingReport {
        let keywords = self.tokenizer.tokenize(text);
        self.index_document(Document::new(id, keywords))
    }

    #[instrument(skip_all)]
    fn index_document(&mut self, doc: Document) -> IndexingReport {
        let report = self.index.index_document(&doc);
        if self.known.insert(doc.id().to_string()) {
            self.documents.push(doc.id().to_string());
        }
        self.metrics.record_document_indexed(&report);
        report
    }

    fn search(&mut self, query: &str) -> Result<Vec<String>, IndexError> {
        let query = Query::parse(query)?;
        self.search_query(&query)
    }

    #[instrument(skip_all)]
    fn search_query(&mut self, query: &Query) -> Result<Vec<String>, IndexError> {
        let start = Instant::now();
        let candidates = resolve(&self.index, self.metrics.as_ref(), &mut self.rng, query)?;

        let tested = if candidates.is_empty() {
            0
        } else {
            self.documents.len()
        };
        let matches: Vec<String> = candidates
            .matches(self.documents.iter().map(String::as_str))
            .into_iter()
            .map(String::from)
            .collect();

        self.metrics
            .record_query(start.elapsed(), tested, matches.len());
        debug!(
            tested,
            matched = matches.len(),
            error = %candidates.error_rate(),
            "Query resolved"
        );
        Ok(matches)
    }

    fn noisy_batch(&mut self, real_queries: &[String]) -> Result<Vec<String>, IndexError> {
        let batch = self
            .index
            .add_noise_queries(real_queries, self.config.noise_rate, &mut self.rng)?;
        self.metrics.record_noise(batch.len() - real_queries.len());
        Ok(batch)
    }
}
