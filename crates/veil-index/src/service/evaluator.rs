//! Boolean query evaluation
//!
//! Structural recursion over [`Query`]. Each node resolves to [`Candidates`]:
//! either nothing can match, or an approximate set plus the error rate the
//! composition has accumulated.
//!
//! | node       | both present          | one present     | none  |
//! |------------|-----------------------|-----------------|-------|
//! | `And(l,r)` | `intersect`, `a·b`    | `Empty`         | `Empty` |
//! | `Or(l,r)`  | `union`, `a+b-a·b`    | the present one | `Empty` |

use std::borrow::Cow;

use rand::Rng;
use tracing::{debug, instrument};

use crate::domain::{ApproximateSet, ErrorRate, Query};
use crate::error::IndexError;
use crate::index::PrivateIndex;
use crate::metrics::{MetricsRecorder, NoOpMetrics};

/// Result of resolving a query against the index.
#[derive(Clone, Debug)]
pub enum Candidates<'a> {
    /// No document can match. Tests false for every id.
    Empty,
    /// Documents are tested against `set`; `error` bounds the chance a
    /// non-member passes.
    Set {
        set: Cow<'a, ApproximateSet>,
        error: ErrorRate,
    },
}

impl<'a> Candidates<'a> {
    /// Candidates backed by a stored set, with the set's own error rate.
    pub fn from_set(set: &'a ApproximateSet) -> Self {
        Self::Set {
            error: ErrorRate::new(set.false_positive_rate()),
            set: Cow::Borrowed(set),
        }
    }

    pub fn contains(&self, doc_id: &str) -> bool {
        match self {
            Self::Empty => false,
            Self::Set { set, .. } => set.contains(doc_id),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn error_rate(&self) -> ErrorRate {
        match self {
            Self::Empty => ErrorRate::ZERO,
            Self::Set { error, .. } => *error,
        }
    }

    pub fn set(&self) -> Option<&ApproximateSet> {
        match self {
            Self::Empty => None,
            Self::Set { set, .. } => Some(set.as_ref()),
        }
    }

    /// Ids that test positive, in input order.
    pub fn matches<'d, I>(&self, doc_ids: I) -> Vec<&'d str>
    where
        I: IntoIterator<Item = &'d str>,
    {
        doc_ids
            .into_iter()
            .filter(|id| self.contains(id))
            .collect()
    }
}

/// Resolves queries to candidates. Holds no state between calls.
pub struct QueryEvaluator<'a> {
    index: &'a PrivateIndex,
    metrics: &'a dyn MetricsRecorder,
}

impl<'a> QueryEvaluator<'a> {
    pub fn new(index: &'a PrivateIndex) -> Self {
        Self {
            index,
            metrics: &NoOpMetrics,
        }
    }

    pub fn with_metrics(mut self, metrics: &'a dyn MetricsRecorder) -> Self {
        self.metrics = metrics;
        self
    }

    /// Resolve `query` into candidates.
    ///
    /// Term lookups go through a uniformly chosen alternate digest.
    ///
    /// # Errors
    /// `ParameterMismatch` if two term sets were sized differently.
    #[instrument(skip_all)]
    pub fn evaluate<R: Rng + ?Sized>(
        &self,
        query: &Query,
        rng: &mut R,
    ) -> Result<Candidates<'a>, IndexError> {
        match query {
            Query::Term(term) => Ok(self.lookup(term, rng)),
            Query::And(left, right) => {
                let left = self.evaluate(left, rng)?;
                let right = self.evaluate(right, rng)?;
                match (left, right) {
                    (
                        Candidates::Set { set: a, error: ea },
                        Candidates::Set { set: b, error: eb },
                    ) => Ok(Candidates::Set {
                        set: Cow::Owned(a.intersect(&b)?),
                        error: ea.and(eb),
                    }),
                    _ => Ok(Candidates::Empty),
                }
            }
            Query::Or(left, right) => {
                let left = self.evaluate(left, rng)?;
                let right = self.evaluate(right, rng)?;
                match (left, right) {
                    (
                        Candidates::Set { set: a, error: ea },
                        Candidates::Set { set: b, error: eb },
                    ) => Ok(Candidates::Set {
                        set: Cow::Owned(a.union(&b)?),
                        error: ea.or(eb),
                    }),
                    (present @ Candidates::Set { .. }, Candidates::Empty)
                    | (Candidates::Empty, present @ Candidates::Set { .. }) => Ok(present),
                    (Candidates::Empty, Candidates::Empty) => Ok(Candidates::Empty),
                }
            }
        }
    }

    fn lookup<R: Rng + ?Sized>(&self, term: &str, rng: &mut R) -> Candidates<'a> {
        let found = self.index.search_uniform(term, rng);
        self.metrics.record_lookup(found.is_some());
        match found {
            Some(set) => Candidates::from_set(set),
            None => {
                debug!(
                    digest = %self.index.oracle().encode(term).short(),
                    "Term never indexed"
                );
                Candidates::Empty
            }
        }
    }
}
