//! Fetch pipeline for running one query per period.
//!
//! Queries run concurrently up to a limit, but results come back in query
//! order. A failed period becomes a [`PeriodOutcome::Failed`] entry and
//! the run continues; only fatal errors abort it.

use billscope_core::{CostRecord, Period};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use crate::error::FetchError;
use crate::query::CostQuery;
use crate::source::CostSource;

// ============================================================================
// Period Fetch
// ============================================================================

/// What one period's query produced.
#[derive(Debug, Clone, PartialEq)]
pub enum PeriodOutcome {
    /// The query succeeded; an empty list means zero cost.
    Records(Vec<CostRecord>),
    /// The query failed; the period counts as zero cost.
    Failed {
        /// Text reported by the billing source.
        diagnostic: String,
    },
}

/// Record of a single period fetch.
#[derive(Debug, Clone)]
pub struct PeriodFetch {
    /// The period that was queried.
    pub period: Period,
    /// Records or failure.
    pub outcome: PeriodOutcome,
    /// How long the query took.
    pub duration: Duration,
}

impl PeriodFetch {
    /// Records for the period; empty when the fetch failed.
    pub fn records(&self) -> &[CostRecord] {
        match &self.outcome {
            PeriodOutcome::Records(records) => records,
            PeriodOutcome::Failed { .. } => &[],
        }
    }

    /// Returns true if the fetch failed.
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, PeriodOutcome::Failed { .. })
    }

    /// The warning to report for a failed fetch.
    pub fn warning(&self) -> Option<FetchWarning> {
        match &self.outcome {
            PeriodOutcome::Failed { diagnostic } => Some(FetchWarning {
                label: self.period.label.clone(),
                diagnostic: diagnostic.clone(),
            }),
            PeriodOutcome::Records(_) => None,
        }
    }
}

/// A period whose costs could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchWarning {
    /// Period label.
    pub label: String,
    /// Text reported by the billing source.
    pub diagnostic: String,
}

impl fmt::Display for FetchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not fetch costs for {}: {}", self.label, self.diagnostic)
    }
}

/// Collects the warnings of all failed fetches, in order.
pub fn collect_warnings(fetches: &[PeriodFetch]) -> Vec<FetchWarning> {
    fetches.iter().filter_map(PeriodFetch::warning).collect()
}

// ============================================================================
// Fetch Pipeline
// ============================================================================

/// Runs queries against a cost source.
pub struct FetchPipeline {
    source: Arc<dyn CostSource>,
    max_concurrency: usize,
}

impl FetchPipeline {
    /// Creates a pipeline over `source`.
    pub fn new(source: Arc<dyn CostSource>, max_concurrency: usize) -> Self {
        Self {
            source,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Returns the concurrency limit.
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Runs every query and returns one [`PeriodFetch`] per query, in order.
    ///
    /// Non-fatal failures are logged and recorded; a fatal error (a
    /// malformed amount) is returned as `Err`.
    #[instrument(skip(self, queries), fields(source = %self.source.id(), queries = queries.len()))]
    pub async fn execute(&self, queries: &[CostQuery]) -> Result<Vec<PeriodFetch>, FetchError> {
        info!(count = queries.len(), "Executing fetch pipeline");

        let results: Vec<(&CostQuery, Result<Vec<CostRecord>, FetchError>, Duration)> =
            stream::iter(queries)
                .map(|query| async move {
                    let start = Instant::now();
                    let result = self.source.query(query).await;
                    (query, result, start.elapsed())
                })
                .buffered(self.max_concurrency)
                .collect()
                .await;

        let mut fetches = Vec::with_capacity(results.len());
        for (query, result, duration) in results {
            fetches.push(Self::settle(query, result, duration)?);
        }
        Ok(fetches)
    }

    /// Runs a single query.
    pub async fn execute_one(&self, query: &CostQuery) -> Result<PeriodFetch, FetchError> {
        let start = Instant::now();
        let result = self.source.query(query).await;
        Self::settle(query, result, start.elapsed())
    }

    fn settle(
        query: &CostQuery,
        result: Result<Vec<CostRecord>, FetchError>,
        duration: Duration,
    ) -> Result<PeriodFetch, FetchError> {
        let label = &query.period.label;
        let outcome = match result {
            Ok(records) => {
                debug!(period = %label, records = records.len(), duration = ?duration, "Fetch succeeded");
                PeriodOutcome::Records(records)
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                let diagnostic = e.diagnostic();
                warn!(period = %label, error = %diagnostic, "Could not fetch costs");
                PeriodOutcome::Failed { diagnostic }
            }
        };

        Ok(PeriodFetch {
            period: query.period.clone(),
            outcome,
            duration,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
