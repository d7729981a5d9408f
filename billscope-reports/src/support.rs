//! Support plan costs for one period, with the top services for context.

use billscope_core::{AggregatedReport, DimensionFilter, ReportEntry, YearMonth};
use billscope_fetch::{PeriodFetch, PeriodOutcome};
use serde::{Deserialize, Serialize};

use crate::aggregate::aggregate_by_dimension;
use crate::error::ReportError;

/// Services listed for context by default.
pub const DEFAULT_CONTEXT_TOP_N: usize = 10;

/// Parameters of the support report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportOptions {
    /// Month to inspect.
    pub month: YearMonth,
    /// Services counted as support.
    pub filter: DimensionFilter,
    /// Number of context services listed.
    pub top_n: usize,
}

impl Default for SupportOptions {
    fn default() -> Self {
        Self {
            month: YearMonth { year: 2025, month: 11 },
            filter: DimensionFilter::support(),
            top_n: DEFAULT_CONTEXT_TOP_N,
        }
    }
}

/// Matching services, their subtotal, and the top services overall.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupportReport {
    /// Label of the inspected period.
    pub period_label: String,
    /// Matching services by descending cost, zero costs included.
    pub matches: AggregatedReport,
    /// Sum over `matches`.
    pub subtotal: f64,
    /// Every service by descending cost.
    pub services: AggregatedReport,
    /// Number of context services to display.
    pub top_n: usize,
}

impl SupportReport {
    /// Builds the report from the single grouped fetch.
    ///
    /// The report has nothing to show without that fetch, so a failure is
    /// returned as [`ReportError::SoleFetchFailed`].
    pub fn from_fetch(
        fetch: &PeriodFetch,
        filter: &DimensionFilter,
        top_n: usize,
    ) -> Result<Self, ReportError> {
        if let PeriodOutcome::Failed { diagnostic } = &fetch.outcome {
            return Err(ReportError::SoleFetchFailed {
                label: fetch.period.label.clone(),
                diagnostic: diagnostic.clone(),
            });
        }

        let services = aggregate_by_dimension(std::slice::from_ref(fetch), &DimensionFilter::All);
        let matches = services.filtered(filter);
        Ok(Self {
            period_label: fetch.period.label.clone(),
            subtotal: matches.total(),
            matches,
            services,
            top_n,
        })
    }

    /// Returns true if any service matched.
    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }

    /// The strictly positive services to list for context, at most `top_n`.
    pub fn context(&self) -> Vec<&ReportEntry> {
        self.services.top_positive(self.top_n)
    }
}
