//! Multi-month cost comparison with a service breakdown of the last period.

use billscope_core::{AggregatedReport, DerivedStats, DimensionFilter, PeriodSchedule, ReportEntry, YearMonth};
use billscope_fetch::{collect_warnings, FetchWarning, PeriodFetch, PeriodOutcome};
use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate_by_dimension, aggregate_by_period};

/// Services listed in the breakdown by default.
pub const DEFAULT_BREAKDOWN_TOP_N: usize = 15;

// ============================================================================
// Options
// ============================================================================

/// Parameters of the monthly comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyOptions {
    /// Periods to compare; the last one is broken down by service.
    pub schedule: PeriodSchedule,
    /// Number of services listed in the breakdown.
    pub top_n: usize,
}

impl Default for MonthlyOptions {
    fn default() -> Self {
        Self {
            schedule: PeriodSchedule::monthly(YearMonth { year: 2025, month: 8 }, 5),
            top_n: DEFAULT_BREAKDOWN_TOP_N,
        }
    }
}

// ============================================================================
// Service Breakdown
// ============================================================================

/// Per-service costs of one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceBreakdown {
    /// Label of the broken-down period.
    pub period_label: String,
    /// Every service, by descending cost.
    pub services: AggregatedReport,
    /// Number of services to display.
    pub top_n: usize,
}

impl ServiceBreakdown {
    /// The strictly positive services to display, at most `top_n`.
    pub fn displayed(&self) -> Vec<&ReportEntry> {
        self.services.top_positive(self.top_n)
    }

    /// Sum over all strictly positive services, displayed or not.
    pub fn positive_total(&self) -> f64 {
        self.services.positive_total()
    }
}

/// The breakdown, or why it is missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BreakdownSection {
    /// The grouped query succeeded.
    Available(ServiceBreakdown),
    /// The grouped query failed.
    Unavailable {
        /// Label of the period that was queried.
        label: String,
        /// Text reported by the billing source.
        diagnostic: String,
    },
}

impl BreakdownSection {
    /// Builds the section from the grouped fetch of the last period.
    pub fn from_fetch(fetch: &PeriodFetch, top_n: usize) -> Self {
        match &fetch.outcome {
            PeriodOutcome::Failed { diagnostic } => Self::Unavailable {
                label: fetch.period.label.clone(),
                diagnostic: diagnostic.clone(),
            },
            PeriodOutcome::Records(_) => Self::Available(ServiceBreakdown {
                period_label: fetch.period.label.clone(),
                services: aggregate_by_dimension(std::slice::from_ref(fetch), &DimensionFilter::All),
                top_n,
            }),
        }
    }

    /// Label of the broken-down period.
    pub fn period_label(&self) -> &str {
        match self {
            Self::Available(breakdown) => &breakdown.period_label,
            Self::Unavailable { label, .. } => label,
        }
    }
}

// ============================================================================
// Monthly Comparison
// ============================================================================

/// Period totals with changes, summary figures, and a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyComparison {
    /// Total cost per period, in period order.
    pub totals: AggregatedReport,
    /// Changes, total, average, and trend over `totals`.
    pub stats: DerivedStats,
    /// Periods whose totals could not be fetched.
    pub warnings: Vec<FetchWarning>,
    /// Service breakdown of the last period.
    pub breakdown: BreakdownSection,
}

impl MonthlyComparison {
    /// Builds the comparison from ungrouped period fetches and the grouped
    /// fetch of the last period.
    pub fn from_fetches(totals: &[PeriodFetch], breakdown: &PeriodFetch, top_n: usize) -> Self {
        let report = aggregate_by_period(totals, &DimensionFilter::All);
        Self {
            stats: DerivedStats::from_report(&report),
            totals: report,
            warnings: collect_warnings(totals),
            breakdown: BreakdownSection::from_fetch(breakdown, top_n),
        }
    }

    /// Number of compared periods.
    pub fn period_count(&self) -> usize {
        self.totals.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billscope_core::{CostRecord, Period};
    use std::time::Duration;

    fn fetch(month: u32, records: &[(&str, f64)]) -> PeriodFetch {
        PeriodFetch {
            period: Period::month(YearMonth::new(2025, month).unwrap()).unwrap(),
            outcome: PeriodOutcome::Records(
                records.iter().map(|(d, a)| CostRecord::new(*d, *a)).collect(),
            ),
            duration: Duration::ZERO,
        }
    }

    #[test]
    fn test_default_options() {
        let options = MonthlyOptions::default();
        let periods = options.schedule.periods().unwrap();
        assert_eq!(periods.len(), 5);
        assert_eq!(periods[0].label, "August 2025");
        assert_eq!(periods[4].label, "December 2025");
        assert_eq!(options.top_n, 15);
    }

    #[test]
    fn test_breakdown_scenario() {
        let totals = vec![fetch(11, &[("November 2025", 150.0)])];
        let grouped = fetch(11, &[("EC2", 50.0), ("S3", 0.0), ("Support", 100.0)]);

        let comparison = MonthlyComparison::from_fetches(&totals, &grouped, 15);
        let BreakdownSection::Available(breakdown) = &comparison.breakdown else {
            panic!("breakdown should be available");
        };

        let shown: Vec<_> = breakdown.displayed().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(shown, vec!["Support", "EC2"]);
        assert_eq!(breakdown.positive_total(), 150.0);
        assert_eq!(breakdown.services.len(), 3);
    }

    #[test]
    fn test_breakdown_unavailable() {
        let totals = vec![fetch(12, &[("December 2025", 10.0)])];
        let mut grouped = fetch(12, &[]);
        grouped.outcome = PeriodOutcome::Failed {
            diagnostic: "ThrottlingException".to_string(),
        };

        let comparison = MonthlyComparison::from_fetches(&totals, &grouped, 15);
        assert_eq!(
            comparison.breakdown,
            BreakdownSection::Unavailable {
                label: "December 2025".to_string(),
                diagnostic: "ThrottlingException".to_string(),
            }
        );
        assert_eq!(comparison.breakdown.period_label(), "December 2025");
        assert!(comparison.warnings.is_empty());
    }

    #[test]
    fn test_top_n_is_never_padded() {
        let grouped = fetch(12, &[("A", 3.0), ("B", 2.0), ("C", -1.0)]);
        let section = BreakdownSection::from_fetch(&grouped, 15);
        let BreakdownSection::Available(breakdown) = section else {
            panic!("breakdown should be available");
        };
        assert_eq!(breakdown.displayed().len(), 2);
    }

    #[test]
    fn test_breakdown_serializes_with_status() {
        let grouped = fetch(12, &[("EC2", 1.0)]);
        let value = serde_json::to_value(BreakdownSection::from_fetch(&grouped, 15)).unwrap();
        assert_eq!(value["status"], "available");
        assert_eq!(value["period_label"], "December 2025");
        assert_eq!(value["services"][0]["label"], "EC2");
    }
}
