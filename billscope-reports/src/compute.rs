//! Per-month cost of EC2 compute services.

use billscope_core::{AggregatedReport, DimensionFilter, PeriodSchedule, ReportEntry, YearMonth};
use billscope_fetch::{collect_warnings, FetchWarning, PeriodFetch};
use serde::{Deserialize, Serialize};

use crate::aggregate::aggregate_by_period;

/// Parameters of the compute history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputeOptions {
    /// Periods to report.
    pub schedule: PeriodSchedule,
    /// Services counted as compute.
    pub filter: DimensionFilter,
}

impl Default for ComputeOptions {
    fn default() -> Self {
        Self {
            schedule: PeriodSchedule::monthly(YearMonth { year: 2025, month: 7 }, 6),
            filter: DimensionFilter::ec2_compute(),
        }
    }
}

/// Compute cost per month with its lowest month and average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputeHistory {
    /// Filtered cost per period, in period order.
    pub months: AggregatedReport,
    /// Filter that selected the services.
    pub filter: DimensionFilter,
    /// Cheapest month (the first one on ties).
    pub lowest: Option<ReportEntry>,
    /// Mean monthly cost.
    pub average: f64,
    /// Periods that could not be fetched.
    pub warnings: Vec<FetchWarning>,
}

impl ComputeHistory {
    /// Builds the history from grouped period fetches.
    pub fn from_fetches(fetches: &[PeriodFetch], filter: &DimensionFilter) -> Self {
        let months = aggregate_by_period(fetches, filter);
        Self {
            lowest: months.min_entry().cloned(),
            average: months.average(),
            months,
            filter: filter.clone(),
            warnings: collect_warnings(fetches),
        }
    }
}
