//! Derived statistics over an ordered report.
//!
//! Division by a zero (or negative) baseline is defined as 0% throughout,
//! so every percentage is finite.

use serde::{Deserialize, Serialize};

use super::report::{AggregatedReport, ReportEntry};

/// Percent change from `previous` to `current`.
///
/// Returns 0 when `previous` is not strictly positive.
pub fn percent_change(previous: f64, current: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else {
        0.0
    }
}

// ============================================================================
// Row Change
// ============================================================================

/// A report row with its change relative to the previous row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowChange {
    /// Row label.
    pub label: String,
    /// Row cost.
    pub cost: f64,
    /// Absolute change from the previous row. `None` for the first row.
    pub change: Option<f64>,
    /// Percent change from the previous row. `None` for the first row.
    pub percent_change: Option<f64>,
}

/// Computes period-over-period changes for every row, in order.
pub fn row_changes(report: &AggregatedReport) -> Vec<RowChange> {
    let mut previous: Option<f64> = None;
    report
        .iter()
        .map(|entry| {
            let row = RowChange {
                label: entry.label.clone(),
                cost: entry.cost,
                change: previous.map(|p| entry.cost - p),
                percent_change: previous.map(|p| percent_change(p, entry.cost)),
            };
            previous = Some(entry.cost);
            row
        })
        .collect()
}

// ============================================================================
// Trend
// ============================================================================

/// Mean of the last two periods compared with the mean of the first two.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    /// Mean of the first two values.
    pub first_mean: f64,
    /// Mean of the last two values.
    pub last_mean: f64,
    /// `last_mean - first_mean`.
    pub change: f64,
    /// Change relative to `first_mean`; 0 when `first_mean` is not positive.
    pub percent_change: f64,
}

impl Trend {
    /// Computes the trend; needs at least two values.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.len() < 2 {
            return None;
        }
        let first_mean = (values[0] + values[1]) / 2.0;
        let n = values.len();
        let last_mean = (values[n - 2] + values[n - 1]) / 2.0;
        Some(Self {
            first_mean,
            last_mean,
            change: last_mean - first_mean,
            percent_change: percent_change(first_mean, last_mean),
        })
    }
}

// ============================================================================
// Derived Stats
// ============================================================================

/// Row changes plus report-level summary figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    /// Per-row changes in report order.
    pub rows: Vec<RowChange>,
    /// Sum of all rows.
    pub total: f64,
    /// `total / rows`, or 0 for an empty report.
    pub average: f64,
    /// Cheapest row (first on ties).
    pub min: Option<ReportEntry>,
    /// Most expensive row (first on ties).
    pub max: Option<ReportEntry>,
    /// First-two versus last-two comparison, when there are two rows or more.
    pub trend: Option<Trend>,
}

impl DerivedStats {
    /// Computes all statistics for `report`.
    pub fn from_report(report: &AggregatedReport) -> Self {
        Self {
            rows: row_changes(report),
            total: report.total(),
            average: report.average(),
            min: report.min_entry().cloned(),
            max: report.max_entry().cloned(),
            trend: Trend::from_values(&report.values()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
