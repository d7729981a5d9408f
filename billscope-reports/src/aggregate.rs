//! Reduction of fetched records into aggregated reports.
//!
//! Both reducers are pure functions over completed fetches, so they run
//! once every period has a result.

use billscope_core::{AggregatedReport, DimensionPredicate};
use billscope_fetch::PeriodFetch;
use tracing::debug;

/// One entry per period, in fetch order, summing matching records.
///
/// Failed and empty fetches yield 0.0; every period label is present.
pub fn aggregate_by_period(
    fetches: &[PeriodFetch],
    filter: &dyn DimensionPredicate,
) -> AggregatedReport {
    let mut report = AggregatedReport::with_labels(fetches.iter().map(|f| f.period.label.clone()));

    for fetch in fetches {
        let sum = fetch
            .records()
            .iter()
            .filter(|r| filter.matches(&r.dimension))
            .fold(0.0, |acc, r| acc + r.amount);
        report.add(&fetch.period.label, sum);
    }

    debug!(periods = report.len(), total = report.total(), "Aggregated by period");
    report
}

/// One entry per distinct dimension value across all fetches, sorted by
/// descending cost.
///
/// Values are summed in encounter order before sorting, so equal costs keep
/// the order in which they were first seen.
pub fn aggregate_by_dimension(
    fetches: &[PeriodFetch],
    filter: &dyn DimensionPredicate,
) -> AggregatedReport {
    let mut report = AggregatedReport::new();

    for record in fetches.iter().flat_map(PeriodFetch::records) {
        if filter.matches(&record.dimension) {
            report.add(&record.dimension, record.amount);
        }
    }

    report.sort_by_cost_desc();
    debug!(dimensions = report.len(), "Aggregated by dimension");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use billscope_core::{CostRecord, DimensionFilter, Period, YearMonth};
    use billscope_fetch::PeriodOutcome;
    use std::time::Duration;

    fn fetch(month: u32, outcome: PeriodOutcome) -> PeriodFetch {
        PeriodFetch {
            period: Period::month(YearMonth::new(2025, month).unwrap()).unwrap(),
            outcome,
            duration: Duration::ZERO,
        }
    }

    fn records(pairs: &[(&str, f64)]) -> PeriodOutcome {
        PeriodOutcome::Records(pairs.iter().map(|(d, a)| CostRecord::new(*d, *a)).collect())
    }

    #[test]
    fn test_by_period_keeps_failed_and_empty_periods() {
        let fetches = vec![
            fetch(5, records(&[("May 2025", 100.0)])),
            fetch(
                6,
                PeriodOutcome::Failed {
                    diagnostic: "AccessDenied".to_string(),
                },
            ),
            fetch(7, records(&[])),
            fetch(8, records(&[("August 2025", 120.0)])),
        ];

        let report = aggregate_by_period(&fetches, &DimensionFilter::All);
        let labels: Vec<_> = report.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["May 2025", "June 2025", "July 2025", "August 2025"]);
        assert_eq!(report.values(), vec![100.0, 0.0, 0.0, 120.0]);
    }

    #[test]
    fn test_by_period_with_filter() {
        let fetches = vec![fetch(
            7,
            records(&[
                ("Amazon Elastic Compute Cloud - Compute", 40.0),
                ("EC2-Instances", 2.5),
                ("Amazon Simple Storage Service", 9.0),
            ]),
        )];

        let report = aggregate_by_period(&fetches, &DimensionFilter::ec2_compute());
        assert_eq!(report.get("July 2025"), Some(42.5));
    }

    #[test]
    fn test_by_dimension_sums_and_sorts() {
        let fetches = vec![
            fetch(11, records(&[("EC2", 50.0), ("S3", 30.0), ("Support", 100.0)])),
            fetch(12, records(&[("S3", 20.0), ("Tax", 0.0)])),
        ];

        let report = aggregate_by_dimension(&fetches, &DimensionFilter::All);
        let labels: Vec<_> = report.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Support", "EC2", "S3", "Tax"]);
        assert_eq!(report.get("S3"), Some(50.0));
    }

    #[test]
    fn test_by_dimension_ties_keep_encounter_order() {
        let fetches = vec![fetch(1, records(&[("B", 5.0), ("A", 5.0), ("C", 7.0)]))];

        let report = aggregate_by_dimension(&fetches, &DimensionFilter::All);
        let labels: Vec<_> = report.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_by_dimension_accepts_closure() {
        let fetches = vec![fetch(1, records(&[("AWS Support (Business)", 100.0), ("S3", 1.0)]))];

        let starts_with_aws = |d: &str| d.starts_with("AWS");
        let report = aggregate_by_dimension(&fetches, &starts_with_aws);
        assert_eq!(report.len(), 1);
    }
}
