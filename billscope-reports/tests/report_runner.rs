//! End-to-end report tests against a canned cost source.

use async_trait::async_trait;
use billscope_core::{CostRecord, DimensionFilter, PeriodSchedule, YearMonth};
use billscope_fetch::{CostQuery, CostSource, FetchError, FetchPipeline, Metric, ProcessError};
use billscope_reports::{
    BreakdownSection, ComputeOptions, MonthlyOptions, ReportError, ReportRunner, SupportOptions,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
enum MockResponse {
    Records(Vec<(&'static str, f64)>),
    Fail(&'static str),
    Malformed,
}

/// Answers queries from a table keyed by period label and grouping.
/// Unknown queries return no records.
#[derive(Default)]
struct MockCostSource {
    responses: HashMap<(String, bool), MockResponse>,
    calls: Mutex<Vec<String>>,
}

impl MockCostSource {
    fn with(mut self, label: &str, grouped: bool, response: MockResponse) -> Self {
        self.responses.insert((label.to_string(), grouped), response);
        self
    }

    fn total(self, label: &'static str, amount: f64) -> Self {
        self.with(label, false, MockResponse::Records(vec![(label, amount)]))
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CostSource for MockCostSource {
    fn id(&self) -> &str {
        "test.mock"
    }

    async fn query(&self, query: &CostQuery) -> Result<Vec<CostRecord>, FetchError> {
        let key = (query.period.label.clone(), query.group_by.is_some());
        self.calls.lock().unwrap().push(key.0.clone());

        match self.responses.get(&key).cloned() {
            Some(MockResponse::Records(pairs)) => Ok(pairs
                .into_iter()
                .map(|(d, a)| CostRecord::new(d, a))
                .collect()),
            Some(MockResponse::Fail(stderr)) => Err(FetchError::Process(ProcessError::NonZeroExit {
                code: 255,
                stderr: stderr.to_string(),
            })),
            Some(MockResponse::Malformed) => Err(FetchError::MalformedAmount {
                value: "n/a".to_string(),
                dimension: key.0,
            }),
            None => Ok(Vec::new()),
        }
    }
}

fn runner(source: MockCostSource) -> (ReportRunner, Arc<MockCostSource>) {
    let source = Arc::new(source);
    let pipeline = FetchPipeline::new(source.clone(), 3);
    (ReportRunner::new(pipeline, Metric::BlendedCost), source)
}

fn months(start: u32, count: u32) -> PeriodSchedule {
    PeriodSchedule::monthly(YearMonth::new(2025, start).unwrap(), count)
}

#[tokio::test]
async fn test_monthly_three_month_scenario() {
    let source = MockCostSource::default()
        .total("January 2025", 100.0)
        .total("February 2025", 150.0)
        .total("March 2025", 0.0)
        .with(
            "March 2025",
            true,
            MockResponse::Records(vec![("Tax", 0.0), ("Amazon S3", -1.0)]),
        );
    let (runner, source) = runner(source);

    let options = MonthlyOptions {
        schedule: months(1, 3),
        top_n: 15,
    };
    let report = runner.monthly(&options).await.unwrap();

    assert_eq!(source.call_count(), 4);
    assert_eq!(report.stats.total, 250.0);
    assert!((report.stats.average - 83.333).abs() < 0.001);
    assert_eq!(report.stats.rows[1].change, Some(50.0));
    assert_eq!(report.stats.rows[1].percent_change, Some(50.0));
    assert_eq!(report.stats.rows[2].change, Some(-150.0));
    assert_eq!(report.stats.rows[2].percent_change, Some(-100.0));

    let BreakdownSection::Available(breakdown) = &report.breakdown else {
        panic!("breakdown should be available");
    };
    assert!(breakdown.displayed().is_empty());
    assert_eq!(breakdown.positive_total(), 0.0);
}

#[tokio::test]
async fn test_monthly_failed_june() {
    let source = MockCostSource::default()
        .total("May 2025", 100.0)
        .with("June 2025", false, MockResponse::Fail("AccessDeniedException\n"))
        .total("July 2025", 120.0);
    let (runner, _) = runner(source);

    let options = MonthlyOptions {
        schedule: months(5, 3),
        top_n: 15,
    };
    let report = runner.monthly(&options).await.unwrap();

    assert_eq!(report.totals.values(), vec![100.0, 0.0, 120.0]);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].label, "June 2025");
    assert_eq!(report.warnings[0].diagnostic, "AccessDeniedException");
    assert_eq!(report.stats.rows[2].percent_change, Some(0.0));
}

#[tokio::test]
async fn test_monthly_breakdown_failure_is_not_fatal() {
    let source = MockCostSource::default()
        .total("December 2025", 10.0)
        .with("December 2025", true, MockResponse::Fail("Throttled"));
    let (runner, _) = runner(source);

    let options = MonthlyOptions {
        schedule: months(12, 1),
        top_n: 15,
    };
    let report = runner.monthly(&options).await.unwrap();

    assert!(report.warnings.is_empty());
    assert!(matches!(
        report.breakdown,
        BreakdownSection::Unavailable { ref diagnostic, .. } if diagnostic == "Throttled"
    ));
    assert!(report.stats.trend.is_none());
}

#[tokio::test]
async fn test_malformed_amount_aborts() {
    let source = MockCostSource::default()
        .total("August 2025", 1.0)
        .with("September 2025", false, MockResponse::Malformed);
    let (runner, _) = runner(source);

    let options = MonthlyOptions {
        schedule: months(8, 2),
        top_n: 15,
    };
    let err = runner.monthly(&options).await.unwrap_err();
    assert!(err.is_malformed());
}

#[tokio::test]
async fn test_compute_history() {
    let source = MockCostSource::default()
        .with(
            "July 2025",
            true,
            MockResponse::Records(vec![
                ("Amazon Elastic Compute Cloud - Compute", 80.0),
                ("EC2 - Other", 12.0),
            ]),
        )
        .with(
            "August 2025",
            true,
            MockResponse::Records(vec![("EC2-Instance", 20.0), ("Amazon S3", 3.0)]),
        );
    let (runner, _) = runner(source);

    let options = ComputeOptions {
        schedule: months(7, 3),
        filter: DimensionFilter::ec2_compute(),
    };
    let history = runner.compute(&options).await.unwrap();

    assert_eq!(history.months.values(), vec![80.0, 20.0, 0.0]);
    assert_eq!(history.lowest.as_ref().unwrap().label, "September 2025");
    assert!((history.average - 33.333).abs() < 0.001);
    assert!(history.warnings.is_empty());
}

#[tokio::test]
async fn test_support_report() {
    let source = MockCostSource::default().with(
        "November 2025",
        true,
        MockResponse::Records(vec![
            ("EC2", 50.0),
            ("S3", 0.0),
            ("AWS Support (Business)", 100.0),
        ]),
    );
    let (runner, source) = runner(source);

    let report = runner.support(&SupportOptions::default()).await.unwrap();

    assert_eq!(source.call_count(), 1);
    assert_eq!(report.subtotal, 100.0);
    assert_eq!(report.context().len(), 2);
}

#[tokio::test]
async fn test_support_sole_fetch_failure() {
    let source = MockCostSource::default().with(
        "November 2025",
        true,
        MockResponse::Fail("Unable to locate credentials"),
    );
    let (runner, _) = runner(source);

    let err = runner.support(&SupportOptions::default()).await.unwrap_err();
    assert!(matches!(err, ReportError::SoleFetchFailed { .. }));
    assert_eq!(err.to_string(), "Unable to locate credentials");
}
