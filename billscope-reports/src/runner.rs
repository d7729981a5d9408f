//! Runs the fetch, aggregate, and build steps of each report.

use billscope_core::{CoreError, Period};
use billscope_fetch::{CostQuery, Dimension, FetchPipeline, Metric};
use tracing::{info, instrument};

use crate::compute::{ComputeHistory, ComputeOptions};
use crate::error::ReportError;
use crate::monthly::{MonthlyComparison, MonthlyOptions};
use crate::support::{SupportOptions, SupportReport};

/// Builds reports from a fetch pipeline.
pub struct ReportRunner {
    pipeline: FetchPipeline,
    metric: Metric,
}

impl ReportRunner {
    /// Creates a runner requesting `metric`.
    pub fn new(pipeline: FetchPipeline, metric: Metric) -> Self {
        Self { pipeline, metric }
    }

    /// The metric every query requests.
    pub fn metric(&self) -> Metric {
        self.metric
    }

    fn total_query(&self, period: Period) -> CostQuery {
        CostQuery::new(period, self.metric)
    }

    fn service_query(&self, period: Period) -> CostQuery {
        CostQuery::new(period, self.metric).grouped_by(Dimension::Service)
    }

    /// Monthly totals plus a service breakdown of the last period.
    ///
    /// The breakdown query runs in the same batch as the totals.
    #[instrument(skip(self, options), fields(top_n = options.top_n))]
    pub async fn monthly(&self, options: &MonthlyOptions) -> Result<MonthlyComparison, ReportError> {
        let periods = options.schedule.periods()?;
        let last = periods
            .last()
            .cloned()
            .ok_or_else(|| CoreError::InvalidPeriod("schedule has no periods".to_string()))?;

        let mut queries: Vec<CostQuery> =
            periods.into_iter().map(|p| self.total_query(p)).collect();
        queries.push(self.service_query(last));

        let fetches = self.pipeline.execute(&queries).await?;
        let (breakdown, totals) = fetches
            .split_last()
            .ok_or_else(|| CoreError::InvalidPeriod("schedule has no periods".to_string()))?;

        let comparison = MonthlyComparison::from_fetches(totals, breakdown, options.top_n);
        info!(
            periods = comparison.period_count(),
            warnings = comparison.warnings.len(),
            "Monthly comparison ready"
        );
        Ok(comparison)
    }

    /// Filtered per-service cost for every period.
    #[instrument(skip(self, options), fields(filter = %options.filter))]
    pub async fn compute(&self, options: &ComputeOptions) -> Result<ComputeHistory, ReportError> {
        let queries: Vec<CostQuery> = options
            .schedule
            .periods()?
            .into_iter()
            .map(|p| self.service_query(p))
            .collect();

        let fetches = self.pipeline.execute(&queries).await?;
        let history = ComputeHistory::from_fetches(&fetches, &options.filter);
        info!(months = history.months.len(), "Compute history ready");
        Ok(history)
    }

    /// Support costs for one month.
    #[instrument(skip(self, options), fields(month = %options.month))]
    pub async fn support(&self, options: &SupportOptions) -> Result<SupportReport, ReportError> {
        let period = Period::month(options.month)?;
        let fetch = self.pipeline.execute_one(&self.service_query(period)).await?;
        let report = SupportReport::from_fetch(&fetch, &options.filter, options.top_n)?;
        info!(matches = report.matches.len(), "Support report ready");
        Ok(report)
    }
}
