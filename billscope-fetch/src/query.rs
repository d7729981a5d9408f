//! Billing query description.
//!
//! A [`CostQuery`] names one period, the cost metric, and an optional
//! grouping dimension. Granularity is always monthly.

use billscope_core::Period;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Time granularity requested from the billing API.
pub const GRANULARITY: &str = "MONTHLY";

// ============================================================================
// Metric
// ============================================================================

/// Cost metric to request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Blended cost (the default).
    #[default]
    BlendedCost,
    /// Unblended cost.
    UnblendedCost,
    /// Amortized cost.
    AmortizedCost,
    /// Net unblended cost.
    NetUnblendedCost,
    /// Net amortized cost.
    NetAmortizedCost,
}

impl Metric {
    /// The value passed to `--metrics`.
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::BlendedCost => "BLENDED_COST",
            Self::UnblendedCost => "UNBLENDED_COST",
            Self::AmortizedCost => "AMORTIZED_COST",
            Self::NetUnblendedCost => "NET_UNBLENDED_COST",
            Self::NetAmortizedCost => "NET_AMORTIZED_COST",
        }
    }

    /// The key the metric appears under in the response.
    pub fn response_key(&self) -> &'static str {
        match self {
            Self::BlendedCost => "BlendedCost",
            Self::UnblendedCost => "UnblendedCost",
            Self::AmortizedCost => "AmortizedCost",
            Self::NetUnblendedCost => "NetUnblendedCost",
            Self::NetAmortizedCost => "NetAmortizedCost",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.response_key())
    }
}

// ============================================================================
// Dimension
// ============================================================================

/// Attribute to group costs by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Service name (e.g. "Amazon Simple Storage Service").
    Service,
}

impl Dimension {
    /// The dimension key understood by the billing API.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Service => "SERVICE",
        }
    }
}

// ============================================================================
// Cost Query
// ============================================================================

/// One billing query for one period.
#[derive(Debug, Clone, PartialEq)]
pub struct CostQuery {
    /// The period to query.
    pub period: Period,
    /// The cost metric.
    pub metric: Metric,
    /// Optional grouping dimension.
    pub group_by: Option<Dimension>,
}

impl CostQuery {
    /// Creates an ungrouped query.
    pub fn new(period: Period, metric: Metric) -> Self {
        Self {
            period,
            metric,
            group_by: None,
        }
    }

    /// Groups the query by `dimension`.
    #[must_use]
    pub fn grouped_by(mut self, dimension: Dimension) -> Self {
        self.group_by = Some(dimension);
        self
    }

    /// The `--group-by` JSON argument, if grouped.
    pub fn group_by_json(&self) -> Option<String> {
        self.group_by.map(|dimension| {
            serde_json::json!([{ "Type": "DIMENSION", "Key": dimension.key() }]).to_string()
        })
    }

    /// Arguments for `aws ce get-cost-and-usage`.
    pub fn to_cli_args(&self) -> Vec<String> {
        let mut args = vec![
            "ce".to_string(),
            "get-cost-and-usage".to_string(),
            "--time-period".to_string(),
            format!(
                "Start={},End={}",
                self.period.start.format("%Y-%m-%d"),
                self.period.end.format("%Y-%m-%d")
            ),
            "--granularity".to_string(),
            GRANULARITY.to_string(),
            "--metrics".to_string(),
            self.metric.cli_name().to_string(),
        ];

        if let Some(group_by) = self.group_by_json() {
            args.push("--group-by".to_string());
            args.push(group_by);
        }

        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billscope_core::YearMonth;

    fn december() -> Period {
        Period::month(YearMonth::new(2025, 12).unwrap()).unwrap()
    }

    #[test]
    fn test_ungrouped_args() {
        let query = CostQuery::new(december(), Metric::BlendedCost);
        assert_eq!(
            query.to_cli_args(),
            vec![
                "ce",
                "get-cost-and-usage",
                "--time-period",
                "Start=2025-12-01,End=2026-01-01",
                "--granularity",
                "MONTHLY",
                "--metrics",
                "BLENDED_COST",
            ]
        );
    }

    #[test]
    fn test_grouped_args() {
        let query = CostQuery::new(december(), Metric::UnblendedCost).grouped_by(Dimension::Service);
        let args = query.to_cli_args();
        assert_eq!(args[7], "UNBLENDED_COST");
        assert_eq!(args[8], "--group-by");
        assert_eq!(args[9], r#"[{"Key":"SERVICE","Type":"DIMENSION"}]"#);
    }

    #[test]
    fn test_metric_names() {
        assert_eq!(Metric::default(), Metric::BlendedCost);
        assert_eq!(Metric::BlendedCost.response_key(), "BlendedCost");
        assert_eq!(Metric::AmortizedCost.cli_name(), "AMORTIZED_COST");
    }
}
