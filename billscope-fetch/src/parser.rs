//! Cost Explorer response parsing.
//!
//! `aws ce get-cost-and-usage --output json` returns:
//!
//! ```json
//! {
//!   "ResultsByTime": [{
//!     "TimePeriod": {"Start": "2025-12-01", "End": "2026-01-01"},
//!     "Total": {"BlendedCost": {"Amount": "123.45", "Unit": "USD"}},
//!     "Groups": [{"Keys": ["Amazon S3"], "Metrics": {"BlendedCost": {"Amount": "1.2", "Unit": "USD"}}}],
//!     "Estimated": false
//!   }],
//!   "NextPageToken": "..."
//! }
//! ```
//!
//! Missing `ResultsByTime`, `Groups`, or metric entries mean "no records".

use billscope_core::CostRecord;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::query::{CostQuery, Metric};

/// Dimension value used when a group carries no keys.
const UNKNOWN_DIMENSION: &str = "(unknown)";

// ============================================================================
// Response Structures
// ============================================================================

/// Top-level response envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CostAndUsageResponse {
    /// One entry per time bucket.
    #[serde(default)]
    pub results_by_time: Option<Vec<ResultByTime>>,
    /// Token for the next page, if truncated.
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// One time bucket.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultByTime {
    /// Bucket range.
    #[serde(default)]
    pub time_period: Option<TimePeriod>,
    /// Ungrouped totals by metric.
    #[serde(default)]
    pub total: Option<HashMap<String, MetricValue>>,
    /// Grouped metrics.
    #[serde(default)]
    pub groups: Option<Vec<Group>>,
    /// Whether the figures are still estimates.
    #[serde(default)]
    pub estimated: bool,
}

/// Bucket range.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimePeriod {
    /// Inclusive start date.
    pub start: String,
    /// Exclusive end date.
    pub end: String,
}

/// One group within a bucket.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Group {
    /// Dimension values; the first one names the group.
    #[serde(default)]
    pub keys: Vec<String>,
    /// Metrics for the group.
    #[serde(default)]
    pub metrics: HashMap<String, MetricValue>,
}

/// A metric amount.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricValue {
    /// Amount, normally a decimal string.
    #[serde(default)]
    pub amount: Option<Value>,
    /// Currency unit.
    #[serde(default)]
    pub unit: Option<String>,
}

// ============================================================================
// Parsed Page
// ============================================================================

/// Records from one response page.
#[derive(Debug, Default)]
pub struct CostPage {
    /// Parsed records.
    pub records: Vec<CostRecord>,
    /// Token for the next page.
    pub next_page_token: Option<String>,
    /// True if any bucket was marked as estimated.
    pub estimated: bool,
}

// ============================================================================
// Parsers
// ============================================================================

/// Parses a Cost Explorer JSON response for `query`.
///
/// Ungrouped queries produce one record per bucket, labelled with the
/// period label. Grouped queries produce one record per group.
pub fn parse_cost_response(json_str: &str, query: &CostQuery) -> Result<CostPage, FetchError> {
    debug!(len = json_str.len(), grouped = query.group_by.is_some(), "Parsing cost response");

    let response: CostAndUsageResponse = serde_json::from_str(json_str).map_err(|e| {
        warn!(error = %e, "Failed to parse cost response JSON");
        FetchError::InvalidResponse(format!("Invalid JSON: {e}"))
    })?;

    let mut page = CostPage {
        next_page_token: response.next_page_token.filter(|t| !t.is_empty()),
        ..CostPage::default()
    };

    for bucket in response.results_by_time.unwrap_or_default() {
        page.estimated |= bucket.estimated;

        if query.group_by.is_some() {
            for group in bucket.groups.unwrap_or_default() {
                let dimension = group
                    .keys
                    .first()
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_DIMENSION.to_string());
                if let Some(value) = select_metric(&group.metrics, query.metric) {
                    let amount = parse_amount(value, &dimension)?;
                    page.records.push(CostRecord::new(dimension, amount));
                }
            }
        } else if let Some(total) = &bucket.total {
            if let Some(value) = select_metric(total, query.metric) {
                let amount = parse_amount(value, &query.period.label)?;
                page.records.push(CostRecord::new(query.period.label.clone(), amount));
            }
        }
    }

    debug!(records = page.records.len(), estimated = page.estimated, "Parsed cost response");
    Ok(page)
}

/// Looks up the requested metric, tolerating either naming style.
fn select_metric(metrics: &HashMap<String, MetricValue>, metric: Metric) -> Option<&MetricValue> {
    metrics
        .get(metric.response_key())
        .or_else(|| metrics.get(metric.cli_name()))
}

/// Parses an amount. Anything that is not a finite number is malformed.
fn parse_amount(value: &MetricValue, dimension: &str) -> Result<f64, FetchError> {
    let malformed = |raw: String| FetchError::MalformedAmount {
        value: raw,
        dimension: dimension.to_string(),
    };

    let amount = match &value.amount {
        Some(Value::String(text)) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| malformed(text.clone()))?,
        Some(Value::Number(number)) => number
            .as_f64()
            .ok_or_else(|| malformed(number.to_string()))?,
        Some(other) => return Err(malformed(other.to_string())),
        None => return Err(malformed(String::new())),
    };

    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(malformed(amount.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================
