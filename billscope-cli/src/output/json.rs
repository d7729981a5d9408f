//! JSON output formatting.

use anyhow::Result;
use billscope_fetch::Metric;
use serde::Serialize;

/// Wrapper naming the report and metric alongside its data.
#[derive(Debug, Serialize)]
pub struct ReportEnvelope<'a, T: Serialize> {
    /// Report name (`monthly`, `compute`, `support`).
    pub report: &'a str,
    /// Cost metric the figures are in.
    pub metric: Metric,
    /// The report model.
    pub data: &'a T,
}

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats a report inside a [`ReportEnvelope`].
    pub fn format_report<T: Serialize>(&self, report: &str, metric: Metric, data: &T) -> Result<String> {
        self.format(&ReportEnvelope { report, metric, data })
    }
}

// ============================================================================
// Tests
// ============================================================================
