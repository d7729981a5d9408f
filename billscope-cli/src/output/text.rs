//! Fixed-width text reports.

use billscope_core::{Period, ReportEntry};
use billscope_fetch::FetchWarning;
use billscope_reports::{BreakdownSection, ComputeHistory, MonthlyComparison, SupportReport};
use num_format::{Locale, ToFormattedString};

/// Rule width of the monthly comparison.
const WIDE: usize = 80;
/// Rule width of the compute and support reports.
const NARROW: usize = 70;

// ============================================================================
// Number Formatting
// ============================================================================

/// `1234.5` as `1,234.50`. Negative values keep their sign; `-0.0` prints
/// as `0.00`.
pub fn money(value: f64) -> String {
    // -0.0 + 0.0 is 0.0
    let value = value + 0.0;
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let grouped = int_part
        .parse::<u64>()
        .map_or_else(|_| int_part.to_string(), |n| n.to_formatted_string(&Locale::en));
    let sign = if value.is_sign_negative() { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// Like [`money`] but always signed: `+50.00`, `-150.00`.
pub fn signed_money(value: f64) -> String {
    if value < 0.0 {
        money(value)
    } else {
        format!("+{}", money(value))
    }
}

/// Signed percentage with one decimal: `+50.0%`.
pub fn signed_percent(value: f64) -> String {
    let value = value + 0.0;
    format!("{value:+.1}%")
}

fn rule(ch: char, width: usize) -> String {
    ch.to_string().repeat(width)
}

fn months_phrase(count: usize) -> String {
    if count == 1 {
        "Last Month".to_string()
    } else {
        format!("Last {count} Months")
    }
}

// ============================================================================
// Text Formatter
// ============================================================================

/// Renders reports as plain fixed-width text.
#[derive(Debug, Default)]
pub struct TextFormatter;

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new() -> Self {
        Self
    }

    /// Warning lines for periods that could not be fetched.
    pub fn format_warnings(&self, warnings: &[FetchWarning]) -> Vec<String> {
        warnings.iter().map(|w| format!("Warning: {w}")).collect()
    }

    /// Monthly comparison followed by the service breakdown.
    pub fn format_monthly(&self, report: &MonthlyComparison) -> String {
        let mut lines = self.format_warnings(&report.warnings);
        let stats = &report.stats;

        lines.push(String::new());
        lines.push(rule('=', WIDE));
        lines.push(format!("AWS Cost Comparison - {}", months_phrase(report.period_count())));
        lines.push(rule('=', WIDE));

        lines.push(String::new());
        lines.push(format!("{:<20} {:>15} {:>15} {:>15}", "Month", "Cost", "Change", "% Change"));
        lines.push(rule('-', 65));
        for row in &stats.rows {
            let change = row.change.map_or_else(|| "-".to_string(), |c| format!("${}", signed_money(c)));
            let percent = row.percent_change.map_or_else(|| "-".to_string(), signed_percent);
            lines.push(format!(
                "{:<20} ${:>14} {:>15} {:>15}",
                row.label,
                money(row.cost),
                change,
                percent
            ));
        }
        lines.push(rule('-', 65));
        lines.push(format!("{:<20} ${:>14}", "Total", money(stats.total)));
        lines.push(format!("{:<20} ${:>14}", "Average", money(stats.average)));
        if let Some(trend) = &stats.trend {
            lines.push(format!(
                "{:<20} ${:>14} ({})",
                "Trend (last 2 vs first 2)",
                money(trend.change),
                signed_percent(trend.percent_change)
            ));
        }

        lines.push(String::new());
        lines.push(rule('=', WIDE));
        lines.push(format!("{} - Top Services Breakdown", report.breakdown.period_label()));
        lines.push(rule('=', WIDE));

        match &report.breakdown {
            BreakdownSection::Available(breakdown) => {
                lines.push(String::new());
                lines.push(format!("{:<50} {:>15}", "Service", "Cost"));
                lines.push(rule('-', 65));
                for entry in breakdown.displayed() {
                    lines.push(format!("{:<50} ${:>14}", entry.label, money(entry.cost)));
                }
                lines.push(rule('-', 65));
                lines.push(format!(
                    "{:<50} ${:>14}",
                    "Total (all services)",
                    money(breakdown.positive_total())
                ));
            }
            BreakdownSection::Unavailable { diagnostic, .. } => {
                lines.push(format!("Could not get service breakdown: {diagnostic}"));
            }
        }

        lines.push(String::new());
        lines.push(rule('=', WIDE));
        lines.join("\n")
    }

    /// EC2 compute cost per month with lowest month and average.
    pub fn format_compute(&self, history: &ComputeHistory) -> String {
        let mut lines = self.format_warnings(&history.warnings);

        lines.push(String::new());
        lines.push(rule('=', NARROW));
        lines.push(format!("EC2 Compute Costs - {}", months_phrase(history.months.len())));
        lines.push(rule('=', NARROW));

        lines.push(String::new());
        lines.push(format!("{:<20} {:>20}", "Month", "EC2 Compute Cost"));
        lines.push(rule('-', 40));
        for entry in &history.months {
            lines.push(format!("{:<20} ${:>19}", entry.label, money(entry.cost)));
        }
        lines.push(rule('-', 40));

        if let Some(lowest) = &history.lowest {
            lines.push(String::new());
            lines.push(format!("{:<20} ${:>19}", "Lowest EC2 Compute Cost:", money(lowest.cost)));
            lines.push(format!("{:<20} {:>20}", "Month:", lowest.label));
            lines.push(format!("{:<20} ${:>19}", "Average:", money(history.average)));
        }

        lines.push(String::new());
        lines.push(rule('=', NARROW));
        lines.join("\n")
    }

    /// Support costs and the top services for context.
    pub fn format_support(&self, report: &SupportReport) -> String {
        let label = &report.period_label;
        let mut lines = vec![
            String::new(),
            rule('=', NARROW),
            format!("{label} - AWS Support Costs"),
            rule('=', NARROW),
        ];

        if report.has_matches() {
            lines.extend(report.matches.iter().map(Self::support_row));
            lines.push(rule('-', NARROW));
            lines.push(format!("{:<50} ${:>15}", "Total Support Costs", money(report.subtotal)));
        } else {
            lines.push(format!("No AWS Support costs found in {label}"));
        }

        lines.push(String::new());
        lines.push(rule('=', NARROW));
        lines.push(format!("{label} - Top {} Services (for context)", report.top_n));
        lines.push(rule('=', NARROW));
        lines.extend(report.context().into_iter().map(Self::support_row));

        lines.join("\n")
    }

    fn support_row(entry: &ReportEntry) -> String {
        format!("{:<50} ${:>15}", entry.label, money(entry.cost))
    }

    /// Period listing of a schedule.
    pub fn format_periods(&self, report: &str, periods: &[Period]) -> String {
        let mut lines = vec![
            format!("Periods for the {report} report"),
            rule('-', 50),
            format!("{:<26} {:<11} {}", "Label", "Start", "End"),
        ];
        for period in periods {
            lines.push(format!(
                "{:<26} {:<11} {}",
                period.label,
                period.start.format("%Y-%m-%d").to_string(),
                period.end.format("%Y-%m-%d")
            ));
        }
        lines.join("\n")
    }
}
