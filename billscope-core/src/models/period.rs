//! Reporting periods.
//!
//! - [`YearMonth`] - A calendar month reference (`YYYY-MM`)
//! - [`Period`] - A half-open date range with a display label
//! - [`PeriodSchedule`] - Enumerates the periods a report covers

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

// ============================================================================
// Year/Month
// ============================================================================

/// A calendar month, written as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    /// Calendar year.
    pub year: i32,
    /// Month of the year, 1-12.
    pub month: u32,
}

impl YearMonth {
    /// Creates a month reference, rejecting months outside 1-12.
    pub fn new(year: i32, month: u32) -> Result<Self, CoreError> {
        let ym = Self { year, month };
        ym.validate()?;
        Ok(ym)
    }

    /// Returns the month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Checks that the month is in range and the date is representable.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.first_day().map(|_| ())
    }

    /// First day of the month.
    pub fn first_day(&self) -> Result<NaiveDate, CoreError> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .ok_or_else(|| CoreError::InvalidMonth(format!("{:04}-{:02}", self.year, self.month)))
    }

    /// Returns the month `n` months later.
    pub fn plus_months(&self, n: u32) -> Self {
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(n);
        Self {
            year: index.div_euclid(12) as i32,
            month: (index.rem_euclid(12) + 1) as u32,
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = CoreError;

    /// Accepts `YYYY-MM` or a full `YYYY-MM-DD` date (the day is ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(Self::of(date));
        }

        let (year, month) = trimmed
            .split_once('-')
            .ok_or_else(|| CoreError::InvalidMonth(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| CoreError::InvalidMonth(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| CoreError::InvalidMonth(s.to_string()))?;

        Self::new(year, month).map_err(|_| CoreError::InvalidMonth(s.to_string()))
    }
}

impl TryFrom<String> for YearMonth {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

// ============================================================================
// Period
// ============================================================================

/// A half-open date range `[start, end)` with a human-readable label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// First day included in the period.
    pub start: NaiveDate,
    /// First day after the period.
    pub end: NaiveDate,
    /// Display label (e.g. "December 2025").
    pub label: String,
}

impl Period {
    /// Creates a period, rejecting empty or inverted ranges.
    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
        label: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let period = Self {
            start,
            end,
            label: label.into(),
        };
        period.validate()?;
        Ok(period)
    }

    /// The calendar month `ym`, labelled like "August 2025".
    pub fn month(ym: YearMonth) -> Result<Self, CoreError> {
        Self::months(ym, 1)
    }

    /// `span` consecutive calendar months starting at `ym`.
    ///
    /// Single months are labelled "August 2025"; longer spans are labelled
    /// "August 2025 - October 2025".
    pub fn months(ym: YearMonth, span: u32) -> Result<Self, CoreError> {
        if span == 0 {
            return Err(CoreError::InvalidPeriod(format!(
                "span starting {ym} must cover at least one month"
            )));
        }

        let start = ym.first_day()?;
        let end = ym.plus_months(span).first_day()?;
        let label = if span == 1 {
            month_label(start)
        } else {
            let last = ym.plus_months(span - 1).first_day()?;
            format!("{} - {}", month_label(start), month_label(last))
        };

        Self::new(start, end, label)
    }

    /// Checks the range is non-empty and the label is set.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.start >= self.end {
            return Err(CoreError::InvalidPeriod(format!(
                "'{}' starts on {} but ends on {}",
                self.label, self.start, self.end
            )));
        }
        if self.label.trim().is_empty() {
            return Err(CoreError::InvalidPeriod(format!(
                "period starting {} has an empty label",
                self.start
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}, {})", self.label, self.start, self.end)
    }
}

fn month_label(first_day: NaiveDate) -> String {
    first_day.format("%B %Y").to_string()
}

// ============================================================================
// Period Schedule
// ============================================================================

fn default_step() -> u32 {
    1
}

/// The ordered list of periods a report covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PeriodSchedule {
    /// `count` consecutive periods starting at `start`, each `step` months long.
    Monthly {
        /// First month of the first period.
        start: YearMonth,
        /// Number of periods.
        count: u32,
        /// Months per period.
        #[serde(default = "default_step")]
        step: u32,
    },
    /// Periods listed verbatim.
    Explicit {
        /// Periods in chronological order.
        periods: Vec<Period>,
    },
}

impl PeriodSchedule {
    /// `count` single-month periods starting at `start`.
    pub fn monthly(start: YearMonth, count: u32) -> Self {
        Self::Monthly {
            start,
            count,
            step: 1,
        }
    }

    /// Enumerates the periods in chronological order.
    pub fn periods(&self) -> Result<Vec<Period>, CoreError> {
        match self {
            Self::Monthly { start, count, step } => {
                if *count == 0 {
                    return Err(CoreError::InvalidPeriod(
                        "schedule must contain at least one period".to_string(),
                    ));
                }
                if *step == 0 {
                    return Err(CoreError::InvalidPeriod(
                        "schedule step must be at least one month".to_string(),
                    ));
                }
                (0..*count)
                    .map(|i| Period::months(start.plus_months(i * step), *step))
                    .collect()
            }
            Self::Explicit { periods } => {
                if periods.is_empty() {
                    return Err(CoreError::InvalidPeriod(
                        "schedule must contain at least one period".to_string(),
                    ));
                }
                for period in periods {
                    period.validate()?;
                }
                if let Some(pair) = periods.windows(2).find(|w| w[1].start < w[0].start) {
                    return Err(CoreError::InvalidPeriod(format!(
                        "'{}' is listed after '{}' but starts earlier",
                        pair[1].label, pair[0].label
                    )));
                }
                // Reports key rows by label.
                let mut seen = HashSet::new();
                if let Some(dup) = periods.iter().find(|p| !seen.insert(p.label.as_str())) {
                    return Err(CoreError::InvalidPeriod(format!(
                        "label '{}' is used by more than one period",
                        dup.label
                    )));
                }
                Ok(periods.clone())
            }
        }
    }

    /// Number of periods in the schedule.
    pub fn len(&self) -> usize {
        match self {
            Self::Monthly { count, .. } => *count as usize,
            Self::Explicit { periods } => periods.len(),
        }
    }

    /// Returns true if the schedule has no periods.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_year_month_parse() {
        assert_eq!("2025-08".parse::<YearMonth>().unwrap(), ym(2025, 8));
        assert_eq!("2025-12-01".parse::<YearMonth>().unwrap(), ym(2025, 12));
        assert!("2025-13".parse::<YearMonth>().is_err());
        assert!("August".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_plus_months_wraps_year() {
        assert_eq!(ym(2025, 12).plus_months(1), ym(2026, 1));
        assert_eq!(ym(2025, 7).plus_months(17), ym(2026, 12));
        assert_eq!(ym(2025, 1).plus_months(0), ym(2025, 1));
    }

    #[test]
    fn test_month_period() {
        let period = Period::month(ym(2025, 12)).unwrap();
        assert_eq!(period.start, date(2025, 12, 1));
        assert_eq!(period.end, date(2026, 1, 1));
        assert_eq!(period.label, "December 2025");
    }

    #[test]
    fn test_multi_month_label() {
        let period = Period::months(ym(2025, 8), 3).unwrap();
        assert_eq!(period.label, "August 2025 - October 2025");
        assert_eq!(period.end, date(2025, 11, 1));
    }

    #[test]
    fn test_inverted_period_rejected() {
        let result = Period::new(date(2025, 9, 1), date(2025, 8, 1), "Backwards");
        assert!(matches!(result, Err(CoreError::InvalidPeriod(_))));

        let empty = Period::new(date(2025, 9, 1), date(2025, 9, 1), "Empty");
        assert!(empty.is_err());
    }

    #[test]
    fn test_monthly_schedule() {
        let schedule = PeriodSchedule::monthly(ym(2025, 8), 5);
        let periods = schedule.periods().unwrap();
        let labels: Vec<_> = periods.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "August 2025",
                "September 2025",
                "October 2025",
                "November 2025",
                "December 2025"
            ]
        );
        assert_eq!(periods[4].end, date(2026, 1, 1));
    }

    #[test]
    fn test_stepped_schedule() {
        let schedule = PeriodSchedule::Monthly {
            start: ym(2025, 1),
            count: 2,
            step: 3,
        };
        let periods = schedule.periods().unwrap();
        assert_eq!(periods[0].label, "January 2025 - March 2025");
        assert_eq!(periods[1].start, date(2025, 4, 1));
    }

    #[test]
    fn test_empty_schedule_rejected() {
        assert!(PeriodSchedule::monthly(ym(2025, 1), 0).periods().is_err());
        assert!(
            PeriodSchedule::Explicit { periods: vec![] }
                .periods()
                .is_err()
        );
    }

    #[test]
    fn test_explicit_schedule_must_be_chronological() {
        let schedule = PeriodSchedule::Explicit {
            periods: vec![
                Period::month(ym(2025, 9)).unwrap(),
                Period::month(ym(2025, 8)).unwrap(),
            ],
        };
        assert!(schedule.periods().is_err());
    }

    #[test]
    fn test_explicit_schedule_rejects_duplicate_labels() {
        let schedule = PeriodSchedule::Explicit {
            periods: vec![
                Period::new(date(2025, 1, 1), date(2025, 4, 1), "Q1").unwrap(),
                Period::new(date(2025, 4, 1), date(2025, 7, 1), "Q1").unwrap(),
            ],
        };
        let err = schedule.periods().unwrap_err();
        assert!(matches!(err, CoreError::InvalidPeriod(ref msg) if msg.contains("'Q1'")));

        let distinct = PeriodSchedule::Explicit {
            periods: vec![
                Period::new(date(2025, 1, 1), date(2025, 4, 1), "Q1").unwrap(),
                Period::new(date(2025, 4, 1), date(2025, 7, 1), "Q2").unwrap(),
            ],
        };
        assert_eq!(distinct.periods().unwrap().len(), 2);
    }

    #[test]
    fn test_schedule_serde() {
        let json = r#"{"kind":"monthly","start":"2025-07","count":6}"#;
        let schedule: PeriodSchedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule, PeriodSchedule::monthly(ym(2025, 7), 6));

        let bad = r#"{"kind":"monthly","start":"2025-00","count":6}"#;
        assert!(serde_json::from_str::<PeriodSchedule>(bad).is_err());
    }
}
