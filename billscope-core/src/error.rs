//! Core error types for `billscope`.

use thiserror::Error;

/// Core error type for `billscope` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A period whose start is not strictly before its end, or a date that
    /// does not exist on the calendar.
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// A month reference that could not be parsed.
    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    /// A dimension filter that can never be evaluated meaningfully.
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
}
