//! Error types for report generation.

use billscope_core::CoreError;
use billscope_fetch::FetchError;
use thiserror::Error;

/// Errors that can occur while building a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A fatal fetch error, such as a malformed amount.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The only fetch a report depends on failed.
    #[error("{diagnostic}")]
    SoleFetchFailed {
        /// Period label.
        label: String,
        /// Text reported by the billing source.
        diagnostic: String,
    },

    /// Invalid report parameters.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ReportError {
    /// Returns true if a billing amount could not be parsed.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Fetch(FetchError::MalformedAmount { .. }))
    }
}
