//! Fetch error types.

use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for fetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The billing CLI could not be run or exited unsuccessfully.
    #[error("Process error: {0}")]
    Process(#[from] ProcessError),

    /// The response envelope did not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A cost amount could not be parsed as a number.
    #[error("Malformed amount '{value}' for {dimension}")]
    MalformedAmount {
        /// The raw amount text.
        value: String,
        /// The dimension value the amount belonged to.
        dimension: String,
    },

    /// Core error.
    #[error("Core error: {0}")]
    Core(#[from] billscope_core::CoreError),
}

impl FetchError {
    /// Returns true if the error breaks the billing interface contract and
    /// must abort the run instead of being treated as a zero-cost period.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MalformedAmount { .. })
    }

    /// The text reported to the user when a fetch fails.
    ///
    /// For a non-zero exit this is the CLI's own stderr.
    pub fn diagnostic(&self) -> String {
        match self {
            Self::Process(ProcessError::NonZeroExit { stderr, code }) => {
                let stderr = stderr.trim();
                if stderr.is_empty() {
                    format!("exited with code {code}")
                } else {
                    stderr.to_string()
                }
            }
            other => other.to_string(),
        }
    }
}

// ============================================================================
// Process Error
// ============================================================================

/// Error type for process operations.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Command not found.
    #[error("Command not found: {0}")]
    NotFound(String),

    /// Command timed out.
    #[error("Command timed out after {0:?}")]
    Timeout(Duration),

    /// Non-zero exit code.
    #[error("Command exited with code {code}: {stderr}")]
    NonZeroExit {
        /// Exit code from the process.
        code: i32,
        /// Standard error output.
        stderr: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
