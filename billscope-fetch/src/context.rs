//! Fetch context providing access to host APIs.
//!
//! The fetch context is shared by cost sources and provides the process
//! runner plus the settings that shape each billing CLI invocation.

use std::sync::Arc;
use std::time::Duration;

use crate::host::process::ProcessRunner;
use crate::query::Metric;

/// Default billing CLI executable.
pub const DEFAULT_COMMAND: &str = "aws";

/// Default number of billing queries in flight at once.
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Default per-query timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

// ============================================================================
// Fetch Settings
// ============================================================================

/// Settings for fetch operations.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSettings {
    /// Billing CLI executable.
    pub command: String,
    /// Named credentials profile, passed as `--profile`.
    pub profile: Option<String>,
    /// Region override, passed as `--region`.
    pub region: Option<String>,
    /// Cost metric to request.
    pub metric: Metric,
    /// Timeout for each CLI invocation.
    pub timeout: Duration,
    /// Maximum number of queries in flight.
    pub max_concurrency: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            command: DEFAULT_COMMAND.to_string(),
            profile: None,
            region: None,
            metric: Metric::default(),
            timeout: DEFAULT_TIMEOUT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

// ============================================================================
// Fetch Context
// ============================================================================

/// Context provided to cost sources, giving access to host APIs.
pub struct FetchContext {
    /// Process runner for the billing CLI.
    pub process: Arc<ProcessRunner>,
    /// Fetch settings.
    pub settings: FetchSettings,
}

impl FetchContext {
    /// Creates a new fetch context with default settings.
    pub fn new() -> Self {
        Self::with_settings(FetchSettings::default())
    }

    /// Creates a context with custom settings.
    pub fn with_settings(settings: FetchSettings) -> Self {
        Self {
            process: Arc::new(ProcessRunner::new()),
            settings,
        }
    }

    /// Returns the concurrency limit, never less than one.
    pub fn max_concurrency(&self) -> usize {
        self.settings.max_concurrency.max(1)
    }
}

impl Default for FetchContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FetchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchContext")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context() {
        let ctx = FetchContext::new();
        assert_eq!(ctx.settings.command, "aws");
        assert_eq!(ctx.settings.metric, Metric::BlendedCost);
        assert_eq!(ctx.settings.timeout, DEFAULT_TIMEOUT);
        assert_eq!(ctx.max_concurrency(), DEFAULT_MAX_CONCURRENCY);
    }

    #[test]
    fn test_zero_concurrency_runs_sequentially() {
        let ctx = FetchContext::with_settings(FetchSettings {
            max_concurrency: 0,
            ..FetchSettings::default()
        });
        assert_eq!(ctx.max_concurrency(), 1);
    }
}
