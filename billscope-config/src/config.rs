//! Configuration management.

use billscope_fetch::{FetchSettings, Metric};
use billscope_reports::{ComputeOptions, MonthlyOptions, SupportOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::persistence::{default_config_path, load_file};

/// Application configuration.
///
/// Every section is optional; missing values take the defaults below.
/// Filters are written as single-key maps (`filter: {contains: ec2}`) in
/// both JSON and YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Billing CLI settings.
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Monthly comparison parameters.
    #[serde(default)]
    pub monthly: MonthlyOptions,
    /// EC2 compute history parameters.
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub compute: ComputeOptions,
    /// Support report parameters.
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub support: SupportOptions,
}

/// Billing CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Executable to run.
    #[serde(default = "default_command")]
    pub command: String,
    /// Credentials profile.
    #[serde(default)]
    pub profile: Option<String>,
    /// Region override.
    #[serde(default)]
    pub region: Option<String>,
    /// Cost metric.
    #[serde(default)]
    pub metric: Metric,
    /// Per-query timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum number of queries in flight.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

fn default_command() -> String {
    FetchSettings::default().command
}

fn default_timeout_secs() -> u64 {
    billscope_fetch::context::DEFAULT_TIMEOUT.as_secs()
}

fn default_max_concurrency() -> usize {
    billscope_fetch::context::DEFAULT_MAX_CONCURRENCY
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            profile: None,
            region: None,
            metric: Metric::default(),
            timeout_secs: default_timeout_secs(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

impl FetchConfig {
    /// Converts to the settings the fetch layer consumes.
    pub fn to_settings(&self) -> FetchSettings {
        FetchSettings {
            command: self.command.clone(),
            profile: self.profile.clone(),
            region: self.region.clone(),
            metric: self.metric,
            timeout: Duration::from_secs(self.timeout_secs),
            max_concurrency: self.max_concurrency,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.command.trim().is_empty() {
            return Err(ConfigError::invalid("fetch.command", "must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("fetch.timeout_secs", "must be at least 1"));
        }
        if self.max_concurrency == 0 {
            return Err(ConfigError::invalid("fetch.max_concurrency", "must be at least 1"));
        }
        Ok(())
    }
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        default_config_path()
    }

    /// Loads configuration.
    ///
    /// An explicit `path` must exist. Without one, the default path is
    /// tried and a missing file means defaults.
    pub async fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Self::load_from(path).await?
            }
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::load_from(&path).await?
                } else {
                    debug!(path = %path.display(), "Config file not found, using defaults");
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a specific path without validating it.
    pub async fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config: Config = load_file(path).await?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Checks every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fetch.validate()?;

        self.monthly.schedule.periods()?;
        if self.monthly.top_n == 0 {
            return Err(ConfigError::invalid("monthly.top_n", "must be at least 1"));
        }

        self.compute.schedule.periods()?;
        self.compute.filter.validate()?;

        self.support.month.validate()?;
        self.support.filter.validate()?;
        if self.support.top_n == 0 {
            return Err(ConfigError::invalid("support.top_n", "must be at least 1"));
        }

        Ok(())
    }

    /// Fetch settings derived from the `fetch` section.
    pub fn fetch_settings(&self) -> FetchSettings {
        self.fetch.to_settings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billscope_core::{DimensionFilter, PeriodSchedule, YearMonth};

    #[test]
    fn test_defaults_match_builtin_reports() {
        let config = Config::default();
        config.validate().unwrap();

        let monthly = config.monthly.schedule.periods().unwrap();
        assert_eq!(monthly.first().unwrap().label, "August 2025");
        assert_eq!(monthly.len(), 5);
        assert_eq!(config.monthly.top_n, 15);

        let compute = config.compute.schedule.periods().unwrap();
        assert_eq!(compute.first().unwrap().label, "July 2025");
        assert_eq!(compute.last().unwrap().label, "December 2025");
        assert_eq!(config.compute.filter, DimensionFilter::ec2_compute());

        assert_eq!(config.support.month, YearMonth::new(2025, 11).unwrap());
        assert_eq!(config.support.top_n, 10);
    }

    #[test]
    fn test_fetch_settings() {
        let mut config = Config::default();
        config.fetch.profile = Some("billing".to_string());
        config.fetch.timeout_secs = 5;

        let settings = config.fetch_settings();
        assert_eq!(settings.command, "aws");
        assert_eq!(settings.profile.as_deref(), Some("billing"));
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.max_concurrency, 4);
    }

    #[test]
    fn test_validate_rejects_zero_months() {
        let mut config = Config::default();
        config.monthly.schedule = PeriodSchedule::monthly(YearMonth::new(2025, 1).unwrap(), 0);
        assert!(matches!(config.validate(), Err(ConfigError::Core(_))));
    }

    #[test]
    fn test_validate_rejects_zero_top_n() {
        let mut config = Config::default();
        config.support.top_n = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "support.top_n", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_filter() {
        let mut config = Config::default();
        config.compute.filter = DimensionFilter::contains("  ");
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.fetch.max_concurrency = 0;
        assert!(config.validate().is_err());
    }
}
