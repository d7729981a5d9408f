//! Config file loading tests.

use std::path::PathBuf;
use tempfile::TempDir;

use crate::config::Config;
use crate::error::ConfigError;
use crate::persistence::{load_file, FileFormat};
use billscope_core::{DimensionFilter, PeriodSchedule};
use billscope_fetch::Metric;

// ============================================================================
// Format Detection
// ============================================================================

#[test]
fn test_format_from_extension() {
    assert_eq!(FileFormat::from_path(&PathBuf::from("a/config.json")), FileFormat::Json);
    assert_eq!(FileFormat::from_path(&PathBuf::from("config.yaml")), FileFormat::Yaml);
    assert_eq!(FileFormat::from_path(&PathBuf::from("config.YML")), FileFormat::Yaml);
    assert_eq!(FileFormat::from_path(&PathBuf::from("config")), FileFormat::Json);
}

// ============================================================================
// Loading
// ============================================================================

#[tokio::test]
async fn test_load_partial_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            "fetch": {"profile": "billing", "metric": "unblended_cost"},
            "monthly": {"schedule": {"kind": "monthly", "start": "2025-01", "count": 3}, "top_n": 5}
        }"#,
    )
    .unwrap();

    let config = Config::load(Some(&path)).await.unwrap();

    assert_eq!(config.fetch.profile.as_deref(), Some("billing"));
    assert_eq!(config.fetch.metric, Metric::UnblendedCost);
    assert_eq!(config.fetch.timeout_secs, 60);
    assert_eq!(config.monthly.top_n, 5);

    let periods = config.monthly.schedule.periods().unwrap();
    assert_eq!(periods.len(), 3);
    assert_eq!(periods[2].label, "March 2025");

    // Untouched sections keep their defaults.
    assert_eq!(config.support.top_n, 10);
}

#[tokio::test]
async fn test_load_yaml_with_explicit_periods() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.yaml");
    std::fs::write(
        &path,
        r#"
compute:
  schedule:
    kind: explicit
    periods:
      - start: "2025-01-01"
        end: "2025-04-01"
        label: Q1 2025
      - start: "2025-04-01"
        end: "2025-07-01"
        label: Q2 2025
  filter:
    contains: ec2
support:
  month: "2025-10"
"#,
    )
    .unwrap();

    let config = Config::load(Some(&path)).await.unwrap();

    assert!(matches!(config.compute.schedule, PeriodSchedule::Explicit { .. }));
    assert_eq!(config.compute.schedule.len(), 2);
    assert_eq!(config.compute.filter, DimensionFilter::contains("ec2"));
    assert_eq!(config.support.month.to_string(), "2025-10");
}

#[tokio::test]
async fn test_yaml_and_json_filters_share_the_map_form() {
    let temp_dir = TempDir::new().unwrap();
    let yaml_path = temp_dir.path().join("config.yml");
    std::fs::write(
        &yaml_path,
        r#"
compute:
  filter:
    any_of:
      - contains: Elastic Compute Cloud - Compute
      - contains: EC2-Instance
support:
  filter: all
"#,
    )
    .unwrap();
    let json_path = temp_dir.path().join("config.json");
    std::fs::write(
        &json_path,
        r#"{"compute": {"filter": {"any_of": [
            {"contains": "Elastic Compute Cloud - Compute"},
            {"contains": "EC2-Instance"}
        ]}}, "support": {"filter": "all"}}"#,
    )
    .unwrap();

    let from_yaml = Config::load(Some(&yaml_path)).await.unwrap();
    let from_json = Config::load(Some(&json_path)).await.unwrap();

    assert_eq!(from_yaml.compute.filter, DimensionFilter::ec2_compute());
    assert_eq!(from_yaml.support.filter, DimensionFilter::All);
    assert_eq!(from_yaml, from_json);
}

#[test]
fn test_rendered_yaml_parses_back() {
    let mut config = Config::default();
    config.support.filter = DimensionFilter::contains("business");

    let rendered = FileFormat::Yaml.render(&config).unwrap();
    assert!(rendered.contains("contains: business"));
    assert!(!rendered.contains('!'));

    let parsed: Config = FileFormat::Yaml.parse(&rendered).unwrap();
    assert_eq!(parsed, config);
}

#[tokio::test]
async fn test_explicit_missing_path_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.json");

    let result = Config::load(Some(&path)).await;
    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

#[tokio::test]
async fn test_invalid_values_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, r#"{"monthly": {"top_n": 0}}"#).unwrap();

    let result = Config::load(Some(&path)).await;
    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
}

#[tokio::test]
async fn test_syntax_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result: Result<Config, _> = load_file(&path).await;
    assert!(matches!(result, Err(ConfigError::Json(_))));
}

#[test]
fn test_render_yaml() {
    let rendered = FileFormat::Yaml.render(&Config::default()).unwrap();
    assert!(rendered.contains("top_n: 15"));
    assert!(rendered.contains("kind: monthly"));
}
