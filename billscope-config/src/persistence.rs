//! Config file location and parsing.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::ConfigError;

// ============================================================================
// Default Paths
// ============================================================================

/// Returns the default configuration directory.
///
/// - Linux: `$XDG_CONFIG_HOME/billscope` (usually `~/.config/billscope`)
/// - macOS: `~/Library/Application Support/billscope`
/// - Windows: `%APPDATA%\billscope`
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|c| c.join("billscope"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the default config file path.
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.json")
}

// ============================================================================
// File Format
// ============================================================================

/// Config file syntax, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// `.json` and anything unrecognized.
    Json,
    /// `.yaml` or `.yml`.
    Yaml,
}

impl FileFormat {
    /// Detects the format from the file extension.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }

    /// Parses `content` in this format.
    pub fn parse<T: DeserializeOwned>(self, content: &str) -> Result<T, ConfigError> {
        Ok(match self {
            Self::Json => serde_json::from_str(content)?,
            Self::Yaml => serde_yaml::from_str(content)?,
        })
    }

    /// Renders `data` in this format.
    pub fn render<T: Serialize>(self, data: &T) -> Result<String, ConfigError> {
        Ok(match self {
            Self::Json => serde_json::to_string_pretty(data)?,
            Self::Yaml => serde_yaml::to_string(data)?,
        })
    }
}

// ============================================================================
// File Operations
// ============================================================================

/// Loads and parses a config file.
pub async fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let format = FileFormat::from_path(path);
    debug!(path = %path.display(), format = ?format, "Loading config file");

    let content = tokio::fs::read_to_string(path).await?;
    let data = format.parse(&content)?;

    debug!(path = %path.display(), "Config file loaded");
    Ok(data)
}
