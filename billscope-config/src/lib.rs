// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # billscope Config
//!
//! Configuration loading for billscope.
//!
//! The config file is read only. It lives at
//! `$XDG_CONFIG_HOME/billscope/config.json` unless `--config` names another
//! file; `.yaml` and `.yml` files are parsed as YAML.
//!
//! ## Example
//!
//! ```json
//! {
//!   "fetch": { "profile": "billing", "max_concurrency": 2 },
//!   "monthly": { "schedule": { "kind": "monthly", "start": "2025-07", "count": 6 } },
//!   "support": { "month": "2025-12" }
//! }
//! ```

pub mod config;
pub mod error;
pub mod persistence;

#[cfg(test)]
mod persistence_tests;

pub use config::{Config, FetchConfig};
pub use error::ConfigError;
pub use persistence::{default_config_dir, default_config_path, load_file, FileFormat};
