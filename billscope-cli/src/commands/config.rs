//! Config command - show configuration.

use anyhow::Result;
use billscope_config::{default_config_dir, Config, FileFormat};
use clap::{Args, Subcommand};

use super::load_config;
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration.
    Show,

    /// Show configuration paths.
    Path,
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli).await,
        ConfigAction::Path => show_paths(cli),
    }
}

async fn show_config(cli: &Cli) -> Result<()> {
    let config = load_config(cli).await?;

    match cli.format {
        OutputFormat::Text => print!("{}", FileFormat::Yaml.render(&config)?),
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&config)?);
        }
    }

    Ok(())
}

fn show_paths(cli: &Cli) -> Result<()> {
    let config_dir = default_config_dir();
    let config_file = cli.config.clone().unwrap_or_else(Config::default_path);
    let exists = config_file.exists();

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "-".repeat(40));
            println!();
            println!("Config dir:  {}", config_dir.display());
            println!(
                "Config file: {}{}",
                config_file.display(),
                if exists { "" } else { " (not found, using defaults)" }
            );
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "config_file": config_file.display().to_string(),
                "exists": exists,
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}
