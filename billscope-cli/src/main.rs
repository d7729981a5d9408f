// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! billscope CLI - cloud cost reports from the AWS Cost Explorer CLI.
//!
//! # Examples
//!
//! ```bash
//! # Monthly comparison (default command)
//! billscope
//!
//! # Six months starting in March, top 5 services
//! billscope monthly --start 2025-03 --months 6 --top 5
//!
//! # EC2 compute history as JSON
//! billscope compute --format json --pretty
//!
//! # Support costs for another month and profile
//! billscope support --month 2025-12 --profile billing
//!
//! # Show the periods a report covers
//! billscope periods compute
//! ```

mod commands;
mod output;

use anyhow::Result;
use billscope_reports::ReportError;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{compute, config, monthly, periods, support};

// ============================================================================
// CLI Definition
// ============================================================================

/// billscope CLI - cloud cost reports.
#[derive(Parser)]
#[command(name = "billscope")]
#[command(about = "Monthly and per-service cost reports from the AWS Cost Explorer CLI")]
#[command(long_about = r#"
billscope runs `aws ce get-cost-and-usage` for each period of a report,
aggregates the results, and prints fixed-width tables.

Reports:
  monthly   Cost per month with change, total, average, and trend,
            plus the top services of the last month
  compute   EC2 compute cost per month, lowest month, and average
  support   Support plan costs for one month, with top services

Credentials come from the AWS CLI's own configuration.

Examples:
  billscope                          # Monthly comparison
  billscope compute --months 12      # Last year of EC2 compute
  billscope support --month 2025-12  # Support costs for December
  billscope --format json monthly    # JSON output
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, runs 'monthly' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (JSON, or YAML by extension).
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// AWS CLI profile.
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// AWS region.
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (no progress line, no logging).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Multi-month comparison with a service breakdown (default).
    #[command(visible_alias = "m")]
    Monthly(monthly::MonthlyArgs),

    /// EC2 compute cost per month.
    #[command(visible_alias = "c")]
    Compute(compute::ComputeArgs),

    /// Support plan costs for one month.
    #[command(visible_alias = "s")]
    Support(support::SupportArgs),

    /// List the periods a report covers.
    #[command(visible_alias = "p")]
    Periods(periods::PeriodsArgs),

    /// Show configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Fixed-width text tables.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// General error, including a failed fetch the report cannot do without.
    Error = 1,
    /// A billing amount could not be parsed.
    ParseError = 3,
}

impl ExitCode {
    /// Picks the exit code for a failed run.
    fn for_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<ReportError>() {
            Some(e) if e.is_malformed() => Self::ParseError,
            _ => Self::Error,
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("billscope=debug,info")
    } else {
        EnvFilter::new("billscope=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Monthly(args)) => monthly::run(args, &cli).await,
        Some(Commands::Compute(args)) => compute::run(args, &cli).await,
        Some(Commands::Support(args)) => support::run(args, &cli).await,
        Some(Commands::Periods(args)) => periods::run(args, &cli).await,
        Some(Commands::Config(args)) => config::run(args, &cli).await,
        None => monthly::run(&monthly::MonthlyArgs::default(), &cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    Ok(())
}
