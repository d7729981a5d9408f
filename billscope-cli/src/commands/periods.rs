//! Periods command - list the periods a report covers.

use anyhow::Result;
use billscope_core::Period;
use clap::{Args, ValueEnum};

use super::load_config;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Report whose periods to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportKind {
    /// Monthly comparison.
    #[default]
    Monthly,
    /// EC2 compute history.
    Compute,
    /// Support report.
    Support,
}

impl ReportKind {
    fn name(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Compute => "compute",
            Self::Support => "support",
        }
    }
}

/// Arguments for the periods command.
#[derive(Args)]
pub struct PeriodsArgs {
    /// Report to inspect.
    #[arg(default_value = "monthly")]
    pub report: ReportKind,
}

/// Runs the periods command.
pub async fn run(args: &PeriodsArgs, cli: &Cli) -> Result<()> {
    let config = load_config(cli).await?;

    let periods: Vec<Period> = match args.report {
        ReportKind::Monthly => config.monthly.schedule.periods()?,
        ReportKind::Compute => config.compute.schedule.periods()?,
        ReportKind::Support => vec![Period::month(config.support.month)?],
    };

    match cli.format {
        OutputFormat::Text => {
            println!("{}", TextFormatter::new().format_periods(args.report.name(), &periods));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&periods)?);
        }
    }

    Ok(())
}
