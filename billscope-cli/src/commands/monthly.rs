//! Monthly command - compare total cost across months.

use anyhow::Result;
use billscope_core::YearMonth;
use clap::Args;
use tracing::info;

use super::{build_runner, emit, load_config, override_schedule, progress};
use crate::output::TextFormatter;
use crate::Cli;

/// Arguments for the monthly command.
#[derive(Args, Default)]
pub struct MonthlyArgs {
    /// First month (YYYY-MM).
    #[arg(long)]
    pub start: Option<YearMonth>,

    /// Number of months to compare.
    #[arg(long, short = 'n')]
    pub months: Option<u32>,

    /// Number of services in the breakdown.
    #[arg(long)]
    pub top: Option<usize>,
}

/// Runs the monthly command.
pub async fn run(args: &MonthlyArgs, cli: &Cli) -> Result<()> {
    let mut config = load_config(cli).await?;
    config.monthly.schedule = override_schedule(&config.monthly.schedule, args.start, args.months)?;
    if let Some(top) = args.top {
        config.monthly.top_n = top;
    }
    config.validate()?;

    info!(periods = config.monthly.schedule.len(), "Running monthly comparison");
    let runner = build_runner(&config);

    progress(cli, "Fetching costs for multiple months...");
    let report = runner.monthly(&config.monthly).await?;

    emit(cli, "monthly", &runner, &report, || {
        TextFormatter::new().format_monthly(&report)
    })
}
