//! Compute command - EC2 compute cost per month.

use anyhow::Result;
use billscope_core::{DimensionFilter, YearMonth};
use clap::Args;
use tracing::info;

use super::{build_runner, emit, load_config, override_schedule, progress};
use crate::output::TextFormatter;
use crate::Cli;

/// Arguments for the compute command.
#[derive(Args, Default)]
pub struct ComputeArgs {
    /// First month (YYYY-MM).
    #[arg(long)]
    pub start: Option<YearMonth>,

    /// Number of months.
    #[arg(long, short = 'n')]
    pub months: Option<u32>,

    /// Count services containing this text instead of the EC2 compute services.
    #[arg(long)]
    pub service: Option<String>,
}

/// Runs the compute command.
pub async fn run(args: &ComputeArgs, cli: &Cli) -> Result<()> {
    let mut config = load_config(cli).await?;
    config.compute.schedule = override_schedule(&config.compute.schedule, args.start, args.months)?;
    if let Some(service) = &args.service {
        config.compute.filter = DimensionFilter::contains(service.clone());
    }
    config.validate()?;

    info!(filter = %config.compute.filter, "Running compute history");
    let runner = build_runner(&config);

    progress(
        cli,
        &format!(
            "Fetching EC2 Compute costs for last {} months...",
            config.compute.schedule.len()
        ),
    );
    let history = runner.compute(&config.compute).await?;

    emit(cli, "compute", &runner, &history, || {
        TextFormatter::new().format_compute(&history)
    })
}
