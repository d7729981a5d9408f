//! Support command - support plan costs for one month.

use anyhow::Result;
use billscope_core::{DimensionFilter, Period, YearMonth};
use clap::Args;
use tracing::info;

use super::{build_runner, emit, load_config, progress};
use crate::output::TextFormatter;
use crate::Cli;

/// Arguments for the support command.
#[derive(Args, Default)]
pub struct SupportArgs {
    /// Month to inspect (YYYY-MM).
    #[arg(long)]
    pub month: Option<YearMonth>,

    /// Number of services listed for context.
    #[arg(long)]
    pub top: Option<usize>,

    /// Count services containing this text as support.
    #[arg(long)]
    pub service: Option<String>,
}

/// Runs the support command.
pub async fn run(args: &SupportArgs, cli: &Cli) -> Result<()> {
    let mut config = load_config(cli).await?;
    if let Some(month) = args.month {
        config.support.month = month;
    }
    if let Some(top) = args.top {
        config.support.top_n = top;
    }
    if let Some(service) = &args.service {
        config.support.filter = DimensionFilter::contains(service.clone());
    }
    config.validate()?;

    info!(month = %config.support.month, "Running support report");
    let runner = build_runner(&config);

    let label = Period::month(config.support.month)?.label;
    progress(cli, &format!("Fetching {label} costs by service..."));
    let report = runner.support(&config.support).await?;

    emit(cli, "support", &runner, &report, || {
        TextFormatter::new().format_support(&report)
    })
}
