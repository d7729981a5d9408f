//! CLI command implementations.

pub mod compute;
pub mod config;
pub mod monthly;
pub mod periods;
pub mod support;

use anyhow::{bail, Result};
use billscope_config::Config;
use billscope_core::{PeriodSchedule, YearMonth};
use billscope_fetch::{AwsCostExplorer, FetchContext, FetchPipeline};
use billscope_reports::ReportRunner;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Loads the config file and applies the global flags.
pub async fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref()).await?;

    if let Some(profile) = &cli.profile {
        config.fetch.profile = Some(profile.clone());
    }
    if let Some(region) = &cli.region {
        config.fetch.region = Some(region.clone());
    }

    debug!(fetch = ?config.fetch, "Configuration loaded");
    Ok(config)
}

/// Builds a report runner over the AWS CLI.
pub fn build_runner(config: &Config) -> ReportRunner {
    let ctx = Arc::new(FetchContext::with_settings(config.fetch_settings()));
    let source = AwsCostExplorer::new(ctx.clone());

    if !source.is_available() {
        warn!(command = %ctx.settings.command, "Billing CLI not found on PATH");
    }

    let pipeline = FetchPipeline::new(Arc::new(source), ctx.max_concurrency());
    ReportRunner::new(pipeline, ctx.settings.metric)
}

/// Replaces a schedule with `months` consecutive months from `start`.
///
/// Missing values are taken from the current schedule.
pub fn override_schedule(
    schedule: &PeriodSchedule,
    start: Option<YearMonth>,
    months: Option<u32>,
) -> Result<PeriodSchedule> {
    if start.is_none() && months.is_none() {
        return Ok(schedule.clone());
    }
    if months == Some(0) {
        bail!("--months must be at least 1");
    }

    let current = schedule.periods()?;
    let start = match (start, current.first()) {
        (Some(start), _) => start,
        (None, Some(first)) => YearMonth::of(first.start),
        (None, None) => bail!("schedule has no periods"),
    };
    let count = match months {
        Some(months) => months,
        None => u32::try_from(current.len())?,
    };

    let overridden = PeriodSchedule::monthly(start, count);
    overridden.periods()?;
    Ok(overridden)
}

/// Prints the progress line shown while fetching.
pub fn progress(cli: &Cli, message: &str) {
    if cli.format == OutputFormat::Text && !cli.quiet {
        println!("{message}");
    }
}

/// Prints a report as text or as a JSON envelope.
pub fn emit<T: Serialize>(
    cli: &Cli,
    report: &str,
    runner: &ReportRunner,
    data: &T,
    text: impl FnOnce() -> String,
) -> Result<()> {
    match cli.format {
        OutputFormat::Text => println!("{}", text()),
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_report(report, runner.metric(), data)?);
        }
    }
    Ok(())
}
