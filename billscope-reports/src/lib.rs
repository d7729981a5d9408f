// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # billscope Reports
//!
//! Aggregation and report models for billscope.
//!
//! Each report follows the same steps: fetch every period it needs, reduce
//! the records into an [`AggregatedReport`](billscope_core::AggregatedReport),
//! and derive the figures a formatter prints.
//!
//! ## Reports
//!
//! - [`MonthlyComparison`] - Totals, changes, and trend, plus a service
//!   breakdown of the last period
//! - [`ComputeHistory`] - EC2 compute cost per month, lowest month, average
//! - [`SupportReport`] - Support plan costs for one month, with context
//!
//! ## Aggregation
//!
//! - [`aggregate_by_period`] - One entry per period
//! - [`aggregate_by_dimension`] - One entry per dimension value, by cost

pub mod aggregate;
pub mod compute;
pub mod error;
pub mod monthly;
pub mod runner;
pub mod support;

pub use aggregate::{aggregate_by_dimension, aggregate_by_period};
pub use compute::{ComputeHistory, ComputeOptions};
pub use error::ReportError;
pub use monthly::{
    BreakdownSection, MonthlyComparison, MonthlyOptions, ServiceBreakdown, DEFAULT_BREAKDOWN_TOP_N,
};
pub use runner::ReportRunner;
pub use support::{SupportOptions, SupportReport, DEFAULT_CONTEXT_TOP_N};
