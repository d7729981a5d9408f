// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # billscope Fetch
//!
//! Billing CLI invocation and the fetch pipeline for billscope.
//!
//! ## Host APIs
//!
//! - [`host::process`] - Subprocess execution with timeouts
//!
//! ## Querying
//!
//! - [`query::CostQuery`] - One period, metric, and optional grouping
//! - [`source::CostSource`] - Trait for billing data sources
//! - [`explorer::AwsCostExplorer`] - `aws ce get-cost-and-usage`
//! - [`parser`] - Cost Explorer JSON envelope parsing
//!
//! ## Pipeline
//!
//! - [`pipeline::FetchPipeline`] - Runs one query per period, concurrently,
//!   returning results in period order with failures recorded as zero-cost
//!   periods
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use billscope_fetch::{AwsCostExplorer, CostQuery, FetchContext, FetchPipeline, Metric};
//!
//! let ctx = Arc::new(FetchContext::new());
//! let source = Arc::new(AwsCostExplorer::new(ctx.clone()));
//! let pipeline = FetchPipeline::new(source, ctx.max_concurrency());
//!
//! let queries: Vec<CostQuery> = periods
//!     .into_iter()
//!     .map(|p| CostQuery::new(p, Metric::BlendedCost))
//!     .collect();
//! let fetches = pipeline.execute(&queries).await?;
//! ```

pub mod context;
pub mod error;
pub mod explorer;
pub mod host;
pub mod parser;
pub mod pipeline;
pub mod query;
pub mod source;

// Errors
pub use error::{FetchError, ProcessError};

// Host APIs
pub use host::process::{ProcessOutput, ProcessRunner};

// Querying
pub use context::{FetchContext, FetchSettings};
pub use explorer::AwsCostExplorer;
pub use parser::{parse_cost_response, CostPage};
pub use query::{CostQuery, Dimension, Metric, GRANULARITY};
pub use source::CostSource;

// Pipeline
pub use pipeline::{collect_warnings, FetchPipeline, FetchWarning, PeriodFetch, PeriodOutcome};
