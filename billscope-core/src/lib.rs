// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

//! # `billscope` Core
//!
//! Core types and statistics for `billscope` cost reports.
//!
//! ## Key Types
//!
//! ### Periods
//! - [`YearMonth`] - Calendar month reference
//! - [`Period`] - Half-open date range with a display label
//! - [`PeriodSchedule`] - Ordered list of periods a report covers
//!
//! ### Costs
//! - [`CostRecord`] - One `(dimension, amount)` pair from a billing query
//! - [`AggregatedReport`] - Ordered label to summed cost mapping
//!
//! ### Statistics
//! - [`DerivedStats`] - Row changes, total, average, min, max, trend
//! - [`Trend`] - First-two versus last-two comparison
//!
//! ### Filtering
//! - [`DimensionFilter`] - Serializable substring filter
//! - [`DimensionPredicate`] - Injectable predicate over dimension values

pub mod error;
pub mod models;

pub use error::CoreError;

pub use models::{
    // Periods
    Period,
    PeriodSchedule,
    YearMonth,
    // Costs
    total_amount,
    AggregatedReport,
    CostRecord,
    ReportEntry,
    // Statistics
    percent_change,
    row_changes,
    DerivedStats,
    RowChange,
    Trend,
    // Filtering
    DimensionFilter,
    DimensionPredicate,
    EC2_COMPUTE_SERVICES,
    SUPPORT_SERVICE,
};
