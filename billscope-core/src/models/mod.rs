//! Domain models for billscope.
//!
//! ## Submodules
//!
//! - [`period`] - Reporting periods and schedules
//! - [`record`] - Raw cost records from a billing query
//! - [`report`] - Ordered label to cost mappings
//! - [`stats`] - Changes, trend, and summary figures
//! - [`filter`] - Dimension filters and predicates

pub mod filter;
pub mod period;
pub mod record;
pub mod report;
pub mod stats;

pub use filter::{DimensionFilter, DimensionPredicate, EC2_COMPUTE_SERVICES, SUPPORT_SERVICE};
pub use period::{Period, PeriodSchedule, YearMonth};
pub use record::{total_amount, CostRecord};
pub use report::{AggregatedReport, ReportEntry};
pub use stats::{percent_change, row_changes, DerivedStats, RowChange, Trend};
