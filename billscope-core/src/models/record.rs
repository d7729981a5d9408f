//! Raw cost records returned by a billing query.

use serde::{Deserialize, Serialize};

/// One cost figure for one value of a grouping dimension.
///
/// For ungrouped queries the dimension value is the period label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    /// Grouping key, usually a service name.
    pub dimension: String,
    /// Cost in the billing currency.
    pub amount: f64,
}

impl CostRecord {
    /// Creates a new record.
    pub fn new(dimension: impl Into<String>, amount: f64) -> Self {
        Self {
            dimension: dimension.into(),
            amount,
        }
    }
}

/// Sums the amounts of a slice of records. An empty slice sums to `0.0`.
pub fn total_amount(records: &[CostRecord]) -> f64 {
    records.iter().fold(0.0, |acc, r| acc + r.amount)
}
