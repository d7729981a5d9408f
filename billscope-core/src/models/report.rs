//! Aggregated cost reports.
//!
//! An [`AggregatedReport`] is an ordered mapping from a label (a period
//! label or a dimension value) to a summed cost. Order is whatever the
//! caller established: period order for monthly reports, descending cost
//! for service breakdowns.

use serde::{Deserialize, Serialize};

use super::filter::DimensionPredicate;

// ============================================================================
// Report Entry
// ============================================================================

/// A single labelled cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Period label or dimension value.
    pub label: String,
    /// Summed cost.
    pub cost: f64,
}

impl ReportEntry {
    /// Creates a new entry.
    pub fn new(label: impl Into<String>, cost: f64) -> Self {
        Self {
            label: label.into(),
            cost,
        }
    }

    /// Returns true if the cost is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.cost > 0.0
    }
}

// ============================================================================
// Aggregated Report
// ============================================================================

/// Ordered label to cost mapping.
///
/// Labels are unique. Zero and negative costs are kept; renderers decide
/// whether to show them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregatedReport {
    entries: Vec<ReportEntry>,
}

impl AggregatedReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a report with every label present at 0.0, in the given order.
    pub fn with_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut report = Self::new();
        for label in labels {
            report.set(label, 0.0);
        }
        report
    }

    /// Sets the cost for `label`, appending it if new.
    pub fn set(&mut self, label: impl Into<String>, cost: f64) {
        let label = label.into();
        match self.position(&label) {
            Some(idx) => self.entries[idx].cost = cost,
            None => self.entries.push(ReportEntry::new(label, cost)),
        }
    }

    /// Adds `amount` to the cost for `label`, appending it if new.
    pub fn add(&mut self, label: &str, amount: f64) {
        match self.position(label) {
            Some(idx) => self.entries[idx].cost += amount,
            None => self.entries.push(ReportEntry::new(label, amount)),
        }
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.label == label)
    }

    /// Returns the cost for `label`.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.position(label).map(|idx| self.entries[idx].cost)
    }

    /// Returns the entries in order.
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ReportEntry> {
        self.entries.iter()
    }

    /// Returns the costs in order.
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.cost).collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all costs.
    pub fn total(&self) -> f64 {
        self.entries.iter().fold(0.0, |acc, e| acc + e.cost)
    }

    /// Total divided by the number of entries, or 0 when empty.
    pub fn average(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        self.total() / self.entries.len() as f64
    }

    /// The entry with the smallest cost; the first one wins on ties.
    pub fn min_entry(&self) -> Option<&ReportEntry> {
        self.entries
            .iter()
            .fold(None, |best: Option<&ReportEntry>, e| match best {
                Some(b) if b.cost <= e.cost => Some(b),
                _ => Some(e),
            })
    }

    /// The entry with the largest cost; the first one wins on ties.
    pub fn max_entry(&self) -> Option<&ReportEntry> {
        self.entries
            .iter()
            .fold(None, |best: Option<&ReportEntry>, e| match best {
                Some(b) if b.cost >= e.cost => Some(b),
                _ => Some(e),
            })
    }

    /// Sorts by descending cost. Equal costs keep their relative order.
    pub fn sort_by_cost_desc(&mut self) {
        self.entries.sort_by(|a, b| b.cost.total_cmp(&a.cost));
    }

    /// Returns a copy holding only entries whose label matches `filter`.
    pub fn filtered(&self, filter: &dyn DimensionPredicate) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|e| filter.matches(&e.label))
                .cloned()
                .collect(),
        }
    }

    /// The first `n` entries with a strictly positive cost.
    ///
    /// Never padded: fewer than `n` entries are returned when fewer are
    /// positive.
    pub fn top_positive(&self, n: usize) -> Vec<&ReportEntry> {
        self.entries
            .iter()
            .filter(|e| e.is_positive())
            .take(n)
            .collect()
    }

    /// Sum of all strictly positive costs.
    pub fn positive_total(&self) -> f64 {
        self.entries
            .iter()
            .filter(|e| e.is_positive())
            .fold(0.0, |acc, e| acc + e.cost)
    }
}

impl<'a> IntoIterator for &'a AggregatedReport {
    type Item = &'a ReportEntry;
    type IntoIter = std::slice::Iter<'a, ReportEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<ReportEntry> for AggregatedReport {
    /// Collects entries, summing costs of repeated labels.
    fn from_iter<T: IntoIterator<Item = ReportEntry>>(iter: T) -> Self {
        let mut report = Self::new();
        for entry in iter {
            report.add(&entry.label, entry.cost);
        }
        report
    }
}

// ============================================================================
// Tests
// ============================================================================
