//! Cost source trait.
//!
//! A cost source answers one [`CostQuery`] with the matching records. The
//! AWS Cost Explorer CLI is the production source; tests substitute canned
//! responses.

use async_trait::async_trait;
use billscope_core::CostRecord;

use crate::error::FetchError;
use crate::query::CostQuery;

/// A billing data source.
///
/// ## Implementing a Source
///
/// ```ignore
/// struct FixedSource;
///
/// #[async_trait]
/// impl CostSource for FixedSource {
///     fn id(&self) -> &str {
///         "fixed"
///     }
///
///     async fn query(&self, query: &CostQuery) -> Result<Vec<CostRecord>, FetchError> {
///         Ok(vec![CostRecord::new(query.period.label.clone(), 10.0)])
///     }
/// }
/// ```
#[async_trait]
pub trait CostSource: Send + Sync {
    /// Identifier for logs (e.g. "aws.ce").
    fn id(&self) -> &str;

    /// Runs one query.
    ///
    /// An empty vector means the period had no cost. Errors for which
    /// [`FetchError::is_fatal`] is false are treated as a failed period by
    /// the pipeline; fatal errors abort the run.
    async fn query(&self, query: &CostQuery) -> Result<Vec<CostRecord>, FetchError>;
}
