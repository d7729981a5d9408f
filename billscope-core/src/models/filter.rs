//! Dimension filters.
//!
//! Reports select rows by dimension value (usually a service name). The
//! selection policy is injected as a [`DimensionPredicate`]; the common
//! policies are expressed as [`DimensionFilter`] values so they can live in
//! configuration files.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// A predicate over dimension values.
pub trait DimensionPredicate: Send + Sync {
    /// Returns true if `dimension` should be kept.
    fn matches(&self, dimension: &str) -> bool;
}

impl<F> DimensionPredicate for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn matches(&self, dimension: &str) -> bool {
        self(dimension)
    }
}

/// Service name fragments identifying EC2 compute spend.
pub const EC2_COMPUTE_SERVICES: [&str; 2] = ["Elastic Compute Cloud - Compute", "EC2-Instance"];

/// Service name fragment identifying support plan spend.
pub const SUPPORT_SERVICE: &str = "support";

/// Serializable dimension filter.
///
/// Substring matches are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionFilter {
    /// Keep everything.
    #[default]
    All,
    /// Keep values containing the substring.
    Contains(String),
    /// Keep values matched by any of the nested filters.
    AnyOf(Vec<DimensionFilter>),
}

impl DimensionFilter {
    /// Case-insensitive substring filter.
    pub fn contains(needle: impl Into<String>) -> Self {
        Self::Contains(needle.into())
    }

    /// Matches any of the given substrings.
    pub fn any_of<I, S>(needles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AnyOf(needles.into_iter().map(Self::contains).collect())
    }

    /// EC2 compute services.
    pub fn ec2_compute() -> Self {
        Self::any_of(EC2_COMPUTE_SERVICES)
    }

    /// AWS support plans.
    pub fn support() -> Self {
        Self::contains(SUPPORT_SERVICE)
    }

    /// Rejects filters that cannot match anything useful.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            Self::All => Ok(()),
            Self::Contains(needle) if needle.trim().is_empty() => Err(CoreError::InvalidFilter(
                "substring filter must not be empty".to_string(),
            )),
            Self::Contains(_) => Ok(()),
            Self::AnyOf(filters) if filters.is_empty() => Err(CoreError::InvalidFilter(
                "any_of filter needs at least one entry".to_string(),
            )),
            Self::AnyOf(filters) => filters.iter().try_for_each(Self::validate),
        }
    }
}

impl DimensionPredicate for DimensionFilter {
    fn matches(&self, dimension: &str) -> bool {
        match self {
            Self::All => true,
            Self::Contains(needle) => dimension
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            Self::AnyOf(filters) => filters.iter().any(|f| f.matches(dimension)),
        }
    }
}

impl fmt::Display for DimensionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Contains(needle) => write!(f, "contains \"{needle}\""),
            Self::AnyOf(filters) => {
                let parts: Vec<String> = filters.iter().map(ToString::to_string).collect();
                write!(f, "{}", parts.join(" or "))
            }
        }
    }
}
