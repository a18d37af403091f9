//! Error types for peer analytics.
//!
//! Analytics themselves never fail: a missing reference fund or an empty
//! peer set degrades to empty results. Errors are limited to configuration
//! and roster validation.

use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur while configuring peer analytics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// Invalid analytics configuration.
    #[error("Invalid config field '{field}': {reason}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// More than one fund in a peer set is flagged as the reference.
    #[error("Peer set '{peer_set}' has {count} reference funds")]
    AmbiguousReference {
        /// The peer set.
        peer_set: String,
        /// Number of funds flagged as reference.
        count: usize,
    },
}

impl PortfolioError {
    /// Create an invalid config error.
    #[must_use]
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
