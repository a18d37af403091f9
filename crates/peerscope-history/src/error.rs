//! Error types for history tracking.

use thiserror::Error;

/// Result type for history operations.
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Errors raised while configuring history tracking.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HistoryError {
    /// Invalid history configuration.
    #[error("Invalid config field '{field}': {reason}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl HistoryError {
    /// Create an invalid config error.
    #[must_use]
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
