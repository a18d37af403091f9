//! Error types for Peerscope records.
//!
//! Analytics never fail on data states such as a missing reference fund;
//! these errors cover malformed input that adapters must reject up front.

use thiserror::Error;

/// A specialized Result type for core record operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The main error type for core record operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Category label outside the closed set.
    #[error("Unknown category: '{value}' (expected Holdings or Sectors)")]
    UnknownCategory {
        /// The unrecognized label.
        value: String,
    },

    /// Weight or percentage that is not a finite real number.
    #[error("Invalid weight for '{ticker}' in '{fund}': {value}")]
    InvalidWeight {
        /// Fund the row belongs to.
        fund: String,
        /// Instrument ticker.
        ticker: String,
        /// The offending value.
        value: f64,
    },

    /// Required identifier was empty.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },
}

impl CoreError {
    /// Create an unknown category error.
    #[must_use]
    pub fn unknown_category(value: impl Into<String>) -> Self {
        Self::UnknownCategory {
            value: value.into(),
        }
    }

    /// Create a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::unknown_category("Regions");
        assert!(err.to_string().contains("Regions"));

        let err = CoreError::missing_field("ticker");
        assert!(err.to_string().contains("ticker"));

        let err = CoreError::InvalidWeight {
            fund: "F".into(),
            ticker: "X".into(),
            value: f64::NAN,
        };
        assert!(err.to_string().contains("NaN"));
    }
}
