//! Configuration for history tracking.

use crate::error::{HistoryError, HistoryResult};
use serde::{Deserialize, Serialize};

/// Configuration for history tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Number of most recent snapshots in the comparison window.
    pub snapshots_to_compare: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            snapshots_to_compare: 4,
        }
    }
}

impl HistoryConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window size.
    #[must_use]
    pub fn with_snapshots(mut self, n: usize) -> Self {
        self.snapshots_to_compare = n;
        self
    }

    /// Validates the window size.
    pub fn validate(&self) -> HistoryResult<()> {
        if self.snapshots_to_compare == 0 {
            return Err(HistoryError::invalid_config(
                "snapshots_to_compare",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_and_validate() {
        let config = HistoryConfig::default();
        assert_eq!(config.snapshots_to_compare, 4);
        assert!(config.validate().is_ok());

        let err = HistoryConfig::new().with_snapshots(0).validate().unwrap_err();
        assert!(err.to_string().contains("snapshots_to_compare"));
    }

    #[test]
    fn test_serde_default() {
        let parsed: HistoryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, HistoryConfig::default());
    }
}
