//! CLI error types.

use peerscope_ext_file::FileError;
use peerscope_history::HistoryError;
use peerscope_portfolio::PortfolioError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Fund not present in the loaded data.
    #[error("Unknown fund '{name}'. Known funds: {known}")]
    UnknownFund {
        /// Requested name.
        name: String,
        /// Comma-separated known names.
        known: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input file error.
    #[error(transparent)]
    Input(#[from] FileError),

    /// Snapshot analytics error.
    #[error(transparent)]
    Portfolio(#[from] PortfolioError),

    /// Fact history error.
    #[error(transparent)]
    History(#[from] HistoryError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

impl From<csv::Error> for CliError {
    fn from(e: csv::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
