//! Error types for file loading.

use thiserror::Error;

/// Result type for file operations.
pub type FileResult<T> = Result<T, FileError>;

/// Errors raised while reading input files.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FileError {
    /// The file could not be opened or read.
    #[error("Cannot read '{path}': {message}")]
    Io {
        /// File path.
        path: String,
        /// Underlying error.
        message: String,
    },

    /// A row could not be decoded.
    #[error("{path}:{line}: {message}")]
    Parse {
        /// File path.
        path: String,
        /// 1-based line number.
        line: u64,
        /// What was wrong.
        message: String,
    },
}

impl FileError {
    /// Create an I/O error.
    #[must_use]
    pub fn io(path: impl Into<String>, message: impl ToString) -> Self {
        Self::Io {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Create a parse error.
    #[must_use]
    pub fn parse(path: impl Into<String>, line: u64, message: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            line,
            message: message.to_string(),
        }
    }
}
