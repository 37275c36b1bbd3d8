//! This module defines all error types used throughout the application.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a computation had nothing to work with
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateReason {
    /// The matrix has no non-zero cell (no valid transition was observed)
    #[error("no valid transitions in the matrix")]
    EmptyMatrix,

    /// The edge list is empty
    #[error("the transition network has no edges")]
    EmptyNetwork,
}

/// Main error type for the application
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// An alphabet must contain at least the stop symbol
    #[error("Alphabet is empty")]
    EmptyAlphabet,

    /// The declared terminal symbol is not the alphabet's last element
    #[error("Terminal symbol {symbol} must be the last alphabet entry (found at index {index})")]
    TerminalNotLast { symbol: String, index: usize },

    /// The declared terminal symbol does not occur in the alphabet
    #[error("Terminal symbol {0} is missing from the alphabet")]
    TerminalMissing(String),

    /// A metric or normalization was asked to divide by an empty set
    #[error("Degenerate input for {operation}: {reason}")]
    DegenerateInput {
        operation: &'static str,
        reason: DegenerateReason,
    },

    /// Data source errors
    #[error("Data source error: {0}")]
    DataSource(String),

    /// Record not found in the data source
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// Records file parsing errors
    #[error("Records parsing error in {file:?}: {message}")]
    RecordsParse { file: PathBuf, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a custom error with a message
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Create a data source error
    pub fn data_source(msg: impl Into<String>) -> Self {
        Self::DataSource(msg.into())
    }

    /// Create a degenerate-input error for the named operation
    pub fn degenerate(operation: &'static str, reason: DegenerateReason) -> Self {
        Self::DegenerateInput { operation, reason }
    }

    /// Check if error is a degenerate-input condition
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Error::DegenerateInput { .. })
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::RecordsParse {
            file: PathBuf::from("unknown"),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::DataSource(format!("JSON error: {}", err))
    }
}

/// Create a custom error with formatting
#[macro_export]
macro_rules! custom_error {
    ($($arg:tt)*) => {
        $crate::error::Error::Custom(format!($($arg)*))
    };
}

/// Bail with a custom error message
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::custom_error!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::custom("test error");
        assert_eq!(err.to_string(), "test error");

        let err = Error::data_source("file unreadable");
        assert_eq!(err.to_string(), "Data source error: file unreadable");
    }

    #[test]
    fn test_degenerate_message_names_operation() {
        let err = Error::degenerate("sequence_linearity", DegenerateReason::EmptyNetwork);
        assert!(err.is_degenerate());
        assert_eq!(
            err.to_string(),
            "Degenerate input for sequence_linearity: the transition network has no edges"
        );

        assert!(!Error::EmptyAlphabet.is_degenerate());
    }
}
