//! Error types for the tape-sentiment system.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the tape-sentiment system.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid setting).
    #[error("Configuration error: {0}")]
    Config(String),

    /// A trade line could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Ratio requested with a zero denominator.
    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    /// Decimal arithmetic exceeded the representable range.
    #[error("Decimal overflow: {0}")]
    Overflow(String),

    /// Trade ordering requested on a record without a timestamp.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV reading or writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Create a division-by-zero error.
    pub fn division_by_zero(msg: impl Into<String>) -> Self {
        Error::DivisionByZero(msg.into())
    }

    /// Create an overflow error.
    pub fn overflow(msg: impl Into<String>) -> Self {
        Error::Overflow(msg.into())
    }

    /// Create an invalid timestamp error.
    pub fn invalid_timestamp(msg: impl Into<String>) -> Self {
        Error::InvalidTimestamp(msg.into())
    }
}
