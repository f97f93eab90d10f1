//! Core error types for fxfolio.
//!
//! Only input problems are errors. Missing or stale FX rates are reported as
//! [`ValuationWarning`](crate::diagnostics::ValuationWarning)s and never
//! abort a valuation.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the valuation library.
#[derive(Error, Debug)]
pub enum Error {
    /// A required input collection was absent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to import input data: {0}")]
    Import(String),

    #[error("Calculation failed: {0}")]
    Calculation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid currency code '{0}': expected three letters")]
    InvalidCurrency(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Invalid exchange rate for {currency}: {rate} (must be positive)")]
    NonPositiveRate { currency: String, rate: String },

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Import(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Import(err.to_string())
    }
}
