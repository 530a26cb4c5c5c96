//! Core error types for the contest dashboard.
//!
//! Every fallible operation in this crate returns [`Result`]. Parse failures
//! from `serde_json` and `chrono` are wrapped so callers only match on one
//! root type.

use chrono::{NaiveDateTime, ParseError as ChronoParseError};
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the contest dashboard.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to parse portfolio payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Failed to read data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Portfolio calculation failed: {0}")]
    Calculation(#[from] CalculatorError),
}

/// Errors raised while turning a price table into portfolio entries.
#[derive(Error, Debug, PartialEq)]
pub enum CalculatorError {
    #[error("Price table has no rows")]
    EmptyPriceTable,

    #[error("Price table has no column for symbol {0}")]
    MissingSymbol(String),
}

/// Validation errors for untyped input crossing into the store.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Unsupported contest year: {0}")]
    UnsupportedYear(i64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),

    #[error("Local time {timestamp} does not exist in timezone {timezone}")]
    NonexistentLocalTime {
        timestamp: NaiveDateTime,
        timezone: String,
    },
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}
