//! Error types for the form enhancer
//!
//! None of these reach the page: behaviors turn them into no-ops. Only
//! configuration loading hands them back to the caller.

use thiserror::Error;

/// Form enhancer error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    // Value errors
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    #[error("Days to harvest missing or zero: {0:?}")]
    MissingDaysToHarvest(String),

    #[error("Date out of range: {date} {days:+} days")]
    DateOutOfRange { date: chrono::NaiveDate, days: i64 },

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Malformed configuration JSON: {0}")]
    MalformedConfig(String),
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        FormError::MalformedConfig(err.to_string())
    }
}

impl From<validator::ValidationErrors> for FormError {
    fn from(err: validator::ValidationErrors) -> Self {
        FormError::InvalidConfig(err.to_string())
    }
}

/// Result type alias for form operations
pub type FormResult<T> = Result<T, FormError>;
