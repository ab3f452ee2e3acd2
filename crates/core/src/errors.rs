//! Core error types for the Aurum performance core.
//!
//! Errors only surface while building the calculation components (loading a
//! classification config, compiling extraction patterns). The calculation
//! entry points themselves degrade to defined defaults and log instead.

use std::io;

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the performance core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Classification setup failed: {0}")]
    Classification(#[from] ClassificationError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to load configuration: {0}")]
    ConfigIO(String),
}

/// Errors raised while compiling a classification configuration.
#[derive(Error, Debug)]
pub enum ClassificationError {
    #[error("Invalid extraction pattern '{pattern}' for bank {bank}: {reason}")]
    InvalidPattern {
        bank: String,
        pattern: String,
        reason: String,
    },

    #[error("Invalid issuer name pattern '{pattern}': {reason}")]
    InvalidNamePattern { pattern: String, reason: String },

    #[error("Invalid classification config: {0}")]
    InvalidConfig(String),
}

/// Errors that occur while parsing caller-supplied input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::ConfigIO(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::Json(err))
    }
}
