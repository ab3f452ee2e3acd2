//! Error types and retry classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The main error enum for identifier lookups
//! - [`RetryClass`]: Classification for determining retry behavior

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur while mapping identifiers through a provider.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider has no record for the identifier.
    #[error("Identifier not found: {0}")]
    IdentifierNotFound(String),

    /// The identifier cannot be sent to a provider (too short, bad characters).
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Returns the retry classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use aurum_market_data::errors::{MarketDataError, RetryClass};
    ///
    /// let error = MarketDataError::RateLimited { provider: "OPENFIGI".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    ///
    /// let error = MarketDataError::IdentifierNotFound("037833AK6".to_string());
    /// assert_eq!(error.retry_class(), RetryClass::Never);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::IdentifierNotFound(_) | Self::InvalidIdentifier(_) => RetryClass::Never,

            Self::RateLimited { .. } | Self::Timeout { .. } | Self::Network(_) => {
                RetryClass::WithBackoff
            }

            Self::ProviderError { .. } => RetryClass::NextProvider,
        }
    }

    /// True when the provider answered and the answer was "no such identifier".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::IdentifierNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_not_found_never_retries() {
        let error = MarketDataError::IdentifierNotFound("912828XX1".to_string());
        assert_eq!(error.retry_class(), RetryClass::Never);
        assert!(error.is_not_found());
    }

    #[test]
    fn test_invalid_identifier_never_retries() {
        let error = MarketDataError::InvalidIdentifier("123".to_string());
        assert_eq!(error.retry_class(), RetryClass::Never);
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_rate_limited_retries_with_backoff() {
        let error = MarketDataError::RateLimited {
            provider: "OPENFIGI".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::WithBackoff);
        assert!(error.retry_class().is_transient());
    }

    #[test]
    fn test_timeout_retries_with_backoff() {
        let error = MarketDataError::Timeout {
            provider: "OPENFIGI".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    }

    #[test]
    fn test_provider_error_tries_next_provider() {
        let error = MarketDataError::ProviderError {
            provider: "OPENFIGI".to_string(),
            message: "Internal server error".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::NextProvider);
        assert!(error.retry_class().is_transient());
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::IdentifierNotFound("037833AK6".to_string());
        assert_eq!(format!("{}", error), "Identifier not found: 037833AK6");

        let error = MarketDataError::ProviderError {
            provider: "OPENFIGI".to_string(),
            message: "HTTP 500".to_string(),
        };
        assert_eq!(format!("{}", error), "Provider error: OPENFIGI - HTTP 500");
    }
}
