//! Error types for the market data crate.
//!
//! [`MarketDataError`] is the single error enum returned by every provider.
//! Callers use [`MarketDataError::is_transient`] to tell an unreachable
//! provider apart from one that answered and refused the request.

use thiserror::Error;

/// Errors that can occur while fetching exchange rates.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider rate limited the request (HTTP 429 or quota exhausted).
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

    /// The access key was missing or refused by the provider.
    #[error("Invalid access key for provider: {provider}")]
    InvalidAccessKey {
        /// The provider that refused the key
        provider: String,
    },

    /// The provider does not accept the requested base currency.
    #[error("Invalid base currency: {0}")]
    InvalidBaseCurrency(String),

    /// The provider answered with an explicit error payload.
    #[error("Request rejected by {provider} ({code}): {info}")]
    Rejected {
        /// The provider that rejected the request
        provider: String,
        /// Provider specific error code
        code: i64,
        /// Human readable explanation sent by the provider
        info: String,
    },

    /// The provider answered with something we could not interpret.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Returns true when the provider could not be reached or asked us to
    /// slow down, as opposed to answering and refusing the request.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagefx_market_data::errors::MarketDataError;
    ///
    /// let error = MarketDataError::Timeout { provider: "FIXER".to_string() };
    /// assert!(error.is_transient());
    ///
    /// let error = MarketDataError::InvalidBaseCurrency("blah".to_string());
    /// assert!(!error.is_transient());
    /// ```
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Timeout { .. } => true,
            Self::Network(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::InvalidAccessKey { .. }
            | Self::InvalidBaseCurrency(_)
            | Self::Rejected { .. }
            | Self::ProviderError { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_transient() {
        let error = MarketDataError::Timeout {
            provider: "FIXER".to_string(),
        };
        assert!(error.is_transient());
    }

    #[test]
    fn test_rate_limited_is_transient() {
        let error = MarketDataError::RateLimited {
            provider: "FIXER".to_string(),
        };
        assert!(error.is_transient());
    }

    #[test]
    fn test_rejections_are_not_transient() {
        let errors = vec![
            MarketDataError::InvalidAccessKey {
                provider: "FIXER".to_string(),
            },
            MarketDataError::InvalidBaseCurrency("blah".to_string()),
            MarketDataError::Rejected {
                provider: "FIXER".to_string(),
                code: 105,
                info: "Access Restricted".to_string(),
            },
            MarketDataError::ProviderError {
                provider: "FIXER".to_string(),
                message: "unexpected body".to_string(),
            },
        ];
        for error in errors {
            assert!(!error.is_transient(), "{} should not be transient", error);
        }
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::InvalidBaseCurrency("blah".to_string());
        assert_eq!(format!("{}", error), "Invalid base currency: blah");

        let error = MarketDataError::Rejected {
            provider: "FIXER".to_string(),
            code: 104,
            info: "Monthly usage limit reached".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Request rejected by FIXER (104): Monthly usage limit reached"
        );
    }
}
