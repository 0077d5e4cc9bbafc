use pagefx_market_data::MarketDataError;
use thiserror::Error;

/// Failures of a single conversion pass.
///
/// The page-level entry point never returns these to its caller; they are
/// logged and collapse into a `false` result so the page keeps rendering.
#[derive(Error, Debug)]
pub enum FxError {
    #[error("Rate provider unreachable: {0}")]
    ProviderUnreachable(String),

    #[error("Rate provider rejected the request: {0}")]
    ProviderRejected(String),

    #[error("Unsupported currency code: {0}")]
    UnsupportedCurrencyCode(String),

    #[error("No currency rates available")]
    NoRatesAvailable,

    #[error("Source currency {0} matches target, nothing to convert")]
    SameCurrencyNoop(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid currency pattern: {0}")]
    InvalidPattern(String),

    #[error("Cache error: {0}")]
    CacheError(String),
}

impl From<MarketDataError> for FxError {
    fn from(err: MarketDataError) -> Self {
        if err.is_transient() {
            FxError::ProviderUnreachable(err.to_string())
        } else {
            FxError::ProviderRejected(err.to_string())
        }
    }
}

impl From<regex::Error> for FxError {
    fn from(err: regex::Error) -> Self {
        FxError::InvalidPattern(err.to_string())
    }
}
