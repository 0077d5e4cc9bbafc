//! Rate provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::LatestRates;

/// Trait for exchange rate providers.
///
/// Implement this trait to add support for a new rate source.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use pagefx_market_data::{LatestRates, MarketDataError, RateProvider};
///
/// struct StaticProvider;
///
/// #[async_trait]
/// impl RateProvider for StaticProvider {
///     fn id(&self) -> &'static str {
///         "STATIC"
///     }
///
///     async fn fetch_latest_rates(
///         &self,
///         base_code: &str,
///         access_key: &str,
///     ) -> Result<LatestRates, MarketDataError> {
///         // ...
///     }
/// }
/// ```
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Used for logging and error messages.
    fn id(&self) -> &'static str;

    /// Fetch the latest rates expressed against `base_code`.
    ///
    /// # Arguments
    ///
    /// * `base_code` - ISO 4217 code every returned rate is relative to
    /// * `access_key` - Credential sent to the provider
    ///
    /// # Returns
    ///
    /// The rate table on success. Timeouts are enforced by the provider
    /// itself and surface as [`MarketDataError::Timeout`].
    async fn fetch_latest_rates(
        &self,
        base_code: &str,
        access_key: &str,
    ) -> Result<LatestRates, MarketDataError>;
}
