//! Fixer provider for the latest foreign exchange rates.
//!
//! Calls `GET /api/latest?access_key=..&base=..` on data.fixer.io. The API
//! always answers with HTTP 200 and reports failures inside the body:
//!
//! ```text
//! {"success": true,  "base": "ZAR", "date": "2024-03-01", "rates": {...}}
//! {"success": false, "error": {"code": 101, "type": "invalid_access_key", "info": "..."}}
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::MarketDataError;
use crate::models::LatestRates;
use crate::provider::RateProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "FIXER";

/// Default API root
const DEFAULT_BASE_URL: &str = "https://data.fixer.io/api";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fixer error codes we map to dedicated variants.
const CODE_MISSING_ACCESS_KEY: i64 = 101;
const CODE_USAGE_LIMIT_REACHED: i64 = 104;
const CODE_INVALID_BASE_CURRENCY: i64 = 201;

/// Raw response from the `latest` endpoint.
#[derive(Debug, Deserialize)]
struct FixerResponse {
    success: bool,
    #[serde(default)]
    base: Option<String>,
    #[serde(default)]
    date: Option<NaiveDate>,
    #[serde(default)]
    rates: Option<HashMap<String, Decimal>>,
    #[serde(default)]
    error: Option<FixerErrorBody>,
}

#[derive(Debug, Deserialize)]
struct FixerErrorBody {
    code: i64,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    info: Option<String>,
}

/// Fixer provider for exchange rates.
///
/// # Example
///
/// ```ignore
/// use pagefx_market_data::{FixerProvider, RateProvider};
///
/// let provider = FixerProvider::new();
/// let rates = provider.fetch_latest_rates("ZAR", "your_access_key").await?;
/// ```
pub struct FixerProvider {
    client: Client,
    base_url: String,
}

impl Default for FixerProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FixerProvider {
    /// Create a provider talking to the public Fixer API.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a provider talking to a different API root, e.g. a proxy.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn latest_url(&self, base_code: &str, access_key: &str) -> String {
        format!(
            "{}/latest?access_key={}&base={}",
            self.base_url,
            urlencoding::encode(access_key),
            urlencoding::encode(base_code)
        )
    }

    /// Turn a decoded response into rates, mapping Fixer error payloads.
    fn into_latest_rates(response: FixerResponse, base_code: &str) -> Result<LatestRates, MarketDataError> {
        if !response.success {
            return Err(Self::map_error_body(response.error, base_code));
        }

        let (date, rates) = match (response.date, response.rates) {
            (Some(date), Some(rates)) => (date, rates),
            _ => {
                return Err(MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: "Response is missing date or rates".to_string(),
                })
            }
        };

        let base = response.base.unwrap_or_else(|| base_code.to_string());
        Ok(LatestRates::new(base, date, rates))
    }

    fn map_error_body(error: Option<FixerErrorBody>, base_code: &str) -> MarketDataError {
        let Some(error) = error else {
            return MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: "Request failed without error details".to_string(),
            };
        };

        let info = error
            .info
            .or(error.kind)
            .unwrap_or_else(|| "unknown error".to_string());
        log::warn!("{} rejected request ({}): {}", PROVIDER_ID, error.code, info);

        match error.code {
            CODE_MISSING_ACCESS_KEY => MarketDataError::InvalidAccessKey {
                provider: PROVIDER_ID.to_string(),
            },
            CODE_USAGE_LIMIT_REACHED => MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            },
            CODE_INVALID_BASE_CURRENCY => MarketDataError::InvalidBaseCurrency(base_code.to_string()),
            code => MarketDataError::Rejected {
                provider: PROVIDER_ID.to_string(),
                code,
                info,
            },
        }
    }
}

#[async_trait]
impl RateProvider for FixerProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_latest_rates(
        &self,
        base_code: &str,
        access_key: &str,
    ) -> Result<LatestRates, MarketDataError> {
        if access_key.is_empty() {
            return Err(MarketDataError::InvalidAccessKey {
                provider: PROVIDER_ID.to_string(),
            });
        }

        let url = self.latest_url(base_code, access_key);
        log::debug!("Fetching latest rates from {} for base {}", PROVIDER_ID, base_code);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::Network(e)
            }
        })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }
        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        let body: FixerResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("Failed to parse response: {}", e),
                }
            } else {
                MarketDataError::Network(e)
            }
        })?;
        Self::into_latest_rates(body, base_code)
    }
}
