use chrono::NaiveDate;
use pagefx_market_data::LatestRates;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::fx_errors::FxError;

/// Display data for one currency of the registry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyDescriptor {
    pub code: String,
    pub name: String,
    /// Native symbol as it appears in page text, e.g. "R" for ZAR.
    pub symbol: String,
    pub decimal_digits: u32,
}

/// An immutable, timestamped set of rates fetched together.
///
/// Serialized with the field names of the stored cache entry:
/// `{"base", "date", "rates", "timestamp"}` where `timestamp` is epoch millis.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RateSnapshot {
    pub base: String,
    pub date: NaiveDate,
    pub rates: HashMap<String, Decimal>,
    #[serde(rename = "timestamp")]
    pub fetched_at_ms: i64,
}

impl RateSnapshot {
    /// Wraps provider rates with the time they were fetched.
    pub fn from_latest(latest: LatestRates, fetched_at_ms: i64) -> Self {
        Self {
            base: latest.base,
            date: latest.date,
            rates: latest.rates,
            fetched_at_ms,
        }
    }

    pub fn rate(&self, code: &str) -> Option<Decimal> {
        self.rates.get(code).copied()
    }

    /// Returns the rate for `code`, treating a zero rate as missing.
    pub fn require_rate(&self, code: &str) -> Result<Decimal, FxError> {
        match self.rate(code) {
            Some(rate) if !rate.is_zero() => Ok(rate),
            _ => Err(FxError::UnsupportedCurrencyCode(format!(
                "No rates available for currency code {}",
                code
            ))),
        }
    }

    /// Implied rate from `source` to `target` through the common base.
    pub fn cross_rate(&self, source: &str, target: &str) -> Result<Decimal, FxError> {
        let source_rate = self.require_rate(source)?;
        let target_rate = self.require_rate(target)?;
        target_rate
            .checked_div(source_rate)
            .ok_or_else(|| FxError::InvalidAmount(format!("{}/{} cross rate overflow", source, target)))
    }

    /// Converts `amount` of `source` into `target`.
    ///
    /// Multiplies before dividing so a round trip through the same snapshot
    /// keeps as many significant digits as possible.
    pub fn convert(&self, amount: Decimal, source: &str, target: &str) -> Result<Decimal, FxError> {
        let source_rate = self.require_rate(source)?;
        let target_rate = self.require_rate(target)?;
        amount
            .checked_mul(target_rate)
            .and_then(|scaled| scaled.checked_div(source_rate))
            .ok_or_else(|| {
                FxError::InvalidAmount(format!("{} {} is out of range", amount, source))
            })
    }
}
