use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Latest exchange rates as returned by a provider.
///
/// Every entry in `rates` is the amount of that currency one unit of `base`
/// buys. Providers normally include the base itself with a rate of one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatestRates {
    /// Currency the rates are expressed against
    pub base: String,

    /// Business date the rates were published for
    pub date: NaiveDate,

    /// Currency code -> rate relative to `base`
    pub rates: HashMap<String, Decimal>,
}

impl LatestRates {
    /// Create a rate table, making sure the base currency maps to one.
    pub fn new(base: String, date: NaiveDate, mut rates: HashMap<String, Decimal>) -> Self {
        rates.entry(base.clone()).or_insert(Decimal::ONE);
        Self { base, date, rates }
    }

    /// Look up the rate for a currency code.
    pub fn rate(&self, code: &str) -> Option<Decimal> {
        self.rates.get(code).copied()
    }
}
