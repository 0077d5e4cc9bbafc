//! FX (Foreign Exchange) module - currency registry, rate snapshots, the
//! rate cache gateway, and the text matching and conversion primitives.

pub mod currency;
pub mod currency_converter;
pub mod currency_matcher;
mod fx_errors;
mod fx_model;
mod fx_traits;
mod rate_cache;

#[cfg(test)]
mod rate_cache_tests;

pub use currency::{currency_codes, get_currency, is_supported_currency};
pub use currency_converter::{convert_amount_text, format_money, parse_amount, AmountConverter};
pub use currency_matcher::{find_currency_occurrences, CurrencyMatch, CurrencyPattern};
pub use fx_errors::FxError;
pub use fx_model::{CurrencyDescriptor, RateSnapshot};
pub use fx_traits::KeyValueStoreTrait;
pub use rate_cache::{is_cache_expired, parse_cached_snapshot, RateCacheGateway};
