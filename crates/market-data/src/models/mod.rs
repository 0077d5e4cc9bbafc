//! Market data models
//!
//! - `rates` - Base-relative rate table returned by a provider (LatestRates)

mod rates;

pub use rates::LatestRates;
