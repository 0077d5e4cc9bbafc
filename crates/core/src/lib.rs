//! PageFx Core - currency registry, rate caching, and in-page conversion.
//!
//! This crate holds the conversion logic. It is storage-agnostic and defines
//! the [`fx::KeyValueStoreTrait`] seam implemented by the `storage-sqlite`
//! crate; rates come from any `pagefx_market_data::RateProvider`.

pub mod constants;
pub mod content;
pub mod converter;
pub mod errors;
pub mod fx;
pub mod settings;

pub use content::{ContentNode, ElementNode, OtherNode, TextNode};
pub use converter::{validate_conversion, PageConverter};
pub use fx::{CurrencyDescriptor, FxError, KeyValueStoreTrait, RateCacheGateway, RateSnapshot};
pub use settings::{ConverterSettings, ConverterSettingsUpdate};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
