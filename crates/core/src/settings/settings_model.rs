use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_CURRENCY, DEFAULT_CACHE_TTL_SECONDS, DEFAULT_DECIMAL_PLACES,
    DEFAULT_EXCLUDED_KINDS,
};
use crate::errors::{Error, Result};

/// Largest number of fractional digits a converted amount is rendered with.
pub const MAX_DECIMAL_PLACES: u32 = 20;

/// Configuration of a [`PageConverter`](crate::converter::PageConverter).
///
/// Defaults: no access key, base "ZAR", 300 second cache, whole units,
/// script content excluded.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ConverterSettings {
    /// Credential sent to the rate provider.
    pub access_key: String,
    /// Currency the provider expresses rates against.
    pub base_currency_code: String,
    /// Seconds a cached rate snapshot stays fresh.
    pub cache_ttl_seconds: u64,
    /// Fractional digits rendered for converted amounts.
    pub decimal_places: u32,
    /// Element kinds (case-insensitive) whose subtree is never rewritten.
    pub excluded_kinds: Vec<String>,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            access_key: String::new(),
            base_currency_code: DEFAULT_BASE_CURRENCY.to_string(),
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            decimal_places: DEFAULT_DECIMAL_PLACES,
            excluded_kinds: DEFAULT_EXCLUDED_KINDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Partial update; `None` fields keep their current value.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConverterSettingsUpdate {
    pub access_key: Option<String>,
    pub base_currency_code: Option<String>,
    pub cache_ttl_seconds: Option<u64>,
    pub decimal_places: Option<u32>,
    pub excluded_kinds: Option<Vec<String>>,
}

impl ConverterSettings {
    pub fn with_access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = access_key.into();
        self
    }

    /// Applies every field present in `update`, rejecting the whole update
    /// if any value is out of range.
    pub fn apply_update(&mut self, update: &ConverterSettingsUpdate) -> Result<()> {
        if let Some(ref base) = update.base_currency_code {
            validate_base_currency_code(base)?;
        }
        if let Some(places) = update.decimal_places {
            validate_decimal_places(places)?;
        }

        if let Some(ref access_key) = update.access_key {
            self.access_key = access_key.clone();
        }
        if let Some(ref base) = update.base_currency_code {
            self.base_currency_code = base.trim().to_string();
        }
        if let Some(ttl) = update.cache_ttl_seconds {
            self.cache_ttl_seconds = ttl;
        }
        if let Some(places) = update.decimal_places {
            self.decimal_places = places;
        }
        if let Some(ref kinds) = update.excluded_kinds {
            self.excluded_kinds = kinds.clone();
        }
        Ok(())
    }

    /// True when elements of `kind` must be skipped along with their children.
    pub fn is_excluded_kind(&self, kind: &str) -> bool {
        self.excluded_kinds
            .iter()
            .any(|excluded| excluded.eq_ignore_ascii_case(kind))
    }
}

pub(crate) fn validate_base_currency_code(code: &str) -> Result<()> {
    if code.trim().is_empty() {
        return Err(Error::InvalidConfigValue(
            "base currency code must not be empty".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn validate_decimal_places(places: u32) -> Result<()> {
    if places > MAX_DECIMAL_PLACES {
        return Err(Error::InvalidConfigValue(format!(
            "decimal places must be at most {}, got {}",
            MAX_DECIMAL_PLACES, places
        )));
    }
    Ok(())
}
