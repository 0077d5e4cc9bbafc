use pagefx_market_data::RateProvider;
use std::sync::Arc;

use crate::content::{html, walk_text_nodes, ContentNode};
use crate::errors::{Error, Result};
use crate::fx::{
    get_currency, AmountConverter, CurrencyPattern, FxError, KeyValueStoreTrait, RateCacheGateway,
    RateSnapshot,
};
use crate::settings::settings_model::{validate_base_currency_code, validate_decimal_places};
use crate::settings::{ConverterSettings, ConverterSettingsUpdate};

/// Checks that both codes are registered and priced in `snapshot`.
pub fn validate_conversion(source_code: &str, target_code: &str, snapshot: &RateSnapshot) -> Result<()> {
    snapshot.require_rate(source_code)?;
    snapshot.require_rate(target_code)?;

    for code in [source_code, target_code] {
        if get_currency(code).is_none() {
            return Err(FxError::UnsupportedCurrencyCode(format!(
                "The currency {} is not supported by this library",
                code
            ))
            .into());
        }
    }
    Ok(())
}

/// Converts currency amounts found in content trees.
///
/// Each call to [`replace_in_tree`](Self::replace_in_tree) resolves rates at
/// most once and threads that snapshot through the whole traversal; nothing
/// is memoized between calls beyond what the rate cache stores.
pub struct PageConverter {
    settings: ConverterSettings,
    gateway: RateCacheGateway,
}

impl PageConverter {
    pub fn new(
        settings: ConverterSettings,
        provider: Arc<dyn RateProvider>,
        store: Arc<dyn KeyValueStoreTrait>,
    ) -> Self {
        Self {
            settings,
            gateway: RateCacheGateway::new(provider, store),
        }
    }

    pub fn settings(&self) -> &ConverterSettings {
        &self.settings
    }

    pub fn update_settings(&mut self, update: &ConverterSettingsUpdate) -> Result<()> {
        self.settings.apply_update(update)
    }

    pub fn set_access_key(&mut self, access_key: impl Into<String>) {
        self.settings.access_key = access_key.into();
    }

    pub fn set_base_currency_code(&mut self, base_currency_code: &str) -> Result<()> {
        validate_base_currency_code(base_currency_code)?;
        self.settings.base_currency_code = base_currency_code.trim().to_string();
        Ok(())
    }

    pub fn set_cache_ttl_seconds(&mut self, cache_ttl_seconds: u64) {
        self.settings.cache_ttl_seconds = cache_ttl_seconds;
    }

    pub fn set_decimal_places(&mut self, decimal_places: u32) -> Result<()> {
        validate_decimal_places(decimal_places)?;
        self.settings.decimal_places = decimal_places;
        Ok(())
    }

    pub fn rate_gateway(&self) -> &RateCacheGateway {
        &self.gateway
    }

    /// Resolves rates with the configured base, access key and cache TTL.
    pub async fn resolve_rates(&self) -> Result<RateSnapshot> {
        self.gateway
            .resolve_rates(
                &self.settings.base_currency_code,
                &self.settings.access_key,
                self.settings.cache_ttl_seconds,
            )
            .await
    }

    /// Converts every `source_code` amount under `node` into `target_code`.
    ///
    /// Returns `false` without touching the tree when the codes are equal,
    /// rates cannot be resolved, or either code is unsupported. An amount
    /// that fails to convert keeps its original text; the rest of the tree
    /// is still converted.
    pub async fn replace_in_tree(&self, node: &mut ContentNode, source_code: &str, target_code: &str) -> bool {
        match self.convert_tree(node, source_code, target_code).await {
            Ok(()) => true,
            Err(Error::Fx(FxError::SameCurrencyNoop(_))) => {
                log::info!("Source currency matches target, nothing to do here.");
                false
            }
            Err(e) => {
                log::warn!("Currency conversion {} -> {} aborted: {}", source_code, target_code, e);
                false
            }
        }
    }

    /// Fallible form of [`replace_in_tree`](Self::replace_in_tree).
    ///
    /// Fails with `SameCurrencyNoop` before any rate lookup, and with
    /// `NoRatesAvailable` when no snapshot can be resolved.
    pub async fn convert_tree(&self, node: &mut ContentNode, source_code: &str, target_code: &str) -> Result<()> {
        if source_code == target_code {
            return Err(FxError::SameCurrencyNoop(source_code.to_string()).into());
        }

        let snapshot = self.resolve_rates().await.map_err(|e| {
            log::warn!("No valid currency rates data: {}", e);
            FxError::NoRatesAvailable
        })?;

        self.try_replace_in_tree(node, source_code, target_code, &snapshot)
    }

    /// Same as [`replace_in_tree`](Self::replace_in_tree) with caller-supplied rates.
    pub fn replace_in_tree_with_snapshot(
        &self,
        node: &mut ContentNode,
        source_code: &str,
        target_code: &str,
        snapshot: &RateSnapshot,
    ) -> bool {
        match self.try_replace_in_tree(node, source_code, target_code, snapshot) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Currency conversion {} -> {} aborted: {}", source_code, target_code, e);
                false
            }
        }
    }

    fn try_replace_in_tree(
        &self,
        node: &mut ContentNode,
        source_code: &str,
        target_code: &str,
        snapshot: &RateSnapshot,
    ) -> Result<()> {
        if source_code == target_code {
            return Err(FxError::SameCurrencyNoop(source_code.to_string()).into());
        }
        validate_conversion(source_code, target_code, snapshot)?;

        let (pattern, converter) = self.prepare(source_code, target_code, snapshot)?;
        let is_excluded = |kind: &str| self.settings.is_excluded_kind(kind);
        walk_text_nodes(node, &is_excluded, &mut |text: &str| {
            pattern.replace_all(text, |occurrence| Ok(converter.convert_match_or_keep(occurrence)))
        })?;
        Ok(())
    }

    fn prepare<'a>(
        &self,
        source_code: &'a str,
        target_code: &str,
        snapshot: &'a RateSnapshot,
    ) -> Result<(CurrencyPattern, AmountConverter<'a>)> {
        let source = get_currency(source_code)
            .ok_or_else(|| FxError::UnsupportedCurrencyCode(source_code.to_string()))?;
        let pattern = CurrencyPattern::for_symbol(&source.symbol)?;
        let converter =
            AmountConverter::new(snapshot, source_code, target_code, self.settings.decimal_places)?;
        Ok((pattern, converter))
    }

    /// Converts every `source_code` amount in a single text blob.
    ///
    /// Text without occurrences comes back unchanged, and so does any
    /// occurrence whose amount cannot be converted.
    pub fn replace_in_text(
        &self,
        source_code: &str,
        target_code: &str,
        text: &str,
        snapshot: &RateSnapshot,
    ) -> Result<String> {
        validate_conversion(source_code, target_code, snapshot)?;
        let (pattern, converter) = self.prepare(source_code, target_code, snapshot)?;
        Ok(pattern.replace_all(text, |occurrence| Ok(converter.convert_match_or_keep(occurrence)))?)
    }

    /// Parses `markup` as a fragment, converts it and renders it back.
    ///
    /// Returns `None` when the conversion did not complete.
    pub async fn convert_html(&self, markup: &str, source_code: &str, target_code: &str) -> Option<String> {
        let mut tree = html::parse_fragment(markup);
        if self.replace_in_tree(&mut tree, source_code, target_code).await {
            Some(tree.to_html())
        } else {
            None
        }
    }
}
