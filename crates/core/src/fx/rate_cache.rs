use chrono::Utc;
use pagefx_market_data::RateProvider;
use std::sync::Arc;

use super::fx_errors::FxError;
use super::fx_model::RateSnapshot;
use super::fx_traits::KeyValueStoreTrait;
use crate::constants::RATES_CACHE_KEY;
use crate::errors::Result;

/// Returns true once a snapshot fetched at `fetched_at_ms` is `ttl_seconds`
/// old or older.
pub fn is_cache_expired(fetched_at_ms: i64, now_ms: i64, ttl_seconds: u64) -> bool {
    let elapsed_seconds = now_ms.saturating_sub(fetched_at_ms) as f64 / 1000.0;
    elapsed_seconds >= ttl_seconds as f64
}

/// Decodes a stored cache entry.
pub fn parse_cached_snapshot(raw: &str) -> std::result::Result<RateSnapshot, FxError> {
    serde_json::from_str(raw).map_err(|e| FxError::CacheError(e.to_string()))
}

/// Resolves a usable rate snapshot, preferring the cached one.
///
/// A fresh cached snapshot is returned without touching the provider. A
/// missing, unreadable or expired one triggers a fetch; a successful fetch is
/// written back under [`RATES_CACHE_KEY`], replacing the previous entry. A
/// failed fetch leaves the stored entry alone and fails the resolution even
/// if a stale snapshot exists.
#[derive(Clone)]
pub struct RateCacheGateway {
    provider: Arc<dyn RateProvider>,
    store: Arc<dyn KeyValueStoreTrait>,
}

impl RateCacheGateway {
    pub fn new(provider: Arc<dyn RateProvider>, store: Arc<dyn KeyValueStoreTrait>) -> Self {
        Self { provider, store }
    }

    pub async fn resolve_rates(
        &self,
        base_code: &str,
        access_key: &str,
        ttl_seconds: u64,
    ) -> Result<RateSnapshot> {
        self.resolve_rates_at(base_code, access_key, ttl_seconds, Utc::now().timestamp_millis())
            .await
    }

    /// Same as [`resolve_rates`](Self::resolve_rates) with an explicit clock.
    pub async fn resolve_rates_at(
        &self,
        base_code: &str,
        access_key: &str,
        ttl_seconds: u64,
        now_ms: i64,
    ) -> Result<RateSnapshot> {
        if let Some(cached) = self.read_cached_snapshot() {
            if !is_cache_expired(cached.fetched_at_ms, now_ms, ttl_seconds) {
                log::debug!(
                    "Using cached {} rates from {} (fetched at {})",
                    cached.base,
                    cached.date,
                    cached.fetched_at_ms
                );
                return Ok(cached);
            }
            log::debug!("Cached rates expired, refreshing from {}", self.provider.id());
        }

        self.refresh(base_code, access_key, now_ms).await
    }

    /// The stored snapshot, if one exists and can be read.
    pub fn read_cached_snapshot(&self) -> Option<RateSnapshot> {
        let raw = match self.store.get(RATES_CACHE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Failed to read cached rates: {}", e);
                return None;
            }
        };

        match parse_cached_snapshot(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                log::warn!("Ignoring unreadable cached rates: {}", e);
                None
            }
        }
    }

    /// Fetches fresh rates and replaces the stored snapshot.
    pub async fn refresh(&self, base_code: &str, access_key: &str, now_ms: i64) -> Result<RateSnapshot> {
        let latest = self
            .provider
            .fetch_latest_rates(base_code, access_key)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch rates from {}: {}", self.provider.id(), e);
                FxError::from(e)
            })?;

        let snapshot = RateSnapshot::from_latest(latest, now_ms);
        self.store_snapshot(&snapshot).await;
        Ok(snapshot)
    }

    async fn store_snapshot(&self, snapshot: &RateSnapshot) {
        let serialized = match serde_json::to_string(snapshot) {
            Ok(serialized) => serialized,
            Err(e) => {
                log::error!("Failed to serialize rates for caching: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(RATES_CACHE_KEY, &serialized).await {
            log::warn!("Failed to cache rates: {}", e);
        }
    }
}
