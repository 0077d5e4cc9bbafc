//! Tests for the rate cache gateway.
//!
//! # Contract Points
//!
//! 1. Cache hit: a fresh stored snapshot is returned with no provider call and no write
//! 2. Refresh: a missing or expired snapshot is fetched and written exactly once
//! 3. Failure: a failed fetch surfaces an error and leaves the stored entry untouched

#[cfg(test)]
mod tests {
    use crate::constants::RATES_CACHE_KEY;
    use crate::errors::{Error, Result};
    use crate::fx::{FxError, KeyValueStoreTrait, RateCacheGateway, RateSnapshot};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use pagefx_market_data::{LatestRates, MarketDataError, RateProvider};
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    const NOW_MS: i64 = 1_700_000_000_000;

    // =========================================================================
    // Mock KeyValueStore
    // =========================================================================

    #[derive(Clone, Default)]
    struct MockStore {
        values: Arc<Mutex<HashMap<String, String>>>,
        writes: Arc<Mutex<usize>>,
        fail_on_set: Arc<Mutex<bool>>,
    }

    impl MockStore {
        fn with_snapshot(snapshot: &RateSnapshot) -> Self {
            let store = Self::default();
            store.values.lock().unwrap().insert(
                RATES_CACHE_KEY.to_string(),
                serde_json::to_string(snapshot).unwrap(),
            );
            store
        }

        fn stored(&self) -> Option<RateSnapshot> {
            self.values
                .lock()
                .unwrap()
                .get(RATES_CACHE_KEY)
                .map(|raw| serde_json::from_str(raw).unwrap())
        }

        fn write_count(&self) -> usize {
            *self.writes.lock().unwrap()
        }
    }

    #[async_trait]
    impl KeyValueStoreTrait for MockStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<()> {
            *self.writes.lock().unwrap() += 1;
            if *self.fail_on_set.lock().unwrap() {
                return Err(Error::Unexpected("Intentional write failure".into()));
            }
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    // =========================================================================
    // Mock RateProvider
    // =========================================================================

    #[derive(Clone, Copy)]
    enum ProviderBehavior {
        Succeed,
        RejectBase,
        TimeOut,
    }

    struct MockProvider {
        behavior: ProviderBehavior,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl MockProvider {
        fn new(behavior: ProviderBehavior) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RateProvider for MockProvider {
        fn id(&self) -> &'static str {
            "MOCK"
        }

        async fn fetch_latest_rates(
            &self,
            base_code: &str,
            access_key: &str,
        ) -> std::result::Result<LatestRates, MarketDataError> {
            self.calls
                .lock()
                .unwrap()
                .push((base_code.to_string(), access_key.to_string()));
            match self.behavior {
                ProviderBehavior::Succeed => Ok(LatestRates::new(
                    base_code.to_string(),
                    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                    HashMap::from([("USD".to_string(), dec!(0.054))]),
                )),
                ProviderBehavior::RejectBase => {
                    Err(MarketDataError::InvalidBaseCurrency(base_code.to_string()))
                }
                ProviderBehavior::TimeOut => Err(MarketDataError::Timeout {
                    provider: "MOCK".to_string(),
                }),
            }
        }
    }

    fn cached_snapshot(fetched_at_ms: i64) -> RateSnapshot {
        RateSnapshot {
            base: "ZAR".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            rates: HashMap::from([
                ("ZAR".to_string(), dec!(1)),
                ("USD".to_string(), dec!(0.05)),
            ]),
            fetched_at_ms,
        }
    }

    fn gateway(provider: &Arc<MockProvider>, store: &MockStore) -> RateCacheGateway {
        RateCacheGateway::new(provider.clone(), Arc::new(store.clone()))
    }

    // =========================================================================
    // Tests
    // =========================================================================

    #[tokio::test]
    async fn test_fresh_cache_is_returned_without_fetch() {
        let cached = cached_snapshot(NOW_MS - 30 * 1000);
        let store = MockStore::with_snapshot(&cached);
        let provider = MockProvider::new(ProviderBehavior::Succeed);

        let snapshot = gateway(&provider, &store)
            .resolve_rates_at("ZAR", "key", 300, NOW_MS)
            .await
            .unwrap();

        assert_eq!(snapshot, cached);
        assert_eq!(provider.call_count(), 0);
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_expired_cache_is_refreshed() {
        let store = MockStore::with_snapshot(&cached_snapshot(NOW_MS - 30 * 1000));
        let provider = MockProvider::new(ProviderBehavior::Succeed);

        let snapshot = gateway(&provider, &store)
            .resolve_rates_at("ZAR", "key", 1, NOW_MS)
            .await
            .unwrap();

        assert_eq!(snapshot.fetched_at_ms, NOW_MS);
        assert_eq!(snapshot.rate("USD"), Some(dec!(0.054)));
        assert_eq!(snapshot.rate("ZAR"), Some(dec!(1)));
        assert_eq!(provider.call_count(), 1);
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.stored(), Some(snapshot));
    }

    #[tokio::test]
    async fn test_missing_cache_fetches_with_configured_key_and_base() {
        let store = MockStore::default();
        let provider = MockProvider::new(ProviderBehavior::Succeed);

        gateway(&provider, &store)
            .resolve_rates_at("GBP", "my-test-access-key", 300, NOW_MS)
            .await
            .unwrap();

        let calls = provider.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![("GBP".to_string(), "my-test-access-key".to_string())]
        );
        assert_eq!(store.stored().unwrap().base, "GBP");
    }

    #[tokio::test]
    async fn test_invalid_base_fails_and_caches_nothing() {
        let store = MockStore::default();
        let provider = MockProvider::new(ProviderBehavior::RejectBase);

        let result = gateway(&provider, &store)
            .resolve_rates_at("blah", "key", 300, NOW_MS)
            .await;

        assert!(matches!(
            result,
            Err(Error::Fx(FxError::ProviderRejected(_)))
        ));
        assert_eq!(store.write_count(), 0);
        assert!(store.stored().is_none());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_stale_entry_but_fails() {
        let stale = cached_snapshot(NOW_MS - 3_600 * 1000);
        let store = MockStore::with_snapshot(&stale);
        let provider = MockProvider::new(ProviderBehavior::TimeOut);

        let result = gateway(&provider, &store)
            .resolve_rates_at("ZAR", "key", 300, NOW_MS)
            .await;

        assert!(matches!(
            result,
            Err(Error::Fx(FxError::ProviderUnreachable(_)))
        ));
        assert_eq!(store.write_count(), 0);
        assert_eq!(store.stored(), Some(stale));
    }

    #[tokio::test]
    async fn test_corrupt_cache_entry_is_treated_as_miss() {
        let store = MockStore::default();
        store
            .values
            .lock()
            .unwrap()
            .insert(RATES_CACHE_KEY.to_string(), "{}".to_string());
        let provider = MockProvider::new(ProviderBehavior::Succeed);

        let snapshot = gateway(&provider, &store)
            .resolve_rates_at("ZAR", "key", 300, NOW_MS)
            .await
            .unwrap();

        assert_eq!(provider.call_count(), 1);
        assert_eq!(store.stored(), Some(snapshot));
    }

    #[tokio::test]
    async fn test_failed_write_still_returns_fresh_rates() {
        let store = MockStore::default();
        *store.fail_on_set.lock().unwrap() = true;
        let provider = MockProvider::new(ProviderBehavior::Succeed);

        let snapshot = gateway(&provider, &store)
            .resolve_rates_at("ZAR", "key", 300, NOW_MS)
            .await
            .unwrap();

        assert_eq!(snapshot.rate("USD"), Some(dec!(0.054)));
        assert_eq!(store.write_count(), 1);
        assert!(store.stored().is_none());
    }
}
