/// Storage key holding the cached rate snapshot
pub const RATES_CACHE_KEY: &str = "fixerCurrencyRates";

/// Base currency requested from the provider when none is configured
pub const DEFAULT_BASE_CURRENCY: &str = "ZAR";

/// Seconds a cached rate snapshot stays fresh
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;

/// Fractional digits rendered for converted amounts
pub const DEFAULT_DECIMAL_PLACES: u32 = 0;

/// Element kinds whose content is never rewritten
pub const DEFAULT_EXCLUDED_KINDS: &[&str] = &["script"];
