//! JSON-driven currency registry.
//!
//! Loads `currencies.json` at compile time via `include_str!` and indexes it
//! by code once via `lazy_static`. The registry never changes afterwards.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Deserialize;

use super::fx_model::CurrencyDescriptor;

// ── JSON schema ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CurrencyEntry {
    name: String,
    /// International symbol, e.g. "CA$". Kept in the data file for reference.
    #[allow(dead_code)]
    symbol: String,
    symbol_native: String,
    #[serde(default)]
    decimal_digits: u32,
}

// ── Registry ─────────────────────────────────────────────────────────────────

lazy_static! {
    static ref REGISTRY: HashMap<String, CurrencyDescriptor> = load_registry();
}

fn load_registry() -> HashMap<String, CurrencyDescriptor> {
    let json = include_str!("currencies.json");
    let entries: HashMap<String, CurrencyEntry> =
        serde_json::from_str(json).expect("currencies.json must be valid");

    entries
        .into_iter()
        .map(|(code, entry)| {
            let descriptor = CurrencyDescriptor {
                code: code.clone(),
                name: entry.name,
                symbol: entry.symbol_native,
                decimal_digits: entry.decimal_digits,
            };
            (code, descriptor)
        })
        .collect()
}

/// Looks up a currency by its ISO 4217 code.
pub fn get_currency(code: &str) -> Option<&'static CurrencyDescriptor> {
    REGISTRY.get(code)
}

/// Returns true when the registry knows how to display `code`.
pub fn is_supported_currency(code: &str) -> bool {
    REGISTRY.contains_key(code)
}

/// All registered codes, sorted.
pub fn currency_codes() -> Vec<&'static str> {
    let mut codes: Vec<&'static str> = REGISTRY.keys().map(String::as_str).collect();
    codes.sort_unstable();
    codes
}
