//! Pagefx Market Data Crate
//!
//! This crate provides provider-agnostic exchange rate fetching for the
//! pagefx in-page currency converter.
//!
//! # Overview
//!
//! A rate provider returns a table of rates relative to a single base
//! currency. The core crate wraps that table into a timestamped snapshot
//! and caches it; this crate only knows how to talk to the remote API.
//!
//! ```text
//! +------------------+     +------------------+
//! |  Rate Cache      | --> |   RateProvider   |  (trait)
//! |  Gateway (core)  |     +------------------+
//! +------------------+              |
//!                                   v
//!                          +------------------+
//!                          |  FixerProvider   |  (data.fixer.io)
//!                          +------------------+
//!                                   |
//!                                   v
//!                          +------------------+
//!                          |   LatestRates    |  {base, date, rates}
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`RateProvider`] - Contract every rate source implements
//! - [`LatestRates`] - Base-relative rate table returned by a provider
//! - [`MarketDataError`] - Failure modes of a provider call

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::LatestRates;
pub use provider::fixer::FixerProvider;
pub use provider::RateProvider;
