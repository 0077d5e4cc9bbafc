//! Exchange rate provider abstractions and implementations.
//!
//! This module contains:
//! - The `RateProvider` trait that all rate sources implement
//! - Concrete provider implementations (Fixer)
//!
//! Providers are stateless with respect to credentials: the access key is
//! passed on every call so callers can rotate it without rebuilding the
//! provider.

mod traits;

pub mod fixer;

pub use traits::RateProvider;
