//! Page-level conversion entry point.

mod converter_service;


pub use converter_service::{validate_conversion, PageConverter};
