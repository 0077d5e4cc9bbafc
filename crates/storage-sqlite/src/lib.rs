//! SQLite storage implementation for PageFx.
//!
//! This crate provides the persistent rate cache using Diesel ORM with SQLite.
//! It implements the [`KeyValueStoreTrait`](pagefx_core::fx::KeyValueStoreTrait)
//! defined in `pagefx-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The key-value repository backing the rate cache
//!
//! ```text
//!   core (RateCacheGateway)
//!            │
//!            ▼
//!   storage-sqlite (this crate)
//!            │
//!            ▼
//!        SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod kv_store;
pub mod schema;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

pub use errors::{IntoCore, StorageError};
pub use kv_store::KeyValueRepository;

// Re-export from pagefx-core for convenience
pub use pagefx_core::errors::{DatabaseError, Error, Result};
