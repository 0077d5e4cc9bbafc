use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::KeyValueDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::kv_store::dsl::*;
use pagefx_core::errors::Result;
use pagefx_core::fx::KeyValueStoreTrait;

/// SQLite-backed [`KeyValueStoreTrait`].
///
/// Reads go through the pool; writes are serialized through the writer actor.
pub struct KeyValueRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl KeyValueRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        KeyValueRepository { pool, writer }
    }

    /// Removes `entry_key`; missing keys are not an error.
    pub async fn delete(&self, entry_key: &str) -> Result<()> {
        let entry_key = entry_key.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(kv_store.filter(key.eq(entry_key)))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}

#[async_trait]
impl KeyValueStoreTrait for KeyValueRepository {
    fn get(&self, entry_key: &str) -> Result<Option<String>> {
        let mut conn = get_connection(&self.pool)?;
        let stored = kv_store
            .filter(key.eq(entry_key))
            .select(value)
            .first::<String>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(stored)
    }

    async fn set(&self, entry_key: &str, entry_value: &str) -> Result<()> {
        let row = KeyValueDB {
            key: entry_key.to_string(),
            value: entry_value.to_string(),
            updated_at: Utc::now().to_rfc3339(),
        };
        log::debug!("Storing {} ({} bytes)", row.key, row.value.len());

        self.writer
            .exec(move |conn| {
                diesel::replace_into(kv_store)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
