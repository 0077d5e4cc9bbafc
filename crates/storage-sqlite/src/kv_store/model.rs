//! Database model for cached key-value entries.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// One row of the key-value store, e.g. the serialized rate snapshot.
#[derive(Queryable, Selectable, Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::kv_store)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct KeyValueDB {
    pub key: String,
    pub value: String,
    pub updated_at: String,
}
