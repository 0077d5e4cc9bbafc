use crate::errors::Result;
use async_trait::async_trait;

/// Persistent key-value store the rate cache lives in.
///
/// Values are opaque strings; the gateway stores a serialized snapshot
/// under a single fixed key.
#[async_trait]
pub trait KeyValueStoreTrait: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
