//! Cache provider trait for pluggable caching backends.

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for cache backends (Redis or in-memory).
///
/// All values are strings (JSON) and live until deleted or evicted. Every
/// operation touches a single key; no backend is required to offer
/// transactions across keys. Key sets ("indexes") let callers track related
/// keys without scanning the keyspace.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist or has expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value that lives until it is deleted.
    async fn set_persistent(&self, key: &str, value: &str) -> AppResult<()>;

    /// Delete a key from the cache.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Delete several keys. Returns the number of keys that existed.
    async fn delete_many(&self, keys: &[String]) -> AppResult<u64>;

    /// Atomically increment an integer value by 1, starting from 0.
    /// Returns the new value.
    async fn incr(&self, key: &str) -> AppResult<i64>;

    /// Add `member` to the set stored at `index_key`.
    async fn index_add(&self, index_key: &str, member: &str) -> AppResult<()>;

    /// Return every member of the set stored at `index_key`.
    async fn index_members(&self, index_key: &str) -> AppResult<Vec<String>>;

    /// Get a typed value by deserializing from JSON.
    async fn get_json<T: serde::de::DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> AppResult<Option<T>>
    where
        Self: Sized,
    {
        match self.get(key).await? {
            Some(value) => {
                let parsed = serde_json::from_str(&value)?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Check that the cache backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
