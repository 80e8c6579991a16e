//! Selection of the backend that holds cached responses.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use todohub_core::config::CacheConfig;
use todohub_core::error::AppError;
use todohub_core::result::AppResult;
use todohub_core::traits::CacheProvider;

/// The cache backend chosen by `cache.provider`.
///
/// Redis is shared between server instances, so invalidations made by one
/// instance are seen by all. The in-memory provider is per process and is
/// meant for development and tests.
#[derive(Debug, Clone)]
pub struct CacheManager {
    inner: Arc<dyn CacheProvider>,
}

impl CacheManager {
    /// Open the backend named by `config.provider`.
    pub async fn new(config: &CacheConfig) -> AppResult<Self> {
        let inner: Arc<dyn CacheProvider> = match config.provider.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!(prefix = %config.key_prefix, "Using Redis response cache");
                let client =
                    crate::redis::RedisClient::connect(&config.redis, &config.key_prefix).await?;
                Arc::new(crate::redis::RedisCacheProvider::new(client))
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!(
                    max_capacity = config.memory.max_capacity,
                    "Using in-process response cache; not shared between instances"
                );
                Arc::new(crate::memory::MemoryCacheProvider::new(&config.memory))
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown cache provider: '{other}'. Supported: memory, redis"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Wrap an already constructed provider.
    pub fn from_provider(provider: Arc<dyn CacheProvider>) -> Self {
        Self { inner: provider }
    }
}

#[async_trait]
impl CacheProvider for CacheManager {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set_persistent(&self, key: &str, value: &str) -> AppResult<()> {
        self.inner.set_persistent(key, value).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.inner.delete(key).await
    }

    async fn delete_many(&self, keys: &[String]) -> AppResult<u64> {
        self.inner.delete_many(keys).await
    }

    async fn incr(&self, key: &str) -> AppResult<i64> {
        self.inner.incr(key).await
    }

    async fn index_add(&self, index_key: &str, member: &str) -> AppResult<()> {
        self.inner.index_add(index_key, member).await
    }

    async fn index_members(&self, index_key: &str) -> AppResult<Vec<String>> {
        self.inner.index_members(index_key).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}
