//! Redis cache provider implementation.

use async_trait::async_trait;
use redis::AsyncCommands;

use todohub_core::error::{AppError, ErrorKind};
use todohub_core::result::AppResult;
use todohub_core::traits::CacheProvider;

use super::client::RedisClient;

/// Redis-backed cache provider.
///
/// Indexes are Redis sets holding unprefixed keys; the prefix is applied
/// whenever a key is touched.
#[derive(Debug, Clone)]
pub struct RedisCacheProvider {
    client: RedisClient,
}

impl RedisCacheProvider {
    /// Create a new Redis cache provider.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Map a Redis error to an AppError.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Infrastructure, format!("Redis error: {e}"), e)
    }
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let result: Option<String> = conn.get(&full_key).await.map_err(Self::map_err)?;
        Ok(result)
    }

    async fn set_persistent(&self, key: &str, value: &str) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let _: () = conn.set(&full_key, value).await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let _: () = conn.del(&full_key).await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn delete_many(&self, keys: &[String]) -> AppResult<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let full_keys: Vec<String> = keys.iter().map(|k| self.client.prefixed_key(k)).collect();
        let mut conn = self.client.conn_mut();
        let removed: u64 = conn.del(&full_keys).await.map_err(Self::map_err)?;
        Ok(removed)
    }

    async fn incr(&self, key: &str) -> AppResult<i64> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let value: i64 = conn.incr(&full_key, 1).await.map_err(Self::map_err)?;
        Ok(value)
    }

    async fn index_add(&self, index_key: &str, member: &str) -> AppResult<()> {
        let full_key = self.client.prefixed_key(index_key);
        let mut conn = self.client.conn_mut();
        let _: () = conn.sadd(&full_key, member).await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn index_members(&self, index_key: &str) -> AppResult<Vec<String>> {
        let full_key = self.client.prefixed_key(index_key);
        let mut conn = self.client.conn_mut();
        let members: Vec<String> = conn.smembers(&full_key).await.map_err(Self::map_err)?;
        Ok(members)
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(pong == "PONG")
    }
}
