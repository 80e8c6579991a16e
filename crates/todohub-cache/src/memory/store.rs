//! In-memory cache implementation using the moka crate.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use moka::future::Cache;
use moka::notification::RemovalCause;
use tracing::debug;

use todohub_core::config::MemoryCacheConfig;
use todohub_core::result::AppResult;
use todohub_core::traits::CacheProvider;

/// In-memory cache provider.
///
/// Values live in a bounded moka cache. Counters and key indexes are kept
/// in separate maps so capacity eviction can never reset a generation
/// counter or drop an index. Index members follow the values they name:
/// when moka evicts or removes a value, the member leaves its index too.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    cache: Cache<String, String>,
    counters: Arc<DashMap<String, AtomicI64>>,
    indexes: Arc<DashMap<String, HashSet<String>>>,
    /// Member key to the index that lists it.
    owners: Arc<DashMap<String, String>>,
    prune_threshold: usize,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let indexes: Arc<DashMap<String, HashSet<String>>> = Arc::new(DashMap::new());
        let owners: Arc<DashMap<String, String>> = Arc::new(DashMap::new());

        let listener_indexes = Arc::clone(&indexes);
        let listener_owners = Arc::clone(&owners);
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .eviction_listener(move |key: Arc<String>, _value: String, cause| {
                if cause == RemovalCause::Replaced {
                    return;
                }
                if let Some((_, index_key)) = listener_owners.remove(key.as_str()) {
                    if let Some(mut members) = listener_indexes.get_mut(&index_key) {
                        members.remove(key.as_str());
                    }
                }
            })
            .build();

        let prune_threshold = usize::try_from(config.max_capacity)
            .unwrap_or(usize::MAX)
            .saturating_mul(2)
            .max(16);

        Self {
            cache,
            counters: Arc::new(DashMap::new()),
            indexes,
            owners,
            prune_threshold,
        }
    }

    /// Drops members whose values are no longer cached.
    ///
    /// Covers values evicted before they were indexed, which the eviction
    /// listener cannot see.
    fn prune_index(&self, index_key: &str) {
        let Some(mut members) = self.indexes.get_mut(index_key) else {
            return;
        };
        if members.len() <= self.prune_threshold {
            return;
        }
        let before = members.len();
        let mut stale = Vec::new();
        members.retain(|member| {
            let live = self.cache.contains_key(member.as_str());
            if !live {
                stale.push(member.clone());
            }
            live
        });
        drop(members);
        for member in &stale {
            self.owners.remove(member);
        }
        debug!(index_key, before, removed = stale.len(), "Pruned cache index");
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        if let Some(counter) = self.counters.get(key) {
            return Ok(Some(counter.load(Ordering::SeqCst).to_string()));
        }
        Ok(self.cache.get(key).await)
    }

    async fn set_persistent(&self, key: &str, value: &str) -> AppResult<()> {
        self.cache.insert(key.to_string(), value.to_string()).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.remove(key).await;
        self.counters.remove(key);
        if let Some((_, members)) = self.indexes.remove(key) {
            for member in members {
                self.owners.remove(&member);
            }
        }
        Ok(())
    }

    async fn delete_many(&self, keys: &[String]) -> AppResult<u64> {
        let mut removed = 0u64;
        for key in keys {
            if self.cache.remove(key.as_str()).await.is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn incr(&self, key: &str) -> AppResult<i64> {
        let entry = self
            .counters
            .entry(key.to_string())
            .or_insert_with(|| AtomicI64::new(0));
        Ok(entry.value().fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn index_add(&self, index_key: &str, member: &str) -> AppResult<()> {
        self.indexes
            .entry(index_key.to_string())
            .or_default()
            .insert(member.to_string());
        self.owners
            .insert(member.to_string(), index_key.to_string());
        self.prune_index(index_key);
        Ok(())
    }

    async fn index_members(&self, index_key: &str) -> AppResult<Vec<String>> {
        Ok(self
            .indexes
            .get(index_key)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
