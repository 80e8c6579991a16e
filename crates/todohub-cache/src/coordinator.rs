//! Per-principal response cache with invalidation on mutation.
//!
//! Keys are `resp:{principal}:{generation}:{route}`. The generation is a
//! per-principal counter bumped by [`CacheCoordinator::invalidate_all`]:
//! after the bump no read can reach an older entry, and a read that was
//! computed before the bump stores its result under the old generation,
//! where nobody will look for it. Every key written is also added to the
//! principal's index so invalidation can delete dead entries directly.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use todohub_core::result::AppResult;
use todohub_core::timeout::bounded;
use todohub_core::traits::CacheProvider;
use todohub_core::types::UserId;

use crate::keys;
use crate::provider::CacheManager;

/// A previously computed response, as stored in the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedResponse {
    /// Serialized response body.
    pub body: serde_json::Value,
    /// When the response was computed.
    pub stored_at: DateTime<Utc>,
}

impl CachedResponse {
    /// Wrap a freshly computed body.
    pub fn new(body: serde_json::Value) -> Self {
        Self {
            body,
            stored_at: Utc::now(),
        }
    }
}

/// Serves, stores, and invalidates cached responses per principal.
#[derive(Debug, Clone)]
pub struct CacheCoordinator {
    cache: CacheManager,
    budget: Duration,
}

impl CacheCoordinator {
    /// Create a coordinator bounding each cache call by `budget`.
    pub fn new(cache: CacheManager, budget: Duration) -> Self {
        Self { cache, budget }
    }

    /// Look up the cached response of `route` for `principal`.
    pub async fn try_serve(
        &self,
        principal: UserId,
        route: &str,
    ) -> AppResult<Option<CachedResponse>> {
        let generation = self.generation(principal).await?;
        self.lookup(principal, generation, route).await
    }

    /// Cache `response` as the result of `route` for `principal`.
    ///
    /// Only call this with a response computed after the current
    /// generation was observed; [`Self::read_through`] does that for you.
    pub async fn store(
        &self,
        principal: UserId,
        route: &str,
        response: &CachedResponse,
    ) -> AppResult<()> {
        let generation = self.generation(principal).await?;
        self.store_at(principal, generation, route, response).await
    }

    /// Make every cached response of `principal` unreachable, then delete
    /// the indexed entries. Returns the number of entries deleted.
    pub async fn invalidate_all(&self, principal: UserId) -> AppResult<u64> {
        let generation = bounded(
            self.budget,
            "cache.invalidate.bump",
            self.cache.incr(&keys::response_generation(principal)),
        )
        .await?;

        let index = keys::response_index(principal);
        let members = bounded(
            self.budget,
            "cache.invalidate.members",
            self.cache.index_members(&index),
        )
        .await?;
        bounded(self.budget, "cache.invalidate.index", self.cache.delete(&index)).await?;
        let removed = bounded(
            self.budget,
            "cache.invalidate.entries",
            self.cache.delete_many(&members),
        )
        .await?;

        debug!(
            principal = %principal,
            generation,
            removed,
            "Invalidated cached responses"
        );
        Ok(removed)
    }

    /// Serve `route` from the cache, or compute it and cache the result.
    ///
    /// Cache failures on this path are logged and the value is computed
    /// directly: a read may skip the cache but never serve stale data.
    pub async fn read_through<T, F, Fut>(
        &self,
        principal: UserId,
        route: &str,
        compute: F,
    ) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let generation = match self.generation(principal).await {
            Ok(generation) => Some(generation),
            Err(e) => {
                warn!(principal = %principal, error = %e, "Cache unavailable, bypassing");
                None
            }
        };

        if let Some(generation) = generation {
            match self.lookup(principal, generation, route).await {
                Ok(Some(hit)) => match serde_json::from_value::<T>(hit.body) {
                    Ok(value) => {
                        debug!(principal = %principal, route, "Cache hit");
                        return Ok(value);
                    }
                    Err(e) => warn!(route, error = %e, "Discarding undecodable cache entry"),
                },
                Ok(None) => debug!(principal = %principal, route, "Cache miss"),
                Err(e) => warn!(principal = %principal, error = %e, "Cache lookup failed"),
            }
        }

        let value = compute().await?;

        if let Some(generation) = generation {
            let stored = match serde_json::to_value(&value) {
                Ok(body) => {
                    self.store_at(principal, generation, route, &CachedResponse::new(body))
                        .await
                }
                Err(e) => Err(e.into()),
            };
            if let Err(e) = stored {
                warn!(principal = %principal, route, error = %e, "Failed to cache response");
            }
        }

        Ok(value)
    }

    /// Check that the cache backend is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        bounded(self.budget, "cache.health", self.cache.health_check()).await
    }

    async fn generation(&self, principal: UserId) -> AppResult<i64> {
        let raw = bounded(
            self.budget,
            "cache.generation",
            self.cache.get(&keys::response_generation(principal)),
        )
        .await?;
        Ok(raw.and_then(|g| g.parse().ok()).unwrap_or(0))
    }

    async fn lookup(
        &self,
        principal: UserId,
        generation: i64,
        route: &str,
    ) -> AppResult<Option<CachedResponse>> {
        let key = keys::response(principal, generation, route);
        bounded(self.budget, "cache.get", self.cache.get_json(&key)).await
    }

    async fn store_at(
        &self,
        principal: UserId,
        generation: i64,
        route: &str,
        response: &CachedResponse,
    ) -> AppResult<()> {
        let key = keys::response(principal, generation, route);
        let value = serde_json::to_string(response)?;
        bounded(self.budget, "cache.set", self.cache.set_persistent(&key, &value)).await?;
        // Indexed after the write so a concurrent invalidation either sees
        // the key or runs before it exists.
        bounded(
            self.budget,
            "cache.index",
            self.cache
                .index_add(&keys::response_index(principal), &key),
        )
        .await
    }
}

#[cfg(all(test, feature = "memory"))]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::memory::MemoryCacheProvider;
    use todohub_core::config::MemoryCacheConfig;

    fn coordinator() -> CacheCoordinator {
        let provider = MemoryCacheProvider::new(&MemoryCacheConfig { max_capacity: 1000 });
        CacheCoordinator::new(
            CacheManager::from_provider(Arc::new(provider)),
            Duration::from_millis(200),
        )
    }

    #[tokio::test]
    async fn test_store_then_serve() {
        let coordinator = coordinator();
        let alice = UserId::new();
        assert!(coordinator.try_serve(alice, "/todos").await.unwrap().is_none());

        let response = CachedResponse::new(serde_json::json!({"data": []}));
        coordinator.store(alice, "/todos", &response).await.unwrap();

        let hit = coordinator.try_serve(alice, "/todos").await.unwrap();
        assert_eq!(hit, Some(response));
    }

    #[tokio::test]
    async fn test_entries_are_isolated_per_principal() {
        let coordinator = coordinator();
        let alice = UserId::new();
        let bob = UserId::new();
        let response = CachedResponse::new(serde_json::json!({"owner": "alice"}));
        coordinator.store(alice, "/todos", &response).await.unwrap();

        assert!(coordinator.try_serve(bob, "/todos").await.unwrap().is_none());
        coordinator.invalidate_all(bob).await.unwrap();
        assert!(coordinator.try_serve(alice, "/todos").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_invalidate_all_removes_every_route() {
        let coordinator = coordinator();
        let alice = UserId::new();
        let response = CachedResponse::new(serde_json::json!(1));
        coordinator.store(alice, "/todos", &response).await.unwrap();
        coordinator
            .store(alice, "/todos?page[limit]=5", &response)
            .await
            .unwrap();

        let removed = coordinator.invalidate_all(alice).await.unwrap();
        assert_eq!(removed, 2);
        assert!(coordinator.try_serve(alice, "/todos").await.unwrap().is_none());
        assert!(
            coordinator
                .try_serve(alice, "/todos?page[limit]=5")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_read_through_caches_result() {
        let coordinator = coordinator();
        let alice = UserId::new();

        let first: Vec<String> = coordinator
            .read_through(alice, "/todos", || async { Ok(vec!["a".to_string()]) })
            .await
            .unwrap();
        let second: Vec<String> = coordinator
            .read_through(alice, "/todos", || async {
                panic!("should have been served from cache")
            })
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_read_racing_a_mutation_is_never_served() {
        let coordinator = coordinator();
        let alice = UserId::new();

        // The mutation's invalidation lands while the read is computing.
        let stale: Vec<String> = coordinator
            .read_through(alice, "/todos", || {
                let coordinator = coordinator.clone();
                async move {
                    coordinator.invalidate_all(alice).await?;
                    Ok(vec!["before write".to_string()])
                }
            })
            .await
            .unwrap();
        assert_eq!(stale, vec!["before write".to_string()]);

        assert!(coordinator.try_serve(alice, "/todos").await.unwrap().is_none());
        let fresh: Vec<String> = coordinator
            .read_through(alice, "/todos", || async { Ok(vec!["after write".to_string()]) })
            .await
            .unwrap();
        assert_eq!(fresh, vec!["after write".to_string()]);
    }

    #[tokio::test]
    async fn test_compute_errors_are_not_cached() {
        let coordinator = coordinator();
        let alice = UserId::new();
        let result: AppResult<Vec<String>> = coordinator
            .read_through(alice, "/todos", || async {
                Err(todohub_core::AppError::not_found("missing"))
            })
            .await;
        assert!(result.is_err());
        assert!(coordinator.try_serve(alice, "/todos").await.unwrap().is_none());
    }
}
