//! Integration tests for failing or stalled backing services.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;

use helpers::{TestApp, todo};
use todohub_cache::memory::MemoryCacheProvider;
use todohub_core::config::MemoryCacheConfig;
use todohub_core::error::AppError;
use todohub_core::result::AppResult;
use todohub_core::traits::CacheProvider;
use todohub_core::types::UserId;
use todohub_database::memory::MemoryRefreshTokenRepository;
use todohub_database::{RefreshTokenRepository, Repositories, TodoRepository};
use todohub_entity::SessionRecord;

/// Cache backend that refuses every call.
#[derive(Debug)]
struct DownCache;

#[async_trait]
impl CacheProvider for DownCache {
    async fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Err(AppError::infrastructure("cache down"))
    }
    async fn set_persistent(&self, _key: &str, _value: &str) -> AppResult<()> {
        Err(AppError::infrastructure("cache down"))
    }
    async fn delete(&self, _key: &str) -> AppResult<()> {
        Err(AppError::infrastructure("cache down"))
    }
    async fn delete_many(&self, _keys: &[String]) -> AppResult<u64> {
        Err(AppError::infrastructure("cache down"))
    }
    async fn incr(&self, _key: &str) -> AppResult<i64> {
        Err(AppError::infrastructure("cache down"))
    }
    async fn index_add(&self, _index_key: &str, _member: &str) -> AppResult<()> {
        Err(AppError::infrastructure("cache down"))
    }
    async fn index_members(&self, _index_key: &str) -> AppResult<Vec<String>> {
        Err(AppError::infrastructure("cache down"))
    }
    async fn health_check(&self) -> AppResult<bool> {
        Ok(false)
    }
}

/// Session storage whose lookups never finish within the budget.
#[derive(Debug, Default)]
struct StalledSessions(MemoryRefreshTokenRepository);

#[async_trait]
impl RefreshTokenRepository for StalledSessions {
    async fn upsert(&self, user_id: UserId, token_hash: &str) -> AppResult<SessionRecord> {
        self.0.upsert(user_id, token_hash).await
    }
    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<SessionRecord>> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        self.0.find_by_token_hash(token_hash).await
    }
    async fn delete_by_token_hash(&self, token_hash: &str) -> AppResult<bool> {
        self.0.delete_by_token_hash(token_hash).await
    }
    async fn delete_by_user(&self, user_id: UserId) -> AppResult<bool> {
        self.0.delete_by_user(user_id).await
    }
}

#[tokio::test]
async fn test_write_with_cache_down_is_service_unavailable() {
    let app = TestApp::with_parts(Repositories::in_memory(), Arc::new(DownCache)).await;
    let alice = app.register("alice").await;

    let response = app
        .request("POST", "/todos", Some(todo("buy milk")), Some(&alice.access_token), None)
        .await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["errors"][0]["status"], "503");
    assert_eq!(response.body["errors"][0]["source"]["pointer"], "/todos");
}

#[tokio::test]
async fn test_read_with_cache_down_is_served_fresh() {
    let repositories = Repositories::in_memory();
    let app = TestApp::with_parts(repositories.clone(), Arc::new(DownCache)).await;
    let alice = app.register("alice").await;
    let owner = alice.id.parse::<UserId>().expect("user id");
    repositories
        .todos
        .create(owner, "written behind the cache")
        .await
        .expect("create");

    let response = app
        .request("GET", "/todos", None, Some(&alice.access_token), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["data"][0]["attributes"]["description"],
        "written behind the cache"
    );
}

#[tokio::test]
async fn test_health_reports_cache_down() {
    let app = TestApp::with_parts(Repositories::in_memory(), Arc::new(DownCache)).await;
    let response = app.request("GET", "/health", None, None, None).await;
    assert_eq!(response.body["cache"], "down");
}

#[tokio::test(start_paused = true)]
async fn test_refresh_with_stalled_session_store_is_service_unavailable() {
    let mut repositories = Repositories::in_memory();
    repositories.refresh_tokens = Arc::new(StalledSessions::default());
    let cache = Arc::new(MemoryCacheProvider::new(&MemoryCacheConfig { max_capacity: 100 }));
    let app = TestApp::with_parts(repositories, cache).await;
    let session = app.register("alice").await;

    let response = app
        .request("POST", "/users/token", None, None, Some(&session.refresh_token))
        .await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_ne!(response.status, StatusCode::FORBIDDEN);
}
