//! Shared test helpers for integration tests.
//!
//! Builds the full router over in-memory storage and an in-memory cache, so
//! the tests run without PostgreSQL or Redis.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use todohub_auth::PasswordHasher;
use todohub_cache::CacheManager;
use todohub_cache::memory::MemoryCacheProvider;
use todohub_core::config::AppConfig;
use todohub_core::traits::CacheProvider;
use todohub_database::Repositories;
use todohub_entity::Role;
use todohub_entity::user::CreateUser;

/// JSON:API media type.
pub const JSON_API: &str = "application/vnd.api+json";

/// Password accepted by the strength check.
pub const PASSWORD: &str = "correct-horse-battery-staple";

/// Test application context
pub struct TestApp {
    /// The Axum router for making requests
    pub router: Router,
    /// Repositories behind the router
    pub repositories: Repositories,
    /// Cache backend behind the router
    pub cache: Arc<dyn CacheProvider>,
    /// Application configuration
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application with fresh in-memory state
    pub async fn new() -> Self {
        let config = AppConfig::default();
        let cache = Arc::new(MemoryCacheProvider::new(&config.cache.memory));
        Self::with_parts(Repositories::in_memory(), cache).await
    }

    /// Create a test application over the given storage and cache backend
    pub async fn with_parts(repositories: Repositories, cache: Arc<dyn CacheProvider>) -> Self {
        let config = AppConfig::default();
        let manager = CacheManager::from_provider(cache.clone());

        let state = todohub_api::build_state(config.clone(), repositories.clone(), manager);
        let router = todohub_api::build_app(state);

        Self {
            router,
            repositories,
            cache,
            config,
        }
    }

    /// Insert an administrator directly into storage and return its ID
    pub async fn create_admin(&self, name: &str) -> String {
        let hash = PasswordHasher::new()
            .hash_password(PASSWORD)
            .expect("Failed to hash password");
        let user = self
            .repositories
            .users
            .create(CreateUser {
                name: name.to_string(),
                password_hash: hash,
                role: Role::Admin,
            })
            .await
            .expect("Failed to create admin");
        user.id.to_string()
    }

    /// Register an account; returns the session it was signed into
    pub async fn register(&self, name: &str) -> Session {
        let response = self
            .request("POST", "/users", Some(credentials(name, PASSWORD)), None, None)
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Registration failed: {:?}",
            response.body
        );
        Session::from_response(&response)
    }

    /// Sign in; returns the new session
    pub async fn login(&self, name: &str, password: &str) -> Session {
        let response = self
            .request("POST", "/users/login", Some(credentials(name, password)), None, None)
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Login failed: {:?}",
            response.body
        );
        Session::from_response(&response)
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
        refresh_cookie: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder().method(method).uri(path);
        if !body_str.is_empty() {
            req = req
                .header(header::CONTENT_TYPE, JSON_API)
                .header(header::CONTENT_LENGTH, body_str.len());
        }
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(cookie) = refresh_cookie {
            req = req.header(
                header::COOKIE,
                format!("{}={cookie}", self.config.auth.refresh_cookie_name),
            );
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Send a prepared request to the test app
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// A signed-in account as seen by a client.
#[derive(Debug, Clone)]
pub struct Session {
    /// Account ID
    pub id: String,
    /// Access token from the response body
    pub access_token: String,
    /// Refresh token from the `Set-Cookie` header
    pub refresh_token: String,
}

impl Session {
    fn from_response(response: &TestResponse) -> Self {
        let data = &response.body["data"];
        Self {
            id: data["id"].as_str().expect("No id").to_string(),
            access_token: data["token"].as_str().expect("No token").to_string(),
            refresh_token: response
                .cookie("refreshToken")
                .expect("No refresh cookie"),
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// Value of the cookie `name` set by this response.
    pub fn cookie(&self, name: &str) -> Option<String> {
        self.set_cookie(name).map(|raw| {
            raw.split(';')
                .next()
                .and_then(|pair| pair.split_once('='))
                .map(|(_, value)| value.to_string())
                .unwrap_or_default()
        })
    }

    /// Raw `Set-Cookie` header for `name`.
    pub fn set_cookie(&self, name: &str) -> Option<String> {
        let prefix = format!("{name}=");
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&prefix))
            .map(str::to_string)
    }

    /// The `Location` header.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// `detail` of the first error object.
    pub fn error_detail(&self) -> &str {
        self.body["errors"][0]["detail"].as_str().unwrap_or_default()
    }
}

/// A registration or login document.
pub fn credentials(name: &str, password: &str) -> Value {
    serde_json::json!({
        "data": {
            "type": "users",
            "attributes": { "name": name, "password": password }
        }
    })
}

/// A todo create document.
pub fn todo(description: &str) -> Value {
    serde_json::json!({
        "data": {
            "type": "todos",
            "attributes": { "description": description }
        }
    })
}
