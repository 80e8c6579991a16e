//! Integration tests for registration, login, refresh, and logout.

mod helpers;

use axum::http::StatusCode;

use helpers::{PASSWORD, TestApp, credentials};

#[tokio::test]
async fn test_register_returns_token_cookie_and_location() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/users", Some(credentials("alice", PASSWORD)), None, None)
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = &response.body["data"];
    assert_eq!(data["type"], "users");
    assert_eq!(data["attributes"]["name"], "alice");
    assert_eq!(data["attributes"]["rights"], "user");
    assert!(data["token"].as_str().is_some());

    let id = data["id"].as_str().expect("id");
    assert_eq!(
        response.location(),
        Some(format!("http://localhost:4000/users/{id}").as_str())
    );

    let cookie = response.set_cookie("refreshToken").expect("refresh cookie");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("SameSite=None"));
}

#[tokio::test]
async fn test_register_rejects_duplicate_name() {
    let app = TestApp::new().await;
    app.register("alice").await;

    let response = app
        .request("POST", "/users", Some(credentials("alice", PASSWORD)), None, None)
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_rejects_weak_password() {
    let app = TestApp::new().await;
    let response = app
        .request("POST", "/users", Some(credentials("bob", "password")), None, None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new().await;
    app.register("alice").await;

    let wrong_password = app
        .request(
            "POST",
            "/users/login",
            Some(credentials("alice", "not-the-password")),
            None,
            None,
        )
        .await;
    let unknown_user = app
        .request(
            "POST",
            "/users/login",
            Some(credentials("nobody", PASSWORD)),
            None,
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.error_detail(), unknown_user.error_detail());
}

#[tokio::test]
async fn test_error_documents_are_json_api() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/users/login",
            Some(credentials("nobody", PASSWORD)),
            None,
            None,
        )
        .await;

    assert_eq!(
        response.headers.get("content-type").and_then(|v| v.to_str().ok()),
        Some("application/vnd.api+json")
    );
    assert_eq!(response.body["jsonapi"]["version"], "1.0");
    assert_eq!(response.body["errors"][0]["status"], "401");
    assert_eq!(
        response.body["errors"][0]["source"]["pointer"],
        "/users/login"
    );
}

#[tokio::test]
async fn test_refresh_mints_a_new_access_token() {
    let app = TestApp::new().await;
    let session = app.register("alice").await;

    let response = app
        .request(
            "POST",
            "/users/token",
            None,
            None,
            Some(&session.refresh_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["id"], session.id.as_str());
    assert_eq!(response.body["meta"]["expiresInSec"], 3600);

    let token = response.body["data"]["token"].as_str().expect("token");
    let me = app
        .request("GET", &format!("/users/{}", session.id), None, Some(token), None)
        .await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_without_cookie_lacks_credentials() {
    let app = TestApp::new().await;
    let response = app.request("POST", "/users/token", None, None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_with_garbage_is_forbidden() {
    let app = TestApp::new().await;
    let response = app
        .request("POST", "/users/token", None, None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_access_token_is_not_a_refresh_token() {
    let app = TestApp::new().await;
    let session = app.register("alice").await;

    let response = app
        .request(
            "POST",
            "/users/token",
            None,
            None,
            Some(&session.access_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_login_replaces_the_previous_refresh_token() {
    let app = TestApp::new().await;
    let first = app.register("alice").await;
    let second = app.login("alice", PASSWORD).await;

    let stale = app
        .request("POST", "/users/token", None, None, Some(&first.refresh_token))
        .await;
    assert_eq!(stale.status, StatusCode::FORBIDDEN);

    let current = app
        .request("POST", "/users/token", None, None, Some(&second.refresh_token))
        .await;
    assert_eq!(current.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_logout_revokes_and_clears_cookie() {
    let app = TestApp::new().await;
    let session = app.register("alice").await;

    let response = app
        .request(
            "DELETE",
            "/users/logout",
            None,
            None,
            Some(&session.refresh_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    let cleared = response.set_cookie("refreshToken").expect("cleared cookie");
    assert!(cleared.contains("Max-Age=0"));

    let refresh = app
        .request(
            "POST",
            "/users/token",
            None,
            None,
            Some(&session.refresh_token),
        )
        .await;
    assert_eq!(refresh.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let app = TestApp::new().await;
    let session = app.register("alice").await;

    app.request(
        "DELETE",
        "/users/logout",
        None,
        None,
        Some(&session.refresh_token),
    )
    .await;
    let again = app
        .request(
            "DELETE",
            "/users/logout",
            None,
            None,
            Some(&session.refresh_token),
        )
        .await;
    assert_eq!(again.status, StatusCode::OK);
    assert_eq!(again.body["meta"]["revoked"], false);

    let anonymous = app.request("DELETE", "/users/logout", None, None, None).await;
    assert_eq!(anonymous.status, StatusCode::OK);
}

#[tokio::test]
async fn test_deleted_account_cannot_refresh() {
    let app = TestApp::new().await;
    app.create_admin("root").await;
    let root = app.login("root", helpers::PASSWORD).await;
    let alice = app.register("alice").await;

    let deleted = app
        .request(
            "DELETE",
            &format!("/users/{}", alice.id),
            None,
            Some(&root.access_token),
            None,
        )
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let refresh = app
        .request("POST", "/users/token", None, None, Some(&alice.refresh_token))
        .await;
    assert_eq!(refresh.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_protected_route_requires_bearer() {
    let app = TestApp::new().await;
    let missing = app.request("GET", "/todos", None, None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let invalid = app
        .request("GET", "/todos", None, Some("garbage"), None)
        .await;
    assert_eq!(invalid.status, StatusCode::FORBIDDEN);
}
