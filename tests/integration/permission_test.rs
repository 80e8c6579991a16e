//! Integration tests for role checks, ownership, and request consistency.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_only_admins_list_users() {
    let app = TestApp::new().await;
    app.create_admin("root").await;
    let root = app.login("root", PASSWORD).await;
    let alice = app.register("alice").await;

    let denied = app
        .request("GET", "/users", None, Some(&alice.access_token), None)
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let listed = app
        .request("GET", "/users", None, Some(&root.access_token), None)
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["meta"]["totalUsers"], 2);
    assert_eq!(listed.body["data"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_foreign_account_looks_missing() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;

    let foreign = app
        .request(
            "GET",
            &format!("/users/{}", bob.id),
            None,
            Some(&alice.access_token),
            None,
        )
        .await;
    let missing = app
        .request(
            "GET",
            "/users/00000000-0000-0000-0000-000000000000",
            None,
            Some(&alice.access_token),
            None,
        )
        .await;

    assert_eq!(foreign.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(foreign.error_detail(), missing.error_detail());
}

#[tokio::test]
async fn test_admin_reads_any_account() {
    let app = TestApp::new().await;
    app.create_admin("root").await;
    let root = app.login("root", PASSWORD).await;
    let alice = app.register("alice").await;

    let response = app
        .request(
            "GET",
            &format!("/users/{}", alice.id),
            None,
            Some(&root.access_token),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["attributes"]["name"], "alice");
}

#[tokio::test]
async fn test_update_with_mismatched_body_id_conflicts() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;

    let response = app
        .request(
            "PATCH",
            &format!("/users/{}", alice.id),
            Some(json!({
                "data": {
                    "type": "users",
                    "id": bob.id,
                    "attributes": { "oldPassword": PASSWORD, "newName": "mallory" }
                }
            })),
            Some(&alice.access_token),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_with_wrong_old_password_is_forbidden() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;

    let response = app
        .request(
            "PATCH",
            &format!("/users/{}", alice.id),
            Some(json!({
                "data": {
                    "type": "users",
                    "id": alice.id,
                    "attributes": { "oldPassword": "nope", "newName": "alicia" }
                }
            })),
            Some(&alice.access_token),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_rename_then_login_with_new_name() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;

    let response = app
        .request(
            "PATCH",
            &format!("/users/{}", alice.id),
            Some(json!({
                "data": {
                    "type": "users",
                    "id": alice.id,
                    "attributes": { "oldPassword": PASSWORD, "newName": "alicia" }
                }
            })),
            Some(&alice.access_token),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let session = app.login("alicia", PASSWORD).await;
    assert_eq!(session.id, alice.id);
}

#[tokio::test]
async fn test_only_admins_delete_accounts() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;

    let response = app
        .request(
            "DELETE",
            &format!("/users/{}", alice.id),
            None,
            Some(&alice.access_token),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_foreign_todo_looks_missing() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;

    let created = app
        .request(
            "POST",
            "/todos",
            Some(helpers::todo("alice's secret")),
            Some(&alice.access_token),
            None,
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let todo_id = created.body["data"]["id"].as_str().expect("id").to_string();

    for method in ["GET", "DELETE"] {
        let response = app
            .request(
                method,
                &format!("/todos/{todo_id}"),
                None,
                Some(&bob.access_token),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{method}");
    }

    let still_there = app
        .request(
            "GET",
            &format!("/todos/{todo_id}"),
            None,
            Some(&alice.access_token),
            None,
        )
        .await;
    assert_eq!(still_there.status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_edits_any_todo() {
    let app = TestApp::new().await;
    app.create_admin("root").await;
    let root = app.login("root", PASSWORD).await;
    let alice = app.register("alice").await;

    let created = app
        .request(
            "POST",
            "/todos",
            Some(helpers::todo("draft")),
            Some(&alice.access_token),
            None,
        )
        .await;
    let todo_id = created.body["data"]["id"].as_str().expect("id").to_string();

    let updated = app
        .request(
            "PUT",
            &format!("/todos/{todo_id}"),
            Some(json!({
                "data": {
                    "type": "todos",
                    "id": todo_id,
                    "attributes": { "description": "reviewed" }
                }
            })),
            Some(&root.access_token),
            None,
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
}
