//! Integration tests for todo CRUD, pagination, and cache coherence.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{PASSWORD, TestApp, todo};
use todohub_core::traits::CacheProvider;

async fn create(app: &TestApp, token: &str, description: &str) -> String {
    let response = app
        .request("POST", "/todos", Some(todo(description)), Some(token), None)
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.body["data"]["id"]
        .as_str()
        .expect("id")
        .to_string()
}

fn descriptions(body: &serde_json::Value) -> Vec<String> {
    body["data"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["attributes"]["description"].as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn test_create_returns_location_and_self_link() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;

    let response = app
        .request(
            "POST",
            "/todos",
            Some(todo("buy milk")),
            Some(&alice.access_token),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let id = response.body["data"]["id"].as_str().expect("id");
    let expected = format!("http://localhost:4000/todos/{id}");
    assert_eq!(response.location(), Some(expected.as_str()));
    assert_eq!(response.body["data"]["links"]["self"], expected.as_str());
    assert_eq!(response.body["data"]["type"], "todos");
    assert!(response.body["data"]["attributes"]["timestamps"]["created"].is_string());
}

#[tokio::test]
async fn test_list_reflects_writes_after_being_cached() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;

    let empty = app
        .request("GET", "/todos", None, Some(&alice.access_token), None)
        .await;
    assert_eq!(empty.status, StatusCode::OK);
    assert!(descriptions(&empty.body).is_empty());

    let id = create(&app, &alice.access_token, "first").await;
    let listed = app
        .request("GET", "/todos", None, Some(&alice.access_token), None)
        .await;
    assert_eq!(descriptions(&listed.body), vec!["first".to_string()]);

    let updated = app
        .request(
            "PUT",
            &format!("/todos/{id}"),
            Some(json!({
                "data": { "type": "todos", "id": id, "attributes": { "description": "changed" } }
            })),
            Some(&alice.access_token),
            None,
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);

    let listed = app
        .request("GET", "/todos", None, Some(&alice.access_token), None)
        .await;
    assert_eq!(descriptions(&listed.body), vec!["changed".to_string()]);

    let deleted = app
        .request(
            "DELETE",
            &format!("/todos/{id}"),
            None,
            Some(&alice.access_token),
            None,
        )
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let listed = app
        .request("GET", "/todos", None, Some(&alice.access_token), None)
        .await;
    assert!(descriptions(&listed.body).is_empty());
}

#[tokio::test]
async fn test_single_todo_is_fresh_after_update() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let id = create(&app, &alice.access_token, "v1").await;
    let path = format!("/todos/{id}");

    let first = app
        .request("GET", &path, None, Some(&alice.access_token), None)
        .await;
    assert_eq!(first.body["data"]["attributes"]["description"], "v1");

    app.request(
        "PUT",
        &path,
        Some(json!({
            "data": { "type": "todos", "id": id, "attributes": { "description": "v2" } }
        })),
        Some(&alice.access_token),
        None,
    )
    .await;

    let second = app
        .request("GET", &path, None, Some(&alice.access_token), None)
        .await;
    assert_eq!(second.body["data"]["attributes"]["description"], "v2");
}

#[tokio::test]
async fn test_admin_edit_is_visible_to_owner() {
    let app = TestApp::new().await;
    app.create_admin("root").await;
    let root = app.login("root", PASSWORD).await;
    let alice = app.register("alice").await;
    let id = create(&app, &alice.access_token, "mine").await;

    // Warm the owner's cache.
    app.request("GET", "/todos", None, Some(&alice.access_token), None)
        .await;

    app.request(
        "PUT",
        &format!("/todos/{id}"),
        Some(json!({
            "data": { "type": "todos", "id": id, "attributes": { "description": "edited by admin" } }
        })),
        Some(&root.access_token),
        None,
    )
    .await;

    let listed = app
        .request("GET", "/todos", None, Some(&alice.access_token), None)
        .await;
    assert_eq!(descriptions(&listed.body), vec!["edited by admin".to_string()]);
}

#[tokio::test]
async fn test_lists_are_scoped_to_the_caller() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    create(&app, &alice.access_token, "alice's").await;
    create(&app, &bob.access_token, "bob's").await;

    let listed = app
        .request("GET", "/todos", None, Some(&bob.access_token), None)
        .await;
    assert_eq!(descriptions(&listed.body), vec!["bob's".to_string()]);
}

#[tokio::test]
async fn test_pagination_links_and_meta() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    for n in 0..7 {
        create(&app, &alice.access_token, &format!("todo {n}")).await;
    }

    let response = app
        .request(
            "GET",
            "/todos?page%5Boffset%5D=5&page%5Blimit%5D=5",
            None,
            Some(&alice.access_token),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(descriptions(&response.body).len(), 2);

    let meta = &response.body["meta"];
    assert_eq!(meta["totalPages"], 2);
    assert_eq!(meta["currentPage"], 2);
    assert_eq!(meta["totalTodos"], 7);

    let links = &response.body["links"];
    assert_eq!(
        links["first"],
        "http://localhost:4000/todos?page[offset]=0&page[limit]=5"
    );
    assert_eq!(
        links["prev"],
        "http://localhost:4000/todos?page[offset]=0&page[limit]=5"
    );
    assert!(links["next"].is_null());
    assert_eq!(
        links["last"],
        "http://localhost:4000/todos?page[offset]=5&page[limit]=5"
    );
}

#[tokio::test]
async fn test_pages_are_cached_separately() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    for n in 0..3 {
        create(&app, &alice.access_token, &format!("todo {n}")).await;
    }

    let first = app
        .request(
            "GET",
            "/todos?page%5Boffset%5D=0&page%5Blimit%5D=2",
            None,
            Some(&alice.access_token),
            None,
        )
        .await;
    let second = app
        .request(
            "GET",
            "/todos?page%5Boffset%5D=2&page%5Blimit%5D=2",
            None,
            Some(&alice.access_token),
            None,
        )
        .await;
    assert_eq!(descriptions(&first.body).len(), 2);
    assert_eq!(descriptions(&second.body).len(), 1);
}

#[tokio::test]
async fn test_unrelated_query_pairs_share_one_cache_entry() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    create(&app, &alice.access_token, "only").await;

    for n in 0..50 {
        let response = app
            .request(
                "GET",
                &format!("/todos?junk{n}={n}&page%5Blimit%5D=abc"),
                None,
                Some(&alice.access_token),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(descriptions(&response.body), vec!["only".to_string()]);
    }

    let members = app
        .cache
        .index_members(&format!("resp-index:{}", alice.id))
        .await
        .expect("index");
    assert_eq!(members.len(), 1, "{members:?}");
    assert!(members[0].ends_with("/todos?page[offset]=0&page[limit]=5"));
}

#[tokio::test]
async fn test_description_is_validated() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;

    let empty = app
        .request("POST", "/todos", Some(todo("")), Some(&alice.access_token), None)
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let long = "x".repeat(256);
    let too_long = app
        .request("POST", "/todos", Some(todo(&long)), Some(&alice.access_token), None)
        .await;
    assert_eq!(too_long.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_with_mismatched_id_conflicts() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let id = create(&app, &alice.access_token, "one").await;
    let other = create(&app, &alice.access_token, "two").await;

    let response = app
        .request(
            "PUT",
            &format!("/todos/{id}"),
            Some(json!({
                "data": { "type": "todos", "id": other, "attributes": { "description": "x" } }
            })),
            Some(&alice.access_token),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unknown_route_is_json_api_not_found() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/nope", None, None, None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_detail(), "Not found.");
    assert_eq!(response.body["errors"][0]["source"]["pointer"], "/nope");
}

#[tokio::test]
async fn test_health_reports_backends() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/health", None, None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["database"], "up");
    assert_eq!(response.body["cache"], "up");
}
