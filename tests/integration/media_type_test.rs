//! Integration tests for JSON:API content negotiation.

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};

use helpers::{JSON_API, TestApp, todo};

fn post_todo(content_type: &str, accept: Option<&str>, token: &str) -> Request<Body> {
    let body = todo("buy milk").to_string();
    let mut builder = Request::builder()
        .method("POST")
        .uri("/todos")
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, body.len())
        .header(header::AUTHORIZATION, format!("Bearer {token}"));
    if let Some(accept) = accept {
        builder = builder.header(header::ACCEPT, accept);
    }
    builder.body(Body::from(body)).expect("request")
}

#[tokio::test]
async fn test_plain_json_body_is_unsupported_media_type() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;

    let response = app
        .send(post_todo("application/json", None, &alice.access_token))
        .await;

    assert_eq!(response.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(
        response.headers.get("content-type").and_then(|v| v.to_str().ok()),
        Some(JSON_API)
    );
    assert_eq!(response.body["errors"][0]["title"], "Unsupported Media Type");
    assert_eq!(response.body["errors"][0]["source"]["pointer"], "/todos");
}

#[tokio::test]
async fn test_foreign_accept_is_not_acceptable() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;

    let response = app
        .send(post_todo(JSON_API, Some("text/html"), &alice.access_token))
        .await;

    assert_eq!(response.status, StatusCode::NOT_ACCEPTABLE);
    assert_eq!(
        response.error_detail(),
        "Given header accept type is not supported by the server"
    );
}

#[tokio::test]
async fn test_rejected_body_is_not_stored() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;

    app.send(post_todo("application/json", Some("text/html"), &alice.access_token))
        .await;

    let listed = app
        .request("GET", "/todos", None, Some(&alice.access_token), None)
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_json_api_and_wildcard_accept_pass() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;

    for accept in [None, Some(JSON_API), Some("*/*")] {
        let response = app
            .send(post_todo(JSON_API, accept, &alice.access_token))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{accept:?}");
    }
}
