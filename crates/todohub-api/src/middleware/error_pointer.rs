//! Fills the `source.pointer` of error documents with the request target.
//!
//! Also turns the bare error statuses produced by layers outside the
//! handlers (request timeout, method not allowed) into error documents.

use axum::body::{Body, HttpBody};
use axum::extract::Request;
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ErrorDocument;

/// Detail of a request cut off by the request timeout.
pub const REQUEST_TIMED_OUT: &str = "Request timed out.";

/// Rewrites error responses so their pointer names the request path and
/// query.
pub async fn fill_error_pointer(request: Request, next: Next) -> Response {
    let pointer = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let response = next.run(request).await;

    let document = match response.extensions().get::<ErrorDocument>() {
        Some(document) => document.clone(),
        None if is_bare_error(&response) => bare_error_document(response.status()),
        None => return response,
    };
    let body = match serde_json::to_vec(&document.with_pointer(&pointer)) {
        Ok(body) => body,
        Err(_) => return response,
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static(crate::error::JSON_API),
    );
    Response::from_parts(parts, Body::from(body))
}

fn is_bare_error(response: &Response) -> bool {
    let status = response.status();
    (status.is_client_error() || status.is_server_error())
        && response.body().size_hint().exact() == Some(0)
}

fn bare_error_document(status: StatusCode) -> ErrorDocument {
    let detail = match status {
        StatusCode::REQUEST_TIMEOUT => REQUEST_TIMED_OUT,
        _ => status.canonical_reason().unwrap_or("Error"),
    };
    ErrorDocument::new(status, detail, "")
}
