//! JSON:API media type negotiation.

use axum::extract::Request;
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::{ErrorDocument, JSON_API};

/// Detail of a request body sent with a foreign media type.
pub const UNSUPPORTED_MEDIA_TYPE: &str = "The media format of the requested data is not supported by the server, so the server is rejecting the request.";

/// Detail of an `Accept` header that excludes JSON:API.
pub const NOT_ACCEPTABLE: &str = "Given header accept type is not supported by the server";

/// Rejects bodies that are not `application/vnd.api+json` with 415 and
/// `Accept` headers that rule it out with 406.
pub async fn require_json_api(request: Request, next: Next) -> Response {
    let headers = request.headers();

    if has_body(headers) && !content_type_is_json_api(headers) {
        return ErrorDocument::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, UNSUPPORTED_MEDIA_TYPE, "")
            .into_response_with(StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
    if !accepts_json_api(headers) {
        return ErrorDocument::new(StatusCode::NOT_ACCEPTABLE, NOT_ACCEPTABLE, "")
            .into_response_with(StatusCode::NOT_ACCEPTABLE);
    }

    next.run(request).await
}

fn has_body(headers: &HeaderMap) -> bool {
    if headers.contains_key(header::TRANSFER_ENCODING) {
        return true;
    }
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .is_some_and(|len| len > 0)
}

fn content_type_is_json_api(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim().eq_ignore_ascii_case(JSON_API))
}

/// A missing header, a wildcard, or an explicit JSON:API entry is acceptable.
fn accepts_json_api(headers: &HeaderMap) -> bool {
    let Some(accept) = headers.get(header::ACCEPT) else {
        return true;
    };
    let Ok(accept) = accept.to_str() else {
        return false;
    };
    accept
        .split(',')
        .map(|entry| entry.split(';').next().unwrap_or_default().trim())
        .any(|range| range == "*/*" || range.eq_ignore_ascii_case(JSON_API))
}
