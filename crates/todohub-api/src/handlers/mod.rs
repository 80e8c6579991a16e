//! Request handlers.

pub mod health;
pub mod todos;
pub mod users;

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use todohub_core::error::AppError;

use crate::error::{ApiError, JSON_API};

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError(AppError::not_found("Not found."))
}

/// Serialize `body` as a JSON:API document.
pub(crate) fn json_api<T: Serialize>(status: StatusCode, body: &T) -> Result<Response, ApiError> {
    let bytes = serde_json::to_vec(body).map_err(AppError::from)?;
    let mut response = (status, bytes).into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_API));
    Ok(response)
}

/// Attach a `Location` header.
pub(crate) fn with_location(mut response: Response, location: &str) -> Response {
    if let Ok(value) = HeaderValue::from_str(location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
}
