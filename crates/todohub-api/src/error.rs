//! Maps domain `AppError` to JSON:API error documents.
//!
//! Credential failures share one detail per status so a caller cannot tell
//! which check rejected it. Ownership violations render exactly like a
//! missing resource.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use todohub_auth::guard::{NO_ACCESS_RIGHTS, NOT_FOUND};
use todohub_auth::session::manager::LACKS_CREDENTIALS;
use todohub_core::error::{AppError, ErrorKind};

/// Media type of every document this API produces.
pub const JSON_API: &str = "application/vnd.api+json";

/// Detail of a rejected access or refresh token.
pub const CREDENTIALS_NOT_VALID: &str =
    "Authentication credentials for the requested resource are not valid!";

/// Top-level JSON:API error document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDocument {
    /// JSON:API version object.
    pub jsonapi: JsonApiVersion,
    /// The errors; this API always reports exactly one.
    pub errors: Vec<ErrorObject>,
}

/// `{"version": "1.0"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonApiVersion {
    /// Specification version.
    pub version: String,
}

/// A single JSON:API error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorObject {
    /// HTTP status code as a string.
    pub status: String,
    /// Reason phrase of the status.
    pub title: String,
    /// Human-readable explanation.
    pub detail: String,
    /// Where the error originated.
    pub source: ErrorSource,
}

/// Error source pointer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorSource {
    /// Request path the error refers to.
    pub pointer: String,
}

impl ErrorDocument {
    /// Build a single-error document.
    pub fn new(status: StatusCode, detail: impl Into<String>, pointer: impl Into<String>) -> Self {
        Self {
            jsonapi: JsonApiVersion {
                version: "1.0".to_string(),
            },
            errors: vec![ErrorObject {
                status: status.as_u16().to_string(),
                title: status.canonical_reason().unwrap_or("Error").to_string(),
                detail: detail.into(),
                source: ErrorSource {
                    pointer: pointer.into(),
                },
            }],
        }
    }

    /// Set the source pointer of every error.
    pub fn with_pointer(mut self, pointer: &str) -> Self {
        for error in &mut self.errors {
            error.source.pointer = pointer.to_string();
        }
        self
    }

    /// Render with `status`.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        let body = serde_json::to_vec(&self).unwrap_or_default();
        let mut response = (status, body).into_response();
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_API));
        // The error-pointer middleware rewrites the body from this copy.
        response.extensions_mut().insert(self);
        response
    }
}

/// HTTP-facing wrapper around [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status and client-visible detail for this error.
    pub fn status_and_detail(&self) -> (StatusCode, String) {
        let err = &self.0;
        match err.kind {
            ErrorKind::MissingCredential => {
                (StatusCode::UNAUTHORIZED, LACKS_CREDENTIALS.to_string())
            }
            ErrorKind::InvalidCredential | ErrorKind::RevokedCredential => {
                (StatusCode::FORBIDDEN, CREDENTIALS_NOT_VALID.to_string())
            }
            ErrorKind::InsufficientRole => (StatusCode::FORBIDDEN, NO_ACCESS_RIGHTS.to_string()),
            ErrorKind::Forbidden => (StatusCode::FORBIDDEN, err.message.clone()),
            ErrorKind::OwnershipViolation | ErrorKind::NotFound => {
                (StatusCode::NOT_FOUND, NOT_FOUND.to_string())
            }
            ErrorKind::InconsistentRequest | ErrorKind::Conflict => {
                (StatusCode::CONFLICT, err.message.clone())
            }
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, err.message.clone()),
            ErrorKind::Infrastructure => (
                StatusCode::SERVICE_UNAVAILABLE,
                "The service is temporarily unavailable.".to_string(),
            ),
            ErrorKind::Configuration | ErrorKind::Serialization | ErrorKind::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error.".to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();
        match self.0.kind {
            ErrorKind::Infrastructure => {
                warn!(error = %self.0, source = ?self.0.source, "Dependency failure")
            }
            ErrorKind::Configuration | ErrorKind::Serialization | ErrorKind::Internal => {
                error!(error = %self.0, source = ?self.0.source, "Internal server error")
            }
            _ => tracing::debug!(error = %self.0, "Request rejected"),
        }
        ErrorDocument::new(status, detail, "").into_response_with(status)
    }
}
