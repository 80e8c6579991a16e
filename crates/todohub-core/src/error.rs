//! Unified application error types for TodoHub.
//!
//! Every crate maps its failures into [`AppError`]. Authentication and
//! authorization failures are classified at the point of detection with a
//! dedicated [`ErrorKind`]; failures of the session store or the cache are
//! always [`ErrorKind::Infrastructure`] so they are never mistaken for a
//! "forbidden" decision.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// No credential was presented where one is required.
    MissingCredential,
    /// The credential is malformed, badly signed, or expired.
    InvalidCredential,
    /// The refresh credential is well-formed and signed but no longer active.
    RevokedCredential,
    /// The principal's role is not allowed to perform the operation.
    InsufficientRole,
    /// The principal neither owns the resource nor holds an elevated role.
    OwnershipViolation,
    /// Path and body identifiers disagree, or the path targets someone else.
    InconsistentRequest,
    /// The operation is refused for a reason other than role, such as a
    /// wrong current password.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry, etc.).
    Conflict,
    /// The session store, database, or cache failed or timed out.
    Infrastructure,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal server error occurred.
    Internal,
}

impl ErrorKind {
    /// Whether this kind rejects the caller's credential.
    pub fn is_credential_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential | Self::InvalidCredential | Self::RevokedCredential
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredential => write!(f, "MISSING_CREDENTIAL"),
            Self::InvalidCredential => write!(f, "INVALID_CREDENTIAL"),
            Self::RevokedCredential => write!(f, "REVOKED_CREDENTIAL"),
            Self::InsufficientRole => write!(f, "INSUFFICIENT_ROLE"),
            Self::OwnershipViolation => write!(f, "OWNERSHIP_VIOLATION"),
            Self::InconsistentRequest => write!(f, "INCONSISTENT_REQUEST"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Infrastructure => write!(f, "INFRASTRUCTURE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout TodoHub.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message. Only safe kinds ever reach the client.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a missing-credential error.
    pub fn missing_credential(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingCredential, message)
    }

    /// Create an invalid-credential error.
    pub fn invalid_credential(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCredential, message)
    }

    /// Create a revoked-credential error.
    pub fn revoked_credential(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RevokedCredential, message)
    }

    /// Create an insufficient-role error.
    pub fn insufficient_role(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InsufficientRole, message)
    }

    /// Create an ownership-violation error.
    pub fn ownership_violation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::OwnershipViolation, message)
    }

    /// Create an inconsistent-request error.
    pub fn inconsistent_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InconsistentRequest, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an infrastructure error.
    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Infrastructure, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
