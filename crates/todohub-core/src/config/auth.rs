//! Credential configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Access/refresh credential and password policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for access tokens.
    #[serde(default = "default_access_secret")]
    pub access_secret: String,
    /// HMAC secret for refresh tokens. Must differ from the access secret.
    #[serde(default = "default_refresh_secret")]
    pub refresh_secret: String,
    /// Access token lifetime in seconds.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_seconds: u64,
    /// Name of the cookie carrying the refresh token.
    #[serde(default = "default_cookie_name")]
    pub refresh_cookie_name: String,
    /// Max-Age of the refresh cookie in days.
    #[serde(default = "default_cookie_days")]
    pub refresh_cookie_max_age_days: i64,
    /// Whether the refresh cookie carries the `Secure` attribute.
    #[serde(default = "default_true")]
    pub refresh_cookie_secure: bool,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Minimum zxcvbn score (0-4) for new passwords.
    #[serde(default = "default_password_score")]
    pub password_min_score: u8,
    /// Time budget for a single session store call in milliseconds.
    #[serde(default = "default_store_timeout")]
    pub store_timeout_ms: u64,
}

impl AuthConfig {
    /// Validate secret material.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.access_secret.is_empty() || self.refresh_secret.is_empty() {
            return Err(AppError::configuration("Token secrets must not be empty"));
        }
        if self.access_secret == self.refresh_secret {
            return Err(AppError::configuration(
                "Access and refresh secrets must be distinct",
            ));
        }
        if self.access_ttl_seconds == 0 {
            return Err(AppError::configuration(
                "auth.access_ttl_seconds must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_secret: default_access_secret(),
            refresh_secret: default_refresh_secret(),
            access_ttl_seconds: default_access_ttl(),
            refresh_cookie_name: default_cookie_name(),
            refresh_cookie_max_age_days: default_cookie_days(),
            refresh_cookie_secure: default_true(),
            password_min_length: default_password_min(),
            password_min_score: default_password_score(),
            store_timeout_ms: default_store_timeout(),
        }
    }
}

fn default_access_secret() -> String {
    "CHANGE_ME_ACCESS_SECRET".to_string()
}

fn default_refresh_secret() -> String {
    "CHANGE_ME_REFRESH_SECRET".to_string()
}

fn default_access_ttl() -> u64 {
    3600
}

fn default_cookie_name() -> String {
    "refreshToken".to_string()
}

fn default_cookie_days() -> i64 {
    7
}

fn default_true() -> bool {
    true
}

fn default_password_min() -> usize {
    8
}

fn default_password_score() -> u8 {
    2
}

fn default_store_timeout() -> u64 {
    2000
}
