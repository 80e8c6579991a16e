//! Token creation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use todohub_core::config::AuthConfig;
use todohub_core::error::AppError;
use todohub_entity::Principal;

use super::claims::{AccessClaims, RefreshClaims};

/// A signed access token and its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// Compact JWT.
    pub token: String,
    /// Expiration instant embedded in the token.
    pub expires_at: DateTime<Utc>,
}

/// Signs access and refresh tokens with their distinct secrets.
#[derive(Clone)]
pub struct JwtEncoder {
    access_key: EncodingKey,
    refresh_key: EncodingKey,
    access_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_key: EncodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_key: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_ttl: Duration::seconds(config.access_ttl_seconds as i64),
        }
    }

    /// Access token lifetime.
    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    /// Signs an access token for `principal`, valid for the configured TTL
    /// counted from `issued_at`.
    pub fn encode_access(
        &self,
        principal: &Principal,
        issued_at: DateTime<Utc>,
    ) -> Result<AccessToken, AppError> {
        let expires_at = issued_at + self.access_ttl;
        let claims = AccessClaims {
            id: principal.id,
            display_name: principal.display_name.clone(),
            role: principal.role,
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.access_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok(AccessToken { token, expires_at })
    }

    /// Signs a refresh token for `principal`.
    pub fn encode_refresh(&self, principal: &Principal) -> Result<String, AppError> {
        let claims = RefreshClaims {
            id: principal.id,
            display_name: principal.display_name.clone(),
            role: principal.role,
            iat: Utc::now().timestamp(),
            jti: Uuid::new_v4(),
        };

        encode(&Header::default(), &claims, &self.refresh_key)
            .map_err(|e| AppError::internal(format!("Failed to encode refresh token: {e}")))
    }
}
