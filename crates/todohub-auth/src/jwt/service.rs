//! TokenService: issues and verifies signed credentials.

use chrono::{DateTime, Utc};

use todohub_core::config::AuthConfig;
use todohub_core::result::AppResult;
use todohub_entity::Principal;

use super::decoder::{JwtDecoder, TokenKind};
use super::encoder::{AccessToken, JwtEncoder};

/// Issues access and refresh tokens and turns presented tokens back into
/// principals.
///
/// Verification is pure CPU work and never awaits.
#[derive(Debug, Clone)]
pub struct TokenService {
    encoder: JwtEncoder,
    decoder: JwtDecoder,
}

impl TokenService {
    /// Build a service from the configured secrets and TTL.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
        }
    }

    /// Access token lifetime in seconds.
    pub fn access_ttl_seconds(&self) -> i64 {
        self.encoder.access_ttl().num_seconds()
    }

    /// Sign an access token for `principal`, expiring one TTL from now.
    pub fn issue_access(&self, principal: &Principal) -> AppResult<AccessToken> {
        self.issue_access_at(principal, Utc::now())
    }

    /// Sign an access token as if issued at `issued_at`.
    pub fn issue_access_at(
        &self,
        principal: &Principal,
        issued_at: DateTime<Utc>,
    ) -> AppResult<AccessToken> {
        self.encoder.encode_access(principal, issued_at)
    }

    /// Sign a refresh token for `principal`.
    pub fn issue_refresh(&self, principal: &Principal) -> AppResult<String> {
        self.encoder.encode_refresh(principal)
    }

    /// Verify `token` as a credential of `kind`.
    pub fn verify(&self, token: &str, kind: TokenKind) -> AppResult<Principal> {
        self.decoder.decode(token, kind)
    }
}
