//! Token validation.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use todohub_core::config::AuthConfig;
use todohub_core::error::AppError;
use todohub_entity::Principal;

use super::claims::{AccessClaims, RefreshClaims};

/// Which secret, and which rules, a token is verified against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Signed with the access secret; must carry an unexpired `exp`.
    Access,
    /// Signed with the refresh secret; carries no expiry.
    Refresh,
}

/// Detail returned for every rejected token.
pub const INVALID_TOKEN: &str = "Credential is not valid";

/// Verifies access and refresh tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    access_key: DecodingKey,
    refresh_key: DecodingKey,
    access_validation: Validation,
    refresh_validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("access_validation", &self.access_validation)
            .field("refresh_validation", &self.refresh_validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut access_validation = Validation::new(Algorithm::HS256);
        access_validation.validate_exp = true;
        access_validation.leeway = 0;

        let mut refresh_validation = Validation::new(Algorithm::HS256);
        refresh_validation.validate_exp = false;
        refresh_validation.required_spec_claims.clear();

        Self {
            access_key: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_key: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_validation,
            refresh_validation,
        }
    }

    /// Decode `token` as `kind`.
    ///
    /// Every failure collapses into one `InvalidCredential` error; the
    /// reason is only logged.
    pub fn decode(&self, token: &str, kind: TokenKind) -> Result<Principal, AppError> {
        let decoded = match kind {
            TokenKind::Access => decode::<AccessClaims>(token, &self.access_key, &self.access_validation)
                .map(|data| Principal::from(data.claims)),
            TokenKind::Refresh => {
                decode::<RefreshClaims>(token, &self.refresh_key, &self.refresh_validation)
                    .map(|data| Principal::from(data.claims))
            }
        };

        decoded.map_err(|e| {
            let reason = match e.kind() {
                JwtErrorKind::ExpiredSignature => "expired",
                JwtErrorKind::InvalidSignature => "bad signature",
                JwtErrorKind::InvalidToken | JwtErrorKind::Base64(_) => "malformed",
                JwtErrorKind::Json(_) | JwtErrorKind::Utf8(_) => "bad payload",
                JwtErrorKind::InvalidAlgorithm => "wrong algorithm",
                _ => "rejected",
            };
            debug!(?kind, reason, "Token verification failed");
            AppError::invalid_credential(INVALID_TOKEN)
        })
    }
}
