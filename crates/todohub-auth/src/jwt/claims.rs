//! Claims embedded in access and refresh tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use todohub_core::types::UserId;
use todohub_entity::{Principal, Role};

/// Payload of a short-lived access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    /// Principal identifier.
    pub id: UserId,
    /// Principal display name.
    pub display_name: String,
    /// Principal role.
    pub role: Role,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Payload of a long-lived refresh token.
///
/// There is no `exp`: a refresh token is valid exactly as long as the
/// session store holds it. `iat` and `jti` keep two tokens minted for the
/// same principal distinct.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshClaims {
    /// Principal identifier.
    pub id: UserId,
    /// Principal display name.
    pub display_name: String,
    /// Principal role.
    pub role: Role,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Unique token identifier.
    pub jti: Uuid,
}

impl From<AccessClaims> for Principal {
    fn from(claims: AccessClaims) -> Self {
        Principal::new(claims.id, claims.display_name, claims.role)
    }
}

impl From<RefreshClaims> for Principal {
    fn from(claims: RefreshClaims) -> Self {
        Principal::new(claims.id, claims.display_name, claims.role)
    }
}
