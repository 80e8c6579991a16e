//! Session lifecycle: register, login, refresh, and logout flows.

use std::sync::Arc;

use tracing::{info, warn};

use todohub_core::error::AppError;
use todohub_core::result::AppResult;
use todohub_core::types::UserId;
use todohub_database::UserRepository;
use todohub_entity::user::{CreateUser, User};
use todohub_entity::{Principal, Role};

use crate::jwt::{AccessToken, TokenKind, TokenService};
use crate::password::{PasswordHasher, PasswordValidator};

use super::store::SessionStore;

/// Detail of every rejected sign-in or missing refresh cookie.
pub const LACKS_CREDENTIALS: &str =
    "Lacks valid authentication credentials for the requested resource!";

/// Credentials minted on register or login.
#[derive(Debug, Clone)]
pub struct IssuedCredentials {
    /// Identity the credentials were minted for.
    pub principal: Principal,
    /// Short-lived bearer token.
    pub access: AccessToken,
    /// Long-lived token for the refresh cookie.
    pub refresh_token: String,
}

/// A new access token minted from a refresh token.
#[derive(Debug, Clone)]
pub struct RefreshedAccess {
    /// Identity as currently stored.
    pub principal: Principal,
    /// Short-lived bearer token.
    pub access: AccessToken,
}

/// Composes [`TokenService`] and [`SessionStore`] into the sign-in flows.
#[derive(Clone)]
pub struct SessionManager {
    tokens: TokenService,
    sessions: SessionStore,
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
    validator: PasswordValidator,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("tokens", &self.tokens)
            .field("validator", &self.validator)
            .finish()
    }
}

impl SessionManager {
    /// Create a new session manager.
    pub fn new(
        tokens: TokenService,
        sessions: SessionStore,
        users: Arc<dyn UserRepository>,
        hasher: PasswordHasher,
        validator: PasswordValidator,
    ) -> Self {
        Self {
            tokens,
            sessions,
            users,
            hasher,
            validator,
        }
    }

    /// The token service used to mint and verify credentials.
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Create an account with role `User` and sign it in.
    pub async fn register(&self, name: &str, password: &str) -> AppResult<IssuedCredentials> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Name must not be empty"));
        }
        self.validator.validate(password, &[name])?;
        let password_hash = self.hasher.hash_password(password)?;

        let user = self
            .users
            .create(CreateUser {
                name: name.to_string(),
                password_hash,
                role: Role::User,
            })
            .await?;
        info!(user_id = %user.id, "User registered");

        self.establish(&user).await
    }

    /// Authenticate by name and password.
    ///
    /// An unknown name and a wrong password fail identically.
    pub async fn login(&self, name: &str, password: &str) -> AppResult<IssuedCredentials> {
        let Some(user) = self.users.find_by_name(name.trim()).await? else {
            warn!("Login attempt for unknown user");
            return Err(AppError::missing_credential(LACKS_CREDENTIALS));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AppError::missing_credential(LACKS_CREDENTIALS));
        }

        let issued = self.establish(&user).await?;
        info!(user_id = %user.id, "User logged in");
        Ok(issued)
    }

    /// Mint an access and a refresh token for `user` and make the refresh
    /// token its only active one.
    pub async fn establish(&self, user: &User) -> AppResult<IssuedCredentials> {
        let principal = user.principal();
        let access = self.tokens.issue_access(&principal)?;
        let refresh_token = self.tokens.issue_refresh(&principal)?;
        self.sessions.put(principal.id, &refresh_token).await?;

        Ok(IssuedCredentials {
            principal,
            access,
            refresh_token,
        })
    }

    /// Mint a new access token from a refresh token.
    ///
    /// The token must verify and also be the principal's active credential.
    /// The principal is re-read from storage so renames and role changes
    /// take effect.
    pub async fn refresh(&self, token: Option<&str>) -> AppResult<RefreshedAccess> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::missing_credential(LACKS_CREDENTIALS))?;

        let claimed = self.tokens.verify(token, TokenKind::Refresh)?;

        let record = self
            .sessions
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::revoked_credential("Refresh credential is not active"))?;
        if record.user_id != claimed.id {
            warn!(
                user_id = %claimed.id,
                record_user_id = %record.user_id,
                "Refresh credential bound to another principal"
            );
            return Err(AppError::revoked_credential("Refresh credential is not active"));
        }

        let user = self
            .users
            .find_by_id(claimed.id)
            .await?
            .ok_or_else(|| AppError::revoked_credential("Refresh credential is not active"))?;

        let principal = user.principal();
        let access = self.tokens.issue_access(&principal)?;
        Ok(RefreshedAccess { principal, access })
    }

    /// Revoke the refresh token. Returns whether a row was removed; an
    /// absent or already revoked token is not an error.
    pub async fn logout(&self, token: Option<&str>) -> AppResult<bool> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Ok(false);
        };
        let removed = self.sessions.revoke_by_token(token).await?;
        info!(removed, "Logout");
        Ok(removed)
    }

    /// Revoke whatever refresh credential `principal` holds.
    pub async fn revoke_principal(&self, principal: UserId) -> AppResult<bool> {
        self.sessions.revoke_by_principal(principal).await
    }
}
