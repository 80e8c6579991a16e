//! `AuthUser` extractor: verifies the bearer access token and yields the
//! principal it carries.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use todohub_auth::TokenKind;
use todohub_auth::session::manager::LACKS_CREDENTIALS;
use todohub_core::error::AppError;
use todohub_entity::Principal;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated principal of the current request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl std::ops::Deref for AuthUser {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::missing_credential(LACKS_CREDENTIALS))?;

        let principal = state.tokens.verify(bearer.token(), TokenKind::Access)?;
        Ok(Self(principal))
    }
}
