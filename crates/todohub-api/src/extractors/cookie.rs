//! The refresh-token cookie.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use todohub_core::config::AuthConfig;

use crate::state::AppState;

/// Value of the refresh cookie, if the client sent one.
#[derive(Debug, Clone)]
pub struct RefreshCookie(pub Option<String>);

impl FromRequestParts<AppState> for RefreshCookie {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(&state.config.auth.refresh_cookie_name)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty());
        Ok(Self(token))
    }
}

/// Cookie carrying a freshly issued refresh token.
pub fn refresh_cookie(config: &AuthConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.refresh_cookie_name.clone(), token))
        .http_only(true)
        .secure(config.refresh_cookie_secure)
        .same_site(SameSite::None)
        .path("/")
        .max_age(time::Duration::days(config.refresh_cookie_max_age_days))
        .build()
}

/// Cookie that makes the client drop its refresh token.
pub fn cleared_refresh_cookie(config: &AuthConfig) -> Cookie<'static> {
    Cookie::build((config.refresh_cookie_name.clone(), String::new()))
        .http_only(true)
        .secure(config.refresh_cookie_secure)
        .same_site(SameSite::None)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}
