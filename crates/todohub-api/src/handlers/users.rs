//! Account and credential handlers.

use axum::extract::{OriginalUri, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

use todohub_auth::IssuedCredentials;
use todohub_auth::session::manager::LACKS_CREDENTIALS;
use todohub_core::error::AppError;
use todohub_service::UpdateAccount;

use crate::dto::request::{CredentialsDocument, UpdateUserDocument};
use crate::dto::response::{
    Document, LogoutMeta, MetaDocument, SelfLinks, TokenMeta, UserListMeta, UserResource,
};
use crate::error::ApiError;
use crate::extractors::cookie::{cleared_refresh_cookie, refresh_cookie};
use crate::extractors::{AuthUser, RefreshCookie, ValidatedJson};
use crate::handlers::{json_api, with_location};
use crate::state::AppState;

fn require_users_type(document: &CredentialsDocument) -> Result<(), ApiError> {
    if document.data.kind != "users" {
        return Err(AppError::missing_credential(LACKS_CREDENTIALS).into());
    }
    Ok(())
}

fn signed_in(
    state: &AppState,
    jar: CookieJar,
    issued: IssuedCredentials,
) -> Result<(CookieJar, Response), ApiError> {
    let base = &state.config.server.public_url;
    let location = format!("{base}/users/{}", issued.principal.id);
    let document: Document<UserResource> = Document {
        links: None,
        data: UserResource::with_token(&issued.principal, issued.access.token, base),
        meta: None,
    };
    let response = with_location(json_api(StatusCode::CREATED, &document)?, &location);
    let jar = jar.add(refresh_cookie(&state.config.auth, issued.refresh_token));
    Ok((jar, response))
}

/// POST /users
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(document): ValidatedJson<CredentialsDocument>,
) -> Result<(CookieJar, Response), ApiError> {
    require_users_type(&document)?;
    let attributes = &document.data.attributes;
    let issued = state
        .sessions
        .register(&attributes.name, &attributes.password)
        .await?;
    signed_in(&state, jar, issued)
}

/// POST /users/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(document): ValidatedJson<CredentialsDocument>,
) -> Result<(CookieJar, Response), ApiError> {
    require_users_type(&document)?;
    let attributes = &document.data.attributes;
    let issued = state
        .sessions
        .login(&attributes.name, &attributes.password)
        .await?;
    signed_in(&state, jar, issued)
}

/// POST /users/token
pub async fn refresh_token(
    State(state): State<AppState>,
    RefreshCookie(token): RefreshCookie,
) -> Result<Response, ApiError> {
    let refreshed = state.sessions.refresh(token.as_deref()).await?;

    let base = &state.config.server.public_url;
    let location = format!("{base}/users/{}", refreshed.principal.id);
    let document = Document {
        links: Some(SelfLinks::new(location.clone())),
        data: UserResource::with_token(&refreshed.principal, refreshed.access.token, base),
        meta: Some(TokenMeta {
            expires_in_sec: state.tokens.access_ttl_seconds(),
        }),
    };
    Ok(with_location(
        json_api(StatusCode::CREATED, &document)?,
        &location,
    ))
}

/// DELETE /users/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    RefreshCookie(token): RefreshCookie,
) -> Result<(CookieJar, Response), ApiError> {
    let revoked = state.sessions.logout(token.as_deref()).await?;
    let jar = jar.add(cleared_refresh_cookie(&state.config.auth));

    let response = if revoked {
        StatusCode::NO_CONTENT.into_response()
    } else {
        json_api(
            StatusCode::OK,
            &MetaDocument {
                meta: LogoutMeta { revoked: false },
            },
        )?
    };
    Ok((jar, response))
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    AuthUser(principal): AuthUser,
) -> Result<Response, ApiError> {
    let users = state.user_service.list(&principal).await?;
    let base = &state.config.server.public_url;

    let document = Document {
        links: Some(SelfLinks::new(format!("{base}{uri}"))),
        meta: Some(UserListMeta {
            total_users: users.len(),
        }),
        data: users
            .iter()
            .map(|user| UserResource::from_user(user, base))
            .collect::<Vec<_>>(),
    };
    json_api(StatusCode::OK, &document)
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    OriginalUri(uri): OriginalUri,
    AuthUser(principal): AuthUser,
) -> Result<Response, ApiError> {
    let user = state.user_service.get(&principal, &id).await?;
    let base = &state.config.server.public_url;

    let document: Document<UserResource> = Document {
        links: Some(SelfLinks::new(format!("{base}{uri}"))),
        data: UserResource {
            links: None,
            ..UserResource::from_user(&user, base)
        },
        meta: None,
    };
    json_api(StatusCode::OK, &document)
}

/// PATCH /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AuthUser(principal): AuthUser,
    ValidatedJson(document): ValidatedJson<UpdateUserDocument>,
) -> Result<StatusCode, ApiError> {
    let data = document.data;
    state
        .user_service
        .update(
            &principal,
            &id,
            UpdateAccount {
                id: data.id,
                old_password: data.attributes.old_password,
                new_name: data.attributes.new_name,
                new_password: data.attributes.new_password,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AuthUser(principal): AuthUser,
) -> Result<StatusCode, ApiError> {
    state.user_service.delete(&principal, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
