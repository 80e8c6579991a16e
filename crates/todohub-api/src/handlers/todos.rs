//! Todo handlers.

use axum::extract::{OriginalUri, Path, State};
use axum::http::StatusCode;
use axum::response::Response;

use todohub_cache::keys::canonical_route;

use crate::dto::request::TodoDocument;
use crate::dto::response::{Document, PageLinks, SelfLinks, TodoListMeta, TodoResource};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PageParams, ValidatedJson};
use crate::handlers::{json_api, with_location};
use crate::state::AppState;

/// GET /todos
pub async fn list_todos(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    PageParams(page): PageParams,
    AuthUser(principal): AuthUser,
) -> Result<Response, ApiError> {
    let route = canonical_route(uri.path(), &page);
    let result = state.todo_service.list(&principal, &route, page).await?;
    let base = &state.config.server.public_url;

    let document = Document {
        links: Some(PageLinks::new(
            format!("{base}{uri}"),
            base,
            result.summary.as_ref(),
        )),
        data: result
            .items
            .iter()
            .map(|todo| TodoResource::from_todo(todo, None))
            .collect::<Vec<_>>(),
        meta: Some(TodoListMeta::from_summary(result.summary.as_ref())),
    };
    json_api(StatusCode::OK, &document)
}

/// GET /todos/{id}
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    OriginalUri(uri): OriginalUri,
    AuthUser(principal): AuthUser,
) -> Result<Response, ApiError> {
    let todo = state.todo_service.get(&principal, &id, uri.path()).await?;
    let base = &state.config.server.public_url;

    let document: Document<TodoResource> = Document {
        links: Some(SelfLinks::new(format!("{base}{uri}"))),
        data: TodoResource::from_todo(&todo, None),
        meta: None,
    };
    json_api(StatusCode::OK, &document)
}

/// POST /todos
pub async fn create_todo(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    ValidatedJson(document): ValidatedJson<TodoDocument>,
) -> Result<Response, ApiError> {
    let todo = state
        .todo_service
        .create(&principal, &document.data.attributes.description)
        .await?;
    let base = &state.config.server.public_url;
    let location = format!("{base}/todos/{}", todo.id);

    let document: Document<TodoResource> = Document {
        links: None,
        data: TodoResource::from_todo(&todo, Some(base)),
        meta: None,
    };
    Ok(with_location(
        json_api(StatusCode::CREATED, &document)?,
        &location,
    ))
}

/// PUT /todos/{id}
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    OriginalUri(uri): OriginalUri,
    AuthUser(principal): AuthUser,
    ValidatedJson(document): ValidatedJson<TodoDocument>,
) -> Result<Response, ApiError> {
    let body_id = document.data.id.unwrap_or_default();
    let todo = state
        .todo_service
        .update(
            &principal,
            &id,
            &body_id,
            &document.data.attributes.description,
        )
        .await?;
    let base = &state.config.server.public_url;

    let document: Document<TodoResource> = Document {
        links: Some(SelfLinks::new(format!("{base}{uri}"))),
        data: TodoResource::from_todo(&todo, None),
        meta: None,
    };
    json_api(StatusCode::OK, &document)
}

/// DELETE /todos/{id}
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AuthUser(principal): AuthUser,
) -> Result<StatusCode, ApiError> {
    state.todo_service.delete(&principal, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
