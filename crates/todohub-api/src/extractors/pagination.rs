//! `page[offset]` / `page[limit]` query parameters.

use std::collections::HashMap;
use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use todohub_core::types::PageRequest;

/// Requested page window. Malformed values fall back to defaults rather
/// than failing the request.
#[derive(Debug, Clone, Copy)]
pub struct PageParams(pub PageRequest);

impl<S: Send + Sync> FromRequestParts<S> for PageParams {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map(|Query(params)| params)
            .unwrap_or_default();

        Ok(Self(PageRequest::from_raw(
            params.get("page[offset]").map(String::as_str),
            params.get("page[limit]").map(String::as_str),
        )))
    }
}
