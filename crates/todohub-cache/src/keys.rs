//! Cache key builders.
//!
//! Every response key is namespaced by the principal it was computed for,
//! so invalidation never needs pattern matching. Backends add the
//! configured global prefix themselves.

use todohub_core::types::{PageRequest, UserId};

/// Generation counter of a principal's cached responses.
pub fn response_generation(principal: UserId) -> String {
    format!("resp-gen:{principal}")
}

/// Set of every response key written for a principal.
pub fn response_index(principal: UserId) -> String {
    format!("resp-index:{principal}")
}

/// Cached response of `route` for `principal` under `generation`.
pub fn response(principal: UserId, generation: i64, route: &str) -> String {
    format!("resp:{principal}:{generation}:{route}")
}

/// Canonical form of a cached request: the path plus the page window.
///
/// Only the parsed window is kept, so arbitrary query strings map onto the
/// same key as the request they decorate.
pub fn canonical_route(path: &str, page: &PageRequest) -> String {
    match page.limit {
        Some(limit) => format!("{path}?page[offset]={}&page[limit]={limit}", page.offset),
        None if page.offset > 0 => format!("{path}?page[offset]={}", page.offset),
        None => path.to_string(),
    }
}
