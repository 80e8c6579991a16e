//! Response documents.

use chrono::{DateTime, Utc};
use serde::Serialize;

use todohub_core::types::{PageSummary, TodoId, UserId};
use todohub_entity::{Principal, Role, Todo, User};

/// A top-level document with primary data.
#[derive(Debug, Clone, Serialize)]
pub struct Document<D: Serialize, L: Serialize = SelfLinks, M: Serialize = ()> {
    /// Document links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<L>,
    /// Primary data.
    pub data: D,
    /// Non-standard meta information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<M>,
}

/// A document carrying only meta information.
#[derive(Debug, Clone, Serialize)]
pub struct MetaDocument<M: Serialize> {
    /// Meta information.
    pub meta: M,
}

/// `{"self": url}`.
#[derive(Debug, Clone, Serialize)]
pub struct SelfLinks {
    /// Canonical URL of the resource or document.
    #[serde(rename = "self")]
    pub self_link: String,
}

impl SelfLinks {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            self_link: url.into(),
        }
    }
}

/// Pagination links; all but `self` are null without a limit.
#[derive(Debug, Clone, Serialize)]
pub struct PageLinks {
    /// URL of this page.
    #[serde(rename = "self")]
    pub self_link: String,
    pub first: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
    pub last: Option<String>,
}

impl PageLinks {
    /// Build links for `/todos` under `base`.
    pub fn new(self_link: String, base: &str, summary: Option<&PageSummary>) -> Self {
        let Some(summary) = summary else {
            return Self {
                self_link,
                first: None,
                prev: None,
                next: None,
                last: None,
            };
        };
        let link = |offset: u64| {
            format!(
                "{base}/todos?page[offset]={offset}&page[limit]={}",
                summary.limit
            )
        };
        Self {
            self_link,
            first: Some(link(summary.first_offset)),
            prev: summary.prev_offset.map(link),
            next: summary.next_offset.map(link),
            last: Some(link(summary.last_offset)),
        }
    }
}

// ── Users ────────────────────────────────────────────────────

/// A `users` resource object.
#[derive(Debug, Clone, Serialize)]
pub struct UserResource {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: UserId,
    pub attributes: UserAttributes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<SelfLinks>,
    /// Access token, present on register, login, and refresh.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Public account fields.
#[derive(Debug, Clone, Serialize)]
pub struct UserAttributes {
    pub name: String,
    pub rights: Role,
}

impl UserResource {
    /// Resource for a stored account.
    pub fn from_user(user: &User, base: &str) -> Self {
        Self {
            kind: "users",
            id: user.id,
            attributes: UserAttributes {
                name: user.name.clone(),
                rights: user.role,
            },
            links: Some(SelfLinks::new(format!("{base}/users/{}", user.id))),
            token: None,
        }
    }

    /// Resource for an authenticated principal together with its access
    /// token.
    pub fn with_token(principal: &Principal, token: String, base: &str) -> Self {
        Self {
            kind: "users",
            id: principal.id,
            attributes: UserAttributes {
                name: principal.display_name.clone(),
                rights: principal.role,
            },
            links: Some(SelfLinks::new(format!("{base}/users/{}", principal.id))),
            token: Some(token),
        }
    }
}

/// Meta of the refresh response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMeta {
    /// Access token lifetime in seconds.
    pub expires_in_sec: i64,
}

/// Meta of the account list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListMeta {
    pub total_users: usize,
}

/// Meta of a logout that removed nothing.
#[derive(Debug, Clone, Serialize)]
pub struct LogoutMeta {
    pub revoked: bool,
}

// ── Todos ────────────────────────────────────────────────────

/// A `todos` resource object.
#[derive(Debug, Clone, Serialize)]
pub struct TodoResource {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: TodoId,
    pub attributes: TodoAttributes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<SelfLinks>,
}

/// Todo fields.
#[derive(Debug, Clone, Serialize)]
pub struct TodoAttributes {
    pub description: String,
    pub timestamps: Timestamps,
}

#[derive(Debug, Clone, Serialize)]
pub struct Timestamps {
    pub created: DateTime<Utc>,
}

impl TodoResource {
    /// Resource for `todo`, optionally with its own link.
    pub fn from_todo(todo: &Todo, base: Option<&str>) -> Self {
        Self {
            kind: "todos",
            id: todo.id,
            attributes: TodoAttributes {
                description: todo.description.clone(),
                timestamps: Timestamps {
                    created: todo.created_at,
                },
            },
            links: base.map(|base| SelfLinks::new(format!("{base}/todos/{}", todo.id))),
        }
    }
}

/// Meta of a paginated todo list.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoListMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_todos: Option<u64>,
}

impl TodoListMeta {
    pub fn from_summary(summary: Option<&PageSummary>) -> Self {
        match summary {
            Some(summary) => Self {
                total_pages: Some(summary.total_pages),
                current_page: Some(summary.current_page),
                total_todos: Some(summary.total_items),
            },
            None => Self::default(),
        }
    }
}

/// `GET /health` body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
    pub cache: &'static str,
}
