//! # todohub-auth
//!
//! Authentication and authorization for TodoHub.
//!
//! ## Modules
//!
//! - `jwt`: access/refresh token issuing and verification ([`TokenService`])
//! - `session`: persisted refresh credentials ([`SessionStore`]) and the
//!   login / refresh / logout flows ([`SessionManager`])
//! - `guard`: role, ownership, and request-consistency checks
//!   ([`AuthorizationGuard`])
//! - `password`: Argon2id hashing and password policy

pub mod guard;
pub mod jwt;
pub mod password;
pub mod session;

pub use guard::AuthorizationGuard;
pub use jwt::{AccessToken, TokenKind, TokenService};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{IssuedCredentials, RefreshedAccess, SessionManager, SessionStore};
