//! JWT credential encoding, decoding, and claims.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod service;

pub use claims::{AccessClaims, RefreshClaims};
pub use decoder::{JwtDecoder, TokenKind};
pub use encoder::{AccessToken, JwtEncoder};
pub use service::TokenService;
