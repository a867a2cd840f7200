//! Session and token authentication core.
//!
//! - [`TokenCodec`] signs and verifies compact bearer tokens
//! - [`CookiePolicy`] derives the refresh cookie attributes
//! - [`SessionIssuer`] mints access/refresh pairs and rotates refresh tokens
//! - [`AuthFailure`] classifies every client-visible rejection

mod auth_config;
mod auth_failure;
mod cookie_policy;
mod principal;
mod session_issuer;
mod session_keys;
mod token_codec;

pub use self::auth_config::AuthConfig;
pub use self::auth_failure::AuthFailure;
pub use self::cookie_policy::{CookiePolicy, REFRESH_COOKIE_NAME};
pub use self::principal::Principal;
pub use self::session_issuer::{Session, SessionIssuer};
pub use self::session_keys::{SessionKeys, SigningKey, TokenKind};
pub use self::token_codec::{IssuedToken, SignedClaims, TokenClaims, TokenCodec, TokenError};
