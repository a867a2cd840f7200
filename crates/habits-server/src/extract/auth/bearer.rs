//! `Authorization: Bearer <token>` header parsing.
//!
//! The scheme keyword is matched case-sensitively and must be followed by
//! exactly one space and a non-empty token without whitespace. Anything else
//! counts as a missing credential.

use std::fmt;

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;

use crate::service::auth::AuthFailure;

/// Scheme prefix an access token must be presented with.
pub const BEARER_PREFIX: &str = "Bearer ";

/// A syntactically valid bearer credential, not yet verified.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Parses a raw `Authorization` header value.
    ///
    /// Returns `None` unless the value has the exact `Bearer <token>` shape.
    pub fn parse(value: &str) -> Option<Self> {
        let token = value.strip_prefix(BEARER_PREFIX)?;
        if token.is_empty() || token.contains(char::is_whitespace) {
            return None;
        }

        Some(Self(token.to_owned()))
    }

    /// Reads the credential from the request headers.
    ///
    /// # Errors
    ///
    /// Returns [`AuthFailure::MissingCredential`] when the header is absent,
    /// not valid UTF-8, or not in the bearer shape.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, AuthFailure> {
        headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(Self::parse)
            .ok_or(AuthFailure::MissingCredential)
    }

    /// Returns `true` if the request carries an `Authorization` header at all.
    #[inline]
    pub fn is_present(headers: &HeaderMap) -> bool {
        headers.contains_key(AUTHORIZATION)
    }

    /// Returns the raw token.
    #[inline]
    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BearerToken").finish_non_exhaustive()
    }
}
