//! Refresh cookie extraction.

use std::fmt;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use crate::handler::Error;
use crate::service::auth::{AuthFailure, REFRESH_COOKIE_NAME};
use crate::utility::tracing_targets::SESSION as TRACING_TARGET;

/// Raw, unverified value of the refresh cookie.
///
/// Rejects with `401 Unauthorized` when the cookie is absent or empty.
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshCookie(String);

impl RefreshCookie {
    /// Returns the raw cookie value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RefreshCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshCookie").finish_non_exhaustive()
    }
}

impl<S> FromRequestParts<S> for RefreshCookie
where
    S: Sync + Send,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        match jar.get(REFRESH_COOKIE_NAME).map(|c| c.value()) {
            Some(value) if !value.is_empty() => Ok(Self(value.to_owned())),
            _ => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    "refresh cookie missing"
                );
                Err(AuthFailure::InvalidRefreshToken.into())
            }
        }
    }
}
