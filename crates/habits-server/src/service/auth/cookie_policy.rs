//! Attributes of the cookie carrying the refresh token.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::{Duration, OffsetDateTime};

/// Name of the cookie carrying the refresh token.
pub const REFRESH_COOKIE_NAME: &str = "auth_token";

/// Derives the refresh cookie attributes.
///
/// The cookie is always `HttpOnly` and `SameSite=Strict`, scoped to `/`.
/// `Secure` is set unless the policy was built for development mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    is_development_mode: bool,
}

impl CookiePolicy {
    /// Creates a new cookie policy.
    pub const fn new(is_development_mode: bool) -> Self {
        Self {
            is_development_mode,
        }
    }

    /// Returns whether cookies are emitted with the `Secure` attribute.
    #[inline]
    pub const fn is_secure(&self) -> bool {
        !self.is_development_mode
    }

    /// Builds the refresh cookie expiring `expires_in` seconds from now.
    pub fn refresh_cookie(&self, value: impl Into<String>, expires_in: u64) -> Cookie<'static> {
        let expires_in = Duration::seconds(i64::try_from(expires_in).unwrap_or(i64::MAX));
        let expires_at = OffsetDateTime::now_utc().saturating_add(expires_in);

        Cookie::build((REFRESH_COOKIE_NAME, value.into()))
            .http_only(true)
            .secure(self.is_secure())
            .same_site(SameSite::Strict)
            .path("/")
            .expires(expires_at)
            .build()
    }
}
