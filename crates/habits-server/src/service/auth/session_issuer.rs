//! Minting and rotation of access/refresh token pairs.

use std::sync::Arc;

use axum_extra::extract::cookie::Cookie;

use super::{
    AuthConfig, AuthFailure, CookiePolicy, IssuedToken, Principal, SessionKeys, SigningKey,
    TokenClaims, TokenCodec,
};
use crate::utility::tracing_targets::SESSION as TRACING_TARGET;

/// A freshly minted session for a principal.
///
/// The access token goes into the response body; the refresh token only
/// ever leaves the server inside [`Session::refresh_cookie`].
#[derive(Debug, Clone)]
pub struct Session {
    /// Principal the session was issued for.
    pub principal: Principal,
    /// Bearer token for the `Authorization` header.
    pub access_token: IssuedToken,
    /// Cookie carrying the refresh token.
    pub refresh_cookie: Cookie<'static>,
}

/// Issues access and refresh tokens and rotates refresh tokens.
///
/// Holds no mutable state; cheap to clone.
#[derive(Debug, Clone)]
pub struct SessionIssuer {
    inner: Arc<SessionIssuerInner>,
}

#[derive(Debug)]
struct SessionIssuerInner {
    keys: SessionKeys,
    access_lifetime_secs: u64,
    refresh_lifetime_secs: u64,
    cookie_policy: CookiePolicy,
}

impl SessionIssuer {
    /// Creates a new issuer from the process-wide configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        let inner = SessionIssuerInner {
            keys: SessionKeys::from_config(config),
            access_lifetime_secs: config.access_lifetime_secs,
            refresh_lifetime_secs: config.refresh_lifetime_secs,
            cookie_policy: CookiePolicy::new(config.is_development_mode),
        };

        Self {
            inner: Arc::new(inner),
        }
    }

    /// Returns the signing keys.
    #[inline]
    pub fn keys(&self) -> &SessionKeys {
        &self.inner.keys
    }

    /// Returns the key access tokens are verified against.
    #[inline]
    pub fn access_key(&self) -> &SigningKey {
        self.inner.keys.access()
    }

    /// Signs an access token for `principal`.
    pub fn issue_access_token(&self, principal: &Principal) -> Result<IssuedToken, AuthFailure> {
        Self::issue(
            principal,
            self.inner.keys.access(),
            self.inner.access_lifetime_secs,
        )
    }

    /// Signs a refresh token for `principal`.
    pub fn issue_refresh_token(&self, principal: &Principal) -> Result<IssuedToken, AuthFailure> {
        Self::issue(
            principal,
            self.inner.keys.refresh(),
            self.inner.refresh_lifetime_secs,
        )
    }

    /// Mints an access token and a refresh cookie for `principal`.
    pub fn issue_session(&self, principal: Principal) -> Result<Session, AuthFailure> {
        let access_token = self.issue_access_token(&principal)?;
        let refresh_token = self.issue_refresh_token(&principal)?;

        tracing::info!(
            target: TRACING_TARGET,
            principal = %principal,
            access_token_id = %access_token.token_id,
            refresh_token_id = %refresh_token.token_id,
            "session issued"
        );

        Ok(self.build_session(principal, access_token, refresh_token))
    }

    /// Verifies a refresh cookie value and issues a replacement refresh token.
    ///
    /// The presented token is not revoked; it stays valid until its own expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AuthFailure::InvalidRefreshToken`] when the value fails
    /// verification for any reason.
    pub fn rotate_refresh_token(
        &self,
        cookie_value: &str,
    ) -> Result<(Principal, IssuedToken), AuthFailure> {
        let claims = TokenCodec::verify(cookie_value, self.inner.keys.refresh()).map_err(|e| {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %e,
                "refresh token rejected"
            );
            AuthFailure::InvalidRefreshToken
        })?;

        let principal = Principal::new(claims.subject);
        let refresh_token = self.issue_refresh_token(&principal)?;

        tracing::debug!(
            target: TRACING_TARGET,
            principal = %principal,
            previous_token_id = %claims.token_id,
            token_id = %refresh_token.token_id,
            "refresh token rotated"
        );

        Ok((principal, refresh_token))
    }

    /// Rotates the refresh token and mints a matching access token.
    pub fn refresh_session(&self, cookie_value: &str) -> Result<Session, AuthFailure> {
        let (principal, refresh_token) = self.rotate_refresh_token(cookie_value)?;
        let access_token = self.issue_access_token(&principal)?;

        tracing::info!(
            target: TRACING_TARGET,
            principal = %principal,
            access_token_id = %access_token.token_id,
            refresh_token_id = %refresh_token.token_id,
            "session refreshed"
        );

        Ok(self.build_session(principal, access_token, refresh_token))
    }

    fn build_session(
        &self,
        principal: Principal,
        access_token: IssuedToken,
        refresh_token: IssuedToken,
    ) -> Session {
        let refresh_cookie = self
            .inner
            .cookie_policy
            .refresh_cookie(refresh_token.value, refresh_token.expires_in);

        Session {
            principal,
            access_token,
            refresh_cookie,
        }
    }

    fn issue(
        principal: &Principal,
        key: &SigningKey,
        lifetime_secs: u64,
    ) -> Result<IssuedToken, AuthFailure> {
        TokenCodec::sign(TokenClaims::new(principal.id.clone()), key, lifetime_secs).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                principal = %principal,
                kind = key.kind().as_str(),
                error = %e,
                "failed to issue token"
            );
            AuthFailure::Internal
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::service::auth::TokenError;
    use crate::service::auth::auth_config::tests::test_config;

    fn issuer() -> SessionIssuer {
        SessionIssuer::from_config(&test_config())
    }

    #[test]
    fn access_token_uses_access_key_and_lifetime() {
        let issuer = issuer();
        let token = issuer.issue_access_token(&Principal::new("user-1")).unwrap();

        assert_eq!(token.expires_in, 900);
        let claims = TokenCodec::verify(&token.value, issuer.keys().access()).unwrap();
        assert_eq!(claims.subject, "user-1");
        assert_eq!(
            TokenCodec::verify(&token.value, issuer.keys().refresh()).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn refresh_token_uses_refresh_key_and_lifetime() {
        let issuer = issuer();
        let token = issuer.issue_refresh_token(&Principal::new("user-1")).unwrap();

        assert_eq!(token.expires_in, 7 * 24 * 60 * 60);
        assert!(TokenCodec::verify(&token.value, issuer.keys().refresh()).is_ok());
        assert!(TokenCodec::verify(&token.value, issuer.keys().access()).is_err());
    }

    #[test]
    fn session_carries_refresh_token_in_cookie() {
        let issuer = issuer();
        let session = issuer.issue_session(Principal::new("user-1")).unwrap();

        assert_eq!(session.principal.id, "user-1");
        assert_eq!(session.refresh_cookie.http_only(), Some(true));
        let claims =
            TokenCodec::verify(session.refresh_cookie.value(), issuer.keys().refresh()).unwrap();
        assert_eq!(claims.subject, "user-1");
    }

    #[test]
    fn rotation_keeps_principal_and_changes_value() {
        let issuer = issuer();
        let original = issuer.issue_refresh_token(&Principal::new("user-1")).unwrap();

        let (principal, rotated) = issuer.rotate_refresh_token(&original.value).unwrap();

        assert_eq!(principal, Principal::new("user-1"));
        assert_ne!(rotated.value, original.value);
        assert!(rotated.expires_at > Timestamp::now());
        let claims = TokenCodec::verify(&rotated.value, issuer.keys().refresh()).unwrap();
        assert_eq!(claims.subject, "user-1");
    }

    #[test]
    fn rotation_rejects_access_token() {
        let issuer = issuer();
        let access = issuer.issue_access_token(&Principal::new("user-1")).unwrap();

        assert_eq!(
            issuer.rotate_refresh_token(&access.value).unwrap_err(),
            AuthFailure::InvalidRefreshToken
        );
    }

    #[test]
    fn rotation_rejects_garbage_and_expired() {
        let issuer = issuer();
        assert_eq!(
            issuer.rotate_refresh_token("garbage").unwrap_err(),
            AuthFailure::InvalidRefreshToken
        );

        let expired =
            TokenCodec::sign(TokenClaims::new("user-1"), issuer.keys().refresh(), 0).unwrap();
        assert_eq!(
            issuer.rotate_refresh_token(&expired.value).unwrap_err(),
            AuthFailure::InvalidRefreshToken
        );
    }

    #[test]
    fn refresh_session_mints_both_tokens() {
        let issuer = issuer();
        let session = issuer.issue_session(Principal::new("user-1")).unwrap();

        let refreshed = issuer
            .refresh_session(session.refresh_cookie.value())
            .unwrap();

        assert_eq!(refreshed.principal.id, "user-1");
        assert_ne!(refreshed.access_token.value, session.access_token.value);
        assert_ne!(refreshed.refresh_cookie.value(), session.refresh_cookie.value());
        assert!(TokenCodec::verify(&refreshed.access_token.value, issuer.access_key()).is_ok());
    }
}
