//! [`Principal`] extraction for downstream handlers.
//!
//! The route guard attaches the verified [`Principal`] to the request
//! extensions. When no guard ran (endpoint security disabled, or a
//! whitelisted path), the extractor verifies the bearer credential itself and
//! caches the result in the extensions.

use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;

use super::BearerToken;
use crate::handler::Error;
use crate::service::auth::{AuthFailure, Principal, SessionIssuer, TokenCodec};
use crate::utility::tracing_targets::AUTHENTICATION as TRACING_TARGET;

impl Principal {
    /// Verifies the request's bearer credential against the access key.
    ///
    /// # Errors
    ///
    /// - [`AuthFailure::MissingCredential`] without a bearer credential
    /// - [`AuthFailure::InvalidAccessToken`] when verification fails
    pub fn from_bearer(bearer: &BearerToken, issuer: &SessionIssuer) -> Result<Self, AuthFailure> {
        let claims = TokenCodec::verify(bearer.token(), issuer.access_key()).map_err(|e| {
            tracing::debug!(
                target: TRACING_TARGET,
                error = %e,
                "access token rejected"
            );
            AuthFailure::InvalidAccessToken
        })?;

        Ok(Self::new(claims.subject))
    }

    fn from_parts(parts: &mut Parts, issuer: &SessionIssuer) -> Result<Self, AuthFailure> {
        if let Some(principal) = parts.extensions.get::<Self>() {
            return Ok(principal.clone());
        }

        let bearer = BearerToken::from_headers(&parts.headers)?;
        let principal = Self::from_bearer(&bearer, issuer)?;
        parts.extensions.insert(principal.clone());
        Ok(principal)
    }
}

impl<S> FromRequestParts<S> for Principal
where
    S: Sync + Send,
    SessionIssuer: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let issuer = SessionIssuer::from_ref(state);
        Self::from_parts(parts, &issuer).map_err(Into::into)
    }
}

impl<S> OptionalFromRequestParts<S> for Principal
where
    S: Sync + Send,
    SessionIssuer: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        if parts.extensions.get::<Self>().is_none() && !BearerToken::is_present(&parts.headers) {
            return Ok(None);
        }

        let issuer = SessionIssuer::from_ref(state);
        Self::from_parts(parts, &issuer).map(Some).map_err(Into::into)
    }
}
