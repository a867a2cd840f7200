//! Per-request authentication gate.
//!
//! Every request is classified independently:
//!
//! 1. A path on the [`PathWhitelist`] is admitted with no principal.
//! 2. Otherwise the `Authorization` header must hold `Bearer <token>`;
//!    anything else is rejected with `403 Forbidden`.
//! 3. The token is verified against the access key. Success attaches the
//!    [`Principal`] to the request extensions; failure is rejected with
//!    `401 Unauthorized`.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::{Next, from_fn_with_state};
use axum::response::{IntoResponse, Response};

use super::PathWhitelist;
use crate::extract::BearerToken;
use crate::handler::Error;
use crate::service::ServiceState;
use crate::service::auth::{AuthFailure, Principal, SessionIssuer};
use crate::utility::tracing_targets::ROUTE_GUARD as TRACING_TARGET;

/// Outcome of evaluating a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Whitelisted path; admitted without a principal.
    Anonymous,
    /// Verified access token; admitted as the principal.
    Authenticated(Principal),
    /// Refused; the failure selects the response status.
    Rejected(AuthFailure),
}

/// Decides whether a request may proceed.
///
/// Holds only read-only state; cheap to clone.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    issuer: SessionIssuer,
    whitelist: Arc<PathWhitelist>,
}

impl RouteGuard {
    /// Creates a new guard verifying against the issuer's access key.
    pub fn new(issuer: SessionIssuer, whitelist: PathWhitelist) -> Self {
        Self {
            issuer,
            whitelist: Arc::new(whitelist),
        }
    }

    /// Returns the anonymous-allowed paths.
    #[inline]
    pub fn whitelist(&self) -> &PathWhitelist {
        &self.whitelist
    }

    /// Classifies a request by its path and headers.
    pub fn evaluate(&self, path: &str, headers: &HeaderMap) -> GuardDecision {
        if self.whitelist.is_allowed(path) {
            tracing::trace!(
                target: TRACING_TARGET,
                path,
                "whitelisted path admitted anonymously"
            );
            return GuardDecision::Anonymous;
        }

        let bearer = match BearerToken::from_headers(headers) {
            Ok(bearer) => bearer,
            Err(failure) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    path,
                    header_present = BearerToken::is_present(headers),
                    "missing or malformed credential"
                );
                return GuardDecision::Rejected(failure);
            }
        };

        match Principal::from_bearer(&bearer, &self.issuer) {
            Ok(principal) => {
                tracing::trace!(
                    target: TRACING_TARGET,
                    path,
                    principal = %principal,
                    "request authenticated"
                );
                GuardDecision::Authenticated(principal)
            }
            Err(failure) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    path,
                    "invalid access token"
                );
                GuardDecision::Rejected(failure)
            }
        }
    }
}

/// Gates the request with the [`RouteGuard`] from state.
///
/// Rejections are answered with a body-less status and never reach the
/// inner service.
pub async fn route_guard(
    State(guard): State<RouteGuard>,
    mut request: Request,
    next: Next,
) -> Response {
    match guard.evaluate(request.uri().path(), request.headers()) {
        GuardDecision::Anonymous => next.run(request).await,
        GuardDecision::Authenticated(principal) => {
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        GuardDecision::Rejected(failure) => Error::from(failure).into_response(),
    }
}

/// Extension trait for `axum::`[`Router`] to apply the route guard.
pub trait RouterAuthExt<S> {
    /// Gates all routes (and the fallback) with the [`RouteGuard`].
    fn with_route_guard(self, state: ServiceState) -> Self;
}

impl<S> RouterAuthExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_route_guard(self, state: ServiceState) -> Self {
        self.layer(from_fn_with_state(state, route_guard))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use axum::http::header::AUTHORIZATION;

    use super::*;
    use crate::middleware::auth::PathMatching;
    use crate::service::auth::{AuthConfig, TokenClaims, TokenCodec};

    fn issuer() -> SessionIssuer {
        SessionIssuer::from_config(&AuthConfig {
            access_signing_key: "access-signing-key-0123456789abcdef".to_owned(),
            access_lifetime_secs: 900,
            refresh_signing_key: "refresh-signing-key-0123456789abcdef".to_owned(),
            refresh_lifetime_secs: 7 * 24 * 60 * 60,
            federated_client_id: "client-id".to_owned(),
            is_development_mode: false,
        })
    }

    fn guard(issuer: &SessionIssuer) -> RouteGuard {
        let whitelist = PathWhitelist::new(
            ["/api/v1/users/login", "/api/v1/users/refresh"],
            PathMatching::Suffix,
        );
        RouteGuard::new(issuer.clone(), whitelist)
    }

    fn authorization(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn whitelisted_path_is_anonymous_without_header() {
        let guard = guard(&issuer());
        assert_eq!(
            guard.evaluate("/api/v1/users/login", &HeaderMap::new()),
            GuardDecision::Anonymous
        );
    }

    #[test]
    fn whitelisted_path_ignores_invalid_header() {
        let guard = guard(&issuer());
        assert_eq!(
            guard.evaluate("/api/v1/users/refresh", &authorization("Bearer garbage")),
            GuardDecision::Anonymous
        );
    }

    #[test]
    fn missing_header_is_rejected_as_missing_credential() {
        let guard = guard(&issuer());
        assert_eq!(
            guard.evaluate("/api/v1/users/me", &HeaderMap::new()),
            GuardDecision::Rejected(AuthFailure::MissingCredential)
        );
    }

    #[test]
    fn wrong_scheme_is_rejected_as_missing_credential() {
        let guard = guard(&issuer());
        assert_eq!(
            guard.evaluate("/api/v1/users/me", &authorization("Basic xyz")),
            GuardDecision::Rejected(AuthFailure::MissingCredential)
        );
    }

    #[test]
    fn invalid_token_is_rejected_as_invalid() {
        let guard = guard(&issuer());
        assert_eq!(
            guard.evaluate("/api/v1/users/me", &authorization("Bearer abc.def.ghi")),
            GuardDecision::Rejected(AuthFailure::InvalidAccessToken)
        );
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let issuer = issuer();
        let guard = guard(&issuer);
        let token = issuer.issue_refresh_token(&Principal::new("user-1")).unwrap();

        assert_eq!(
            guard.evaluate(
                "/api/v1/users/me",
                &authorization(&format!("Bearer {}", token.value))
            ),
            GuardDecision::Rejected(AuthFailure::InvalidAccessToken)
        );
    }

    #[test]
    fn expired_token_is_rejected_as_invalid() {
        let issuer = issuer();
        let guard = guard(&issuer);
        let token = TokenCodec::sign(TokenClaims::new("user-1"), issuer.access_key(), 0).unwrap();

        assert_eq!(
            guard.evaluate(
                "/api/v1/users/me",
                &authorization(&format!("Bearer {}", token.value))
            ),
            GuardDecision::Rejected(AuthFailure::InvalidAccessToken)
        );
    }

    #[test]
    fn valid_token_is_authenticated() {
        let issuer = issuer();
        let guard = guard(&issuer);
        let token = issuer.issue_access_token(&Principal::new("user-1")).unwrap();

        assert_eq!(
            guard.evaluate(
                "/api/v1/users/me",
                &authorization(&format!("Bearer {}", token.value))
            ),
            GuardDecision::Authenticated(Principal::new("user-1"))
        );
    }
}
