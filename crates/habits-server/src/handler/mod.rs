//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust,ignore
//! use habits_server::handler::{CustomRoutes, routes};
//! use habits_server::service::{ServiceConfig, ServiceState};
//!
//! let state = ServiceState::new(&config)?;
//! let router = routes(CustomRoutes::new(), state.clone()).with_state(state);
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod authentication;
mod error;
pub mod request;
pub mod response;
mod users;
mod utility;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::utility::CustomRoutes;
use crate::middleware::RouterAuthExt;
use crate::service::ServiceState;
use crate::utility::tracing_targets::ROUTE_GUARD as TRACING_TARGET;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with all routes.
///
/// When endpoint security is enabled every route, including the fallback,
/// sits behind the route guard.
pub fn routes(routes: CustomRoutes, state: ServiceState) -> Router<ServiceState> {
    let mut router = Router::new()
        .merge(authentication::routes())
        .merge(users::routes());

    if let Some(additional) = routes.into_routes() {
        router = router.merge(additional);
    }

    let router = router.fallback(handler);

    if !state.secure_endpoints {
        tracing::warn!(
            target: TRACING_TARGET,
            "endpoint security disabled, route guard not installed"
        );
        return router;
    }

    let whitelist = state.route_guard.whitelist();
    tracing::info!(
        target: TRACING_TARGET,
        anonymous_paths = ?whitelist.entries(),
        matching = ?whitelist.matching(),
        "route guard installed"
    );

    router.with_route_guard(state)
}

#[cfg(test)]
pub(crate) mod test {
    use axum::http::HeaderValue;
    use axum_test::TestServer;

    use crate::handler::{CustomRoutes, routes};
    use crate::middleware::auth::PathMatching;
    use crate::service::identity::{FederatedIdentity, IdentityProvider};
    use crate::service::{InMemoryUserRepository, ServiceConfig, ServiceState, UserStore};
    use crate::{Error, Result};

    /// Assertion accepted by [`StubProvider`].
    pub const VALID_ASSERTION: &str = "valid-assertion";

    /// Identity provider accepting only [`VALID_ASSERTION`].
    pub struct StubProvider;

    #[async_trait::async_trait]
    impl IdentityProvider for StubProvider {
        async fn verify_assertion(&self, assertion: &str) -> Result<FederatedIdentity> {
            if assertion != VALID_ASSERTION {
                return Err(Error::auth("invalid assertion"));
            }

            Ok(FederatedIdentity {
                email: "alice@example.com".to_owned(),
                external_subject_id: "ext-123".to_owned(),
            })
        }
    }

    /// Returns a valid configuration for handler tests.
    pub fn test_config() -> anyhow::Result<ServiceConfig> {
        let config = ServiceConfig::builder()
            .with_access_token_key("access-signing-key-0123456789abcdef")
            .with_refresh_token_key("refresh-signing-key-0123456789abcdef")
            .with_google_client_id("client-id.apps.googleusercontent.com")
            .build()?;
        Ok(config)
    }

    /// Returns a new state with a stub identity provider.
    pub fn create_test_state(config: &ServiceConfig) -> anyhow::Result<ServiceState> {
        let users = UserStore::new(InMemoryUserRepository::new());
        let state = ServiceState::from_parts(config, StubProvider, users)?;
        Ok(state)
    }

    /// Returns a new [`TestServer`] with the default router and the given state.
    pub fn create_test_server_with_state(state: ServiceState) -> anyhow::Result<TestServer> {
        let app = routes(CustomRoutes::new(), state.clone()).with_state(state);
        let server = TestServer::new(app)?;
        Ok(server)
    }

    /// Returns a new [`TestServer`] with the default router and state.
    pub fn create_test_server() -> anyhow::Result<(TestServer, ServiceState)> {
        let state = create_test_state(&test_config()?)?;
        let server = create_test_server_with_state(state.clone())?;
        Ok((server, state))
    }

    /// Returns an `Authorization` header value for `token`.
    pub fn bearer(token: &str) -> anyhow::Result<HeaderValue> {
        Ok(HeaderValue::from_str(&format!("Bearer {token}"))?)
    }

    #[tokio::test]
    async fn handlers() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;
        assert!(server.is_running());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_route_is_guarded() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let principal = crate::service::auth::Principal::new("user-1");
        let token = state.session_issuer.issue_access_token(&principal)?;

        server
            .get("/api/v1/unknown")
            .expect_failure()
            .await
            .assert_status(axum::http::StatusCode::FORBIDDEN);

        server
            .get("/api/v1/unknown")
            .add_header(axum::http::header::AUTHORIZATION, bearer(&token.value)?)
            .expect_failure()
            .await
            .assert_status_not_found();
        Ok(())
    }

    #[test]
    fn route_guard_uses_configured_whitelist() -> anyhow::Result<()> {
        let state = create_test_state(&test_config()?)?;
        let whitelist = state.route_guard.whitelist();

        assert_eq!(whitelist.matching(), PathMatching::Suffix);
        assert!(whitelist.is_allowed("/api/v1/users/login"));
        assert!(whitelist.is_allowed("/api/v1/users/refresh"));
        assert!(!whitelist.is_allowed("/api/v1/users/me"));
        Ok(())
    }

    #[tokio::test]
    async fn disabled_security_admits_anonymously() -> anyhow::Result<()> {
        let mut config = test_config()?;
        config.secure_endpoints = false;
        let server = create_test_server_with_state(create_test_state(&config)?)?;

        server
            .get("/api/v1/unknown")
            .expect_failure()
            .await
            .assert_status_not_found();
        Ok(())
    }
}
