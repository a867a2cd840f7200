//! Authentication handlers for login and session refresh.
//!
//! Both endpoints answer with an access token in the body and the refresh
//! token in the `auth_token` cookie. Failures carry no body and never set a
//! cookie.

use axum::Router;
use axum::extract::State;
use axum::routing::post;
use axum_extra::extract::cookie::CookieJar;

use crate::extract::{Json, RefreshCookie};
use crate::handler::Result;
use crate::handler::request::Login;
use crate::handler::response::{AccessToken, Authenticated};
use crate::service::auth::{Principal, SessionIssuer};
use crate::service::{IdentityBroker, ServiceState, UserStore};
use crate::utility::tracing_targets::AUTHENTICATION as TRACING_TARGET;

/// Exchanges an identity assertion for a session.
#[tracing::instrument(skip_all)]
async fn login(
    State(identity_broker): State<IdentityBroker>,
    State(users): State<UserStore>,
    State(session_issuer): State<SessionIssuer>,
    jar: CookieJar,
    Json(request): Json<Login>,
) -> Result<(CookieJar, Json<Authenticated>)> {
    let identity = identity_broker.verify_assertion(&request.token).await?;
    let user = users.find_or_create(&identity).await?;

    let session = session_issuer.issue_session(Principal::new(user.id.to_string()))?;

    tracing::info!(
        target: TRACING_TARGET,
        user_id = %user.id,
        expires_in = session.access_token.expires_in,
        "login successful"
    );

    let response = Authenticated::new(user, session.access_token);
    Ok((jar.add(session.refresh_cookie), Json(response)))
}

/// Rotates the refresh cookie and issues a new access token.
#[tracing::instrument(skip_all)]
async fn refresh(
    State(session_issuer): State<SessionIssuer>,
    jar: CookieJar,
    refresh_cookie: RefreshCookie,
) -> Result<(CookieJar, Json<AccessToken>)> {
    let session = session_issuer.refresh_session(refresh_cookie.value())?;

    tracing::debug!(
        target: TRACING_TARGET,
        principal = %session.principal,
        "session refreshed"
    );

    let response = AccessToken::from(session.access_token);
    Ok((jar.add(session.refresh_cookie), Json(response)))
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/api/v1/users/login", post(login))
        .route("/api/v1/users/refresh", post(refresh))
}
