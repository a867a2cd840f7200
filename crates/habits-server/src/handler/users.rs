//! Current user handler.

use axum::Router;
use axum::extract::State;
use axum::routing::get;
use uuid::Uuid;

use crate::extract::{Json, Principal};
use crate::handler::response::User;
use crate::handler::{ErrorKind, Result};
use crate::service::{ServiceState, UserStore};
use crate::utility::tracing_targets::USERS as TRACING_TARGET;

/// Returns the user the request is authenticated as.
#[tracing::instrument(skip_all, fields(principal = %principal))]
async fn current_user(
    State(users): State<UserStore>,
    principal: Principal,
) -> Result<Json<User>> {
    let user_id = Uuid::parse_str(&principal.id).map_err(|_| {
        ErrorKind::NotFound
            .with_resource("user")
            .with_context("principal is not a user id")
    })?;

    let Some(user) = users.find_by_id(user_id).await? else {
        tracing::debug!(
            target: TRACING_TARGET,
            user_id = %user_id,
            "authenticated user no longer exists"
        );
        return Err(ErrorKind::NotFound.with_resource("user"));
    };

    Ok(Json(user.into()))
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/api/v1/users/me", get(current_user))
}
