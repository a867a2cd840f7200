#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;
mod telemetry;

use std::process;

use axum::Router;
use habits_server::handler::{CustomRoutes, routes};
use habits_server::middleware::{
    RouterBodyLimitExt, RouterCorsExt, RouterObservabilityExt, RouterRecoveryExt,
};
use habits_server::service::ServiceState;

use crate::config::{Cli, MiddlewareConfig};

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "habits_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "habits_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "habits_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    let suggestion = error
        .downcast_ref::<server::ServerError>()
        .and_then(server::ServerError::suggestion);

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            suggestion,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing()?;
    cli.log();
    cli.validate()?;

    let state = ServiceState::new(&cli.service).map_err(server::ServerError::State)?;
    let router = create_router(state, &cli.middleware);

    server::serve(router, cli.server).await?;

    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost) - catches panics and enforces timeouts
/// 2. Observability - request IDs and tracing spans
/// 3. CORS - answers preflights before the route guard sees them
/// 4. Body limit - caps JSON request bodies
/// 5. Routes (innermost) - route guard and handlers
fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    routes(CustomRoutes::new(), state.clone())
        .with_state(state)
        .with_body_limit(&middleware.body_limit)
        .with_cors(&middleware.cors)
        .with_observability()
        .with_recovery(&middleware.recovery)
}
