//! HTTP server startup with graceful shutdown.

mod error;
mod http_server;
mod shutdown;

use axum::Router;
pub use error::{ServerError, ServerResult};
use shutdown::shutdown_signal;

use crate::config::ServerConfig;

/// Starts the HTTP server and runs it until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if:
/// - Cannot bind to the specified address/port
/// - Server encounters a fatal error during operation
pub async fn serve(app: Router, config: ServerConfig) -> ServerResult<()> {
    http_server::serve_http(app, config).await
}
