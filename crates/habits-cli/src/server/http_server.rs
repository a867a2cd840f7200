//! HTTP server startup and lifecycle management.

use std::future::{self, IntoFuture};

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::config::ServerConfig;
use crate::server::{ServerError, ServerResult, shutdown_signal};
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Binds to the configured address and serves `app` until shutdown.
///
/// After a shutdown signal, in-flight requests get `shutdown_timeout` to
/// finish before the server gives up on them.
pub async fn serve_http(app: Router, server_config: ServerConfig) -> ServerResult<()> {
    let server_addr = server_config.server_addr();

    let listener = TcpListener::bind(server_addr).await.map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            addr = %server_addr,
            error = %err,
            "Failed to bind to address"
        );
        ServerError::bind_error(server_addr, err)
    })?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        addr = %server_addr,
        "Server is ready and listening for connections"
    );

    if server_config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_SERVER_STARTUP,
            "Server is bound to all interfaces. Ensure firewall rules are properly configured."
        );
    }

    let (draining_tx, draining_rx) = oneshot::channel();
    let graceful_shutdown = async move {
        let signal = shutdown_signal().await;
        let _ = draining_tx.send(signal);
    };

    let shutdown_timeout = server_config.shutdown_timeout();
    let drain_deadline = async move {
        match draining_rx.await {
            Ok(_) => tokio::time::sleep(shutdown_timeout).await,
            Err(_) => future::pending().await,
        }
    };

    let server = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(graceful_shutdown)
        .into_future();

    tokio::select! {
        result = server => result.map_err(|err| {
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %err,
                "Server encountered an error"
            );
            ServerError::Runtime(err)
        })?,
        () = drain_deadline => {
            tracing::warn!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                timeout_secs = shutdown_timeout.as_secs(),
                "In-flight requests did not finish before the shutdown timeout"
            );
            return Err(ServerError::ShutdownTimeout(shutdown_timeout));
        }
    }

    tracing::info!(
        target: TRACING_TARGET_SERVER_SHUTDOWN,
        "Server shut down gracefully"
    );
    Ok(())
}
