//! Shutdown signal handling.

use std::future;

use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix;

use crate::TRACING_TARGET_SERVER_SHUTDOWN as TRACING_TARGET;

/// Signal that ended the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// SIGINT or Ctrl+C.
    Interrupt,
    /// SIGTERM, as sent by container orchestrators.
    Terminate,
}

impl ShutdownSignal {
    /// Returns the signal name used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Interrupt => "SIGINT",
            Self::Terminate => "SIGTERM",
        }
    }
}

/// Waits for SIGINT or SIGTERM.
///
/// A handler that fails to install is logged and never fires, so the other
/// signal still ends the server.
pub async fn shutdown_signal() -> ShutdownSignal {
    let interrupt = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "Failed to install Ctrl+C handler"
            );
            future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match unix::signal(unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "Failed to install SIGTERM handler"
                );
                future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = future::pending::<()>();

    let signal = tokio::select! {
        () = interrupt => ShutdownSignal::Interrupt,
        () = terminate => ShutdownSignal::Terminate,
    };

    tracing::info!(
        target: TRACING_TARGET,
        signal = signal.as_str(),
        "Shutdown signal received, draining connections"
    );

    signal
}
