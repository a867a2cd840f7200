//! Server error types.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use habits_server::ErrorKind as ServiceErrorKind;
use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = std::result::Result<T, ServerError>;

/// Error type for server startup and lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Service state could not be built from the configuration.
    #[error("Failed to initialize services: {0}")]
    State(#[source] habits_server::Error),

    /// Failed to bind to the specified address.
    #[error("Failed to bind to {address}: {source}")]
    BindError {
        address: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// Runtime server error.
    #[error("Runtime error: {0}")]
    Runtime(#[source] io::Error),

    /// In-flight requests outlived the shutdown timeout.
    #[error("Shutdown timed out after {}s", .0.as_secs())]
    ShutdownTimeout(Duration),
}

impl ServerError {
    /// Creates a bind error with address context.
    pub fn bind_error(address: SocketAddr, source: io::Error) -> Self {
        Self::BindError { address, source }
    }

    /// Provides a human-readable suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::State(error) => match error.kind() {
                ServiceErrorKind::Config => Some(
                    "Check ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, GOOGLE_CLIENT_ID and GOOGLE_CERTS_URL",
                ),
                ServiceErrorKind::External => {
                    Some("Check that the identity provider is reachable from this host")
                }
                ServiceErrorKind::Auth | ServiceErrorKind::Internal => None,
            },
            Self::BindError { source, .. } => match source.kind() {
                io::ErrorKind::PermissionDenied => {
                    Some("Try using a port above 1024 or run with appropriate privileges")
                }
                io::ErrorKind::AddrInUse => Some(
                    "The port is already in use. Try a different port or stop the conflicting service",
                ),
                io::ErrorKind::AddrNotAvailable => {
                    Some("The address is not available. Check network interface configuration")
                }
                _ => Some("Check network configuration and firewall settings"),
            },
            Self::Runtime(err) => match err.kind() {
                io::ErrorKind::PermissionDenied => Some("Check file and network permissions"),
                io::ErrorKind::Interrupted => Some("The operation was interrupted, you may retry"),
                _ => None,
            },
            Self::ShutdownTimeout(_) => {
                Some("Increase SHUTDOWN_TIMEOUT if requests routinely need longer to finish")
            }
        }
    }
}
