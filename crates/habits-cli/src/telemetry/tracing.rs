//! Tracing subscriber setup.

use std::io::{self, IsTerminal};

use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is unset.
///
/// Rejected credentials are logged at `debug`, so they stay out of the
/// default output.
const DEFAULT_DIRECTIVES: &str = "info,tower_http=warn";

/// Initializes the subscriber writing formatted events to stderr.
///
/// ```bash
/// RUST_LOG=debug habits
/// RUST_LOG=habits_server::route_guard=trace,habits_cli=debug habits
/// ```
///
/// # Errors
///
/// Returns an error if a global subscriber is already set.
pub(super) fn init_tracing() -> anyhow::Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(DEFAULT_DIRECTIVES)
            .context("Failed to parse default log directives")?,
    };

    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_ansi(io::stderr().is_terminal());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install tracing subscriber")
}
