//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── server: ServerConfig         # Host, port, shutdown
//! ├── middleware: MiddlewareConfig # CORS, body limit, recovery/timeouts
//! └── service: ServiceConfig       # Signing keys, identity provider, route guard
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! # Configure signing keys and server
//! habits --access-token-key "..." --refresh-token-key "..." --port 8080
//!
//! # Or via environment variables
//! ACCESS_TOKEN_KEY="..." REFRESH_TOKEN_KEY="..." PORT=8080 habits
//! ```

mod middleware;
mod server;

use std::process;

use anyhow::Context;
use clap::Parser;
use habits_server::service::ServiceConfig;
pub use middleware::MiddlewareConfig;
pub use server::ServerConfig;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Complete CLI configuration.
///
/// Combines all configuration groups for the habits server:
/// - [`ServerConfig`]: Network binding and shutdown
/// - [`MiddlewareConfig`]: HTTP middleware (CORS, body limit, recovery)
/// - [`ServiceConfig`]: Token signing, identity provider and route guard
#[derive(Debug, Clone, Parser)]
#[command(name = "habits")]
#[command(about = "Habit tracking API server")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration (CORS, timeouts).
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// Authentication and identity configuration.
    #[clap(flatten)]
    pub service: ServiceConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded before clap parses arguments, so its values
    /// act as environment defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Logs build information at debug level.
    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        self.service
            .validate()
            .context("invalid service configuration")?;
        Ok(())
    }

    /// Logs configuration at info level (no signing keys).
    pub fn log(&self) {
        Self::log_build_info();
        self.server.log();
        self.middleware.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            access_token_lifetime = self.service.access_token_lifetime,
            refresh_token_lifetime = self.service.refresh_token_lifetime,
            identity_timeout = self.service.identity_timeout,
            development_mode = self.service.development_mode,
            secure_endpoints = self.service.secure_endpoints,
            anonymous_paths = ?self.service.anonymous_paths,
            path_matching = self.service.path_matching.as_str(),
            "Authentication configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
