//! CORS (Cross-Origin Resource Sharing) middleware configuration.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

/// Origin allowed when none is configured.
const DEFAULT_ORIGIN: &str = "http://localhost:4200";

/// Creates a CORS layer based on the provided configuration.
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(config.to_header_values())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(config.allow_credentials)
        .max_age(config.max_age())
}

/// Extension trait for `axum::`[`Router`] to apply the CORS layer.
pub trait RouterCorsExt<S> {
    /// Layers CORS handling with the provided configuration.
    fn with_cors(self, config: &CorsConfig) -> Self;
}

impl<S> RouterCorsExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_cors(self, config: &CorsConfig) -> Self {
        self.layer(create_cors_layer(config))
    }
}

/// CORS (Cross-Origin Resource Sharing) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct CorsConfig {
    /// List of allowed CORS origins.
    ///
    /// If empty, defaults to `http://localhost:4200`.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_ORIGINS", value_delimiter = ',')
    )]
    pub allowed_origins: Vec<String>,

    /// Maximum age for CORS preflight requests in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_MAX_AGE", default_value = "3600")
    )]
    pub max_age_seconds: u64,

    /// Whether to allow credentials (the refresh cookie) in CORS requests.
    #[cfg_attr(
        feature = "config",
        arg(
            long,
            env = "CORS_ALLOW_CREDENTIALS",
            default_value = "true",
            action = clap::ArgAction::Set
        )
    )]
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age_seconds: 3600,
            allow_credentials: true,
        }
    }
}

impl CorsConfig {
    /// Returns the CORS max age as a Duration.
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_seconds)
    }

    /// Converts configured origins to a `HeaderValue` list.
    ///
    /// Origins that are not valid header values are skipped.
    pub fn to_header_values(&self) -> Vec<HeaderValue> {
        if self.allowed_origins.is_empty() {
            return vec![HeaderValue::from_static(DEFAULT_ORIGIN)];
        }

        self.allowed_origins
            .iter()
            .filter_map(|origin| origin.trim().parse().ok())
            .collect()
    }
}
