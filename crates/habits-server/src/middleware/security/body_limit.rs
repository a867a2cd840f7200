//! Request body size limiting.
//!
//! Bodies read through the [`Json`] extractor are capped at the configured
//! size; larger bodies are rejected with a body-less `413 Payload Too Large`.
//!
//! [`Json`]: crate::extract::Json

use axum::Router;
use axum::extract::DefaultBodyLimit;
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Default maximum request body size: 1MB
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Extension trait for `axum::`[`Router`] to cap request body sizes.
pub trait RouterBodyLimitExt<S> {
    /// Layers the body size limit with the provided configuration.
    fn with_body_limit(self, config: &BodyLimitConfig) -> Self;
}

impl<S> RouterBodyLimitExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_body_limit(self, config: &BodyLimitConfig) -> Self {
        self.layer(DefaultBodyLimit::max(config.max_body_size))
    }
}

/// Request body size configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct BodyLimitConfig {
    /// Maximum request body size in bytes.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "MAX_BODY_SIZE", default_value_t = DEFAULT_MAX_BODY_SIZE)
    )]
    pub max_body_size: usize,
}

impl Default for BodyLimitConfig {
    fn default() -> Self {
        Self {
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}
