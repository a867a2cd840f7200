//! Middleware for `axum::Router` and HTTP request processing.
//!
//! - Authentication: the [`RouteGuard`] and its [`PathWhitelist`]
//! - Security: CORS and request body limits
//! - Observability: request ids and tracing
//! - Recovery: panics, timeouts and service errors
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use habits_server::middleware::*;
//!
//! let app = router
//!     .with_route_guard(state)
//!     .with_body_limit(&BodyLimitConfig::default())
//!     .with_cors(&CorsConfig::default())
//!     .with_observability()
//!     .with_default_recovery();
//! ```

pub mod auth;
mod observability;
mod recovery;
pub mod security;

pub use auth::{
    GuardDecision, PathMatching, PathWhitelist, RouteGuard, RouterAuthExt, route_guard,
};
pub use observability::{REQUEST_ID_HEADER, RouterObservabilityExt};
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{BodyLimitConfig, CorsConfig, RouterBodyLimitExt, RouterCorsExt};
