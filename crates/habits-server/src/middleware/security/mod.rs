//! Security middleware for HTTP requests.

mod body_limit;
mod cors;

pub use body_limit::{BodyLimitConfig, DEFAULT_MAX_BODY_SIZE, RouterBodyLimitExt};
pub use cors::{CorsConfig, RouterCorsExt, create_cors_layer};
