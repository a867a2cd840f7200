//! HTTP request extractors with status-only rejections.
//!
//! ## Authentication
//!
//! - [`BearerToken`] - bearer credential parsing
//! - [`Principal`] - the verified identity a request is acting as
//! - [`RefreshCookie`] - refresh token cookie
//!
//! ## Request Data Extraction
//!
//! - [`Json`] - JSON deserialization with body-less `400` rejections

pub mod auth;
mod json;

pub use crate::extract::auth::{BearerToken, RefreshCookie};
pub use crate::extract::json::Json;
pub use crate::service::auth::Principal;
