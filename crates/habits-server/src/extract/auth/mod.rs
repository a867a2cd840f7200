//! Authentication extractors.
//!
//! - [`BearerToken`] - `Authorization: Bearer <token>` parsing
//! - [`Principal`] - verified identity attached by the route guard
//! - [`RefreshCookie`] - raw refresh cookie value
//!
//! [`Principal`]: crate::service::auth::Principal

mod bearer;
mod principal;
mod refresh_cookie;

pub use self::bearer::{BEARER_PREFIX, BearerToken};
pub use self::refresh_cookie::RefreshCookie;
