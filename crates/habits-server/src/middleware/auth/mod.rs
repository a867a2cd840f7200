//! Authentication middleware.

mod route_guard;
mod whitelist;

pub use route_guard::{GuardDecision, RouteGuard, RouterAuthExt, route_guard};
pub use whitelist::{PathMatching, PathWhitelist};
