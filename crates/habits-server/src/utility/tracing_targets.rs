//! Centralized tracing target constants for structured logging.
//!
//! This module defines all tracing target strings used throughout the crate,
//! providing a single source of truth for log categorization and filtering.
//! Using consistent targets enables fine-grained control over log output
//! via tracing subscriber filters.

/// Authentication handlers including login and refresh.
pub const AUTHENTICATION: &str = "habits_server::authentication";

/// Per-request gating decisions made by the route guard.
pub const ROUTE_GUARD: &str = "habits_server::route_guard";

/// Token signing, verification and rotation.
pub const SESSION: &str = "habits_server::session";

/// Federated identity provider calls and key-set caching.
pub const IDENTITY: &str = "habits_server::identity";

/// User resolution against the user repository.
pub const USERS: &str = "habits_server::users";

/// Error recovery including middleware errors and request failures.
pub const RECOVERY_ERROR: &str = "habits_server::recovery::error";

/// Panic recovery including handler panics and service failures.
pub const RECOVERY_PANIC: &str = "habits_server::recovery::panic";
