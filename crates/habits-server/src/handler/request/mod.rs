//! Request payload types.

mod authentication;

pub use authentication::Login;
