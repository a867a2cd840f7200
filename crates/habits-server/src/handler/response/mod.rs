//! Response payload types.

mod authentication;
mod users;

pub use authentication::{AccessToken, Authenticated};
pub use users::User;
