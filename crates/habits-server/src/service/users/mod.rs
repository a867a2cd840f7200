//! User records resolved from federated identities.
//!
//! - [`UserRepository`]: storage seam for user records
//! - [`InMemoryUserRepository`]: process-local repository
//! - [`UserStore`]: shared handle resolving identities into users

mod in_memory;
mod user_store;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use self::in_memory::InMemoryUserRepository;
pub use self::user_store::UserStore;
pub use crate::{Error, Result};

/// Local user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Local identifier, used as the token subject.
    pub id: Uuid,
    /// Email address asserted at sign-up.
    pub email: String,
    /// Subject identifier at the federated identity provider.
    pub sso_id: String,
}

/// Data for creating a new user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Email address asserted by the provider.
    pub email: String,
    /// Subject identifier at the federated identity provider.
    pub sso_id: String,
}

/// Storage seam for user records.
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by the provider's subject identifier.
    async fn find_by_external_id(&self, sso_id: &str) -> Result<Option<User>>;

    /// Finds a user by local identifier.
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>>;

    /// Creates a new user record.
    ///
    /// # Errors
    ///
    /// Returns an internal error if a user with the same `sso_id` exists.
    async fn create(&self, new_user: NewUser) -> Result<User>;
}
