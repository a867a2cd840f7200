//! User response types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::service::users;

/// Public view of a user record.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Local identifier.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Subject identifier at the federated identity provider.
    pub sso_id: String,
}

impl From<users::User> for User {
    fn from(user: users::User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            sso_id: user.sso_id,
        }
    }
}
