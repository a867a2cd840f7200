//! Authentication response types.

use serde::{Deserialize, Serialize};

use super::User;
use crate::service::auth::IssuedToken;

/// Access token handed to the client.
///
/// The refresh token is never part of a response body.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    /// Bearer token for the `Authorization` header.
    pub token: String,
    /// Seconds until the token expires.
    pub expires_in: u64,
}

impl From<IssuedToken> for AccessToken {
    fn from(token: IssuedToken) -> Self {
        Self {
            token: token.value,
            expires_in: token.expires_in,
        }
    }
}

/// Response returned after a successful login.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authenticated {
    /// The resolved local user.
    pub user: User,
    /// Bearer token for the `Authorization` header.
    pub token: String,
    /// Seconds until the token expires.
    pub expires_in: u64,
}

impl Authenticated {
    /// Creates a new login response.
    pub fn new(user: impl Into<User>, access_token: IssuedToken) -> Self {
        let AccessToken { token, expires_in } = access_token.into();
        Self {
            user: user.into(),
            token,
            expires_in,
        }
    }
}
