//! Authentication request types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Request payload for login.
#[must_use]
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Login {
    /// Identity assertion issued by the federated identity provider.
    pub token: String,
}

impl fmt::Debug for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Login").finish_non_exhaustive()
    }
}
