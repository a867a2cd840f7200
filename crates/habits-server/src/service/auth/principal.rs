//! The local identity a request is acting as.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An authenticated local user identity.
///
/// Constructed by the route guard after a successful verification, or by the
/// login and refresh flows. Immutable and scoped to a single request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    /// Local user id; the `sub` claim of every token issued for it.
    pub id: String,
}

impl Principal {
    /// Creates a principal for the given local user id.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
