//! Process-wide signing and cookie policy configuration.

use std::fmt;

use crate::{Error, Result};

/// Minimum accepted length of an HMAC signing secret, in bytes.
const MIN_KEY_LENGTH: usize = 32;

/// Signing keys, token lifetimes and cookie policy inputs.
///
/// Built once at process start and shared read-only by every component that
/// issues or verifies tokens.
#[derive(Clone, PartialEq, Eq)]
#[must_use = "config does nothing unless you use it"]
pub struct AuthConfig {
    /// Secret used to sign and verify access tokens.
    pub access_signing_key: String,
    /// Access token lifetime in seconds.
    pub access_lifetime_secs: u64,
    /// Secret used to sign and verify refresh tokens.
    pub refresh_signing_key: String,
    /// Refresh token lifetime in seconds.
    pub refresh_lifetime_secs: u64,
    /// OAuth client id the federated assertions must be issued for.
    pub federated_client_id: String,
    /// Drops the `Secure` cookie attribute so plain-HTTP local setups work.
    pub is_development_mode: bool,
}

impl AuthConfig {
    /// Upper bound for either token lifetime (one year).
    pub const MAX_LIFETIME_SECS: u64 = 365 * 24 * 60 * 60;

    /// Validates key separation, key strength and lifetimes.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when:
    /// - either signing key is shorter than 32 bytes
    /// - the access and refresh signing keys are identical
    /// - a lifetime is zero or longer than [`MAX_LIFETIME_SECS`]
    /// - the refresh lifetime does not exceed the access lifetime
    /// - the federated client id is empty
    ///
    /// [`MAX_LIFETIME_SECS`]: AuthConfig::MAX_LIFETIME_SECS
    pub fn validate(&self) -> Result<()> {
        if self.access_signing_key.len() < MIN_KEY_LENGTH {
            return Err(Error::config(format!(
                "Access signing key must be at least {MIN_KEY_LENGTH} bytes"
            )));
        }

        if self.refresh_signing_key.len() < MIN_KEY_LENGTH {
            return Err(Error::config(format!(
                "Refresh signing key must be at least {MIN_KEY_LENGTH} bytes"
            )));
        }

        if self.access_signing_key == self.refresh_signing_key {
            return Err(Error::config(
                "Access and refresh signing keys must be different",
            ));
        }

        for (name, lifetime) in [
            ("Access", self.access_lifetime_secs),
            ("Refresh", self.refresh_lifetime_secs),
        ] {
            if lifetime == 0 || lifetime > Self::MAX_LIFETIME_SECS {
                return Err(Error::config(format!(
                    "{name} token lifetime must be between 1 and {} seconds",
                    Self::MAX_LIFETIME_SECS
                )));
            }
        }

        if self.refresh_lifetime_secs <= self.access_lifetime_secs {
            return Err(Error::config(
                "Refresh token lifetime must be longer than access token lifetime",
            ));
        }

        if self.federated_client_id.trim().is_empty() {
            return Err(Error::config("Federated client id cannot be empty"));
        }

        Ok(())
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_lifetime_secs", &self.access_lifetime_secs)
            .field("refresh_lifetime_secs", &self.refresh_lifetime_secs)
            .field("federated_client_id", &self.federated_client_id)
            .field("is_development_mode", &self.is_development_mode)
            .finish_non_exhaustive()
    }
}
