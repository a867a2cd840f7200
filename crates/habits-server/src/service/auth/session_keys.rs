//! Signing keys for access and refresh tokens.
//!
//! Access and refresh tokens are signed with distinct secrets and carry
//! distinct audiences, so a key of one kind can never validate a token of
//! the other kind.

use std::fmt;
use std::sync::Arc;

use jsonwebtoken::{DecodingKey, EncodingKey};

use super::{AuthConfig, TokenClaims, TokenCodec};
use crate::utility::tracing_targets::SESSION as TRACING_TARGET;
use crate::{Error, Result};

/// Kind of token a [`SigningKey`] is dedicated to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Short-lived bearer credential sent in the `Authorization` header.
    Access,
    /// Cookie-bound credential used only to mint a new session.
    Refresh,
}

impl TokenKind {
    /// Returns the `aud` claim value embedded in tokens of this kind.
    #[must_use]
    pub const fn audience(self) -> &'static str {
        match self {
            Self::Access => "habits:access",
            Self::Refresh => "habits:refresh",
        }
    }

    /// Returns the kind as a string for logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

/// HMAC key dedicated to a single [`TokenKind`].
///
/// Cheap to clone; the key material is shared behind an [`Arc`].
#[derive(Clone)]
pub struct SigningKey {
    inner: Arc<SigningKeyInner>,
}

struct SigningKeyInner {
    kind: TokenKind,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SigningKey {
    /// Creates a signing key of the given kind from a shared secret.
    pub fn from_secret(kind: TokenKind, secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();
        let inner = SigningKeyInner {
            kind,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        };

        Self {
            inner: Arc::new(inner),
        }
    }

    /// Returns the token kind this key signs.
    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.inner.kind
    }

    /// Returns a reference to the encoding key.
    #[inline]
    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.inner.encoding_key
    }

    /// Returns a reference to the decoding key.
    #[inline]
    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.inner.decoding_key
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("kind", &self.inner.kind)
            .finish_non_exhaustive()
    }
}

/// Access and refresh signing keys loaded from [`AuthConfig`].
#[derive(Debug, Clone)]
pub struct SessionKeys {
    access: SigningKey,
    refresh: SigningKey,
}

impl SessionKeys {
    /// Creates the key pair from configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        tracing::debug!(
            target: TRACING_TARGET,
            "loading session signing keys",
        );

        Self {
            access: SigningKey::from_secret(TokenKind::Access, &config.access_signing_key),
            refresh: SigningKey::from_secret(TokenKind::Refresh, &config.refresh_signing_key),
        }
    }

    /// Returns the key used for access tokens.
    #[inline]
    pub fn access(&self) -> &SigningKey {
        &self.access
    }

    /// Returns the key used for refresh tokens.
    #[inline]
    pub fn refresh(&self) -> &SigningKey {
        &self.refresh
    }

    /// Validates that the loaded keys are functional and separated.
    ///
    /// Each key must verify its own token, and must reject a token signed
    /// with the other key.
    pub fn validate_keys(&self) -> Result<()> {
        for (key, other) in [(&self.access, &self.refresh), (&self.refresh, &self.access)] {
            let token = TokenCodec::sign(TokenClaims::new("key-check"), key, 60)?;

            TokenCodec::verify(&token.value, key).map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET,
                    kind = key.kind().as_str(),
                    error = %e,
                    "key validation failed during round trip",
                );
                Error::auth("key validation round trip failed").with_source(e)
            })?;

            if TokenCodec::verify(&token.value, other).is_ok() {
                tracing::error!(
                    target: TRACING_TARGET,
                    kind = key.kind().as_str(),
                    "key validation failed: token accepted by the other key",
                );
                return Err(Error::config("access and refresh keys are not separated"));
            }
        }

        tracing::debug!(
            target: TRACING_TARGET,
            "key validation successful",
        );

        Ok(())
    }
}
