//! Compact, self-contained bearer tokens.
//!
//! Tokens are HS256-signed JWTs. Besides the subject they carry the standard
//! registered claims:
//!
//! | Claim | Field | Description |
//! |-------|-------|-------------|
//! | `iss` | `issued_by` | Always `habits` |
//! | `aud` | `audience` | Token kind, see [`TokenKind::audience`] |
//! | `jti` | `token_id` | Random id, unique per issuance |
//! | `sub` | `subject` | Principal id |
//! | `iat` | `issued_at` | Unix seconds |
//! | `exp` | `expires_at` | Unix seconds |
//!
//! [`TokenKind::audience`]: super::TokenKind::audience

use std::borrow::Cow;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use jsonwebtoken::{Algorithm, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SigningKey;
use crate::utility::tracing_targets::SESSION as TRACING_TARGET;
use crate::{Error, Result};

/// Issuer embedded in and required from every token.
const JWT_ISSUER: &str = "habits";

/// Payload a caller asks to have signed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenClaims {
    /// Principal id the token speaks for.
    pub subject: String,
}

impl TokenClaims {
    /// Creates claims for the given subject.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }
}

/// Claims recovered from a token that passed verification.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SignedClaims {
    #[serde(rename = "iss")]
    issued_by: Cow<'static, str>,
    #[serde(rename = "aud")]
    audience: Cow<'static, str>,

    /// Unique identifier of this issuance.
    #[serde(rename = "jti")]
    pub token_id: Uuid,
    /// Principal id the token speaks for.
    #[serde(rename = "sub")]
    pub subject: String,

    /// Issued at (unix seconds on the wire).
    #[serde(rename = "iat", with = "jiff::fmt::serde::timestamp::second::required")]
    pub issued_at: Timestamp,
    /// Expiration time (unix seconds on the wire).
    #[serde(rename = "exp", with = "jiff::fmt::serde::timestamp::second::required")]
    pub expires_at: Timestamp,
}

impl SignedClaims {
    /// Returns the embedded [`TokenClaims`].
    pub fn claims(&self) -> TokenClaims {
        TokenClaims::new(self.subject.clone())
    }

    /// Checks `now >= expiry`.
    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Timestamp::now()
    }
}

/// A signed token handed to a client.
#[derive(Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Opaque compact token value.
    pub value: String,
    /// Seconds from issuance until expiry.
    pub expires_in: u64,
    /// Absolute expiry.
    pub expires_at: Timestamp,
    /// Unique identifier of this issuance.
    pub token_id: Uuid,
}

impl std::fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedToken")
            .field("token_id", &self.token_id)
            .field("expires_in", &self.expires_in)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Reason a token failed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum TokenError {
    /// Signature, issuer or audience does not match the verifying key.
    #[error("token signature does not match the verifying key")]
    InvalidSignature,
    /// The current time is at or past the token's expiry.
    #[error("token has expired")]
    Expired,
    /// The token cannot be parsed or lacks required claims.
    #[error("token is malformed")]
    Malformed,
}

impl From<JwtError> for TokenError {
    fn from(error: JwtError) -> Self {
        match error.kind() {
            JwtErrorKind::ExpiredSignature => Self::Expired,
            JwtErrorKind::InvalidSignature
            | JwtErrorKind::InvalidAudience
            | JwtErrorKind::InvalidIssuer
            | JwtErrorKind::InvalidAlgorithm
            | JwtErrorKind::InvalidAlgorithmName => Self::InvalidSignature,
            _ => Self::Malformed,
        }
    }
}

/// Signs and verifies tokens against a [`SigningKey`].
///
/// Pure with respect to its inputs and the wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenCodec;

impl TokenCodec {
    /// Signs `claims` with `key`, expiring `lifetime_secs` from now.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the expiry overflows or JWT encoding fails.
    pub fn sign(claims: TokenClaims, key: &SigningKey, lifetime_secs: u64) -> Result<IssuedToken> {
        let now = Timestamp::now();
        let issued_at = Timestamp::from_second(now.as_second())
            .map_err(|e| Error::internal("token", "clock out of range").with_source(e))?;
        let lifetime = i64::try_from(lifetime_secs)
            .map_err(|_| Error::internal("token", "lifetime out of range"))?;
        let expires_at = issued_at
            .checked_add(SignedDuration::from_secs(lifetime))
            .map_err(|e| Error::internal("token", "expiry out of range").with_source(e))?;

        let signed = SignedClaims {
            issued_by: Cow::Borrowed(JWT_ISSUER),
            audience: Cow::Borrowed(key.kind().audience()),
            token_id: Uuid::new_v4(),
            subject: claims.subject,
            issued_at,
            expires_at,
        };

        let value = encode(&Header::new(Algorithm::HS256), &signed, key.encoding_key())
            .map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET,
                    kind = key.kind().as_str(),
                    subject = %signed.subject,
                    error = %e,
                    "failed to encode token"
                );
                Error::internal("token", "token encoding failed").with_source(e)
            })?;

        Ok(IssuedToken {
            value,
            expires_in: lifetime_secs,
            expires_at,
            token_id: signed.token_id,
        })
    }

    /// Verifies `token` against `key` and returns its claims.
    ///
    /// # Errors
    ///
    /// - [`TokenError::InvalidSignature`] if the token was not signed by `key`
    /// - [`TokenError::Expired`] if `now >= expiry`
    /// - [`TokenError::Malformed`] if the token cannot be parsed
    pub fn verify(token: &str, key: &SigningKey) -> Result<SignedClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.validate_aud = true;
        validation.set_audience(&[key.kind().audience()]);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.set_required_spec_claims(&["iss", "aud", "sub", "exp"]);

        let claims = decode::<SignedClaims>(token, key.decoding_key(), &validation)
            .map_err(TokenError::from)?
            .claims;

        // The decoder tolerates `exp == now`; expiry is exclusive here.
        if claims.is_expired() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
