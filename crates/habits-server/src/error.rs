//! Service layer error types and utilities.
//!
//! This module provides error handling for the service layer with:
//!
//! - Strongly-typed error kinds for different failure categories
//! - Builder pattern for ergonomic error construction
//! - Type-safe error source tracking with boxed trait objects
//! - Integration with `thiserror` for automatic `Display` and `Error` trait implementations

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

/// Type alias for boxed errors that are Send + Sync.
///
/// This is the standard error boxing type used throughout the service layer
/// for error sources.
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// Result type alias for service layer operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error kind enumeration for categorizing service layer errors.
///
/// This enum represents the different categories of errors that can occur
/// in the service layer. It's separated from [`Error`] to allow
/// for pattern matching on error types without accessing the full error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Configuration-related errors.
    Config,
    /// External service communication errors.
    External,
    /// Authentication errors (rejected credentials or assertions).
    Auth,
    /// Internal service logic errors.
    Internal,
}

impl ErrorKind {
    /// Returns the error kind as a string for categorization.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::External => "external_service",
            Self::Auth => "auth",
            Self::Internal => "internal_service",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service layer error with structured information.
#[derive(Debug, thiserror::Error)]
#[error("{kind} error: {message}")]
pub struct Error {
    /// The error category/type
    kind: ErrorKind,
    /// Human-readable error message
    message: Cow<'static, str>,
    /// Optional underlying error that caused this error
    #[source]
    source: Option<BoxedError>,
}

impl Error {
    #[inline]
    fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches a source error to this error, enabling error chain tracking.
    #[inline]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error kind.
    #[must_use]
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[must_use]
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Creates a new configuration error.
    #[inline]
    pub fn config(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    /// Creates a new external service error.
    #[inline]
    pub fn external(
        service: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        let full_message = format!("{}: {}", service.into(), message.into());
        Self::new(ErrorKind::External, full_message)
    }

    /// Creates a new authentication error.
    #[inline]
    pub fn auth(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Auth, message)
    }

    /// Creates a new internal service error.
    #[inline]
    pub fn internal(
        service: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        let full_message = format!("{}: {}", service.into(), message.into());
        Self::new(ErrorKind::Internal, full_message)
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    /// Classifies a rejected identity assertion.
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind as JwtErrorKind;

        let message = match error.kind() {
            JwtErrorKind::ExpiredSignature => "Identity assertion has expired",
            JwtErrorKind::InvalidSignature => "Identity assertion signature mismatch",
            JwtErrorKind::InvalidAudience => "Identity assertion issued for another client",
            JwtErrorKind::InvalidIssuer => "Identity assertion issued by an untrusted issuer",
            JwtErrorKind::MissingRequiredClaim(_) => "Identity assertion is missing a claim",
            JwtErrorKind::InvalidAlgorithm => "Unexpected assertion signing algorithm",
            JwtErrorKind::InvalidRsaKey(_) | JwtErrorKind::InvalidKeyFormat => {
                "Unusable signing key"
            }
            _ => "Malformed identity assertion",
        };

        Self::auth(message).with_source(error)
    }
}

impl From<reqwest::Error> for Error {
    /// Classifies a failed call to an external HTTP service.
    fn from(error: reqwest::Error) -> Self {
        let service = error
            .url()
            .and_then(|url| url.host_str())
            .map_or_else(|| "http".to_owned(), str::to_owned);

        let message = if error.is_timeout() {
            "Request timed out"
        } else if error.is_connect() {
            "Connection failed"
        } else if error.is_status() {
            "Unexpected response status"
        } else if error.is_decode() {
            "Malformed response body"
        } else {
            "Request failed"
        };

        Self::external(service, message).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_creation() {
        let error = Error::config("invalid configuration");
        assert_eq!(error.kind(), ErrorKind::Config);
        assert_eq!(error.message(), "invalid configuration");
    }

    #[test]
    fn error_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::TimedOut, "deadline elapsed");
        let error = Error::external("google", "key set unavailable").with_source(source);

        assert!(StdError::source(&error).is_some());
        assert_eq!(error.kind(), ErrorKind::External);
    }

    #[test]
    fn external_service_error() {
        let error = Error::external("google", "Connection refused");

        assert_eq!(error.kind(), ErrorKind::External);
        assert!(error.to_string().contains("google"));
        assert!(error.to_string().contains("Connection refused"));
    }

    #[test]
    fn rejected_assertion_is_auth_error() {
        use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};

        let error = Error::from(JwtError::from(JwtErrorKind::ExpiredSignature));
        assert_eq!(error.kind(), ErrorKind::Auth);
        assert_eq!(error.message(), "Identity assertion has expired");
        assert!(StdError::source(&error).is_some());

        let error = Error::from(JwtError::from(JwtErrorKind::InvalidToken));
        assert_eq!(error.message(), "Malformed identity assertion");
    }

    #[tokio::test]
    async fn failed_request_is_external_error() {
        // Nothing listens on the discard port.
        let error = reqwest::Client::new()
            .get("http://127.0.0.1:9/")
            .send()
            .await
            .unwrap_err();

        let error = Error::from(error);
        assert_eq!(error.kind(), ErrorKind::External);
        assert!(error.message().starts_with("127.0.0.1: "));
        assert!(StdError::source(&error).is_some());
    }

    #[test]
    fn error_kind_as_str() {
        assert_eq!(ErrorKind::Config.as_str(), "config");
        assert_eq!(ErrorKind::External.as_str(), "external_service");
        assert_eq!(ErrorKind::Auth.as_str(), "auth");
        assert_eq!(ErrorKind::Internal.as_str(), "internal_service");
    }
}
