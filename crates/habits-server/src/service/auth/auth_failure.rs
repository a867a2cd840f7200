//! Client-visible authentication failure taxonomy.

use axum::http::StatusCode;

/// Reason an authentication step refused a request.
///
/// Every variant maps to exactly one status code and the response never
/// carries a body, so callers select the status with [`status_code`] instead
/// of inspecting the underlying error.
///
/// [`status_code`]: AuthFailure::status_code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum AuthFailure {
    /// No `Authorization` header, or one without the `Bearer <token>` shape.
    #[error("missing or malformed credential")]
    MissingCredential,
    /// Access token failed signature, expiry or parse checks.
    #[error("invalid or expired access token")]
    InvalidAccessToken,
    /// Refresh cookie was absent or failed signature, expiry or parse checks.
    #[error("invalid or expired refresh token")]
    InvalidRefreshToken,
    /// The federated identity assertion could not be verified.
    #[error("identity verification failed")]
    IdentityVerificationFailed,
    /// Any unexpected failure while issuing or verifying.
    #[error("internal authentication failure")]
    Internal,
}

impl AuthFailure {
    /// Returns the HTTP status code sent to the client for this failure.
    #[must_use]
    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::MissingCredential => StatusCode::FORBIDDEN,
            Self::InvalidAccessToken
            | Self::InvalidRefreshToken
            | Self::IdentityVerificationFailed => StatusCode::UNAUTHORIZED,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
