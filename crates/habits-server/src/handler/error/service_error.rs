//! Conversions from service layer failures into HTTP errors.

use super::http_error::{Error as HttpError, ErrorKind};
use crate::service::auth::AuthFailure;

/// Tracing target for service error conversions.
const TRACING_TARGET: &str = "habits_server::handler::service";

impl From<AuthFailure> for HttpError<'static> {
    fn from(failure: AuthFailure) -> Self {
        let kind = match failure {
            AuthFailure::MissingCredential => ErrorKind::MissingAuthToken,
            AuthFailure::InvalidAccessToken
            | AuthFailure::InvalidRefreshToken
            | AuthFailure::IdentityVerificationFailed => ErrorKind::Unauthorized,
            AuthFailure::Internal => ErrorKind::InternalServerError,
        };

        kind.with_message(failure.to_string())
            .with_resource("authentication")
    }
}

impl From<crate::Error> for HttpError<'static> {
    fn from(error: crate::Error) -> Self {
        use crate::ErrorKind as ServiceErrorKind;

        match error.kind() {
            ServiceErrorKind::Auth => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Authentication failed"
                );
                ErrorKind::Unauthorized.with_context(error.message().to_owned())
            }
            ServiceErrorKind::External => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    "External service request failed"
                );
                ErrorKind::InternalServerError.with_context(error.message().to_owned())
            }
            ServiceErrorKind::Config | ServiceErrorKind::Internal => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    error_kind = %error.kind(),
                    "Service operation failed"
                );
                ErrorKind::InternalServerError.with_context(error.message().to_owned())
            }
        }
    }
}
