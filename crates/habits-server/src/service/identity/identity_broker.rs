//! Identity provider wrapper with a deadline and observability.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{FederatedIdentity, IdentityProvider};
use crate::service::auth::AuthFailure;
use crate::utility::tracing_targets::IDENTITY as TRACING_TARGET;

/// Exchanges third-party assertions for a [`FederatedIdentity`].
///
/// Every failure, including an unreachable provider or an elapsed deadline,
/// collapses into [`AuthFailure::IdentityVerificationFailed`]. The inner
/// provider is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct IdentityBroker {
    inner: Arc<dyn IdentityProvider>,
    timeout: Duration,
}

impl fmt::Debug for IdentityBroker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityBroker")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl IdentityBroker {
    /// Creates a new broker abandoning provider calls after `timeout`.
    pub fn new<P>(provider: P, timeout: Duration) -> Self
    where
        P: IdentityProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
            timeout,
        }
    }

    /// Verifies `assertion` with the provider.
    ///
    /// # Errors
    ///
    /// Returns [`AuthFailure::IdentityVerificationFailed`] if the assertion is
    /// empty, invalid, expired, issued for another audience, or the provider
    /// does not answer in time.
    pub async fn verify_assertion(&self, assertion: &str) -> Result<FederatedIdentity, AuthFailure> {
        if assertion.trim().is_empty() {
            tracing::debug!(
                target: TRACING_TARGET,
                "empty identity assertion"
            );
            return Err(AuthFailure::IdentityVerificationFailed);
        }

        let started_at = Instant::now();
        let result = tokio::time::timeout(self.timeout, self.inner.verify_assertion(assertion)).await;
        let elapsed = started_at.elapsed();

        match result {
            Ok(Ok(identity)) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    external_subject_id = %identity.external_subject_id,
                    elapsed_ms = elapsed.as_millis(),
                    "identity assertion verified"
                );
                Ok(identity)
            }
            Ok(Err(error)) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    error_kind = %error.kind(),
                    elapsed_ms = elapsed.as_millis(),
                    "identity assertion rejected"
                );
                Err(AuthFailure::IdentityVerificationFailed)
            }
            Err(_) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    timeout_ms = self.timeout.as_millis(),
                    "identity provider timed out"
                );
                Err(AuthFailure::IdentityVerificationFailed)
            }
        }
    }
}
