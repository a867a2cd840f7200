//! Federated identity verification.
//!
//! - [`IdentityProvider`]: core trait for verifying third-party assertions
//! - [`IdentityBroker`]: service wrapper with a deadline and observability
//! - [`GoogleIdentityProvider`]: Google ID-token verification
//!
//! # Example
//!
//! ```rust,ignore
//! use habits_server::service::identity::{GOOGLE_CERTS_URL, GoogleIdentityProvider, IdentityBroker};
//!
//! let certs_url = Url::parse(GOOGLE_CERTS_URL)?;
//! let timeout = Duration::from_secs(10);
//! let provider = GoogleIdentityProvider::new(client_id, certs_url, timeout)?;
//! let broker = IdentityBroker::new(provider, timeout);
//! let identity = broker.verify_assertion(&assertion).await?;
//! ```

mod google;
mod identity_broker;

use serde::{Deserialize, Serialize};

pub use self::google::{
    GOOGLE_CERTS_URL, GOOGLE_ISSUERS, GoogleIdentityProvider, MIN_REFETCH_INTERVAL,
};
pub use self::identity_broker::IdentityBroker;
pub use crate::{Error, Result};

/// Result of verifying a third-party assertion.
///
/// Produced per login call and never persisted by this subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederatedIdentity {
    /// Email address asserted by the provider.
    pub email: String,
    /// Stable subject identifier at the provider.
    pub external_subject_id: String,
}

/// Core trait for federated identity verification.
///
/// Implement this trait to plug in an identity provider.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verifies `assertion` and returns the identity it asserts.
    ///
    /// # Errors
    ///
    /// Returns an auth error for an invalid assertion, and an external
    /// error when the provider cannot be reached.
    async fn verify_assertion(&self, assertion: &str) -> Result<FederatedIdentity>;
}
