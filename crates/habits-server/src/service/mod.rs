//! Application state and dependency injection.

pub mod auth;
mod config;
pub mod identity;
pub mod users;

pub use crate::middleware::auth::RouteGuard;
pub use crate::service::auth::SessionIssuer;
pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder};
pub use crate::service::identity::{GoogleIdentityProvider, IdentityBroker, IdentityProvider};
pub use crate::service::users::{InMemoryUserRepository, UserStore};
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    // External services:
    pub identity_broker: IdentityBroker,
    pub users: UserStore,

    // Internal services:
    pub session_issuer: SessionIssuer,
    pub route_guard: RouteGuard,
    pub secure_endpoints: bool,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Verifies identity assertions with Google and keeps users in memory.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the configuration is invalid or the
    /// signing keys fail their startup check.
    pub fn new(service_config: &ServiceConfig) -> Result<Self> {
        service_config.validate()?;

        let provider = GoogleIdentityProvider::new(
            service_config.google_client_id.clone(),
            service_config.google_certs_url()?,
            service_config.identity_timeout(),
        )?;

        Self::from_parts(
            service_config,
            provider,
            UserStore::new(InMemoryUserRepository::new()),
        )
    }

    /// Initializes application state with an explicit identity provider and
    /// user store.
    ///
    /// # Errors
    ///
    /// See [`ServiceState::new`].
    pub fn from_parts<P>(service_config: &ServiceConfig, provider: P, users: UserStore) -> Result<Self>
    where
        P: IdentityProvider + 'static,
    {
        service_config.validate()?;

        let session_issuer = SessionIssuer::from_config(&service_config.auth_config());
        session_issuer.keys().validate_keys()?;

        let route_guard = RouteGuard::new(session_issuer.clone(), service_config.path_whitelist());

        let service_state = Self {
            identity_broker: IdentityBroker::new(provider, service_config.identity_timeout()),
            users,

            session_issuer,
            route_guard,
            secure_endpoints: service_config.secure_endpoints,
        };

        Ok(service_state)
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// External services:
impl_di!(identity_broker: IdentityBroker);
impl_di!(users: UserStore);

// Internal services:
impl_di!(session_issuer: SessionIssuer);
impl_di!(route_guard: RouteGuard);
