use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use super::{NewUser, User, UserRepository};
use crate::Result;
use crate::service::identity::FederatedIdentity;
use crate::utility::tracing_targets::USERS as TRACING_TARGET;

/// Shared handle to the configured [`UserRepository`].
///
/// The inner repository is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct UserStore {
    inner: Arc<dyn UserRepository>,
}

impl fmt::Debug for UserStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserStore").finish_non_exhaustive()
    }
}

impl UserStore {
    /// Creates a new store backed by `repository`.
    pub fn new<R>(repository: R) -> Self
    where
        R: UserRepository + 'static,
    {
        Self {
            inner: Arc::new(repository),
        }
    }

    /// Finds a user by local identifier.
    pub async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        self.inner.find_by_id(user_id).await
    }

    /// Resolves `identity` into a local user, creating one on first login.
    ///
    /// A concurrent first login for the same subject resolves to the record
    /// created by whichever request won.
    pub async fn find_or_create(&self, identity: &FederatedIdentity) -> Result<User> {
        let sso_id = identity.external_subject_id.as_str();
        if let Some(user) = self.inner.find_by_external_id(sso_id).await? {
            tracing::debug!(
                target: TRACING_TARGET,
                user_id = %user.id,
                "existing user resolved"
            );
            return Ok(user);
        }

        let new_user = NewUser {
            email: identity.email.clone(),
            sso_id: identity.external_subject_id.clone(),
        };

        match self.inner.create(new_user).await {
            Ok(user) => {
                tracing::info!(
                    target: TRACING_TARGET,
                    user_id = %user.id,
                    "user created"
                );
                Ok(user)
            }
            Err(error) => match self.inner.find_by_external_id(sso_id).await? {
                Some(user) => Ok(user),
                None => Err(error),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::users::InMemoryUserRepository;

    fn identity(sso_id: &str) -> FederatedIdentity {
        FederatedIdentity {
            email: "alice@example.com".to_owned(),
            external_subject_id: sso_id.to_owned(),
        }
    }

    #[tokio::test]
    async fn first_login_creates_user() {
        let repository = InMemoryUserRepository::new();
        let store = UserStore::new(repository.clone());

        let user = store.find_or_create(&identity("ext-123")).await.unwrap();
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.sso_id, "ext-123");
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn repeated_login_resolves_same_user() {
        let store = UserStore::new(InMemoryUserRepository::new());

        let first = store.find_or_create(&identity("ext-123")).await.unwrap();
        let second = store.find_or_create(&identity("ext-123")).await.unwrap();
        assert_eq!(first, second);

        let other = store.find_or_create(&identity("ext-456")).await.unwrap();
        assert_ne!(first.id, other.id);
    }

    #[tokio::test]
    async fn concurrent_first_logins_agree() {
        let store = UserStore::new(InMemoryUserRepository::new());
        let identity = identity("ext-123");

        let (a, b) = tokio::join!(
            store.find_or_create(&identity),
            store.find_or_create(&identity)
        );
        assert_eq!(a.unwrap().id, b.unwrap().id);
    }

    #[tokio::test]
    async fn serializes_sso_id_in_camel_case() {
        let store = UserStore::new(InMemoryUserRepository::new());
        let user = store.find_or_create(&identity("ext-123")).await.unwrap();

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["ssoId"], "ext-123");
        assert_eq!(json["id"], user.id.to_string());
    }
}
