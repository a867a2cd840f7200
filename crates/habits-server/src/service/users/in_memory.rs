use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::{NewUser, User, UserRepository};
use crate::{Error, Result};

/// Process-local [`UserRepository`].
///
/// Records live for the lifetime of the process. Cheap to clone; clones share
/// the same records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    /// Creates a new, empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Returns `true` if no users are stored.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_external_id(&self, sso_id: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.sso_id == sso_id).cloned())
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        Ok(self.users.read().await.get(&user_id).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        let mut users = self.users.write().await;
        if users.values().any(|user| user.sso_id == new_user.sso_id) {
            return Err(Error::internal("users", "User already exists"));
        }

        let user = User {
            id: Uuid::now_v7(),
            email: new_user.email,
            sso_id: new_user.sso_id,
        };

        users.insert(user.id, user.clone());
        Ok(user)
    }
}
