use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::errors::StoreError;
use super::ports::CredentialStore;
use crate::user::User;
use crate::user::UserId;
use crate::user::Username;

/// Process-local credential store keyed by username.
///
/// Uniqueness is checked and the record inserted under one write lock.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    users: RwLock<HashMap<Username, User>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.id == *id)
            .cloned())
    }

    async fn insert(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.username) {
            return Err(StoreError::UsernameTaken(user.username.to_string()));
        }

        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|_, user| user.id != *id);

        if users.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
