use async_trait::async_trait;

use super::errors::StoreError;
use crate::user::User;
use crate::user::UserId;
use crate::user::Username;

/// Port onto the record store that holds user credentials.
///
/// Implementations must enforce username uniqueness atomically on
/// [`insert`](CredentialStore::insert): two concurrent registrations for the
/// same name race, and only the store can decide the winner.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve a user by exact (case-sensitive) username.
    ///
    /// # Errors
    /// * `Unavailable` - Backing store failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, StoreError>;

    /// Retrieve a user by identifier.
    ///
    /// # Errors
    /// * `Unavailable` - Backing store failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError>;

    /// Persist a new user.
    ///
    /// # Errors
    /// * `UsernameTaken` - Another user already holds this username
    /// * `Unavailable` - Backing store failed
    async fn insert(&self, user: User) -> Result<User, StoreError>;

    /// Remove a user.
    ///
    /// # Errors
    /// * `NotFound` - No user with this identifier
    /// * `Unavailable` - Backing store failed
    async fn delete(&self, id: &UserId) -> Result<(), StoreError>;
}
