use async_trait::async_trait;

use super::{
    entity::{User, UserId},
    validation::Validated,
};
use crate::error::persistence::PersistenceError;

/// Persistence boundary for the user directory.
///
/// Mutating operations only accept users that went through
/// [`validate`](super::validation::validate).
#[async_trait]
pub trait UserService: Send + Sync {
    async fn find_all(&self) -> Result<Vec<User>, PersistenceError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, PersistenceError>;

    /// Stores a new user, returning it with its assigned id.
    async fn insert_by_user(&self, user: Validated<User>) -> Result<User, PersistenceError>;

    /// Replaces the stored user of the same id.
    ///
    /// Fails with [`PersistenceError::NotFound`] when no such user exists.
    async fn update(&self, user: Validated<User>) -> Result<User, PersistenceError>;

    /// Removes a user. Removing an unknown id is not an error.
    async fn delete(&self, id: UserId) -> Result<(), PersistenceError>;
}
