use async_trait::async_trait;
use thiserror::Error;

use crate::domain::user::{NewUser, User, UserChanges};

/// Errors surfaced by user persistence
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository trait for the User resource
///
/// Each call is one logical unit of work; implementations commit writes
/// before returning.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return it with its assigned id
    async fn insert(&self, user: NewUser) -> RepositoryResult<User>;

    /// All users, in store order
    async fn list_all(&self) -> RepositoryResult<Vec<User>>;

    /// Find a user by ID
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>>;

    /// Merge `changes` into the user with `id`, returning the updated record,
    /// or `None` if no such user exists
    async fn update(&self, id: i64, changes: UserChanges) -> RepositoryResult<Option<User>>;

    /// Delete a user, returning whether a row was removed
    async fn delete_by_id(&self, id: i64) -> RepositoryResult<bool>;
}
