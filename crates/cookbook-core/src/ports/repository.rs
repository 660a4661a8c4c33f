use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Post, User};
use crate::error::RepoError;

/// Generic document store operations shared by every entity.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. Unique-key collisions fail with `RepoError::Constraint`.
    async fn create(&self, entity: T) -> Result<T, RepoError>;

    /// Replace a stored entity by ID and return the stored value.
    /// Returns `Ok(None)` if the entity no longer exists.
    async fn update(&self, entity: T) -> Result<Option<T>, RepoError>;

    /// Remove an entity by ID and return what was removed, if anything.
    async fn remove(&self, id: ID) -> Result<Option<T>, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their (normalized) email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Posts filed under a category, newest first.
    async fn find_by_category(&self, category_id: Uuid) -> Result<Vec<Post>, RepoError>;
}

/// Category repository.
pub trait CategoryRepository: BaseRepository<Category, Uuid> {}
