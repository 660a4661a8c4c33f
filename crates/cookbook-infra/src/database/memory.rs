//! In-memory document store - used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use cookbook_core::domain::{Category, Post, User};
use cookbook_core::error::RepoError;
use cookbook_core::ports::{BaseRepository, CategoryRepository, PostRepository, UserRepository};

/// A storable entity.
pub trait Document: Clone + Send + Sync + 'static {
    const KIND: &'static str;

    fn id(&self) -> Uuid;

    /// Value that must be unique across the collection, if any.
    fn unique_key(&self) -> Option<&str> {
        None
    }
}

impl Document for User {
    const KIND: &'static str = "user";

    fn id(&self) -> Uuid {
        self.id
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.email)
    }
}

impl Document for Post {
    const KIND: &'static str = "post";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Document for Category {
    const KIND: &'static str = "category";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// One collection of documents behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryRepository<T> {
    store: RwLock<HashMap<Uuid, T>>,
}

pub type InMemoryUserRepository = InMemoryRepository<User>;
pub type InMemoryPostRepository = InMemoryRepository<Post>;
pub type InMemoryCategoryRepository = InMemoryRepository<Category>;

impl<T: Document> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// Whether another document already holds `entity`'s unique key.
    fn key_taken(store: &HashMap<Uuid, T>, entity: &T) -> bool {
        let Some(key) = entity.unique_key() else {
            return false;
        };
        store
            .values()
            .any(|other| other.id() != entity.id() && other.unique_key() == Some(key))
    }

    async fn filtered<F>(&self, mut keep: F) -> Vec<T>
    where
        F: FnMut(&T) -> bool + Send,
    {
        self.store
            .read()
            .await
            .values()
            .filter(|doc| keep(*doc))
            .cloned()
            .collect()
    }
}

impl<T: Document> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Document> BaseRepository<T, Uuid> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn create(&self, entity: T) -> Result<T, RepoError> {
        let mut store = self.store.write().await;

        if store.contains_key(&entity.id()) {
            return Err(RepoError::Constraint(format!("{} id already exists", T::KIND)));
        }
        if Self::key_taken(&store, &entity) {
            return Err(RepoError::Constraint(format!("{} unique key already taken", T::KIND)));
        }

        store.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: T) -> Result<Option<T>, RepoError> {
        let mut store = self.store.write().await;

        if !store.contains_key(&entity.id()) {
            return Ok(None);
        }
        if Self::key_taken(&store, &entity) {
            return Err(RepoError::Constraint(format!("{} unique key already taken", T::KIND)));
        }

        store.insert(entity.id(), entity.clone());
        Ok(Some(entity))
    }

    async fn remove(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        Ok(self.store.write().await.remove(&id))
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository<User> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .store
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    posts
}

#[async_trait]
impl PostRepository for InMemoryRepository<Post> {
    async fn find_by_category(&self, category_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let posts = self.filtered(|p| p.category_id == category_id).await;
        Ok(newest_first(posts))
    }
}

impl CategoryRepository for InMemoryRepository<Category> {}
