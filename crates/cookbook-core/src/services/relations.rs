//! Read-only, field-level resolution of post and category relations.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Category, Post, PublicUser};
use crate::error::DomainError;
use crate::ports::{CategoryRepository, PostRepository, UserRepository};

/// Maximum number of related posts returned for a post.
pub const RELATED_LIMIT: usize = 3;

/// A post with its relations. Each relation resolves independently; a
/// failed field does not fail the view.
#[derive(Debug)]
pub struct PostView {
    pub post: Post,
    pub author: Result<PublicUser, DomainError>,
    pub category: Result<Category, DomainError>,
    pub related: Result<Vec<Post>, DomainError>,
}

/// A category with its relations.
#[derive(Debug)]
pub struct CategoryView {
    pub category: Category,
    pub author: Result<PublicUser, DomainError>,
    pub posts: Result<Vec<Post>, DomainError>,
}

pub struct RelationResolver {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl RelationResolver {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            users,
            posts,
            categories,
        }
    }

    pub async fn category_posts(&self, category: &Category) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_by_category(category.id).await?)
    }

    pub async fn category_author(&self, category: &Category) -> Result<PublicUser, DomainError> {
        self.author(category.author_id).await
    }

    pub async fn post_author(&self, post: &Post) -> Result<PublicUser, DomainError> {
        self.author(post.author_id).await
    }

    pub async fn post_category(&self, post: &Post) -> Result<Category, DomainError> {
        self.categories
            .find_by_id(post.category_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", post.category_id))
    }

    /// Other posts in the same category, newest first. Empty if there are none.
    pub async fn post_related(&self, post: &Post) -> Result<Vec<Post>, DomainError> {
        let siblings = self.posts.find_by_category(post.category_id).await?;

        Ok(siblings
            .into_iter()
            .filter(|p| p.id != post.id)
            .take(RELATED_LIMIT)
            .collect())
    }

    /// Load a post and resolve all of its relations.
    pub async fn resolve_post(&self, post_id: Uuid) -> Result<PostView, DomainError> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", post_id))?;

        let author = self.post_author(&post).await;
        let category = self.post_category(&post).await;
        let related = self.post_related(&post).await;

        if let Err(e) = &author {
            tracing::warn!(post_id = %post.id, error = %e, "Post author did not resolve");
        }

        Ok(PostView {
            post,
            author,
            category,
            related,
        })
    }

    /// Load a category and resolve all of its relations.
    pub async fn resolve_category(&self, category_id: Uuid) -> Result<CategoryView, DomainError> {
        let category = self
            .categories
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", category_id))?;

        let author = self.category_author(&category).await;
        let posts = self.category_posts(&category).await;

        Ok(CategoryView {
            category,
            author,
            posts,
        })
    }

    async fn author(&self, user_id: Uuid) -> Result<PublicUser, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(PublicUser::from)
            .ok_or_else(|| DomainError::not_found("User", user_id))
    }
}
