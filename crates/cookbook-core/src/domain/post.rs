use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Publication state of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            other => Err(DomainError::Validation(format!(
                "Unknown post status '{other}'"
            ))),
        }
    }
}

/// Post entity - a recipe or article written by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    /// Fixed at creation.
    pub author_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post owned by `author_id`.
    pub fn new(author_id: Uuid, fields: NewPost) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            category_id: fields.category_id,
            title: fields.title,
            excerpt: fields.excerpt,
            content: fields.content,
            status: fields.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the fields of `patch` that differ from the current values.
    ///
    /// Returns `true` if anything changed. `updated_at` only moves on change.
    pub fn apply(&mut self, patch: PostPatch) -> bool {
        let mut changed = false;

        if let Some(title) = patch.title.filter(|t| *t != self.title) {
            self.title = title;
            changed = true;
        }
        if let Some(excerpt) = patch.excerpt.filter(|e| *e != self.excerpt) {
            self.excerpt = excerpt;
            changed = true;
        }
        if let Some(content) = patch.content.filter(|c| *c != self.content) {
            self.content = content;
            changed = true;
        }
        if let Some(category_id) = patch.category_id.filter(|c| *c != self.category_id) {
            self.category_id = category_id;
            changed = true;
        }
        if let Some(status) = patch.status.filter(|s| *s != self.status) {
            self.status = status;
            changed = true;
        }

        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }
}

/// Fields supplied when creating a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category_id: Uuid,
    pub status: Option<PostStatus>,
}

impl NewPost {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation("Title must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Partial update for a post. `None` leaves the field alone.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<Uuid>,
    pub status: Option<PostStatus>,
}

impl PostPatch {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(DomainError::Validation("Title must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Post {
        Post::new(
            Uuid::new_v4(),
            NewPost {
                title: "Focaccia".into(),
                excerpt: "Airy bread".into(),
                content: "Flour, water, salt, oil.".into(),
                category_id: Uuid::new_v4(),
                status: None,
            },
        )
    }

    #[test]
    fn test_new_post_defaults_to_draft() {
        assert_eq!(sample().status, PostStatus::Draft);
    }

    #[test]
    fn test_apply_identical_fields_is_noop() {
        let mut post = sample();
        let before = post.clone();

        let changed = post.apply(PostPatch {
            title: Some(before.title.clone()),
            content: Some(before.content.clone()),
            ..Default::default()
        });

        assert!(!changed);
        assert_eq!(post, before);
    }

    #[test]
    fn test_apply_changes_only_differing_fields() {
        let mut post = sample();
        let author = post.author_id;

        let changed = post.apply(PostPatch {
            title: Some("Rosemary focaccia".into()),
            status: Some(PostStatus::Published),
            ..Default::default()
        });

        assert!(changed);
        assert_eq!(post.title, "Rosemary focaccia");
        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.excerpt, "Airy bread");
        assert_eq!(post.author_id, author);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("Published".parse::<PostStatus>().unwrap(), PostStatus::Published);
        assert!("archived".parse::<PostStatus>().is_err());
    }
}
