//! Domain-to-wire conversions.

use cookbook_core::DomainError;
use cookbook_core::domain::{Category, Post, PostStatus, PublicUser};
use cookbook_core::services::AuthPayload;
use cookbook_shared::dto::{AuthResponse, CategoryResponse, FieldError, PostResponse, UserResponse};

pub fn user_response(user: PublicUser) -> UserResponse {
    UserResponse {
        id: user.id,
        email: user.email,
        name: user.name,
        lastname: user.lastname,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

pub fn auth_response(payload: AuthPayload) -> AuthResponse {
    AuthResponse {
        user: user_response(payload.user),
        access_token: payload.token,
        token_type: "Bearer".to_string(),
        expires_in: payload.expires_in.max(0) as u64,
    }
}

pub fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        author_id: post.author_id,
        category_id: post.category_id,
        title: post.title,
        excerpt: post.excerpt,
        content: post.content,
        status: post.status.as_str().to_string(),
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

pub fn category_response(category: Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        author_id: category.author_id,
        name: category.name,
        created_at: category.created_at,
        updated_at: category.updated_at,
    }
}

pub fn parse_status(status: Option<String>) -> Result<Option<PostStatus>, DomainError> {
    status.map(|s| s.parse()).transpose()
}

/// Collects relation failures while the parent is still rendered.
#[derive(Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn take<T>(&mut self, field: &str, result: Result<T, DomainError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.0.push(FieldError {
                    field: field.to_string(),
                    message: err.to_string(),
                });
                None
            }
        }
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }
}
