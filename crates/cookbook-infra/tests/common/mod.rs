#![allow(dead_code)]

use std::sync::Arc;

use uuid::Uuid;

use cookbook_core::domain::{Category, NewPost, Post};
use cookbook_core::services::{AuthPayload, MutationService, RelationResolver};
use cookbook_infra::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
use cookbook_infra::database::{
    InMemoryCategoryRepository, InMemoryPostRepository, InMemoryUserRepository,
};

pub const PASSWORD: &str = "secret1";

/// Services wired over in-memory collections the tests can also inspect.
pub struct Harness {
    pub users: Arc<InMemoryUserRepository>,
    pub posts: Arc<InMemoryPostRepository>,
    pub categories: Arc<InMemoryCategoryRepository>,
    pub mutations: MutationService,
    pub relations: RelationResolver,
}

impl Harness {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let posts = Arc::new(InMemoryPostRepository::new());
        let categories = Arc::new(InMemoryCategoryRepository::new());

        let tokens = Arc::new(JwtTokenService::new(JwtConfig {
            secret: "integration-secret".to_string(),
            expiration_hours: 1,
            issuer: "cookbook-tests".to_string(),
        }));
        let passwords = Arc::new(Argon2PasswordService::with_params(1024, 1, 1).unwrap());

        let mutations = MutationService::new(
            users.clone(),
            posts.clone(),
            categories.clone(),
            tokens,
            passwords,
        )
        .unwrap();
        let relations = RelationResolver::new(users.clone(), posts.clone(), categories.clone());

        Self {
            users,
            posts,
            categories,
            mutations,
            relations,
        }
    }

    pub async fn sign_up(&self, email: &str) -> AuthPayload {
        self.mutations.sign_up(email, PASSWORD).await.unwrap()
    }

    pub async fn category(&self, token: &str, name: &str) -> Category {
        self.mutations
            .create_category(Some(token), name.to_string())
            .await
            .unwrap()
    }

    pub async fn post(&self, token: &str, category_id: Uuid, title: &str) -> Post {
        self.mutations
            .create_post(Some(token), new_post(category_id, title))
            .await
            .unwrap()
    }
}

pub fn new_post(category_id: Uuid, title: &str) -> NewPost {
    NewPost {
        title: title.to_string(),
        excerpt: format!("{title} in brief"),
        content: "...".to_string(),
        category_id,
        status: None,
    }
}
