//! The mutation surface: every write goes verify -> ownership -> store.

use std::sync::Arc;

use uuid::Uuid;

use super::credentials::{CredentialVerifier, Identity};
use super::ownership::ensure_owner;
use crate::domain::{
    Category, NewPost, Post, PostPatch, PublicUser, User, mask_email, normalize_email,
    validate_category_name, validate_email, validate_password,
};
use crate::error::{DomainError, RepoError};
use crate::ports::{
    CategoryRepository, PasswordService, PostRepository, TokenService, UserRepository,
};

/// Hashed once at startup and verified against when a login names an unknown
/// email, so both failure paths do the same amount of work.
const TIMING_DUMMY_PASSWORD: &str = "cookbook-timing-equalizer";

/// Sanitized user plus a freshly issued access token.
#[derive(Debug, Clone)]
pub struct AuthPayload {
    pub user: PublicUser,
    pub token: String,
    pub expires_in: i64,
}

/// Orchestrates authenticated writes against the entity store.
///
/// Stateless between calls; everything it holds is shared and read-only.
pub struct MutationService {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
    verifier: CredentialVerifier,
    tokens: Arc<dyn TokenService>,
    passwords: Arc<dyn PasswordService>,
    dummy_hash: String,
}

impl MutationService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        categories: Arc<dyn CategoryRepository>,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
    ) -> Result<Self, DomainError> {
        let dummy_hash = passwords.hash(TIMING_DUMMY_PASSWORD)?;

        Ok(Self {
            users,
            posts,
            categories,
            verifier: CredentialVerifier::new(tokens.clone()),
            tokens,
            passwords,
            dummy_hash,
        })
    }

    // --- users -----------------------------------------------------------

    /// Register a new user and log them in.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthPayload, DomainError> {
        let email = normalize_email(email);
        validate_email(&email)?;
        validate_password(password)?;

        let password_hash = self.passwords.hash(password)?;
        let user = self
            .users
            .create(User::new(email, password_hash))
            .await
            .map_err(email_conflict)?;

        tracing::info!(user_id = %user.id, email = %mask_email(&user.email), "User signed up");
        self.issue_token(&user)
    }

    /// Exchange email and password for a token.
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn auth_user(&self, email: &str, password: &str) -> Result<AuthPayload, DomainError> {
        let email = normalize_email(email);

        let Some(user) = self.users.find_by_email(&email).await? else {
            let _ = self.passwords.verify(password, &self.dummy_hash);
            tracing::debug!(email = %mask_email(&email), "Login failed: unknown email");
            return Err(DomainError::Unauthenticated);
        };

        if !self.passwords.verify(password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "Login failed: wrong password");
            return Err(DomainError::Unauthenticated);
        }

        tracing::info!(user_id = %user.id, "User authenticated");
        self.issue_token(&user)
    }

    /// Update name and/or lastname of the caller's own profile.
    pub async fn update_user_profile(
        &self,
        token: Option<&str>,
        target_id: Uuid,
        name: Option<String>,
        lastname: Option<String>,
    ) -> Result<PublicUser, DomainError> {
        let identity = self.authenticate(token).await?;
        ensure_owner(&identity, target_id)?;

        let mut user = self.load_user(target_id).await?;
        let mut changed = false;

        if let Some(name) = name.filter(|n| user.name.as_deref() != Some(n.as_str())) {
            user.name = Some(name);
            changed = true;
        }
        if let Some(lastname) = lastname.filter(|l| user.lastname.as_deref() != Some(l.as_str())) {
            user.lastname = Some(lastname);
            changed = true;
        }

        if !changed {
            return Ok(PublicUser::from(user));
        }

        user.touch();
        let user = self
            .users
            .update(user)
            .await?
            .ok_or_else(|| DomainError::not_found("User", target_id))?;

        tracing::info!(user_id = %user.id, "Profile updated");
        Ok(PublicUser::from(user))
    }

    /// Change the caller's email and/or password and re-issue a token.
    ///
    /// Any change bumps the credential version, revoking earlier tokens.
    pub async fn update_user_email_pass(
        &self,
        token: Option<&str>,
        target_id: Uuid,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<AuthPayload, DomainError> {
        let identity = self.authenticate(token).await?;
        ensure_owner(&identity, target_id)?;

        let mut user = self.load_user(target_id).await?;
        let mut changed = false;

        if let Some(email) = email {
            let email = normalize_email(&email);
            if email != user.email {
                validate_email(&email)?;
                user.email = email;
                changed = true;
            }
        }
        if let Some(password) = password {
            validate_password(&password)?;
            user.password_hash = self.passwords.hash(&password)?;
            changed = true;
        }

        if changed {
            user.token_version += 1;
            user.touch();
            user = self
                .users
                .update(user)
                .await
                .map_err(email_conflict)?
                .ok_or_else(|| DomainError::not_found("User", target_id))?;

            tracing::info!(
                user_id = %user.id,
                token_version = user.token_version,
                "Credentials updated, earlier tokens revoked"
            );
        }

        self.issue_token(&user)
    }

    // --- posts -----------------------------------------------------------

    /// Create a post owned by the caller.
    pub async fn create_post(&self, token: Option<&str>, fields: NewPost) -> Result<Post, DomainError> {
        let identity = self.authenticate(token).await?;
        fields.validate()?;
        self.ensure_category_exists(fields.category_id).await?;

        let post = self.posts.create(Post::new(identity.user_id, fields)).await?;

        tracing::info!(post_id = %post.id, author_id = %post.author_id, "Post created");
        Ok(post)
    }

    /// Update a post owned by the caller. Fields equal to the stored values
    /// are skipped; when nothing differs the store is not written.
    pub async fn update_post(
        &self,
        token: Option<&str>,
        post_id: Uuid,
        patch: PostPatch,
    ) -> Result<Post, DomainError> {
        let identity = self.authenticate(token).await?;
        patch.validate()?;

        let mut post = self.load_post(post_id).await?;
        ensure_owner(&identity, post.author_id)?;

        if let Some(category_id) = patch.category_id.filter(|c| *c != post.category_id) {
            self.ensure_category_exists(category_id).await?;
        }

        if !post.apply(patch) {
            tracing::debug!(post_id = %post.id, "Post update had no effective changes");
            return Ok(post);
        }

        let post = self
            .posts
            .update(post)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", post_id))?;

        tracing::info!(post_id = %post.id, "Post updated");
        Ok(post)
    }

    /// Delete a post owned by the caller and return it.
    pub async fn delete_post(&self, token: Option<&str>, post_id: Uuid) -> Result<Post, DomainError> {
        let identity = self.authenticate(token).await?;

        let post = self.load_post(post_id).await?;
        ensure_owner(&identity, post.author_id)?;

        let removed = self
            .posts
            .remove(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", post_id))?;

        tracing::info!(post_id = %removed.id, "Post deleted");
        Ok(removed)
    }

    // --- categories ------------------------------------------------------

    pub async fn create_category(&self, token: Option<&str>, name: String) -> Result<Category, DomainError> {
        let identity = self.authenticate(token).await?;
        validate_category_name(&name)?;

        let category = self
            .categories
            .create(Category::new(identity.user_id, name))
            .await?;

        tracing::info!(category_id = %category.id, author_id = %category.author_id, "Category created");
        Ok(category)
    }

    pub async fn update_category(
        &self,
        token: Option<&str>,
        category_id: Uuid,
        name: String,
    ) -> Result<Category, DomainError> {
        let identity = self.authenticate(token).await?;
        validate_category_name(&name)?;

        let mut category = self.load_category(category_id).await?;
        ensure_owner(&identity, category.author_id)?;

        if !category.rename(name) {
            return Ok(category);
        }

        let category = self
            .categories
            .update(category)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", category_id))?;

        tracing::info!(category_id = %category.id, "Category renamed");
        Ok(category)
    }

    /// Delete a category owned by the caller. Posts filed under it are kept.
    pub async fn delete_category(&self, token: Option<&str>, category_id: Uuid) -> Result<Category, DomainError> {
        let identity = self.authenticate(token).await?;

        let category = self.load_category(category_id).await?;
        ensure_owner(&identity, category.author_id)?;

        let removed = self
            .categories
            .remove(category_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", category_id))?;

        tracing::info!(category_id = %removed.id, "Category deleted");
        Ok(removed)
    }

    // --- helpers ---------------------------------------------------------

    /// Verify the token, then confirm the session is still current: the user
    /// exists and has not changed credentials since the token was issued.
    async fn authenticate(&self, token: Option<&str>) -> Result<Identity, DomainError> {
        let identity = self.verifier.verify(token)?;

        match self.users.find_by_id(identity.user_id).await? {
            Some(user) if user.token_version == identity.token_version => Ok(identity),
            Some(user) => {
                tracing::warn!(
                    user_id = %user.id,
                    presented = identity.token_version,
                    current = user.token_version,
                    "Rejected revoked token"
                );
                Err(DomainError::Unauthenticated)
            }
            None => {
                tracing::warn!(user_id = %identity.user_id, "Token subject no longer exists");
                Err(DomainError::Unauthenticated)
            }
        }
    }

    fn issue_token(&self, user: &User) -> Result<AuthPayload, DomainError> {
        let token = self.tokens.generate_token(user.id, user.token_version)?;

        Ok(AuthPayload {
            user: PublicUser::from(user),
            token,
            expires_in: self.tokens.expiration_seconds(),
        })
    }

    async fn load_user(&self, id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    async fn load_post(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", id))
    }

    async fn load_category(&self, id: Uuid) -> Result<Category, DomainError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", id))
    }

    async fn ensure_category_exists(&self, id: Uuid) -> Result<(), DomainError> {
        self.load_category(id).await.map(|_| ())
    }
}

fn email_conflict(err: RepoError) -> DomainError {
    match err {
        RepoError::Constraint(_) => DomainError::Conflict("Email already registered".to_string()),
        other => other.into(),
    }
}
