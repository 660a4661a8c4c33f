//! Application state - the composition root shared across all handlers.

use std::sync::Arc;

use cookbook_core::DomainError;
use cookbook_core::ports::{
    CategoryRepository, PasswordService, PostRepository, TokenService, UserRepository,
};
use cookbook_core::services::{MutationService, RelationResolver};
use cookbook_infra::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
use cookbook_infra::database::{
    DatabaseConnections, InMemoryCategoryRepository, InMemoryPostRepository,
    InMemoryUserRepository,
};

#[cfg(feature = "postgres")]
use cookbook_infra::database::{
    DatabaseConfig, PostgresCategoryRepository, PostgresPostRepository, PostgresUserRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub mutations: Arc<MutationService>,
    pub relations: Arc<RelationResolver>,
    pub db: Option<Arc<DatabaseConnections>>,
}

/// The three entity stores, backed by one engine.
struct Stores {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl Stores {
    fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
            categories: Arc::new(InMemoryCategoryRepository::new()),
        }
    }

    #[cfg(feature = "postgres")]
    fn postgres(conn: &DatabaseConnections) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(conn.main.clone())),
            posts: Arc::new(PostgresPostRepository::new(conn.main.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(conn.main.clone())),
        }
    }
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, DomainError> {
        #[cfg(feature = "postgres")]
        let (db, stores) = connect(config.database.as_ref()).await;

        #[cfg(not(feature = "postgres"))]
        let (db, stores) = {
            tracing::info!("Running without postgres feature - using in-memory store");
            (None, Stores::in_memory())
        };

        let state = Self::assemble(
            stores,
            db,
            &config.jwt,
            Arc::new(Argon2PasswordService::new()),
        )?;

        tracing::info!("Application state initialized");
        Ok(state)
    }

    /// In-memory state with an explicit password hasher.
    #[cfg(test)]
    pub fn in_memory(
        jwt: &JwtConfig,
        passwords: Arc<dyn PasswordService>,
    ) -> Result<Self, DomainError> {
        Self::assemble(Stores::in_memory(), None, jwt, passwords)
    }

    fn assemble(
        stores: Stores,
        db: Option<Arc<DatabaseConnections>>,
        jwt: &JwtConfig,
        passwords: Arc<dyn PasswordService>,
    ) -> Result<Self, DomainError> {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(jwt.clone()));

        let mutations = MutationService::new(
            stores.users.clone(),
            stores.posts.clone(),
            stores.categories.clone(),
            tokens,
            passwords,
        )?;
        let relations = RelationResolver::new(stores.users, stores.posts, stores.categories);

        Ok(Self {
            mutations: Arc::new(mutations),
            relations: Arc::new(relations),
            db,
        })
    }

    /// Name of the backing entity store.
    pub fn store_backend(&self) -> &'static str {
        if self.db.is_some() { "postgres" } else { "memory" }
    }
}

#[cfg(feature = "postgres")]
async fn connect(config: Option<&DatabaseConfig>) -> (Option<Arc<DatabaseConnections>>, Stores) {
    let Some(config) = config else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return (None, Stores::in_memory());
    };

    match DatabaseConnections::init(config).await {
        Ok(connections) => {
            let stores = Stores::postgres(&connections);
            (Some(Arc::new(connections)), stores)
        }
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            (None, Stores::in_memory())
        }
    }
}
