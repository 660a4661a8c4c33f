//! Authentication ports: token issuing/verification and password hashing.

use uuid::Uuid;

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub token_version: i32,
    pub issued_at: i64,
    pub exp: i64,
}

/// Token service trait for signed, stateless access tokens.
pub trait TokenService: Send + Sync {
    /// Issue an access token for a user at the given credential version.
    fn generate_token(&self, user_id: Uuid, token_version: i32) -> Result<String, AuthError>;

    /// Validate signature and expiry, then decode the claims.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of issued tokens.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash. The comparison must be constant-time.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Hashing error: {0}")]
    HashingError(String),

    #[error("Signing error: {0}")]
    SigningError(String),
}
