//! Credential verification: token in, caller identity out.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::DomainError;
use crate::ports::{TokenClaims, TokenService};

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    /// Credential version the token was issued under.
    pub token_version: i32,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            token_version: claims.token_version,
        }
    }
}

/// Validates presented tokens. Holds no state beyond the signing key inside
/// the token service, so it is safe to share across requests.
#[derive(Clone)]
pub struct CredentialVerifier {
    tokens: Arc<dyn TokenService>,
}

impl CredentialVerifier {
    pub fn new(tokens: Arc<dyn TokenService>) -> Self {
        Self { tokens }
    }

    /// Verify a bearer token and extract the caller identity.
    ///
    /// Missing, blank, malformed, forged and expired tokens all fail with
    /// [`DomainError::Unauthenticated`].
    pub fn verify(&self, token: Option<&str>) -> Result<Identity, DomainError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                tracing::debug!("No token presented");
                DomainError::Unauthenticated
            })?;

        let claims = self.tokens.validate_token(token)?;
        Ok(Identity::from(claims))
    }
}
