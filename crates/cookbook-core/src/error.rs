//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

use crate::ports::AuthError;

/// Domain errors - business logic failures surfaced to the API boundary.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Missing, malformed, expired or revoked token, or bad credentials.
    #[error("Authentication required")]
    Unauthenticated,

    /// The caller does not own the resource.
    #[error("You are not authorized to perform this action")]
    Forbidden,

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Unexpected failure. Detail is logged where the error is wrapped and
    /// never carried in the value.
    #[error("Internal error")]
    Internal,
}

impl DomainError {
    pub fn not_found(entity_type: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity_type, id }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(detail) => {
                tracing::debug!(%detail, "Store rejected write on unique constraint");
                DomainError::Conflict("Resource already exists".to_string())
            }
            RepoError::Connection(msg) => {
                tracing::error!(error = %msg, "Store connection error");
                DomainError::Internal
            }
            RepoError::Query(msg) => {
                tracing::error!(error = %msg, "Store query error");
                DomainError::Internal
            }
            RepoError::NotFound => {
                tracing::error!("Store reported a missing entity where a result was expected");
                DomainError::Internal
            }
        }
    }
}

impl From<AuthError> for DomainError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenExpired | AuthError::InvalidToken(_) => {
                tracing::debug!(reason = %err, "Authentication rejected");
                DomainError::Unauthenticated
            }
            AuthError::HashingError(msg) | AuthError::SigningError(msg) => {
                tracing::error!(error = %msg, "Credential primitive failed");
                DomainError::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_maps_to_conflict() {
        let err: DomainError = RepoError::Constraint("users_email_key".to_string()).into();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert!(!err.to_string().contains("users_email_key"));
    }

    #[test]
    fn test_query_error_is_opaque() {
        let err: DomainError = RepoError::Query("relation \"posts\" does not exist".into()).into();
        assert!(matches!(err, DomainError::Internal));
        assert_eq!(err.to_string(), "Internal error");
    }

    #[test]
    fn test_token_errors_are_unauthenticated() {
        let err: DomainError = AuthError::TokenExpired.into();
        assert!(matches!(err, DomainError::Unauthenticated));

        let err: DomainError = AuthError::HashingError("bad salt".into()).into();
        assert!(matches!(err, DomainError::Internal));
    }
}
