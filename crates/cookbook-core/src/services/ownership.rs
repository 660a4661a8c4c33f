//! Ownership guard for user-owned resources.

use uuid::Uuid;

use super::Identity;
use crate::error::DomainError;

/// Whether the caller is the recorded owner.
pub fn is_owner(identity: &Identity, owner_id: Uuid) -> bool {
    identity.user_id == owner_id
}

/// Fail with [`DomainError::Forbidden`] unless the caller owns the resource.
/// Must run before any write to the resource.
pub fn ensure_owner(identity: &Identity, owner_id: Uuid) -> Result<(), DomainError> {
    if is_owner(identity, owner_id) {
        return Ok(());
    }

    tracing::warn!(
        caller_id = %identity.user_id,
        owner_id = %owner_id,
        "Ownership check failed"
    );
    Err(DomainError::Forbidden)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_passes() {
        let id = Uuid::new_v4();
        let identity = Identity {
            user_id: id,
            token_version: 0,
        };
        assert!(is_owner(&identity, id));
        assert!(ensure_owner(&identity, id).is_ok());
    }

    #[test]
    fn test_stranger_is_forbidden() {
        let identity = Identity {
            user_id: Uuid::new_v4(),
            token_version: 0,
        };
        let result = ensure_owner(&identity, Uuid::new_v4());
        assert!(matches!(result, Err(DomainError::Forbidden)));
    }
}
