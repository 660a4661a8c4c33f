use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Category entity - groups posts; owned by the user who created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub author_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(author_id: Uuid, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            name,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rename the category. Returns `false` when the name is unchanged.
    pub fn rename(&mut self, name: String) -> bool {
        if self.name == name {
            return false;
        }
        self.name = name;
        self.updated_at = Utc::now();
        true
    }
}

pub fn validate_category_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::Validation(
            "Category name must not be empty".to_string(),
        ));
    }
    Ok(())
}
