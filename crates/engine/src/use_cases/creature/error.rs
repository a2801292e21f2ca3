//! Creature operation errors.

use creature_domain::{CreatureName, DomainError};

use crate::infrastructure::ports::RepoError;

/// Errors that can occur during creature operations.
#[derive(Debug, thiserror::Error)]
pub enum CreatureError {
    #[error("Creature not found: {0}")]
    NotFound(CreatureName),
    #[error("Creature already exists: {0}")]
    AlreadyExists(CreatureName),
    #[error("Validation error: {0}")]
    Domain(#[from] DomainError),
    #[error("Storage failure: {0}")]
    StorageFailure(#[from] RepoError),
}

impl CreatureError {
    /// Only storage failures are worth retrying; validation errors never change.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageFailure(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_storage_failures_are_retryable() {
        let name = CreatureName::new("Aria").unwrap();
        assert!(CreatureError::StorageFailure(RepoError::timeout("get_creature")).is_retryable());
        assert!(!CreatureError::NotFound(name.clone()).is_retryable());
        assert!(!CreatureError::AlreadyExists(name).is_retryable());
        assert!(!CreatureError::Domain(DomainError::invalid_count(0)).is_retryable());
    }
}
