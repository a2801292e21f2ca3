//! Repository port traits for database access.

use async_trait::async_trait;
use creature_domain::{Creature, CreatureName, CreatureUpdate};

use super::error::RepoError;

// =============================================================================
// Creature Storage
// =============================================================================

/// Document store for creatures, keyed by name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CreatureRepo: Send + Sync {
    /// Point lookup by name.
    async fn get(&self, name: &CreatureName) -> Result<Option<Creature>, RepoError>;

    /// Insert if no creature with this name exists. Returns `false` on collision.
    async fn insert(&self, creature: &Creature) -> Result<bool, RepoError>;

    /// Write exactly the fields in `update`, leaving the rest of the record as is.
    ///
    /// Fails with `NotFound` if the creature has vanished.
    async fn apply_update(
        &self,
        name: &CreatureName,
        update: &CreatureUpdate,
    ) -> Result<(), RepoError>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, name: &CreatureName) -> Result<bool, RepoError>;
}
