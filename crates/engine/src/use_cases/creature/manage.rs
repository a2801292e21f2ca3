//! Creature lifecycle and read views.

use std::sync::Arc;

use creature_domain::{Abilities, Creature, CreatureName, SavingThrows, Skills};

use super::CreatureError;
use crate::repositories::CreatureRepository;
use crate::stores::CreatureLocks;

/// Create, read and delete creatures.
pub struct ManageCreature {
    creatures: Arc<CreatureRepository>,
    locks: Arc<CreatureLocks>,
}

impl ManageCreature {
    pub fn new(creatures: Arc<CreatureRepository>, locks: Arc<CreatureLocks>) -> Self {
        Self { creatures, locks }
    }

    /// Create a level 1 creature. Names are unique.
    pub async fn create(&self, name: CreatureName) -> Result<Creature, CreatureError> {
        let creature = Creature::new(name);
        if !self.creatures.insert(&creature).await? {
            return Err(CreatureError::AlreadyExists(creature.name().clone()));
        }
        tracing::info!(creature = %creature.name(), "Creature created");
        Ok(creature)
    }

    pub async fn get(&self, name: &CreatureName) -> Result<Creature, CreatureError> {
        self.creatures
            .get(name)
            .await?
            .ok_or_else(|| CreatureError::NotFound(name.clone()))
    }

    /// Delete by name. Waits for in-flight mutations of the same creature.
    pub async fn delete(&self, name: &CreatureName) -> Result<(), CreatureError> {
        let deleted = {
            let _guard = self.locks.acquire(name).await;
            self.creatures.delete(name).await?
        };
        self.locks.forget(name);

        if !deleted {
            return Err(CreatureError::NotFound(name.clone()));
        }
        tracing::info!(creature = %name, "Creature deleted");
        Ok(())
    }

    pub async fn abilities(&self, name: &CreatureName) -> Result<Abilities, CreatureError> {
        Ok(*self.get(name).await?.abilities())
    }

    pub async fn skills(&self, name: &CreatureName) -> Result<Skills, CreatureError> {
        Ok(self.get(name).await?.skills().clone())
    }

    pub async fn saving_throws(&self, name: &CreatureName) -> Result<SavingThrows, CreatureError> {
        Ok(self.get(name).await?.saving_throws().clone())
    }
}
