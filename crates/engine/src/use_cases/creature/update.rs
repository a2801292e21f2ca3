//! Derived-attribute consistency engine.
//!
//! Every write follows the same path: lock the creature, load the snapshot,
//! let the aggregate validate and cascade, then persist exactly the fields it
//! reports as touched. A validation failure aborts before anything is written.

use std::sync::Arc;

use creature_domain::{Ability, Creature, CreatureName, CreatureUpdate, DomainError, Skill};

use super::CreatureError;
use crate::repositories::CreatureRepository;
use crate::stores::CreatureLocks;

/// Single-attribute writes with cascading recomputation.
pub struct UpdateCreature {
    creatures: Arc<CreatureRepository>,
    locks: Arc<CreatureLocks>,
}

impl UpdateCreature {
    pub fn new(creatures: Arc<CreatureRepository>, locks: Arc<CreatureLocks>) -> Self {
        Self { creatures, locks }
    }

    async fn mutate<F>(
        &self,
        name: &CreatureName,
        operation: &'static str,
        change: F,
    ) -> Result<Creature, CreatureError>
    where
        F: FnOnce(&mut Creature) -> Result<CreatureUpdate, DomainError>,
    {
        let guard = self.locks.acquire(name).await;
        let result = self.mutate_locked(name, operation, change).await;
        drop(guard);

        // Unknown names must not leave a lock entry behind.
        if matches!(result, Err(CreatureError::NotFound(_))) {
            self.locks.forget(name);
        }
        result
    }

    async fn mutate_locked<F>(
        &self,
        name: &CreatureName,
        operation: &'static str,
        change: F,
    ) -> Result<Creature, CreatureError>
    where
        F: FnOnce(&mut Creature) -> Result<CreatureUpdate, DomainError>,
    {
        let mut creature = self
            .creatures
            .get(name)
            .await?
            .ok_or_else(|| CreatureError::NotFound(name.clone()))?;

        let update = change(&mut creature)?;

        self.creatures
            .apply_update(name, &update)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    CreatureError::NotFound(name.clone())
                } else {
                    CreatureError::StorageFailure(e)
                }
            })?;

        tracing::info!(
            creature = %name,
            operation,
            paths = ?update.paths(),
            "Creature updated"
        );
        Ok(creature)
    }

    /// Set an ability score; governed skills (and passive perception for
    /// wisdom) follow.
    pub async fn set_ability_score(
        &self,
        name: &CreatureName,
        ability: Ability,
        value: i32,
    ) -> Result<Creature, CreatureError> {
        self.mutate(name, "set_ability_score", |creature| {
            let (change, update) = creature.set_ability_score(ability, value)?;
            if change.changed() {
                tracing::debug!(
                    creature = %name,
                    ability = change.ability.as_str(),
                    old_modifier = change.old_modifier,
                    new_modifier = change.new_modifier,
                    "Ability modifier changed"
                );
            }
            Ok(update)
        })
        .await
    }

    /// Set the level; proficiency bonus, every skill and passive perception follow.
    pub async fn set_level(
        &self,
        name: &CreatureName,
        value: i32,
    ) -> Result<Creature, CreatureError> {
        self.mutate(name, "set_level", |creature| creature.set_level(value))
            .await
    }

    /// Add a skill proficiency. The stored value is derived, never supplied.
    pub async fn set_skill_proficiency(
        &self,
        name: &CreatureName,
        skill: Skill,
    ) -> Result<Creature, CreatureError> {
        self.mutate(name, "set_skill_proficiency", |creature| {
            Ok(creature.set_skill_proficiency(skill))
        })
        .await
    }

    pub async fn set_saving_throw_proficiency(
        &self,
        name: &CreatureName,
        save: Ability,
    ) -> Result<Creature, CreatureError> {
        self.mutate(name, "set_saving_throw_proficiency", |creature| {
            Ok(creature.set_saving_throw_proficiency(save))
        })
        .await
    }

    pub async fn set_hit_points(
        &self,
        name: &CreatureName,
        value: i32,
    ) -> Result<Creature, CreatureError> {
        self.mutate(name, "set_hit_points", |creature| {
            Ok(creature.set_hit_points(value))
        })
        .await
    }

    pub async fn set_armor_class(
        &self,
        name: &CreatureName,
        value: i32,
    ) -> Result<Creature, CreatureError> {
        self.mutate(name, "set_armor_class", |creature| {
            Ok(creature.set_armor_class(value))
        })
        .await
    }
}
