//! In-memory creature store.

use std::collections::HashMap;

use async_trait::async_trait;
use creature_domain::{Creature, CreatureName, CreatureUpdate};
use tokio::sync::RwLock;

use crate::infrastructure::ports::{CreatureRepo, RepoError};

/// HashMap-backed store used by tests and when no database is configured.
#[derive(Default)]
pub struct InMemoryCreatureRepo {
    creatures: RwLock<HashMap<CreatureName, Creature>>,
}

impl InMemoryCreatureRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CreatureRepo for InMemoryCreatureRepo {
    async fn get(&self, name: &CreatureName) -> Result<Option<Creature>, RepoError> {
        Ok(self.creatures.read().await.get(name).cloned())
    }

    async fn insert(&self, creature: &Creature) -> Result<bool, RepoError> {
        let mut creatures = self.creatures.write().await;
        if creatures.contains_key(creature.name()) {
            return Ok(false);
        }
        creatures.insert(creature.name().clone(), creature.clone());
        Ok(true)
    }

    async fn apply_update(
        &self,
        name: &CreatureName,
        update: &CreatureUpdate,
    ) -> Result<(), RepoError> {
        let mut creatures = self.creatures.write().await;
        let creature = creatures
            .get_mut(name)
            .ok_or_else(|| RepoError::not_found("Creature", name))?;
        creature.apply_update(update);
        Ok(())
    }

    async fn delete(&self, name: &CreatureName) -> Result<bool, RepoError> {
        Ok(self.creatures.write().await.remove(name).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use creature_domain::Ability;

    fn aria() -> Creature {
        Creature::new(CreatureName::new("Aria").unwrap())
    }

    #[tokio::test]
    async fn insert_is_insert_if_absent() {
        let repo = InMemoryCreatureRepo::new();
        assert!(repo.insert(&aria()).await.unwrap());
        assert!(!repo.insert(&aria()).await.unwrap());
    }

    #[tokio::test]
    async fn apply_update_writes_only_listed_fields() {
        let repo = InMemoryCreatureRepo::new();
        let mut stored = aria();
        stored.set_hit_points(30);
        repo.insert(&stored).await.unwrap();

        let mut live = stored.clone();
        let (_, update) = live.set_ability_score(Ability::Wisdom, 16).unwrap();
        repo.apply_update(stored.name(), &update).await.unwrap();

        let loaded = repo.get(stored.name()).await.unwrap().unwrap();
        assert_eq!(loaded, live);
        assert_eq!(loaded.hit_points(), 30);
    }

    #[tokio::test]
    async fn apply_update_on_missing_creature_is_not_found() {
        let repo = InMemoryCreatureRepo::new();
        let err = repo
            .apply_update(&CreatureName::new("Ghost").unwrap(), &CreatureUpdate::new())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let repo = InMemoryCreatureRepo::new();
        repo.insert(&aria()).await.unwrap();
        assert!(repo.delete(aria().name()).await.unwrap());
        assert!(!repo.delete(aria().name()).await.unwrap());
        assert!(repo.get(aria().name()).await.unwrap().is_none());
    }
}
