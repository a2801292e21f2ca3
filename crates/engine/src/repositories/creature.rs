//! Creature storage wrapper.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use creature_domain::{Creature, CreatureName, CreatureUpdate};

use crate::infrastructure::ports::{CreatureRepo, RepoError};

/// Creature store access with a deadline on every call.
///
/// A call that outlives the deadline fails with `RepoError::Timeout`.
pub struct CreatureRepository {
    repo: Arc<dyn CreatureRepo>,
    timeout: Duration,
}

impl CreatureRepository {
    pub fn new(repo: Arc<dyn CreatureRepo>, timeout: Duration) -> Self {
        Self { repo, timeout }
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, RepoError>>,
    ) -> Result<T, RepoError> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    operation,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Store call timed out"
                );
                Err(RepoError::timeout(operation))
            }
        }
    }

    pub async fn get(&self, name: &CreatureName) -> Result<Option<Creature>, RepoError> {
        self.bounded("get_creature", self.repo.get(name)).await
    }

    pub async fn insert(&self, creature: &Creature) -> Result<bool, RepoError> {
        self.bounded("insert_creature", self.repo.insert(creature))
            .await
    }

    pub async fn apply_update(
        &self,
        name: &CreatureName,
        update: &CreatureUpdate,
    ) -> Result<(), RepoError> {
        self.bounded("update_creature", self.repo.apply_update(name, update))
            .await
    }

    pub async fn delete(&self, name: &CreatureName) -> Result<bool, RepoError> {
        self.bounded("delete_creature", self.repo.delete(name)).await
    }
}
