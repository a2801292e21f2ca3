//! Per-creature mutation locks.

use std::sync::Arc;

use creature_domain::CreatureName;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per creature name.
///
/// Held from load to write so two mutations of the same creature cannot
/// interleave. Different creatures never contend.
#[derive(Default)]
pub struct CreatureLocks {
    locks: DashMap<CreatureName, Arc<Mutex<()>>>,
}

impl CreatureLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `name`.
    pub async fn acquire(&self, name: &CreatureName) -> OwnedMutexGuard<()> {
        // Clone the Arc out so the shard guard is released before awaiting.
        let lock = self
            .locks
            .entry(name.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }

    /// Drop the entry for a deleted creature once nobody else holds it.
    pub fn forget(&self, name: &CreatureName) {
        self.locks
            .remove_if(name, |_, lock| Arc::strong_count(lock) == 1);
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
