//! Creature use cases.
//!
//! Lifecycle and read views live in `manage`; every write that can cascade
//! into derived attributes goes through `update`.

use std::sync::Arc;

mod error;
mod manage;
mod update;

pub use error::CreatureError;
pub use manage::ManageCreature;
pub use update::UpdateCreature;

/// Container for creature use cases.
pub struct CreatureUseCases {
    pub manage: Arc<ManageCreature>,
    pub update: Arc<UpdateCreature>,
}

impl CreatureUseCases {
    pub fn new(manage: Arc<ManageCreature>, update: Arc<UpdateCreature>) -> Self {
        Self { manage, update }
    }
}
