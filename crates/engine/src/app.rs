//! Application state and composition.

use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::ports::{CreatureRepo, RandomPort};
use crate::repositories::{CreatureRepository, RandomService};
use crate::stores::CreatureLocks;
use crate::use_cases::{
    creature::{ManageCreature, UpdateCreature},
    CreatureUseCases, DiceUseCases,
};

/// Main application state.
///
/// Holds the repository modules and use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for repository modules.
pub struct Repositories {
    pub creature: Arc<CreatureRepository>,
    pub random: Arc<RandomService>,
}

/// Container for all use cases.
pub struct UseCases {
    pub creature: CreatureUseCases,
    pub dice: DiceUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    ///
    /// `store_timeout` bounds every call into `creature_repo`.
    pub fn new(
        creature_repo: Arc<dyn CreatureRepo>,
        random: Arc<dyn RandomPort>,
        store_timeout: Duration,
    ) -> Self {
        let creature = Arc::new(CreatureRepository::new(creature_repo, store_timeout));
        let random = Arc::new(RandomService::new(random));
        let locks = Arc::new(CreatureLocks::new());

        let creature_use_cases = CreatureUseCases::new(
            Arc::new(ManageCreature::new(creature.clone(), locks.clone())),
            Arc::new(UpdateCreature::new(creature.clone(), locks)),
        );
        let dice = DiceUseCases::new(random.clone(), creature.clone());

        Self {
            repositories: Repositories { creature, random },
            use_cases: UseCases {
                creature: creature_use_cases,
                dice,
            },
        }
    }
}
