//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Creature storage (in-memory or SQLite)
//! - Clock/Random (for testing)

mod error;
mod repos;
mod testing;

pub use error::RepoError;
pub use repos::CreatureRepo;
pub use testing::{ClockPort, RandomPort};

#[cfg(test)]
pub use repos::MockCreatureRepo;
#[cfg(test)]
pub use testing::MockRandomPort;
