//! Creature store adapters.

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryCreatureRepo;
pub use sqlite::SqliteCreatureRepo;
