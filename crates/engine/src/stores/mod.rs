//! In-memory state storage modules.
//!
//! Stores manage runtime state that doesn't belong in the database:
//! - `CreatureLocks` - per-creature write serialization

pub mod creature_locks;

pub use creature_locks::CreatureLocks;
