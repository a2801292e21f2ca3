//! Repository modules - Data access wrappers around port traits.
//!
//! Each repository wraps a port trait and provides the interface
//! use cases rely on (deadlines, roll closures).

pub mod creature;
pub mod random;

pub use creature::CreatureRepository;
pub use random::RandomService;
