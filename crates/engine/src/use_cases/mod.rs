//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.

pub mod creature;
pub mod dice;

pub use creature::{CreatureError, CreatureUseCases};
pub use dice::DiceUseCases;
