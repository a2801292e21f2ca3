//! Character level and the proficiency bonus it grants.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

pub const MIN_LEVEL: i32 = 1;
pub const MAX_LEVEL: i32 = 20;

/// Proficiency bonus for levels 1..=20, indexed by `level - 1`.
const PROFICIENCY_TABLE: [i32; 20] = [2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 6, 6, 6, 6];

/// A creature level in `[1, 20]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Level(i32);

impl Level {
    pub fn new(value: i32) -> Result<Self, DomainError> {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&value) {
            return Err(DomainError::out_of_range("level", value, MIN_LEVEL, MAX_LEVEL));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    /// Proficiency bonus granted at this level.
    pub fn proficiency_bonus(&self) -> i32 {
        PROFICIENCY_TABLE[(self.0 - MIN_LEVEL) as usize]
    }
}

impl Default for Level {
    fn default() -> Self {
        Self(MIN_LEVEL)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for Level {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Level> for i32 {
    fn from(level: Level) -> i32 {
        level.0
    }
}

/// Map a level to its proficiency bonus via the fixed table.
pub fn level_to_proficiency_bonus(level: i32) -> Result<i32, DomainError> {
    Level::new(level).map(|l| l.proficiency_bonus())
}
