//! Saving throw proficiencies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

use super::ability::Ability;
use crate::error::DomainError;

/// Parse a saving-throw name. Saves share the ability vocabulary.
pub fn parse_saving_throw(name: &str) -> Result<Ability, DomainError> {
    Ability::from_str(name).map_err(|_| DomainError::unknown("saving throw", name))
}

/// Sparse set of proficient saving throws. Presence means "proficient".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavingThrows(BTreeSet<Ability>);

impl SavingThrows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_proficient(&self, save: Ability) -> bool {
        self.0.contains(&save)
    }

    /// Mark `save` proficient. Returns `false` when it already was.
    pub fn add(&mut self, save: Ability) -> bool {
        self.0.insert(save)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Ability> + '_ {
        self.0.iter().copied()
    }
}
