//! Targeted partial updates.
//!
//! A `CreatureUpdate` lists exactly the fields one mutation touched: the base
//! field plus every derived field it cascaded into. Stores apply it without
//! rewriting the rest of the record.

use serde::{Deserialize, Serialize};

use super::ability::{Ability, AbilityScore};
use super::level::Level;
use super::skill::{Skill, SkillProficiency};

/// One touched field and its new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum FieldUpdate {
    Level { value: Level },
    ProficiencyBonus { value: i32 },
    HitPoints { value: i32 },
    ArmorClass { value: i32 },
    PassivePerception { value: i32 },
    Ability { ability: Ability, slot: AbilityScore },
    Skill { skill: Skill, entry: SkillProficiency },
    /// Marks a saving throw proficient; there is no removal.
    SavingThrow { save: Ability },
}

impl FieldUpdate {
    /// Dotted document path of the field (e.g. "abilities.wisdom", "skills.stealth").
    pub fn path(&self) -> String {
        match self {
            Self::Level { .. } => "level".to_string(),
            Self::ProficiencyBonus { .. } => "proficiency_bonus".to_string(),
            Self::HitPoints { .. } => "hit_points".to_string(),
            Self::ArmorClass { .. } => "armor_class".to_string(),
            Self::PassivePerception { .. } => "passive_perception".to_string(),
            Self::Ability { ability, .. } => format!("abilities.{}", ability.as_str()),
            Self::Skill { skill, .. } => format!("skills.{}", skill.as_str()),
            Self::SavingThrow { save } => format!("saving_throws.{}", save.as_str()),
        }
    }
}

/// Ordered set of field writes produced by a single mutation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatureUpdate(Vec<FieldUpdate>);

impl CreatureUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: FieldUpdate) {
        self.0.push(field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Paths in write order.
    pub fn paths(&self) -> Vec<String> {
        self.0.iter().map(FieldUpdate::path).collect()
    }
}

impl FromIterator<FieldUpdate> for CreatureUpdate {
    fn from_iter<I: IntoIterator<Item = FieldUpdate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CreatureUpdate {
    type Item = &'a FieldUpdate;
    type IntoIter = std::slice::Iter<'a, FieldUpdate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
