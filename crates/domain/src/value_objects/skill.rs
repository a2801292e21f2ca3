//! Skills and skill proficiencies.
//!
//! A creature only carries entries for skills it is proficient in; each entry
//! stores the governing ability next to the derived value so the cascade can
//! find the skills an ability change touches.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::ability::{Abilities, Ability};
use crate::error::DomainError;

/// The eighteen fixed skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Acrobatics,
    AnimalHandling,
    Arcana,
    Athletics,
    Deception,
    History,
    Insight,
    Intimidation,
    Investigation,
    Medicine,
    Nature,
    Perception,
    Performance,
    Persuasion,
    Religion,
    SleightOfHand,
    Stealth,
    Survival,
}

impl Skill {
    pub const ALL: [Skill; 18] = [
        Self::Acrobatics,
        Self::AnimalHandling,
        Self::Arcana,
        Self::Athletics,
        Self::Deception,
        Self::History,
        Self::Insight,
        Self::Intimidation,
        Self::Investigation,
        Self::Medicine,
        Self::Nature,
        Self::Perception,
        Self::Performance,
        Self::Persuasion,
        Self::Religion,
        Self::SleightOfHand,
        Self::Stealth,
        Self::Survival,
    ];

    /// Snake-case name used in document paths (e.g., "sleight_of_hand").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Acrobatics => "acrobatics",
            Self::AnimalHandling => "animal_handling",
            Self::Arcana => "arcana",
            Self::Athletics => "athletics",
            Self::Deception => "deception",
            Self::History => "history",
            Self::Insight => "insight",
            Self::Intimidation => "intimidation",
            Self::Investigation => "investigation",
            Self::Medicine => "medicine",
            Self::Nature => "nature",
            Self::Perception => "perception",
            Self::Performance => "performance",
            Self::Persuasion => "persuasion",
            Self::Religion => "religion",
            Self::SleightOfHand => "sleight_of_hand",
            Self::Stealth => "stealth",
            Self::Survival => "survival",
        }
    }

    /// The ability whose modifier feeds this skill.
    pub fn governing_ability(&self) -> Ability {
        match self {
            Self::Athletics => Ability::Strength,
            Self::Acrobatics | Self::SleightOfHand | Self::Stealth => Ability::Dexterity,
            Self::Arcana | Self::History | Self::Investigation | Self::Nature | Self::Religion => {
                Ability::Intelligence
            }
            Self::AnimalHandling
            | Self::Insight
            | Self::Medicine
            | Self::Perception
            | Self::Survival => Ability::Wisdom,
            Self::Deception | Self::Intimidation | Self::Performance | Self::Persuasion => {
                Ability::Charisma
            }
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Skill {
    type Err = DomainError;

    /// Case-insensitive; spaces, hyphens and underscores are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .into_iter()
            .find(|skill| skill.as_str().replace('_', "") == normalized)
            .ok_or_else(|| DomainError::unknown("skill", s))
    }
}

/// Stored entry for a proficient skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillProficiency {
    pub value: i32,
    pub governing_ability: Ability,
}

impl SkillProficiency {
    /// Derive the entry for `skill` from the current abilities and proficiency bonus.
    pub fn derive(skill: Skill, abilities: &Abilities, proficiency_bonus: i32) -> Self {
        let governing_ability = skill.governing_ability();
        Self {
            value: abilities.modifier(governing_ability) + proficiency_bonus,
            governing_ability,
        }
    }
}

/// Sparse skill → proficiency mapping. Absence means "not proficient".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Skills(BTreeMap<Skill, SkillProficiency>);

impl Skills {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, skill: Skill) -> Option<&SkillProficiency> {
        self.0.get(&skill)
    }

    pub fn contains(&self, skill: Skill) -> bool {
        self.0.contains_key(&skill)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Skill, &SkillProficiency)> + '_ {
        self.0.iter().map(|(skill, entry)| (*skill, entry))
    }

    /// Insert or overwrite the entry for `skill`.
    pub fn set_proficiency(
        &mut self,
        skill: Skill,
        abilities: &Abilities,
        proficiency_bonus: i32,
    ) -> SkillProficiency {
        let entry = SkillProficiency::derive(skill, abilities, proficiency_bonus);
        self.0.insert(skill, entry);
        entry
    }

    /// Store an entry as-is (replaying a persisted change).
    pub fn insert(&mut self, skill: Skill, entry: SkillProficiency) {
        self.0.insert(skill, entry);
    }

    /// Re-derive every entry governed by `ability`, returning the touched entries.
    pub fn recompute_governed_by(
        &mut self,
        ability: Ability,
        abilities: &Abilities,
        proficiency_bonus: i32,
    ) -> Vec<(Skill, SkillProficiency)> {
        self.recompute_where(abilities, proficiency_bonus, |entry| {
            entry.governing_ability == ability
        })
    }

    /// Re-derive every entry, returning all of them.
    pub fn recompute_all(
        &mut self,
        abilities: &Abilities,
        proficiency_bonus: i32,
    ) -> Vec<(Skill, SkillProficiency)> {
        self.recompute_where(abilities, proficiency_bonus, |_| true)
    }

    fn recompute_where(
        &mut self,
        abilities: &Abilities,
        proficiency_bonus: i32,
        mut filter: impl FnMut(&SkillProficiency) -> bool,
    ) -> Vec<(Skill, SkillProficiency)> {
        let mut touched = Vec::new();
        for (skill, entry) in self.0.iter_mut() {
            if filter(entry) {
                *entry = SkillProficiency::derive(*skill, abilities, proficiency_bonus);
                touched.push((*skill, *entry));
            }
        }
        touched
    }
}
