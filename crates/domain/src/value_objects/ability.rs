//! Ability scores and modifiers.
//!
//! Provides type safety for ability references instead of using magic strings
//! like "strength" or "STR", and keeps every modifier in lockstep with its score.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Lowest legal ability score.
pub const MIN_ABILITY_SCORE: i32 = 1;
/// Highest legal ability score.
pub const MAX_ABILITY_SCORE: i32 = 30;
/// Score every ability starts at when a creature is created.
pub const DEFAULT_ABILITY_SCORE: i32 = 10;

/// Modifier for scores 1..=30, indexed by `score - 1`.
const MODIFIER_TABLE: [i32; 30] = [
    -5, -4, -4, -3, -3, -2, -2, -1, -1, 0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9,
    9, 10,
];

/// The six abilities every creature has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    /// Strength - physical power
    Strength,
    /// Dexterity - agility and reflexes
    Dexterity,
    /// Constitution - endurance and health
    Constitution,
    /// Intelligence - reasoning and memory
    Intelligence,
    /// Wisdom - perception and insight
    Wisdom,
    /// Charisma - force of personality
    Charisma,
}

impl Ability {
    /// All abilities in sheet order.
    pub const ALL: [Ability; 6] = [
        Self::Strength,
        Self::Dexterity,
        Self::Constitution,
        Self::Intelligence,
        Self::Wisdom,
        Self::Charisma,
    ];

    /// Returns the lowercase name used in document paths (e.g., "strength").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Dexterity => "dexterity",
            Self::Constitution => "constitution",
            Self::Intelligence => "intelligence",
            Self::Wisdom => "wisdom",
            Self::Charisma => "charisma",
        }
    }

    /// Returns the short uppercase abbreviation (e.g., "STR", "DEX").
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Dexterity => "DEX",
            Self::Constitution => "CON",
            Self::Intelligence => "INT",
            Self::Wisdom => "WIS",
            Self::Charisma => "CHA",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Ability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "str" | "strength" => Ok(Self::Strength),
            "dex" | "dexterity" => Ok(Self::Dexterity),
            "con" | "constitution" => Ok(Self::Constitution),
            "int" | "intelligence" => Ok(Self::Intelligence),
            "wis" | "wisdom" => Ok(Self::Wisdom),
            "cha" | "charisma" => Ok(Self::Charisma),
            _ => Err(DomainError::unknown("ability", s)),
        }
    }
}

/// Map a score to its modifier via the fixed table.
///
/// Fails with `OutOfRange` for scores outside `[1, 30]`.
pub fn score_to_modifier(score: i32) -> Result<i32, DomainError> {
    if !(MIN_ABILITY_SCORE..=MAX_ABILITY_SCORE).contains(&score) {
        return Err(DomainError::out_of_range(
            "ability score",
            score,
            MIN_ABILITY_SCORE,
            MAX_ABILITY_SCORE,
        ));
    }
    Ok(MODIFIER_TABLE[(score - MIN_ABILITY_SCORE) as usize])
}

/// A single ability slot: the score and the modifier derived from it.
///
/// Fields are private so the modifier can never drift from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AbilityScoreWire")]
pub struct AbilityScore {
    score: i32,
    modifier: i32,
}

#[derive(Deserialize)]
struct AbilityScoreWire {
    score: i32,
}

impl TryFrom<AbilityScoreWire> for AbilityScore {
    type Error = DomainError;

    fn try_from(wire: AbilityScoreWire) -> Result<Self, Self::Error> {
        Self::new(wire.score)
    }
}

impl AbilityScore {
    pub fn new(score: i32) -> Result<Self, DomainError> {
        let modifier = score_to_modifier(score)?;
        Ok(Self { score, modifier })
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn modifier(&self) -> i32 {
        self.modifier
    }
}

impl Default for AbilityScore {
    fn default() -> Self {
        Self {
            score: DEFAULT_ABILITY_SCORE,
            modifier: 0,
        }
    }
}

/// Outcome of a successful score write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifierChange {
    pub ability: Ability,
    pub old_modifier: i32,
    pub new_modifier: i32,
}

impl ModifierChange {
    pub fn changed(&self) -> bool {
        self.old_modifier != self.new_modifier
    }
}

/// The six ability slots of a creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Abilities {
    strength: AbilityScore,
    dexterity: AbilityScore,
    constitution: AbilityScore,
    intelligence: AbilityScore,
    wisdom: AbilityScore,
    charisma: AbilityScore,
}

impl Abilities {
    pub fn get(&self, ability: Ability) -> AbilityScore {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        self.get(ability).modifier()
    }

    fn slot_mut(&mut self, ability: Ability) -> &mut AbilityScore {
        match ability {
            Ability::Strength => &mut self.strength,
            Ability::Dexterity => &mut self.dexterity,
            Ability::Constitution => &mut self.constitution,
            Ability::Intelligence => &mut self.intelligence,
            Ability::Wisdom => &mut self.wisdom,
            Ability::Charisma => &mut self.charisma,
        }
    }

    /// Set an ability score, recomputing its modifier.
    ///
    /// On `OutOfRange` the slot is left untouched.
    pub fn set_score(&mut self, ability: Ability, value: i32) -> Result<ModifierChange, DomainError> {
        let next = AbilityScore::new(value).map_err(|_| {
            DomainError::out_of_range(
                ability.as_str(),
                value,
                MIN_ABILITY_SCORE,
                MAX_ABILITY_SCORE,
            )
        })?;
        let slot = self.slot_mut(ability);
        let old_modifier = slot.modifier();
        *slot = next;
        Ok(ModifierChange {
            ability,
            old_modifier,
            new_modifier: next.modifier(),
        })
    }

    /// Overwrite a slot with an already validated score.
    pub fn replace(&mut self, ability: Ability, slot: AbilityScore) {
        *self.slot_mut(ability) = slot;
    }

    /// Iterate over `(ability, slot)` in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = (Ability, AbilityScore)> + '_ {
        Ability::ALL.into_iter().map(move |a| (a, self.get(a)))
    }
}
