//! Creature Manager domain
//!
//! Pure, synchronous rules for a tabletop character sheet whose derived
//! attributes (modifiers, proficiency bonus, skill values, passive perception)
//! must stay consistent with the base attributes they depend on, plus the dice
//! engine. Randomness is injected by callers.

pub mod aggregates;
pub mod error;
pub mod value_objects;

pub use aggregates::Creature;
pub use error::DomainError;

pub use value_objects::{
    level_to_proficiency_bonus, parse_saving_throw, roll_die, roll_pool, roll_with_advantage,
    roll_with_disadvantage, roll_with_inspiration, score_to_modifier, Abilities, Ability,
    AbilityScore, CheckResult, CreatureName, CreatureUpdate, DicePool, Die, FieldUpdate, Level,
    ModifierChange, RollMode, RollResult, SavingThrows, Skill, SkillProficiency, Skills,
};
