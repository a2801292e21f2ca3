//! Value objects - Immutable objects defined by their attributes

mod ability;
mod creature_update;
mod dice;
mod level;
mod names;
mod saving_throw;
mod skill;

pub use ability::{
    score_to_modifier, Abilities, Ability, AbilityScore, ModifierChange, DEFAULT_ABILITY_SCORE,
    MAX_ABILITY_SCORE, MIN_ABILITY_SCORE,
};
pub use creature_update::{CreatureUpdate, FieldUpdate};
pub use dice::{
    roll_die, roll_pool, roll_with_advantage, roll_with_disadvantage, roll_with_inspiration,
    CheckResult, DicePool, Die, RollMode, RollResult, MAX_DICE_COUNT,
};
pub use level::{level_to_proficiency_bonus, Level, MAX_LEVEL, MIN_LEVEL};
pub use names::CreatureName;
pub use saving_throw::{parse_saving_throw, SavingThrows};
pub use skill::{Skill, SkillProficiency, Skills};
