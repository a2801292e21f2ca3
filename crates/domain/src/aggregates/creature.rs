//! Creature aggregate - the character sheet and its derived-attribute rules
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: derived values (modifiers, proficiency bonus, skill
//!   values, passive perception) can only change through the mutation methods
//! - **Newtypes**: `CreatureName`, `Level` and `AbilityScore` are valid by construction
//! - **Change descriptions**: every mutation returns the `CreatureUpdate` it
//!   performed, which is what stores persist

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;
use crate::value_objects::{
    Abilities, Ability, AbilityScore, CreatureName, CreatureUpdate, FieldUpdate, Level,
    ModifierChange, SavingThrows, Skill, SkillProficiency, Skills,
};

/// Base of every passive score.
const PASSIVE_BASE: i32 = 10;

/// A tracked creature.
///
/// # Invariants
///
/// - Every ability modifier matches its score (enforced by `AbilityScore`)
/// - `proficiency_bonus` matches `level`
/// - Every skill entry equals `modifier(governing ability) + proficiency_bonus`
/// - `passive_perception` equals `10 + wisdom modifier (+ proficiency bonus if
///   proficient in perception)`
///
/// # Example
///
/// ```
/// use creature_domain::aggregates::Creature;
/// use creature_domain::value_objects::{Ability, CreatureName};
///
/// let mut aria = Creature::new(CreatureName::new("Aria").unwrap());
/// aria.set_ability_score(Ability::Strength, 16).unwrap();
///
/// assert_eq!(aria.abilities().modifier(Ability::Strength), 3);
/// assert_eq!(aria.proficiency_bonus(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creature {
    name: CreatureName,
    level: Level,
    proficiency_bonus: i32,
    hit_points: i32,
    armor_class: i32,
    abilities: Abilities,
    skills: Skills,
    saving_throws: SavingThrows,
    passive_perception: i32,
}

impl Creature {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Create a level 1 creature with default abilities and no proficiencies.
    pub fn new(name: CreatureName) -> Self {
        let level = Level::default();
        let abilities = Abilities::default();
        let proficiency_bonus = level.proficiency_bonus();
        let skills = Skills::new();
        let passive_perception =
            compute_passive_perception(&abilities, &skills, proficiency_bonus);
        Self {
            name,
            level,
            proficiency_bonus,
            hit_points: 0,
            armor_class: 0,
            abilities,
            skills,
            saving_throws: SavingThrows::new(),
            passive_perception,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn name(&self) -> &CreatureName {
        &self.name
    }

    #[inline]
    pub fn level(&self) -> Level {
        self.level
    }

    #[inline]
    pub fn proficiency_bonus(&self) -> i32 {
        self.proficiency_bonus
    }

    #[inline]
    pub fn hit_points(&self) -> i32 {
        self.hit_points
    }

    #[inline]
    pub fn armor_class(&self) -> i32 {
        self.armor_class
    }

    #[inline]
    pub fn abilities(&self) -> &Abilities {
        &self.abilities
    }

    #[inline]
    pub fn skills(&self) -> &Skills {
        &self.skills
    }

    #[inline]
    pub fn saving_throws(&self) -> &SavingThrows {
        &self.saving_throws
    }

    #[inline]
    pub fn passive_perception(&self) -> i32 {
        self.passive_perception
    }

    // =========================================================================
    // Check Bonuses
    // =========================================================================

    /// Flat bonus for a raw ability check.
    pub fn ability_check_bonus(&self, ability: Ability) -> i32 {
        self.abilities.modifier(ability)
    }

    /// Stored skill value when proficient, otherwise the governing modifier.
    pub fn skill_check_bonus(&self, skill: Skill) -> i32 {
        self.skills
            .get(skill)
            .map(|entry| entry.value)
            .unwrap_or_else(|| self.abilities.modifier(skill.governing_ability()))
    }

    pub fn saving_throw_bonus(&self, save: Ability) -> i32 {
        let proficiency = if self.saving_throws.is_proficient(save) {
            self.proficiency_bonus
        } else {
            0
        };
        self.abilities.modifier(save) + proficiency
    }

    // =========================================================================
    // Mutation Methods
    // =========================================================================

    /// Set an ability score, returning the modifier change alongside the update.
    ///
    /// Cascades into every skill governed by the ability and, for wisdom, into
    /// passive perception. The cascade runs even when the modifier is unchanged.
    pub fn set_ability_score(
        &mut self,
        ability: Ability,
        value: i32,
    ) -> Result<(ModifierChange, CreatureUpdate), DomainError> {
        let change = self.abilities.set_score(ability, value)?;

        let mut update = CreatureUpdate::new();
        update.push(FieldUpdate::Ability {
            ability,
            slot: self.abilities.get(ability),
        });
        for (skill, entry) in
            self.skills
                .recompute_governed_by(ability, &self.abilities, self.proficiency_bonus)
        {
            update.push(FieldUpdate::Skill { skill, entry });
        }
        if ability == Ability::Wisdom {
            update.push(self.refresh_passive_perception());
        }
        Ok((change, update))
    }

    /// Set the level, cascading into proficiency bonus, every skill value and
    /// passive perception.
    pub fn set_level(&mut self, value: i32) -> Result<CreatureUpdate, DomainError> {
        let level = Level::new(value)?;
        self.level = level;
        self.proficiency_bonus = level.proficiency_bonus();

        let mut update = CreatureUpdate::new();
        update.push(FieldUpdate::Level { value: level });
        update.push(FieldUpdate::ProficiencyBonus {
            value: self.proficiency_bonus,
        });
        for (skill, entry) in self
            .skills
            .recompute_all(&self.abilities, self.proficiency_bonus)
        {
            update.push(FieldUpdate::Skill { skill, entry });
        }
        update.push(self.refresh_passive_perception());
        Ok(update)
    }

    /// Mark a skill proficient (idempotent upsert of its derived entry).
    pub fn set_skill_proficiency(&mut self, skill: Skill) -> CreatureUpdate {
        let entry = self
            .skills
            .set_proficiency(skill, &self.abilities, self.proficiency_bonus);

        let mut update = CreatureUpdate::new();
        update.push(FieldUpdate::Skill { skill, entry });
        if skill == Skill::Perception {
            update.push(self.refresh_passive_perception());
        }
        update
    }

    pub fn set_saving_throw_proficiency(&mut self, save: Ability) -> CreatureUpdate {
        self.saving_throws.add(save);
        [FieldUpdate::SavingThrow { save }].into_iter().collect()
    }

    pub fn set_hit_points(&mut self, value: i32) -> CreatureUpdate {
        self.hit_points = value;
        [FieldUpdate::HitPoints { value }].into_iter().collect()
    }

    pub fn set_armor_class(&mut self, value: i32) -> CreatureUpdate {
        self.armor_class = value;
        [FieldUpdate::ArmorClass { value }].into_iter().collect()
    }

    fn refresh_passive_perception(&mut self) -> FieldUpdate {
        self.passive_perception =
            compute_passive_perception(&self.abilities, &self.skills, self.proficiency_bonus);
        FieldUpdate::PassivePerception {
            value: self.passive_perception,
        }
    }

    // =========================================================================
    // Persistence Support
    // =========================================================================

    /// Replay a change produced by one of the mutation methods.
    ///
    /// Writes each field verbatim; applying the same update twice yields the
    /// same creature.
    pub fn apply_update(&mut self, update: &CreatureUpdate) {
        for field in update {
            match *field {
                FieldUpdate::Level { value } => self.level = value,
                FieldUpdate::ProficiencyBonus { value } => self.proficiency_bonus = value,
                FieldUpdate::HitPoints { value } => self.hit_points = value,
                FieldUpdate::ArmorClass { value } => self.armor_class = value,
                FieldUpdate::PassivePerception { value } => self.passive_perception = value,
                FieldUpdate::Ability { ability, slot } => self.abilities.replace(ability, slot),
                FieldUpdate::Skill { skill, entry } => self.skills.insert(skill, entry),
                FieldUpdate::SavingThrow { save } => {
                    self.saving_throws.add(save);
                }
            }
        }
    }

    /// Whether every derived field agrees with the base fields it depends on.
    pub fn is_consistent(&self) -> bool {
        if self.proficiency_bonus != self.level.proficiency_bonus() {
            return false;
        }
        let skills_ok = self.skills.iter().all(|(skill, entry)| {
            *entry == SkillProficiency::derive(skill, &self.abilities, self.proficiency_bonus)
        });
        skills_ok
            && self.passive_perception
                == compute_passive_perception(&self.abilities, &self.skills, self.proficiency_bonus)
    }
}

/// 10 + wisdom modifier, plus the proficiency bonus when proficient in perception.
fn compute_passive_perception(abilities: &Abilities, skills: &Skills, proficiency_bonus: i32) -> i32 {
    let proficiency = if skills.contains(Skill::Perception) {
        proficiency_bonus
    } else {
        0
    };
    PASSIVE_BASE + abilities.modifier(Ability::Wisdom) + proficiency
}

// ============================================================================
// Serde Implementation
// ============================================================================

/// Intermediate format for serialization that matches the stored document
#[derive(Serialize, Deserialize)]
struct CreatureWireFormat {
    name: CreatureName,
    level: Level,
    proficiency_bonus: i32,
    #[serde(default)]
    hit_points: i32,
    #[serde(default)]
    armor_class: i32,
    #[serde(default)]
    abilities: Abilities,
    #[serde(default)]
    skills: Skills,
    #[serde(default)]
    saving_throws: SavingThrows,
    passive_perception: i32,
}

impl Serialize for Creature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let wire = CreatureWireFormat {
            name: self.name.clone(),
            level: self.level,
            proficiency_bonus: self.proficiency_bonus,
            hit_points: self.hit_points,
            armor_class: self.armor_class,
            abilities: self.abilities,
            skills: self.skills.clone(),
            saving_throws: self.saving_throws.clone(),
            passive_perception: self.passive_perception,
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Creature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = CreatureWireFormat::deserialize(deserializer)?;

        Ok(Creature {
            name: wire.name,
            level: wire.level,
            proficiency_bonus: wire.proficiency_bonus,
            hit_points: wire.hit_points,
            armor_class: wire.armor_class,
            abilities: wire.abilities,
            skills: wire.skills,
            saving_throws: wire.saving_throws,
            passive_perception: wire.passive_perception,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn aria() -> Creature {
        Creature::new(CreatureName::new("Aria").unwrap())
    }

    mod constructor {
        use super::*;

        #[test]
        fn new_creature_has_level_one_defaults() {
            let creature = aria();
            assert_eq!(creature.name().as_str(), "Aria");
            assert_eq!(creature.level().value(), 1);
            assert_eq!(creature.proficiency_bonus(), 2);
            assert_eq!(creature.hit_points(), 0);
            assert_eq!(creature.armor_class(), 0);
            assert!(creature.skills().is_empty());
            assert!(creature.saving_throws().is_empty());
            assert_eq!(creature.passive_perception(), 10);
            for (_, slot) in creature.abilities().iter() {
                assert_eq!(slot, AbilityScore::default());
            }
            assert!(creature.is_consistent());
        }
    }

    mod cascade {
        use super::*;

        #[test]
        fn dexterity_change_shifts_only_dexterity_skills() {
            let mut creature = aria();
            creature.set_skill_proficiency(Skill::Stealth);
            creature.set_skill_proficiency(Skill::Athletics);
            let stealth_before = creature.skills().get(Skill::Stealth).unwrap().value;
            let athletics_before = creature.skills().get(Skill::Athletics).unwrap().value;

            let (_, update) = creature.set_ability_score(Ability::Dexterity, 16).unwrap();

            assert_eq!(update.paths(), vec!["abilities.dexterity", "skills.stealth"]);
            assert_eq!(
                creature.skills().get(Skill::Stealth).unwrap().value,
                stealth_before + 3
            );
            assert_eq!(
                creature.skills().get(Skill::Athletics).unwrap().value,
                athletics_before
            );
            assert!(creature.is_consistent());
        }

        #[test]
        fn out_of_range_score_leaves_creature_unchanged() {
            let mut creature = aria();
            creature.set_skill_proficiency(Skill::Athletics);
            let before = creature.clone();

            let err = creature
                .set_ability_score(Ability::Strength, 31)
                .unwrap_err();

            assert!(matches!(err, DomainError::OutOfRange { .. }));
            assert_eq!(creature, before);
        }

        #[test]
        fn wisdom_change_refreshes_passive_perception() {
            let mut creature = aria();
            let (change, update) = creature.set_ability_score(Ability::Wisdom, 14).unwrap();
            assert_eq!((change.old_modifier, change.new_modifier), (0, 2));
            assert!(change.changed());
            assert_eq!(creature.passive_perception(), 12);
            assert_eq!(
                update.paths(),
                vec!["abilities.wisdom", "passive_perception"]
            );
        }

        #[test]
        fn perception_proficiency_adds_proficiency_bonus_to_passive() {
            let mut creature = aria();
            creature.set_ability_score(Ability::Wisdom, 14).unwrap();
            assert_eq!(creature.passive_perception(), 12);

            let update = creature.set_skill_proficiency(Skill::Perception);

            assert_eq!(creature.passive_perception(), 14);
            assert_eq!(update.paths(), vec!["skills.perception", "passive_perception"]);
        }

        #[test]
        fn skill_proficiency_is_idempotent() {
            let mut creature = aria();
            let first = creature.set_skill_proficiency(Skill::Arcana);
            let snapshot = creature.clone();
            let second = creature.set_skill_proficiency(Skill::Arcana);
            assert_eq!(first, second);
            assert_eq!(creature, snapshot);
        }

        #[test]
        fn level_change_touches_bonus_skills_and_passive() {
            let mut creature = aria();
            creature.set_skill_proficiency(Skill::Stealth);
            creature.set_skill_proficiency(Skill::History);

            let update = creature.set_level(9).unwrap();

            assert_eq!(creature.proficiency_bonus(), 4);
            assert_eq!(
                update.paths(),
                vec![
                    "level",
                    "proficiency_bonus",
                    "skills.history",
                    "skills.stealth",
                    "passive_perception"
                ]
            );
            assert_eq!(creature.skills().get(Skill::Stealth).unwrap().value, 4);
            assert!(creature.is_consistent());
        }

        #[test]
        fn invalid_level_leaves_creature_unchanged() {
            let mut creature = aria();
            let before = creature.clone();
            assert!(creature.set_level(0).is_err());
            assert!(creature.set_level(21).is_err());
            assert_eq!(creature, before);
        }

        #[test]
        fn free_fields_touch_only_themselves() {
            let mut creature = aria();
            assert_eq!(creature.set_hit_points(27).paths(), vec!["hit_points"]);
            assert_eq!(creature.set_armor_class(15).paths(), vec!["armor_class"]);
            assert_eq!(
                creature
                    .set_saving_throw_proficiency(Ability::Dexterity)
                    .paths(),
                vec!["saving_throws.dexterity"]
            );
            assert_eq!(creature.hit_points(), 27);
            assert_eq!(creature.armor_class(), 15);
            assert!(creature.saving_throws().is_proficient(Ability::Dexterity));
        }
    }

    mod checks {
        use super::*;

        #[test]
        fn bonuses_follow_proficiency() {
            let mut creature = aria();
            creature.set_ability_score(Ability::Dexterity, 14).unwrap();
            assert_eq!(creature.skill_check_bonus(Skill::Stealth), 2);
            assert_eq!(creature.saving_throw_bonus(Ability::Dexterity), 2);

            creature.set_skill_proficiency(Skill::Stealth);
            creature.set_saving_throw_proficiency(Ability::Dexterity);

            assert_eq!(creature.skill_check_bonus(Skill::Stealth), 4);
            assert_eq!(creature.saving_throw_bonus(Ability::Dexterity), 4);
            assert_eq!(creature.ability_check_bonus(Ability::Dexterity), 2);
        }
    }

    mod persistence {
        use super::*;

        #[test]
        fn replaying_an_update_reproduces_the_mutation() {
            let mut stored = aria();
            stored.set_skill_proficiency(Skill::Stealth);
            let mut live = stored.clone();

            let (_, update) = live.set_ability_score(Ability::Dexterity, 18).unwrap();
            stored.apply_update(&update);
            assert_eq!(stored, live);

            stored.apply_update(&update);
            assert_eq!(stored, live);
        }

        #[test]
        fn detects_drifted_derived_fields() {
            let mut creature = aria();
            creature.set_skill_proficiency(Skill::Stealth);
            creature.apply_update(
                &[FieldUpdate::Level {
                    value: Level::new(5).unwrap(),
                }]
                .into_iter()
                .collect(),
            );
            assert!(!creature.is_consistent());
        }

        #[test]
        fn serde_round_trip_keeps_document_layout() {
            let mut creature = aria();
            creature.set_skill_proficiency(Skill::Athletics);
            creature.set_saving_throw_proficiency(Ability::Dexterity);

            let json = serde_json::to_value(&creature).unwrap();
            assert_eq!(json["name"], "Aria");
            assert_eq!(json["proficiency_bonus"], 2);
            assert_eq!(json["abilities"]["strength"]["score"], 10);
            assert_eq!(json["skills"]["athletics"]["governing_ability"], "strength");
            assert_eq!(json["saving_throws"][0], "dexterity");

            let back: Creature = serde_json::from_value(json).unwrap();
            assert_eq!(back, creature);
        }
    }

    #[test]
    fn aria_levels_up() {
        let mut creature = aria();
        assert_eq!(creature.level().value(), 1);
        assert_eq!(creature.proficiency_bonus(), 2);

        creature.set_ability_score(Ability::Strength, 16).unwrap();
        assert_eq!(creature.abilities().modifier(Ability::Strength), 3);

        creature.set_skill_proficiency(Skill::Stealth);
        let stealth_before = creature.skills().get(Skill::Stealth).unwrap().value;

        creature.set_level(5).unwrap();
        assert_eq!(creature.proficiency_bonus(), 3);
        assert_eq!(
            creature.skills().get(Skill::Stealth).unwrap().value,
            stealth_before + 1
        );

        creature.set_skill_proficiency(Skill::Athletics);
        assert_eq!(creature.skills().get(Skill::Athletics).unwrap().value, 6);
        assert!(creature.is_consistent());
    }
}
