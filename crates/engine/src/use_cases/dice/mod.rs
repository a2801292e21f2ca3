//! Dice use cases.
//!
//! Ad-hoc rolls never touch persisted state. Creature checks read a snapshot
//! and add the relevant bonus to a d20.

use std::sync::Arc;

use creature_domain::{
    Ability, CheckResult, Creature, CreatureName, DicePool, Die, DomainError, RollMode, RollResult,
    Skill,
};

use crate::repositories::{CreatureRepository, RandomService};
use crate::use_cases::creature::CreatureError;

/// Die used when a roll request names none.
pub const DEFAULT_DIE: Die = Die::D20;
/// Dice count used when a roll request names none.
pub const DEFAULT_COUNT: i64 = 1;

/// Container for dice use cases.
pub struct DiceUseCases {
    random: Arc<RandomService>,
    creatures: Arc<CreatureRepository>,
}

impl DiceUseCases {
    pub fn new(random: Arc<RandomService>, creatures: Arc<CreatureRepository>) -> Self {
        Self { random, creatures }
    }

    fn roll_pool_with(&self, pool: DicePool, mode: RollMode) -> RollResult {
        let mut roller = self.random.roller();
        let result = pool.roll_with(mode, &mut roller);
        tracing::debug!(breakdown = %result.breakdown(), "Dice rolled");
        result
    }

    // =========================================================================
    // Ad-hoc Rolls
    // =========================================================================

    pub fn roll_die(&self, sides: i64) -> Result<RollResult, DomainError> {
        let die = Die::try_from(sides)?;
        Ok(self.roll_pool_with(DicePool::single(die), RollMode::Normal))
    }

    pub fn roll_pool(&self, sides: i64, count: i64) -> Result<RollResult, DomainError> {
        let pool = DicePool::new(Die::try_from(sides)?, count)?;
        Ok(self.roll_pool_with(pool, RollMode::Normal))
    }

    pub fn roll_advantage(&self) -> RollResult {
        self.roll_pool_with(DicePool::single(Die::D20), RollMode::Advantage)
    }

    pub fn roll_disadvantage(&self) -> RollResult {
        self.roll_pool_with(DicePool::single(Die::D20), RollMode::Disadvantage)
    }

    pub fn roll_inspiration(&self) -> RollResult {
        self.roll_pool_with(DicePool::single(Die::D20), RollMode::INSPIRATION)
    }

    /// Roll with optional sides and count, defaulting to a single d20.
    pub fn roll(
        &self,
        sides: Option<i64>,
        count: Option<i64>,
        mode: RollMode,
    ) -> Result<RollResult, DomainError> {
        let die = match sides {
            Some(sides) => Die::try_from(sides)?,
            None => DEFAULT_DIE,
        };
        let pool = DicePool::new(die, count.unwrap_or(DEFAULT_COUNT))?;
        Ok(self.roll_pool_with(pool, mode))
    }

    /// Roll dice notation ("d20", "3d6", "8"). An explicit `count` replaces
    /// the count written in the notation.
    pub fn roll_notation(
        &self,
        notation: &str,
        count: Option<i64>,
        mode: RollMode,
    ) -> Result<RollResult, DomainError> {
        let parsed = DicePool::parse(notation)?;
        let pool = match count {
            Some(count) => DicePool::new(parsed.die(), count)?,
            None => parsed,
        };
        Ok(self.roll_pool_with(pool, mode))
    }

    // =========================================================================
    // Creature Checks
    // =========================================================================

    async fn d20_plus(
        &self,
        name: &CreatureName,
        mode: RollMode,
        bonus: impl FnOnce(&Creature) -> i32,
    ) -> Result<CheckResult, CreatureError> {
        let creature = self
            .creatures
            .get(name)
            .await?
            .ok_or_else(|| CreatureError::NotFound(name.clone()))?;
        let bonus = bonus(&creature);
        Ok(self
            .roll_pool_with(DicePool::single(Die::D20), mode)
            .with_bonus(bonus))
    }

    pub async fn roll_ability_check(
        &self,
        name: &CreatureName,
        ability: Ability,
        mode: RollMode,
    ) -> Result<CheckResult, CreatureError> {
        self.d20_plus(name, mode, |c| c.ability_check_bonus(ability))
            .await
    }

    pub async fn roll_skill_check(
        &self,
        name: &CreatureName,
        skill: Skill,
        mode: RollMode,
    ) -> Result<CheckResult, CreatureError> {
        self.d20_plus(name, mode, |c| c.skill_check_bonus(skill))
            .await
    }

    pub async fn roll_saving_throw(
        &self,
        name: &CreatureName,
        save: Ability,
        mode: RollMode,
    ) -> Result<CheckResult, CreatureError> {
        self.d20_plus(name, mode, |c| c.saving_throw_bonus(save))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{FixedRandom, ScriptedRandom, SystemRandom};
    use crate::infrastructure::ports::{MockCreatureRepo, RandomPort};
    use std::time::Duration;

    fn dice(random: impl RandomPort + 'static, repo: MockCreatureRepo) -> DiceUseCases {
        DiceUseCases::new(
            Arc::new(RandomService::new(Arc::new(random))),
            Arc::new(CreatureRepository::new(
                Arc::new(repo),
                Duration::from_secs(5),
            )),
        )
    }

    #[test]
    fn roll_die_covers_every_face() {
        let dice = dice(SystemRandom::new(), MockCreatureRepo::new());
        let mut seen = [false; 6];
        for _ in 0..10_000 {
            let result = dice.roll_die(6).unwrap();
            assert!((1..=6).contains(&result.total));
            seen[(result.total - 1) as usize] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }

    #[test]
    fn unsupported_dice_are_rejected() {
        let dice = dice(FixedRandom(1), MockCreatureRepo::new());
        assert_eq!(
            dice.roll_die(7).unwrap_err(),
            DomainError::UnsupportedDie(7)
        );
        assert_eq!(
            dice.roll_pool(6, 0).unwrap_err(),
            DomainError::InvalidCount(0)
        );
        assert!(dice.roll_notation("2d3", None, RollMode::Normal).is_err());
    }

    #[test]
    fn roll_defaults_to_single_d20() {
        let dice = dice(FixedRandom(11), MockCreatureRepo::new());
        let result = dice.roll(None, None, RollMode::Normal).unwrap();
        assert_eq!(result.pool.die(), Die::D20);
        assert_eq!(result.pool.count(), 1);
        assert_eq!(result.total, 11);
    }

    #[test]
    fn advantage_and_disadvantage_pick_extremes() {
        let dice_adv = dice(ScriptedRandom::new(vec![4, 17]), MockCreatureRepo::new());
        assert_eq!(dice_adv.roll_advantage().total, 17);

        let dice_dis = dice(ScriptedRandom::new(vec![4, 17]), MockCreatureRepo::new());
        assert_eq!(dice_dis.roll_disadvantage().total, 4);

        let dice_insp = dice(ScriptedRandom::new(vec![17, 4]), MockCreatureRepo::new());
        assert_eq!(dice_insp.roll_inspiration().breakdown(), "1d20 adv[17, 4] = 17");
    }

    #[test]
    fn notation_count_override() {
        let dice = dice(ScriptedRandom::new(vec![2, 5, 6]), MockCreatureRepo::new());
        let result = dice.roll_notation("d6", Some(3), RollMode::Normal).unwrap();
        assert_eq!(result.breakdown(), "3d6[2, 5, 6] = 13");
    }

    #[tokio::test]
    async fn skill_check_adds_stored_skill_value() {
        let mut stored = Creature::new(CreatureName::new("Aria").unwrap());
        stored.set_ability_score(Ability::Dexterity, 16).unwrap();
        stored.set_skill_proficiency(Skill::Stealth);

        let mut repo = MockCreatureRepo::new();
        repo.expect_get()
            .returning(move |_| Ok(Some(stored.clone())));

        let dice = dice(FixedRandom(10), repo);
        let name = CreatureName::new("Aria").unwrap();

        let check = dice
            .roll_skill_check(&name, Skill::Stealth, RollMode::Normal)
            .await
            .unwrap();
        assert_eq!(check.bonus, 5);
        assert_eq!(check.total, 15);

        let check = dice
            .roll_ability_check(&name, Ability::Strength, RollMode::Normal)
            .await
            .unwrap();
        assert_eq!(check.bonus, 0);

        let check = dice
            .roll_saving_throw(&name, Ability::Dexterity, RollMode::Normal)
            .await
            .unwrap();
        assert_eq!(check.bonus, 3);
    }

    #[tokio::test]
    async fn check_on_missing_creature_is_not_found() {
        let mut repo = MockCreatureRepo::new();
        repo.expect_get().returning(|_| Ok(None));

        let result = dice(FixedRandom(10), repo)
            .roll_ability_check(
                &CreatureName::new("Ghost").unwrap(),
                Ability::Wisdom,
                RollMode::Normal,
            )
            .await;

        assert!(matches!(result, Err(CreatureError::NotFound(_))));
    }
}
