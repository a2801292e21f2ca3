//! Dice rolling value objects and parsing
//!
//! Supports the standard die shapes (d4, d6, d8, d10, d12, d20, d100), pools
//! like "3d6", and the advantage/disadvantage strategies.
//!
//! Randomness is injected: every roll takes a `roller` closure that, given a
//! number of sides, returns a uniform draw in `1..=sides`. The domain never
//! owns a generator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Upper bound on dice in one pool, to keep a single request bounded.
pub const MAX_DICE_COUNT: i64 = 1000;

/// A supported die shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub enum Die {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    D100,
}

impl Die {
    pub const ALL: [Die; 7] = [
        Self::D4,
        Self::D6,
        Self::D8,
        Self::D10,
        Self::D12,
        Self::D20,
        Self::D100,
    ];

    pub fn sides(&self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
        }
    }

    /// Draw one face using the injected roller.
    pub fn roll_with<R: FnMut(u32) -> u32>(&self, roller: &mut R) -> u32 {
        roller(self.sides()).clamp(1, self.sides())
    }
}

impl TryFrom<i64> for Die {
    type Error = DomainError;

    fn try_from(sides: i64) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|die| i64::from(die.sides()) == sides)
            .ok_or(DomainError::UnsupportedDie(sides))
    }
}

impl From<Die> for u32 {
    fn from(die: Die) -> u32 {
        die.sides()
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

impl FromStr for Die {
    type Err = DomainError;

    /// Accepts "d20", "D20" or a bare "20".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('d')
            .or_else(|| trimmed.strip_prefix('D'))
            .unwrap_or(trimmed);
        let sides: i64 = digits
            .parse()
            .map_err(|_| DomainError::unknown("die", s))?;
        Die::try_from(sides)
    }
}

/// How many times a pool is rolled and which total is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollMode {
    /// Roll once
    #[default]
    Normal,
    /// Roll twice, keep the higher total
    Advantage,
    /// Roll twice, keep the lower total
    Disadvantage,
}

impl RollMode {
    /// Inspiration grants advantage.
    pub const INSPIRATION: RollMode = RollMode::Advantage;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Advantage => "advantage",
            Self::Disadvantage => "disadvantage",
        }
    }
}

impl FromStr for RollMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "normal" | "plain" => Ok(Self::Normal),
            "advantage" | "adv" | "inspiration" => Ok(Self::Advantage),
            "disadvantage" | "dis" => Ok(Self::Disadvantage),
            _ => Err(DomainError::unknown("roll mode", s)),
        }
    }
}

/// A number of identical dice, e.g. "3d6".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DicePool {
    die: Die,
    count: u32,
}

impl DicePool {
    pub fn new(die: Die, count: i64) -> Result<Self, DomainError> {
        if !(1..=MAX_DICE_COUNT).contains(&count) {
            return Err(DomainError::InvalidCount(count));
        }
        Ok(Self {
            die,
            count: count as u32,
        })
    }

    pub fn single(die: Die) -> Self {
        Self { die, count: 1 }
    }

    pub fn die(&self) -> Die {
        self.die
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Parse dice notation like "3d6", "d20" or "D100".
    ///
    /// Supported formats:
    /// - "XdY" - Roll X dice of size Y
    /// - "dY" - Roll 1 die of size Y (shorthand)
    /// - "Y" - Roll 1 die of size Y
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let input = input.trim().to_ascii_lowercase();
        if input.is_empty() {
            return Err(DomainError::unknown("dice", input));
        }

        let Some(d_pos) = input.find('d') else {
            return Ok(Self::single(Die::from_str(&input)?));
        };

        // "d20" means "1d20"
        let count_str = &input[..d_pos];
        let count: i64 = if count_str.is_empty() {
            1
        } else {
            count_str
                .parse()
                .map_err(|_| DomainError::unknown("dice", input.as_str()))?
        };

        let die = Die::from_str(&input[d_pos + 1..])?;
        Self::new(die, count)
    }

    /// Roll the pool under `mode`.
    pub fn roll_with<R: FnMut(u32) -> u32>(&self, mode: RollMode, roller: &mut R) -> RollResult {
        let sets = match mode {
            RollMode::Normal => 1,
            RollMode::Advantage | RollMode::Disadvantage => 2,
        };

        let mut rolls = Vec::with_capacity(self.count as usize * sets);
        let mut set_totals = Vec::with_capacity(sets);
        for _ in 0..sets {
            let mut set_total = 0;
            for _ in 0..self.count {
                let face = self.die.roll_with(roller);
                set_total += face;
                rolls.push(face);
            }
            set_totals.push(set_total);
        }

        let total = match mode {
            RollMode::Normal | RollMode::Advantage => set_totals.iter().copied().max(),
            RollMode::Disadvantage => set_totals.iter().copied().min(),
        }
        .unwrap_or_default();

        RollResult {
            pool: *self,
            mode,
            rolls,
            total,
        }
    }
}

impl fmt::Display for DicePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.die)
    }
}

/// Result of rolling a pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    pub pool: DicePool,
    pub mode: RollMode,
    /// Every individual face, in roll order (both sets for advantage/disadvantage)
    pub rolls: Vec<u32>,
    /// The kept total
    pub total: u32,
}

impl RollResult {
    /// Format as a breakdown string (e.g., "3d6[2, 5, 6] = 13" or "1d20 adv[4, 17] = 17")
    pub fn breakdown(&self) -> String {
        let faces = |rolls: &[u32]| {
            rolls
                .iter()
                .map(|r| r.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        match self.mode {
            RollMode::Normal => format!("{}[{}] = {}", self.pool, faces(&self.rolls), self.total),
            RollMode::Advantage | RollMode::Disadvantage => {
                let tag = if self.mode == RollMode::Advantage {
                    "adv"
                } else {
                    "dis"
                };
                let (first, second) = self.rolls.split_at(self.pool.count as usize);
                let sets = if self.pool.count == 1 {
                    format!("{}, {}", faces(first), faces(second))
                } else {
                    format!("{} | {}", faces(first), faces(second))
                };
                format!("{} {}[{}] = {}", self.pool, tag, sets, self.total)
            }
        }
    }

    /// Attach a flat bonus, producing a check result.
    pub fn with_bonus(self, bonus: i32) -> CheckResult {
        let total = self.total as i32 + bonus;
        CheckResult {
            roll: self,
            bonus,
            total,
        }
    }
}

/// A d20 roll plus a creature's bonus (ability check, skill check, saving throw)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub roll: RollResult,
    pub bonus: i32,
    pub total: i32,
}

/// Roll one die of `sides`.
pub fn roll_die<R: FnMut(u32) -> u32>(sides: i64, roller: &mut R) -> Result<u32, DomainError> {
    let die = Die::try_from(sides)?;
    Ok(die.roll_with(roller))
}

/// Sum of `count` independent draws of a `sides` die.
pub fn roll_pool<R: FnMut(u32) -> u32>(
    sides: i64,
    count: i64,
    roller: &mut R,
) -> Result<u32, DomainError> {
    let pool = DicePool::new(Die::try_from(sides)?, count)?;
    Ok(pool.roll_with(RollMode::Normal, roller).total)
}

/// Higher of two d20.
pub fn roll_with_advantage<R: FnMut(u32) -> u32>(roller: &mut R) -> u32 {
    DicePool::single(Die::D20)
        .roll_with(RollMode::Advantage, roller)
        .total
}

/// Lower of two d20.
pub fn roll_with_disadvantage<R: FnMut(u32) -> u32>(roller: &mut R) -> u32 {
    DicePool::single(Die::D20)
        .roll_with(RollMode::Disadvantage, roller)
        .total
}

pub fn roll_with_inspiration<R: FnMut(u32) -> u32>(roller: &mut R) -> u32 {
    roll_with_advantage(roller)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays `faces` in order, cycling.
    fn scripted(faces: Vec<u32>) -> impl FnMut(u32) -> u32 {
        let mut i = 0;
        move |_sides| {
            let face = faces[i % faces.len()];
            i += 1;
            face
        }
    }

    #[test]
    fn test_die_from_sides() {
        for sides in [4, 6, 8, 10, 12, 20, 100] {
            assert_eq!(i64::from(Die::try_from(sides).unwrap().sides()), sides);
        }
        assert_eq!(Die::try_from(7), Err(DomainError::UnsupportedDie(7)));
        assert_eq!(Die::try_from(0), Err(DomainError::UnsupportedDie(0)));
    }

    #[test]
    fn test_die_from_str() {
        assert_eq!(Die::from_str("d20"), Ok(Die::D20));
        assert_eq!(Die::from_str("D6"), Ok(Die::D6));
        assert_eq!(Die::from_str("100"), Ok(Die::D100));
        assert_eq!(Die::from_str("d7"), Err(DomainError::UnsupportedDie(7)));
        assert!(matches!(
            Die::from_str("dx"),
            Err(DomainError::UnknownEntity { .. })
        ));
    }

    #[test]
    fn test_parse_pool() {
        let pool = DicePool::parse("3d6").unwrap();
        assert_eq!(pool.die(), Die::D6);
        assert_eq!(pool.count(), 3);

        let pool = DicePool::parse(" D20 ").unwrap();
        assert_eq!(pool.die(), Die::D20);
        assert_eq!(pool.count(), 1);

        let pool = DicePool::parse("8").unwrap();
        assert_eq!(pool.die(), Die::D8);
    }

    #[test]
    fn test_parse_invalid_pools() {
        assert_eq!(DicePool::parse("0d6"), Err(DomainError::InvalidCount(0)));
        assert_eq!(DicePool::parse("2d7"), Err(DomainError::UnsupportedDie(7)));
        assert!(DicePool::parse("").is_err());
        assert!(DicePool::parse("xd6").is_err());
    }

    #[test]
    fn test_pool_count_bounds() {
        assert_eq!(
            DicePool::new(Die::D6, 0),
            Err(DomainError::InvalidCount(0))
        );
        assert_eq!(
            DicePool::new(Die::D6, -2),
            Err(DomainError::InvalidCount(-2))
        );
        assert!(DicePool::new(Die::D6, MAX_DICE_COUNT + 1).is_err());
    }

    #[test]
    fn test_roll_pool_sums_faces() {
        let mut roller = scripted(vec![2, 5, 6]);
        assert_eq!(roll_pool(6, 3, &mut roller), Ok(13));
    }

    #[test]
    fn test_roll_die_rejects_unsupported() {
        let mut roller = scripted(vec![1]);
        assert_eq!(
            roll_die(7, &mut roller),
            Err(DomainError::UnsupportedDie(7))
        );
        assert_eq!(
            roll_pool(6, 0, &mut roller),
            Err(DomainError::InvalidCount(0))
        );
    }

    #[test]
    fn test_advantage_keeps_higher() {
        let mut roller = scripted(vec![4, 17]);
        assert_eq!(roll_with_advantage(&mut roller), 17);
        let mut roller = scripted(vec![17, 4]);
        assert_eq!(roll_with_inspiration(&mut roller), 17);
    }

    #[test]
    fn test_disadvantage_keeps_lower() {
        let mut roller = scripted(vec![4, 17]);
        assert_eq!(roll_with_disadvantage(&mut roller), 4);
    }

    #[test]
    fn test_roller_output_is_clamped_to_faces() {
        let mut roller = scripted(vec![0, 99]);
        assert_eq!(Die::D6.roll_with(&mut roller), 1);
        assert_eq!(Die::D6.roll_with(&mut roller), 6);
    }

    #[test]
    fn test_breakdown() {
        let mut roller = scripted(vec![2, 5, 6]);
        let result = DicePool::parse("3d6")
            .unwrap()
            .roll_with(RollMode::Normal, &mut roller);
        assert_eq!(result.breakdown(), "3d6[2, 5, 6] = 13");

        let mut roller = scripted(vec![4, 17]);
        let result = DicePool::single(Die::D20).roll_with(RollMode::Advantage, &mut roller);
        assert_eq!(result.breakdown(), "1d20 adv[4, 17] = 17");

        let mut roller = scripted(vec![1, 2, 5, 6]);
        let result = DicePool::new(Die::D6, 2)
            .unwrap()
            .roll_with(RollMode::Disadvantage, &mut roller);
        assert_eq!(result.breakdown(), "2d6 dis[1, 2 | 5, 6] = 3");
    }

    #[test]
    fn test_with_bonus() {
        let mut roller = scripted(vec![20]);
        let result = DicePool::single(Die::D20).roll_with(RollMode::Normal, &mut roller);
        let check = result.with_bonus(-3);
        assert_eq!(check.total, 17);
    }

    #[test]
    fn test_roll_mode_from_str() {
        assert_eq!(RollMode::from_str("adv"), Ok(RollMode::Advantage));
        assert_eq!(RollMode::from_str("Inspiration"), Ok(RollMode::INSPIRATION));
        assert_eq!(RollMode::from_str("dis"), Ok(RollMode::Disadvantage));
        assert_eq!(RollMode::from_str(""), Ok(RollMode::Normal));
        assert!(RollMode::from_str("lucky").is_err());
    }
}
