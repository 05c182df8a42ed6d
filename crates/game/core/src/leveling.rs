//! Experience curve and monster level-ups.
//!
//! The curve is cubic: reaching level `n` requires `n³` total experience.
//! Everything saturates at [`GameConfig::MAX_LEVEL`]; no function here can
//! underflow, divide by zero or return NaN.

use rand::Rng;

use crate::config::GameConfig;
use crate::types::SpeciesId;

/// Total experience required to reach `level`, capped at the max level.
pub fn total_exp_for_level(level: u32) -> u32 {
    let level = level.min(GameConfig::MAX_LEVEL);
    level * level * level
}

/// Experience still missing before `level + 1`. Zero at the max level and when
/// `exp` already exceeds the threshold.
pub fn exp_needed_for_next_level(level: u32, exp: u32) -> u32 {
    if level >= GameConfig::MAX_LEVEL {
        return 0;
    }
    total_exp_for_level(level + 1).saturating_sub(exp)
}

/// Fill ratio of the experience bar for the current level, in `[0, 1]`.
///
/// A max-level monster shows a full bar.
pub fn exp_bar_progress(level: u32, exp: u32) -> f64 {
    if level >= GameConfig::MAX_LEVEL {
        return 1.0;
    }
    let floor = total_exp_for_level(level);
    let span = total_exp_for_level(level + 1) - floor;
    if span == 0 {
        return 1.0;
    }
    let progress = f64::from(exp.saturating_sub(floor)) / f64::from(span);
    progress.min(1.0)
}

/// Highest level whose threshold `exp` has reached. Never below 1.
pub fn level_for_exp(exp: u32) -> u32 {
    (1..=GameConfig::MAX_LEVEL)
        .rev()
        .find(|&level| total_exp_for_level(level) <= exp)
        .unwrap_or(1)
}

/// Experience awarded for defeating a monster of `defeated_level` whose
/// species yields `base_exp`.
pub fn exp_gained_from_defeat(base_exp: u32, defeated_level: u32) -> u32 {
    let raw = u64::from(base_exp) * u64::from(defeated_level);
    // round half up
    let gained = (raw + 3) / 7;
    u32::try_from(gained).unwrap_or(u32::MAX)
}

/// Stat deltas produced by a call to [`Monster::gain_experience`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatChanges {
    pub levels_gained: u32,
    pub max_hp: u32,
    pub attack: u32,
}

impl StatChanges {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// A party or wild monster.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Monster {
    pub id: u32,
    pub name: String,
    pub species: SpeciesId,
    pub current_level: u32,
    pub current_exp: u32,
    pub max_hp: u32,
    pub current_hp: u32,
    pub base_attack: u32,
}

impl Monster {
    /// A fresh monster at `level` with exactly that level's threshold of exp.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        species: SpeciesId,
        level: u32,
        max_hp: u32,
        base_attack: u32,
    ) -> Self {
        let level = level.clamp(1, GameConfig::MAX_LEVEL);
        Self {
            id,
            name: name.into(),
            species,
            current_level: level,
            current_exp: total_exp_for_level(level),
            max_hp,
            current_hp: max_hp,
            base_attack,
        }
    }

    pub fn exp_to_next_level(&self) -> u32 {
        exp_needed_for_next_level(self.current_level, self.current_exp)
    }

    pub fn exp_bar_progress(&self) -> f64 {
        exp_bar_progress(self.current_level, self.current_exp)
    }

    /// Adds `gained` experience and applies every level-up it unlocks.
    ///
    /// Each level grants `5 + (5..=10)` max HP, `1 + (0..=1)` attack, and heals
    /// by the HP gained. Experience keeps accumulating past the max level.
    pub fn gain_experience<R: Rng + ?Sized>(&mut self, gained: u32, rng: &mut R) -> StatChanges {
        self.current_exp = self.current_exp.saturating_add(gained);

        let mut changes = StatChanges::default();
        while self.current_level < GameConfig::MAX_LEVEL
            && self.current_exp >= total_exp_for_level(self.current_level + 1)
        {
            let hp = 5 + rng.gen_range(5..=10);
            let attack = 1 + rng.gen_range(0..=1);

            self.current_level += 1;
            self.max_hp = self.max_hp.saturating_add(hp);
            self.current_hp = self.current_hp.saturating_add(hp).min(self.max_hp);
            self.base_attack = self.base_attack.saturating_add(attack);

            changes.levels_gained += 1;
            changes.max_hp += hp;
            changes.attack += attack;
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn cubic_thresholds() {
        assert_eq!(total_exp_for_level(1), 1);
        assert_eq!(total_exp_for_level(5), 125);
        assert_eq!(total_exp_for_level(100), 1_000_000);
        assert_eq!(total_exp_for_level(250), 1_000_000);
    }

    #[test]
    fn exp_needed_counts_down_to_zero() {
        assert_eq!(exp_needed_for_next_level(5, 125), 216 - 125);
        assert_eq!(exp_needed_for_next_level(5, 200), 16);
        assert_eq!(exp_needed_for_next_level(5, 500), 0);
        assert_eq!(exp_needed_for_next_level(100, 0), 0);
        assert_eq!(exp_needed_for_next_level(120, 5), 0);
    }

    #[test]
    fn exp_bar_is_bounded() {
        assert_eq!(exp_bar_progress(5, 125), 0.0);
        assert_eq!(exp_bar_progress(5, 0), 0.0);
        assert_eq!(exp_bar_progress(5, 216), 1.0);
        assert_eq!(exp_bar_progress(5, 10_000), 1.0);
        assert_eq!(exp_bar_progress(100, 1_000_000), 1.0);
        assert_eq!(exp_bar_progress(99, 1_000_000), 1.0);

        let half = exp_bar_progress(1, 1 + 7 / 2);
        assert!(half > 0.0 && half < 1.0);

        for level in 1..=101 {
            for exp in [0, 1, 999, 970_299, 1_000_000, u32::MAX] {
                let progress = exp_bar_progress(level, exp);
                assert!(!progress.is_nan());
                assert!((0.0..=1.0).contains(&progress), "{level}/{exp}");
            }
        }
    }

    #[test]
    fn level_for_exp_inverts_threshold() {
        assert_eq!(level_for_exp(0), 1);
        assert_eq!(level_for_exp(7), 1);
        assert_eq!(level_for_exp(8), 2);
        assert_eq!(level_for_exp(124), 4);
        assert_eq!(level_for_exp(125), 5);
        assert_eq!(level_for_exp(u32::MAX), 100);
    }

    #[test]
    fn defeat_reward_scales_with_level() {
        assert_eq!(exp_gained_from_defeat(64, 7), 64);
        assert_eq!(exp_gained_from_defeat(10, 1), 1);
        assert_eq!(exp_gained_from_defeat(0, 50), 0);
    }

    #[test]
    fn gaining_exp_applies_each_level_up() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut monster = Monster::new(1, "Iguanignite", SpeciesId(1), 5, 25, 5);
        monster.current_hp = 10;

        let changes = monster.gain_experience(343 - 125, &mut rng);

        assert_eq!(changes.levels_gained, 2);
        assert_eq!(monster.current_level, 7);
        assert_eq!(monster.current_exp, 343);
        assert!((20..=30).contains(&changes.max_hp));
        assert!((2..=4).contains(&changes.attack));
        assert_eq!(monster.max_hp, 25 + changes.max_hp);
        assert_eq!(monster.current_hp, 10 + changes.max_hp);
        assert_eq!(monster.base_attack, 5 + changes.attack);
    }

    #[test]
    fn level_is_capped() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut monster = Monster::new(2, "Ancient", SpeciesId(9), 99, 400, 60);

        let changes = monster.gain_experience(u32::MAX, &mut rng);

        assert_eq!(changes.levels_gained, 1);
        assert_eq!(monster.current_level, 100);
        assert_eq!(monster.exp_to_next_level(), 0);
        assert_eq!(monster.exp_bar_progress(), 1.0);

        let none = monster.gain_experience(10, &mut rng);
        assert!(!none.leveled_up());
    }

    #[test]
    fn small_gain_keeps_level() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut monster = Monster::new(3, "Sprout", SpeciesId(2), 2, 12, 3);
        let before = monster.clone();

        let changes = monster.gain_experience(1, &mut rng);

        assert_eq!(changes, StatChanges::default());
        assert_eq!(monster.current_exp, before.current_exp + 1);
        assert_eq!(monster.max_hp, before.max_hp);
    }
}
