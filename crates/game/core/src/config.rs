/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Time one discrete tile step takes, in milliseconds.
    pub step_duration_ms: u64,
    /// Percent chance (0-100) that a finished step on an encounter tile
    /// triggers a wild monster.
    pub encounter_chance_percent: u32,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Edge length of a square tile in world pixels.
    pub const TILE_SIZE: i32 = 64;
    /// Highest level a monster can reach.
    pub const MAX_LEVEL: u32 = 100;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STEP_DURATION_MS: u64 = 300;
    pub const DEFAULT_ENCOUNTER_CHANCE_PERCENT: u32 = 20;

    pub fn new() -> Self {
        Self {
            step_duration_ms: Self::DEFAULT_STEP_DURATION_MS,
            encounter_chance_percent: Self::DEFAULT_ENCOUNTER_CHANCE_PERCENT,
        }
    }

    pub fn with_step_duration_ms(mut self, step_duration_ms: u64) -> Self {
        self.step_duration_ms = step_duration_ms;
        self
    }

    pub fn with_encounter_chance(mut self, percent: u32) -> Self {
        self.encounter_chance_percent = percent.min(100);
        self
    }

    pub fn step_duration(&self) -> core::time::Duration {
        core::time::Duration::from_millis(self.step_duration_ms)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
