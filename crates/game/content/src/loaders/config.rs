//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`GameConfig::default`].
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        anyhow::ensure!(
            config.step_duration_ms > 0,
            "step_duration_ms must be positive"
        );
        let chance = config.encounter_chance_percent;
        Ok(config.with_encounter_chance(chance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_uses_defaults() {
        let config = ConfigLoader::parse("step_duration_ms = 150").unwrap();
        assert_eq!(config.step_duration_ms, 150);
        assert_eq!(
            config.encounter_chance_percent,
            GameConfig::DEFAULT_ENCOUNTER_CHANCE_PERCENT
        );
    }

    #[test]
    fn chance_is_clamped_and_zero_step_rejected() {
        let config = ConfigLoader::parse("encounter_chance_percent = 250").unwrap();
        assert_eq!(config.encounter_chance_percent, 100);

        assert!(ConfigLoader::parse("step_duration_ms = 0").is_err());
    }
}
