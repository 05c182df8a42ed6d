//! Runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use game_core::GameConfig;

/// Configuration required to bootstrap a scene.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Seed of the encounter RNG. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub save_data_dir: Option<PathBuf>,
    pub event_buffer_size: usize,
    pub map_path: Option<PathBuf>,
    pub encounters_path: Option<PathBuf>,
    pub game_config_path: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            seed: None,
            save_data_dir: None,
            event_buffer_size: 100,
            map_path: None,
            encounters_path: None,
            game_config_path: None,
        }
    }
}

impl RuntimeConfig {
    pub const SAVE_FILE_NAME: &'static str = "save.json";

    /// Construct configuration from process environment variables.
    ///
    /// - `GAME_SEED`
    /// - `SAVE_DATA_DIR`
    /// - `EVENT_BUFFER_SIZE`
    /// - `MAP_PATH` / `ENCOUNTERS_PATH` / `GAME_CONFIG_PATH`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`RuntimeConfig::from_env`] over an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        config.seed = lookup("GAME_SEED").and_then(|value| value.parse().ok());

        if let Some(capacity) = lookup("EVENT_BUFFER_SIZE").and_then(|value| value.parse::<usize>().ok())
        {
            config.event_buffer_size = capacity.max(1);
        }

        config.save_data_dir = lookup("SAVE_DATA_DIR").map(PathBuf::from);
        config.map_path = lookup("MAP_PATH").map(PathBuf::from);
        config.encounters_path = lookup("ENCOUNTERS_PATH").map(PathBuf::from);
        config.game_config_path = lookup("GAME_CONFIG_PATH").map(PathBuf::from);

        config
    }

    /// Directory holding the save file.
    ///
    /// Falls back to the platform data directory, then `./save_data`.
    pub fn resolved_save_dir(&self) -> PathBuf {
        self.save_data_dir.clone().unwrap_or_else(|| {
            directories::ProjectDirs::from("", "", "monster-tamer")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("./save_data"))
        })
    }

    pub fn save_file_path(&self) -> PathBuf {
        self.resolved_save_dir().join(Self::SAVE_FILE_NAME)
    }
}
