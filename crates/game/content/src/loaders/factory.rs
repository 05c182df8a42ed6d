//! One entry point over a content directory laid out by convention.

use std::path::{Path, PathBuf};

use game_core::{EncounterTable, GameConfig};

use crate::loaders::{ConfigLoader, EncounterLoader, LoadResult, MapData, MapLoader};

/// Resolves content file names relative to a root directory:
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── encounters.ron
/// └── maps/
///     └── route_1.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The route and tables bundled in this crate's `data/` directory.
    pub fn builtin() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    pub fn load_encounters(&self) -> LoadResult<Vec<EncounterTable>> {
        EncounterLoader::load(&self.data_dir.join("encounters.ron"))
    }

    /// Reads `maps/<name>.ron`.
    pub fn load_map(&self, name: &str) -> LoadResult<MapData> {
        MapLoader::load(&self.data_dir.join("maps").join(format!("{name}.ron")))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
