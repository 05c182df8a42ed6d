//! File loaders that turn authored content into game-core values.
//!
//! Maps and encounter tables are RON, the tuning config is TOML.

pub mod config;
pub mod encounters;
pub mod factory;
pub mod map;

pub use config::ConfigLoader;
pub use encounters::EncounterLoader;
pub use factory::ContentFactory;
pub use map::{MapData, MapLoader, NpcEntryError};

use std::path::Path;

use anyhow::Context;

pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}
