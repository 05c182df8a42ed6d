//! Map data loader.
//!
//! A map file carries the terrain layer, the encounter-area overlay, the
//! player spawn and the NPC roster. Malformed NPC entries are logged and
//! skipped so a single typo does not take the whole map down; structural
//! problems (bad RON, player outside the map) are hard errors.

use std::collections::HashMap;
use std::path::Path;

use game_core::{
    Direction, ErrorSeverity, GameError, MapDimensions, MovementPattern, NpcSpec, Position,
    StaticTile, TerrainKind,
};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Reasons an NPC entry is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NpcEntryError {
    #[error("npc '{npc}': unknown direction '{value}'")]
    UnknownDirection { npc: String, value: String },

    #[error("npc '{npc}': unknown movement pattern '{value}'")]
    UnknownPattern { npc: String, value: String },

    #[error("npc '{npc}': tile ({column}, {row}) lies outside the map")]
    OutOfBounds { npc: String, column: i32, row: i32 },
}

impl GameError for NpcEntryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownDirection { .. } => "CONTENT_UNKNOWN_DIRECTION",
            Self::UnknownPattern { .. } => "CONTENT_UNKNOWN_PATTERN",
            Self::OutOfBounds { .. } => "CONTENT_OUT_OF_BOUNDS",
        }
    }
}

fn default_direction() -> String {
    Direction::Down.to_string()
}

fn default_pattern() -> String {
    MovementPattern::Idle.to_string()
}

/// Map data structure for RON files.
#[derive(Debug, Clone, Deserialize)]
struct MapDataRon {
    dimensions: (u32, u32),
    player: PlayerSpawnRon,
    #[serde(default)]
    tiles: Vec<(i32, i32, TerrainKind)>, // (column, row, terrain)
    #[serde(default)]
    encounter_tiles: Vec<(i32, i32, u16)>, // (column, row, area)
    #[serde(default)]
    npcs: Vec<NpcEntryRon>,
}

#[derive(Debug, Clone, Deserialize)]
struct PlayerSpawnRon {
    tile: (i32, i32),
    #[serde(default = "default_direction")]
    direction: String,
}

#[derive(Debug, Clone, Deserialize)]
struct NpcEntryRon {
    name: String,
    tile: (i32, i32),
    #[serde(default = "default_direction")]
    direction: String,
    #[serde(default = "default_pattern")]
    pattern: String,
    #[serde(default)]
    path: Vec<(i32, i32)>,
    #[serde(default)]
    frame_base: u16,
    #[serde(default)]
    messages: Vec<String>,
}

impl NpcEntryRon {
    fn into_spec(self, dimensions: MapDimensions) -> Result<NpcSpec, NpcEntryError> {
        let direction =
            self.direction
                .parse::<Direction>()
                .map_err(|_| NpcEntryError::UnknownDirection {
                    npc: self.name.clone(),
                    value: self.direction.clone(),
                })?;
        let pattern =
            self.pattern
                .parse::<MovementPattern>()
                .map_err(|_| NpcEntryError::UnknownPattern {
                    npc: self.name.clone(),
                    value: self.pattern.clone(),
                })?;

        for &(column, row) in core::iter::once(&self.tile).chain(&self.path) {
            if !dimensions.contains_tile(column, row) {
                return Err(NpcEntryError::OutOfBounds {
                    npc: self.name.clone(),
                    column,
                    row,
                });
            }
        }

        Ok(NpcSpec {
            name: self.name,
            tile: self.tile,
            direction,
            pattern,
            path: self.path,
            frame_base: self.frame_base,
            messages: self.messages,
        })
    }
}

/// Fully resolved map content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapData {
    pub dimensions: MapDimensions,
    /// Every in-bounds tile keyed by `(column, row)`.
    pub tiles: HashMap<(i32, i32), StaticTile>,
    pub player_spawn: Position,
    pub player_direction: Direction,
    pub npcs: Vec<NpcSpec>,
}

impl MapData {
    pub fn tile(&self, column: i32, row: i32) -> Option<StaticTile> {
        self.tiles.get(&(column, row)).copied()
    }
}

/// Loader for map data from RON files.
pub struct MapLoader;

impl MapLoader {
    /// Load map data from a RON file.
    pub fn load(path: &Path) -> LoadResult<MapData> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load map {}: {}", path.display(), e))
    }

    /// Parse map data from RON text.
    pub fn parse(content: &str) -> LoadResult<MapData> {
        let data: MapDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let dimensions = MapDimensions::new(data.dimensions.0, data.dimensions.1);

        // Fill entire map with default Floor tiles first
        let mut tiles = HashMap::new();
        for row in 0..dimensions.height as i32 {
            for column in 0..dimensions.width as i32 {
                tiles.insert((column, row), StaticTile::new(TerrainKind::Floor));
            }
        }

        // Then override with explicitly defined tiles
        for (column, row, terrain) in data.tiles {
            if !dimensions.contains_tile(column, row) {
                tracing::warn!(column, row, "terrain tile outside the map, skipping");
                continue;
            }
            tiles.insert((column, row), StaticTile::new(terrain));
        }

        for (column, row, area) in data.encounter_tiles {
            match tiles.get_mut(&(column, row)) {
                Some(tile) => *tile = tile.with_encounter_area(area),
                None => tracing::warn!(column, row, area, "encounter tile outside the map, skipping"),
            }
        }

        let (column, row) = data.player.tile;
        let spawn_tile = tiles.get(&(column, row)).copied().ok_or_else(|| {
            anyhow::anyhow!("Player spawn ({}, {}) lies outside the map", column, row)
        })?;
        anyhow::ensure!(
            spawn_tile.is_passable(),
            "Player spawn ({}, {}) is not walkable",
            column,
            row
        );
        let player_direction = data
            .player
            .direction
            .parse::<Direction>()
            .map_err(|_| anyhow::anyhow!("Unknown player direction '{}'", data.player.direction))?;

        let mut npcs = Vec::with_capacity(data.npcs.len());
        for entry in data.npcs {
            match entry.into_spec(dimensions) {
                Ok(spec) => npcs.push(spec),
                Err(err) => {
                    tracing::warn!(code = err.error_code(), "{err}, skipping npc entry");
                }
            }
        }

        Ok(MapData {
            dimensions,
            tiles,
            player_spawn: Position::from_tile(column, row),
            player_direction,
            npcs,
        })
    }
}
