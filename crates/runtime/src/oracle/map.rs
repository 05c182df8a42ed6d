//! Static tile layout served through [`game_core::CollisionOracle`].
use std::collections::HashMap;

use game_content::MapData;
use game_core::{CollisionOracle, MapDimensions, Position, StaticTile, TerrainKind};

/// Collision layer with static map data
///
/// Holds immutable map structure that doesn't change during gameplay. Tiles are
/// keyed by `(column, row)`; positions outside the map always block.
#[derive(Debug, Clone)]
pub struct TileLayer {
    dimensions: MapDimensions,
    tiles: HashMap<(i32, i32), StaticTile>,
}

impl TileLayer {
    pub fn new(dimensions: MapDimensions, tiles: HashMap<(i32, i32), StaticTile>) -> Self {
        Self { dimensions, tiles }
    }

    pub fn from_map(map: &MapData) -> Self {
        Self::new(map.dimensions, map.tiles.clone())
    }

    /// Creates an open layer (all floor tiles)
    pub fn filled(width: u32, height: u32) -> Self {
        let dimensions = MapDimensions::new(width, height);
        let mut tiles = HashMap::new();
        for column in 0..width as i32 {
            for row in 0..height as i32 {
                tiles.insert((column, row), StaticTile::new(TerrainKind::Floor));
            }
        }
        Self::new(dimensions, tiles)
    }

    /// Replaces a single tile, ignoring cells outside the map.
    pub fn with_tile(mut self, column: i32, row: i32, tile: StaticTile) -> Self {
        if self.dimensions.contains_tile(column, row) {
            self.tiles.insert((column, row), tile);
        }
        self
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn tile_at(&self, position: Position) -> Option<StaticTile> {
        self.tiles.get(&position.tile()).copied()
    }

    /// Encounter area of the tile under `position`, if it rolls encounters.
    pub fn encounter_area_at(&self, position: Position) -> Option<u16> {
        self.tile_at(position).and_then(StaticTile::encounter_area)
    }

    /// Whether a character may stand on `position`.
    pub fn is_walkable(&self, position: Position) -> bool {
        position.is_tile_aligned()
            && self.dimensions.contains(position)
            && self.tile_at(position).is_some_and(StaticTile::is_passable)
    }
}

impl CollisionOracle for TileLayer {
    fn is_blocking(&self, x: i32, y: i32) -> bool {
        !self.is_walkable(Position::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walls_and_out_of_bounds_block() {
        let layer = TileLayer::filled(3, 3).with_tile(1, 1, StaticTile::new(TerrainKind::Wall));

        assert!(!layer.is_blocking_at(Position::from_tile(0, 0)));
        assert!(layer.is_blocking_at(Position::from_tile(1, 1)));
        assert!(layer.is_blocking_at(Position::from_tile(3, 0)));
        assert!(layer.is_blocking_at(Position::from_tile(0, -1)));
    }

    #[test]
    fn encounter_areas_are_reported() {
        let grass = StaticTile::new(TerrainKind::TallGrass).with_encounter_area(2);
        let layer = TileLayer::filled(2, 2).with_tile(1, 0, grass);

        assert_eq!(layer.encounter_area_at(Position::from_tile(1, 0)), Some(2));
        assert_eq!(layer.encounter_area_at(Position::from_tile(0, 0)), None);
        assert!(layer.is_walkable(Position::from_tile(1, 0)));
    }
}
