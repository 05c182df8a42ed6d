use crate::grid::Position;

/// Read-only collision capability backed by a tile layer.
///
/// Positions are world pixels on the tile lattice. Implementations decide how
/// off-map positions are treated; the runtime tile layer blocks them.
pub trait CollisionOracle {
    fn is_blocking(&self, x: i32, y: i32) -> bool;

    fn is_blocking_at(&self, position: Position) -> bool {
        self.is_blocking(position.x, position.y)
    }
}

impl<F> CollisionOracle for F
where
    F: Fn(i32, i32) -> bool,
{
    fn is_blocking(&self, x: i32, y: i32) -> bool {
        self(x, y)
    }
}

/// Map size measured in tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether the tile `(column, row)` lies inside the map.
    pub fn contains_tile(&self, column: i32, row: i32) -> bool {
        column >= 0 && row >= 0 && column < self.width as i32 && row < self.height as i32
    }

    pub fn contains(&self, position: Position) -> bool {
        let (column, row) = position.tile();
        self.contains_tile(column, row)
    }
}

/// Immutable descriptor for a tile in the static layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticTile {
    terrain: TerrainKind,
    encounter_area: Option<u16>,
}

impl StaticTile {
    pub const fn new(terrain: TerrainKind) -> Self {
        Self {
            terrain,
            encounter_area: None,
        }
    }

    /// Tile that can roll wild encounters from the given area table.
    pub const fn with_encounter_area(mut self, area: u16) -> Self {
        self.encounter_area = Some(area);
        self
    }

    pub fn terrain(self) -> TerrainKind {
        self.terrain
    }

    pub fn encounter_area(self) -> Option<u16> {
        self.encounter_area
    }

    pub fn is_passable(self) -> bool {
        self.terrain.is_passable()
    }
}

/// Canonical terrain classes for static map tiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    #[default]
    Floor,
    Wall,
    Water,
    TallGrass,
}

impl TerrainKind {
    pub fn is_passable(self) -> bool {
        matches!(self, TerrainKind::Floor | TerrainKind::TallGrass)
    }
}
