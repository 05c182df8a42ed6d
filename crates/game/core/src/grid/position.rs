use std::fmt;

use crate::config::GameConfig;

/// Grid-aligned position expressed in world pixels.
///
/// Every position a character can reach through movement is a multiple of
/// [`GameConfig::TILE_SIZE`] on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position of the top-left corner of tile `(column, row)`.
    pub const fn from_tile(column: i32, row: i32) -> Self {
        Self {
            x: column * GameConfig::TILE_SIZE,
            y: row * GameConfig::TILE_SIZE,
        }
    }

    /// Tile coordinates `(column, row)` containing this position.
    pub fn tile(self) -> (i32, i32) {
        (
            self.x.div_euclid(GameConfig::TILE_SIZE),
            self.y.div_euclid(GameConfig::TILE_SIZE),
        )
    }

    /// Returns true when both coordinates sit on the tile lattice.
    pub fn is_tile_aligned(self) -> bool {
        self.x.rem_euclid(GameConfig::TILE_SIZE) == 0
            && self.y.rem_euclid(GameConfig::TILE_SIZE) == 0
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
