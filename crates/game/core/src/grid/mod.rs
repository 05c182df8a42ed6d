//! Tile lattice math.
//!
//! Pure helpers that turn a position plus a facing into the neighbouring
//! grid cell, recover a facing from two positions, and expand a straight-line
//! route into per-tile steps. Nothing here touches collision; callers combine
//! these with a [`crate::env::CollisionOracle`].
mod direction;
mod path;
mod position;

pub use direction::Direction;
pub use path::{GridPath, PathError, path_between};
pub use position::Position;

use crate::config::GameConfig;

/// Returns `position` offset by exactly one tile towards `direction`.
///
/// `Direction::None` returns `position` unchanged.
pub fn target_position_from_direction(position: Position, direction: Direction) -> Position {
    let (dx, dy) = direction.delta();
    Position::new(
        position.x + dx * GameConfig::TILE_SIZE,
        position.y + dy * GameConfig::TILE_SIZE,
    )
}

/// Derives the facing needed to walk from `current` towards `target`.
///
/// The vertical axis wins: a diagonal offset resolves to `Down` or `Up`.
/// Equal positions degenerate to `Right`, so callers must pass distinct
/// positions for a meaningful answer.
pub fn direction_from_positions(current: Position, target: Position) -> Direction {
    if target.y > current.y {
        Direction::Down
    } else if target.y < current.y {
        Direction::Up
    } else if target.x < current.x {
        Direction::Left
    } else {
        Direction::Right
    }
}
