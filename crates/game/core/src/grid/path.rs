use super::{Direction, Position, direction_from_positions, target_position_from_direction};
use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathError {
    #[error("path endpoints {from} -> {to} are not aligned to the tile grid")]
    Misaligned { from: Position, to: Position },
}

impl GameError for PathError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            PathError::Misaligned { .. } => "PATH_MISALIGNED",
        }
    }
}

/// Tile-by-tile route between two cells.
///
/// `directions[i]` is the step that lands on `positions[i]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPath {
    pub directions: Vec<Direction>,
    pub positions: Vec<Position>,
}

impl GridPath {
    pub fn len(&self) -> usize {
        self.directions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }
}

/// Expands the route from `current` to `target`, vertical leg first.
///
/// Each step applies [`direction_from_positions`] followed by
/// [`target_position_from_direction`], so the route mirrors exactly what a
/// character repeatedly facing its goal would walk. Collision is not consulted.
///
/// # Errors
///
/// Returns [`PathError::Misaligned`] if either endpoint is off the tile
/// lattice; the walk could otherwise overshoot forever.
pub fn path_between(current: Position, target: Position) -> Result<GridPath, PathError> {
    if !current.is_tile_aligned() || !target.is_tile_aligned() {
        return Err(PathError::Misaligned {
            from: current,
            to: target,
        });
    }

    let mut path = GridPath::default();
    let mut cursor = current;
    while cursor != target {
        let direction = direction_from_positions(cursor, target);
        cursor = target_position_from_direction(cursor, direction);
        path.directions.push(direction);
        path.positions.push(cursor);
    }

    Ok(path)
}
