//! NPC spawn definitions.
//!
//! `NpcSpec` is the data-driven description of an NPC as it appears in map
//! content. Coordinates are tile columns/rows; spawning converts them into
//! world pixels and builds the patrol path.

use core::time::Duration;

use crate::character::{IdleFrames, MovementPattern, Npc};
use crate::grid::{Direction, Position};
use crate::types::EntityId;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcSpec {
    pub name: String,
    /// Spawn tile `(column, row)`.
    pub tile: (i32, i32),
    #[cfg_attr(feature = "serde", serde(default))]
    pub direction: Direction,
    #[cfg_attr(feature = "serde", serde(default))]
    pub pattern: MovementPattern,
    /// Waypoint tiles visited after leaving the spawn tile.
    #[cfg_attr(feature = "serde", serde(default))]
    pub path: Vec<(i32, i32)>,
    /// First frame of the `down, up, side` block on the NPC sheet.
    #[cfg_attr(feature = "serde", serde(default))]
    pub frame_base: u16,
    #[cfg_attr(feature = "serde", serde(default))]
    pub messages: Vec<String>,
}

impl NpcSpec {
    pub fn new(name: impl Into<String>, column: i32, row: i32) -> Self {
        Self {
            name: name.into(),
            tile: (column, row),
            direction: Direction::Down,
            pattern: MovementPattern::Idle,
            path: Vec::new(),
            frame_base: 0,
            messages: Vec::new(),
        }
    }

    pub fn spawn_position(&self) -> Position {
        Position::from_tile(self.tile.0, self.tile.1)
    }

    pub fn spawn(&self, id: EntityId, step_duration: Duration) -> Npc {
        Npc::new(
            id,
            self.spawn_position(),
            self.direction,
            IdleFrames::npc_sheet(self.frame_base),
            step_duration,
        )
        .with_name(self.name.clone())
        .with_waypoints(
            self.path
                .iter()
                .map(|&(column, row)| Position::from_tile(column, row)),
        )
        .with_pattern(self.pattern)
        .with_messages(self.messages.clone())
    }
}
