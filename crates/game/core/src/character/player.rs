use core::time::Duration;

use super::{Character, CharacterMovement, IdleFrames};
use crate::grid::{Direction, Position};
use crate::types::EntityId;

/// Input-driven character. Owns no patrol state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    movement: CharacterMovement,
}

impl Player {
    pub fn new(position: Position, direction: Direction, step_duration: Duration) -> Self {
        Self::with_idle_frames(position, direction, IdleFrames::PLAYER, step_duration)
    }

    pub fn with_idle_frames(
        position: Position,
        direction: Direction,
        idle_frames: IdleFrames,
        step_duration: Duration,
    ) -> Self {
        Self {
            movement: CharacterMovement::new(
                EntityId::PLAYER,
                position,
                direction,
                idle_frames,
                step_duration,
            ),
        }
    }
}

impl Character for Player {
    fn movement(&self) -> &CharacterMovement {
        &self.movement
    }

    fn movement_mut(&mut self) -> &mut CharacterMovement {
        &mut self.movement
    }

    fn update(&mut self) {
        self.movement.refresh_idle_frame();
    }
}
