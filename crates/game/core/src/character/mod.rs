//! Characters and their tile movement.
//!
//! Every character owns a [`CharacterMovement`] state machine (`Idle` →
//! `Moving` → `Idle`, one tile per step). The [`Character`] trait is sealed:
//! only [`Player`] and [`Npc`] exist, so the movement base can never be used on
//! its own.
mod frames;
mod movement;
mod npc;
mod player;

pub use frames::{IdleFrames, SpriteFrame};
pub use movement::{CharacterMovement, MoveOutcome, MovementError, MovementState};
pub use npc::{MovementPattern, Npc, patrol_direction};
pub use player::Player;

use crate::env::{MoveEnv, MovementObserver};
use crate::grid::{Direction, Position};
use crate::types::EntityId;

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Player {}
    impl Sealed for super::Npc {}
}

/// Behaviour common to every character that walks the tile grid.
pub trait Character: sealed::Sealed {
    fn movement(&self) -> &CharacterMovement;

    fn movement_mut(&mut self) -> &mut CharacterMovement;

    /// Per-frame hook; refreshes the idle frame while standing still.
    fn update(&mut self);

    fn id(&self) -> EntityId {
        self.movement().id()
    }

    fn position(&self) -> Position {
        self.movement().target_position()
    }

    fn direction(&self) -> Direction {
        self.movement().direction()
    }

    fn is_moving(&self) -> bool {
        self.movement().is_moving()
    }

    fn move_character(&mut self, direction: Direction, env: &mut MoveEnv<'_>) -> MoveOutcome {
        self.movement_mut().move_character(direction, env)
    }

    fn finish_step(
        &mut self,
        observer: &mut dyn MovementObserver,
    ) -> Result<Position, MovementError> {
        self.movement_mut().finish_step(observer)
    }
}
