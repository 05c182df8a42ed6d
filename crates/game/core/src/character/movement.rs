use core::time::Duration;

use super::frames::{IdleFrames, SpriteFrame};
use crate::env::{MoveEnv, MovementObserver, StepAnimation};
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::grid::{Direction, Position, target_position_from_direction};
use crate::types::EntityId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MovementError {
    #[error("step completion reported for idle character {actor} at {position}")]
    NotMoving {
        actor: EntityId,
        position: Position,
        context: ErrorContext,
    },
}

impl GameError for MovementError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            MovementError::NotMoving { .. } => ErrorSeverity::Internal,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            MovementError::NotMoving { context, .. } => Some(context),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            MovementError::NotMoving { .. } => "MOVEMENT_NOT_MOVING",
        }
    }
}

/// Phase of the per-character movement state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementState {
    #[default]
    Idle,
    Moving,
}

/// Result of a single `move_character` attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// `Direction::None` was requested; nothing happened.
    Idle,
    /// A step is already in flight; the request was dropped, not queued.
    Busy,
    /// The character turned to face `destination` but could not enter it.
    Blocked { destination: Position },
    /// A step from `from` to `to` was handed to the animation driver.
    Started { from: Position, to: Position },
}

impl MoveOutcome {
    pub fn started(self) -> bool {
        matches!(self, MoveOutcome::Started { .. })
    }
}

/// Grid movement state shared by every character kind.
///
/// `target_position` is authoritative: it is the cell the character occupies
/// or is stepping into. `previous_target_position` is the cell it is animating
/// away from and equals `target_position` while idle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterMovement {
    id: EntityId,
    target_position: Position,
    previous_target_position: Position,
    direction: Direction,
    state: MovementState,
    idle_frames: IdleFrames,
    display_frame: SpriteFrame,
    step_duration: Duration,
}

impl CharacterMovement {
    pub fn new(
        id: EntityId,
        position: Position,
        direction: Direction,
        idle_frames: IdleFrames,
        step_duration: Duration,
    ) -> Self {
        Self {
            id,
            target_position: position,
            previous_target_position: position,
            direction,
            state: MovementState::Idle,
            idle_frames,
            display_frame: idle_frames.frame_for(direction),
            step_duration,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn target_position(&self) -> Position {
        self.target_position
    }

    pub fn previous_target_position(&self) -> Position {
        self.previous_target_position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> MovementState {
        self.state
    }

    pub fn is_moving(&self) -> bool {
        self.state == MovementState::Moving
    }

    pub fn idle_frames(&self) -> &IdleFrames {
        &self.idle_frames
    }

    pub fn display_frame(&self) -> SpriteFrame {
        self.display_frame
    }

    pub fn step_duration(&self) -> Duration {
        self.step_duration
    }

    /// Attempts a single tile step towards `direction`.
    ///
    /// Facing is updated before the collision check so that walking into a
    /// wall still turns the character towards it.
    pub fn move_character(&mut self, direction: Direction, env: &mut MoveEnv<'_>) -> MoveOutcome {
        if direction.is_none() {
            return MoveOutcome::Idle;
        }
        if self.is_moving() {
            return MoveOutcome::Busy;
        }

        if self.direction != direction {
            self.direction = direction;
            env.observer().on_direction_changed(self.id, direction);
        }

        let destination = target_position_from_direction(self.target_position, direction);
        if env.collision().is_blocking_at(destination) {
            return MoveOutcome::Blocked { destination };
        }

        let from = self.target_position;
        self.state = MovementState::Moving;
        self.previous_target_position = from;
        self.target_position = destination;
        env.animator().animate(StepAnimation {
            entity: self.id,
            from,
            to: destination,
            duration: self.step_duration,
        });

        MoveOutcome::Started {
            from,
            to: destination,
        }
    }

    /// Completion callback of the step animation.
    ///
    /// # Errors
    ///
    /// Returns [`MovementError::NotMoving`] when no step is in flight, which
    /// means the driver reported the same animation twice.
    pub fn finish_step(
        &mut self,
        observer: &mut dyn MovementObserver,
    ) -> Result<Position, MovementError> {
        if !self.is_moving() {
            return Err(MovementError::NotMoving {
                actor: self.id,
                position: self.target_position,
                context: ErrorContext::new()
                    .with_actor(self.id)
                    .with_position(self.target_position)
                    .with_message("animation driver completed a step twice"),
            });
        }

        self.state = MovementState::Idle;
        self.previous_target_position = self.target_position;
        observer.on_movement_finished(self.id, self.target_position);
        Ok(self.target_position)
    }

    /// Re-derives the idle frame from the current facing. No-op mid-step.
    pub fn refresh_idle_frame(&mut self) {
        if !self.is_moving() {
            self.display_frame = self.idle_frames.frame_for(self.direction);
        }
    }

    pub(crate) fn show_frame(&mut self, frame: SpriteFrame) {
        self.display_frame = frame;
    }
}
