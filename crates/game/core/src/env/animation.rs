use core::time::Duration;

use crate::grid::Position;
use crate::types::EntityId;

/// Request to interpolate one character sprite between two cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepAnimation {
    pub entity: EntityId,
    pub from: Position,
    pub to: Position,
    pub duration: Duration,
}

/// External interpolation driver.
///
/// The driver owns easing and rendering. Its only contract with the core is
/// that, after the full duration, the owner reports completion back through
/// [`crate::character::Character::finish_step`] exactly once.
pub trait AnimationDriver {
    fn animate(&mut self, step: StepAnimation);
}

/// Recording driver, handy for tests and headless replays.
impl AnimationDriver for Vec<StepAnimation> {
    fn animate(&mut self, step: StepAnimation) {
        self.push(step);
    }
}
