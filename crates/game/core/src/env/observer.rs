use crate::grid::{Direction, Position};
use crate::types::EntityId;

/// Notification sinks for movement side effects.
///
/// Both hooks default to no-ops; `()` is the "no callback registered" sink.
pub trait MovementObserver {
    /// Facing changed; drives walk-animation selection in the renderer.
    fn on_direction_changed(&mut self, _entity: EntityId, _direction: Direction) {}

    /// A tile step finished and the character is idle again at `position`.
    fn on_movement_finished(&mut self, _entity: EntityId, _position: Position) {}
}

impl MovementObserver for () {}
