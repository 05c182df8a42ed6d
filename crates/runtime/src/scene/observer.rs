use game_core::{Direction, EntityId, MovementObserver, Position};

use crate::events::{Event, EventBus, MovementEvent};

/// Forwards movement callbacks to the [`Topic::Movement`](crate::events::Topic)
/// channel of the bus.
pub(super) struct BusObserver<'a> {
    bus: &'a EventBus,
}

impl<'a> BusObserver<'a> {
    pub(super) fn new(bus: &'a EventBus) -> Self {
        Self { bus }
    }
}

impl MovementObserver for BusObserver<'_> {
    fn on_direction_changed(&mut self, entity: EntityId, direction: Direction) {
        self.bus
            .publish(Event::Movement(MovementEvent::DirectionChanged { entity, direction }));
    }

    fn on_movement_finished(&mut self, entity: EntityId, position: Position) {
        tracing::debug!(%entity, %position, "step finished");
        self.bus
            .publish(Event::Movement(MovementEvent::StepFinished { entity, position }));
    }
}
