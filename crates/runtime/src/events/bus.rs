//! Topic-based event bus implementation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{DialogEvent, EncounterEvent, MovementEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Facing changes and tile steps
    Movement,
    /// Wild monster encounters
    Encounter,
    /// NPC conversations
    Dialog,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Movement(MovementEvent),
    Encounter(EncounterEvent),
    Dialog(DialogEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Movement(_) => Topic::Movement,
            Event::Encounter(_) => Topic::Encounter,
            Event::Dialog(_) => Topic::Dialog,
        }
    }
}

struct Channels {
    movement: broadcast::Sender<Event>,
    encounter: broadcast::Sender<Event>,
    dialog: broadcast::Sender<Event>,
}

impl Channels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Movement => &self.movement,
            Topic::Encounter => &self.encounter,
            Topic::Dialog => &self.dialog,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks; slow receivers lag.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                movement: broadcast::channel(capacity).0,
                encounter: broadcast::channel(capacity).0,
                dialog: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> Vec<(Topic, broadcast::Receiver<Event>)> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use game_core::{EntityId, Position};

    use super::*;

    #[test]
    fn events_reach_only_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut movement = bus.subscribe(Topic::Movement);
        let mut dialog = bus.subscribe(Topic::Dialog);

        let event = Event::Movement(MovementEvent::StepFinished {
            entity: EntityId::PLAYER,
            position: Position::from_tile(1, 1),
        });
        bus.publish(event.clone());

        assert_eq!(movement.try_recv().unwrap(), event);
        assert!(dialog.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.publish(Event::Dialog(DialogEvent::Ended { npc: EntityId(1) }));
    }
}
