//! Event types for different topics.

use game_core::{Direction, EntityId, Position, SpeciesId};
use serde::{Deserialize, Serialize};

/// Events emitted by the movement state machines of every character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementEvent {
    DirectionChanged {
        entity: EntityId,
        direction: Direction,
    },

    /// A step was committed and handed to the tween driver.
    StepStarted {
        entity: EntityId,
        from: Position,
        to: Position,
    },

    StepFinished {
        entity: EntityId,
        position: Position,
    },
}

/// A wild monster appeared after the player finished a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterEvent {
    pub area: u16,
    pub species: SpeciesId,
    pub position: Position,
}

/// Conversation lifecycle between the player and an NPC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogEvent {
    Started {
        npc: EntityId,
        name: String,
        line: String,
    },

    Advanced {
        npc: EntityId,
        line: String,
    },

    Ended {
        npc: EntityId,
    },
}
