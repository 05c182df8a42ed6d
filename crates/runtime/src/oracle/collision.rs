//! Collision view for one moving character.
use game_core::{CharacterMovement, CollisionOracle, Position};

use super::TileLayer;

/// Tile layer plus the cells claimed by every other character.
///
/// A character claims both the cell it is stepping into and the cell it is
/// leaving, so two sprites never overlap mid-step.
pub struct SceneCollision<'a> {
    layer: &'a TileLayer,
    occupied: Vec<Position>,
}

impl<'a> SceneCollision<'a> {
    pub fn new(layer: &'a TileLayer) -> Self {
        Self {
            layer,
            occupied: Vec::new(),
        }
    }

    pub fn claim(&mut self, movement: &CharacterMovement) {
        self.occupied.push(movement.target_position());
        if movement.previous_target_position() != movement.target_position() {
            self.occupied.push(movement.previous_target_position());
        }
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.occupied.contains(&position)
    }
}

impl CollisionOracle for SceneCollision<'_> {
    fn is_blocking(&self, x: i32, y: i32) -> bool {
        self.layer.is_blocking(x, y) || self.is_occupied(Position::new(x, y))
    }
}
