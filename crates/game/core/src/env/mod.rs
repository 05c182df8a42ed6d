//! Capabilities the world core consumes from its host.
//!
//! Oracles expose read-only map data (collision), while drivers and observers
//! are the narrow write-side hooks into the rendering layer: the animation
//! driver interpolates a sprite between two cells, observers learn about
//! facing changes and finished steps. The [`MoveEnv`] aggregate bundles them
//! so a character can be moved without holding a reference to its scene.
mod animation;
mod map;
mod npc;
mod observer;

pub use animation::{AnimationDriver, StepAnimation};
pub use map::{CollisionOracle, MapDimensions, StaticTile, TerrainKind};
pub use npc::NpcSpec;
pub use observer::MovementObserver;

/// Aggregates the capabilities needed by [`crate::character::Character::move_character`].
pub struct MoveEnv<'a> {
    collision: &'a dyn CollisionOracle,
    animator: &'a mut dyn AnimationDriver,
    observer: &'a mut dyn MovementObserver,
}

impl<'a> MoveEnv<'a> {
    pub fn new(
        collision: &'a dyn CollisionOracle,
        animator: &'a mut dyn AnimationDriver,
        observer: &'a mut dyn MovementObserver,
    ) -> Self {
        Self {
            collision,
            animator,
            observer,
        }
    }

    pub fn collision(&self) -> &'a dyn CollisionOracle {
        self.collision
    }

    pub fn animator(&mut self) -> &mut dyn AnimationDriver {
        &mut *self.animator
    }

    pub fn observer(&mut self) -> &mut dyn MovementObserver {
        &mut *self.observer
    }
}
