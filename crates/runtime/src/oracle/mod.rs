//! Collision adapters backed by loaded map content.
mod collision;
mod map;

pub use collision::SceneCollision;
pub use map::TileLayer;
