//! Runtime orchestration for the tile world.
//!
//! This crate wires the pure `game-core` state machines to the services a
//! running game needs: collision over loaded maps, step tweens, a topic-based
//! event bus, persisted save data and scripted cutscenes. Consumers build a
//! [`WorldScene`] and drive it with [`Input`] and frame deltas.
//!
//! Modules are organized by responsibility:
//! - [`scene`] hosts the scene and its builder
//! - [`api`] exposes the error types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`cutscene`] sequences scripted walks, waits and turns
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
pub mod api;
pub mod config;
pub mod cutscene;
pub mod events;
pub mod oracle;
pub mod repository;
pub mod scene;
pub mod tween;

pub use api::{RepositoryError, Result, RuntimeError};
pub use config::RuntimeConfig;
pub use cutscene::{Cutscene, CutsceneStage, CutsceneStep};
pub use events::{DialogEvent, EncounterEvent, Event, EventBus, MovementEvent, Topic};
pub use oracle::{SceneCollision, TileLayer};
pub use repository::{
    DataStore, FileDataStore, JsonStore, PlayerState, SaveData, load_party, load_player_state,
    save_party, save_player_state,
};
pub use scene::{Input, WorldScene, WorldSceneBuilder};
pub use tween::TweenDriver;
