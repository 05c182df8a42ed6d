//! Deterministic world rules for the monster tamer.
//!
//! `game-core` owns tile movement, NPC patrols, the experience curve and wild
//! encounter selection. It never renders or sleeps: the host plugs in
//! collision, animation and observers through the capability traits in
//! [`env`], and the runtime crate drives everything from its frame loop.
pub mod character;
pub mod config;
pub mod encounter;
pub mod env;
pub mod error;
pub mod grid;
pub mod leveling;
pub mod types;

pub use character::{
    Character, CharacterMovement, IdleFrames, MoveOutcome, MovementError, MovementPattern,
    MovementState, Npc, Player, SpriteFrame, patrol_direction,
};
pub use config::GameConfig;
pub use encounter::{EncounterTable, PickError, select_by_draw, weighted_pick};
pub use env::{
    AnimationDriver, CollisionOracle, MapDimensions, MoveEnv, MovementObserver, NpcSpec,
    StaticTile, StepAnimation, TerrainKind,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use grid::{
    Direction, GridPath, PathError, Position, direction_from_positions, path_between,
    target_position_from_direction,
};
pub use leveling::{
    Monster, StatChanges, exp_bar_progress, exp_gained_from_defeat, exp_needed_for_next_level,
    level_for_exp, total_exp_for_level,
};
pub use types::{EntityId, SpeciesId};
