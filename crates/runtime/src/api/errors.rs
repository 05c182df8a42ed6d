//! The single error type every scene operation returns.
use game_core::{EntityId, MovementError, PathError, PickError};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Save data, world-core and scene wiring failures.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Movement(#[from] MovementError),

    #[error(transparent)]
    Pick(#[from] PickError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error("no character with id {0} in the scene")]
    UnknownEntity(EntityId),

    #[error("scene requires a tile layer before building")]
    MissingMap,

    #[error("a cutscene is already playing")]
    CutsceneInProgress,
}
