//! Error classification shared by every fallible world operation.
//!
//! Each operation family keeps its own `thiserror` enum next to the code that
//! raises it (`MovementError` in `character`, `PathError` in `grid`,
//! `PickError` in `encounter`). They all implement [`GameError`] so the owning
//! scene can decide from [`ErrorSeverity`] alone whether to log and keep
//! ticking or to stop.
//!
//! Walking into a wall has no error type: it is the `Blocked` outcome of the
//! movement state machine.

use crate::grid::Position;
use crate::types::EntityId;

/// How the owner of a failed operation should react.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Try again on a later tick.
    Recoverable,
    /// The request itself is malformed (empty table, off-lattice path).
    Validation,
    /// The world state contradicts itself, e.g. a step reported finished twice.
    Internal,
    /// Broken content or wiring; the scene cannot continue.
    Fatal,
}

impl ErrorSeverity {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub const fn is_recoverable(self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Internal and fatal errors both point at a bug rather than bad input.
    pub const fn is_internal(self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Where and to whom an error happened.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    pub actor: Option<EntityId>,
    pub position: Option<Position>,
    pub message: Option<&'static str>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            actor: None,
            position: None,
            message: None,
        }
    }

    #[must_use]
    pub const fn with_actor(mut self, actor: EntityId) -> Self {
        self.actor = Some(actor);
        self
    }

    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

/// Implemented by every error enum in the world core.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Stable machine-readable code, `SCREAMING_SNAKE_CASE` by convention.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
