//! Data-driven content definitions and loaders.
//!
//! This crate provides loaders for the RON/TOML data files of the world:
//! - Map layouts with terrain, encounter areas, player spawn and NPCs (RON)
//! - Wild encounter tables (RON)
//! - Game configuration (TOML)
//!
//! Content is consumed by the runtime when it builds a scene and never appears
//! in save data.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, EncounterLoader, LoadResult, MapData, MapLoader, NpcEntryError,
};
