//! Repository layer for persisted runtime data
//!
//! Repositories handle data that CHANGES during gameplay: the player's
//! position and facing, the party, options. Static content (maps, NPCs,
//! encounter tables) comes from `game-content`, not from here.

mod error;
mod file;
mod memory;
mod save;
mod traits;

pub use error::RepositoryError;
pub use file::FileDataStore;
pub use memory::JsonStore;
pub use save::{
    InventoryEntry, MONSTERS_KEY, PLAYER_DIRECTION_KEY, PLAYER_POSITION_KEY, PartySection,
    PlayerState, SaveData, load_party, load_player_state, save_party, save_player_state,
};
pub use traits::DataStore;
