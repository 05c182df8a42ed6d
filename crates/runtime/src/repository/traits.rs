//! Repository contract for the persisted key-value store.

use serde_json::Value;

use super::error::Result;

/// Key-value store over a single JSON document.
///
/// Keys are dotted paths (`"player.position.x"`). The scene reads and writes
/// the player's position and facing through this contract; other sections
/// (`options`, `monsters`, `inventory`) belong to the surrounding game.
pub trait DataStore: Send {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<&Value>;

    /// Stores `value` under `key`, creating intermediate objects.
    fn set(&mut self, key: &str, value: Value) -> Result<()>;

    /// Persists pending writes. In-memory stores have nothing to do.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
