//! Save-data layout and typed helpers over a [`DataStore`].

use game_core::{Direction, Monster, Position, SpeciesId};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::error::{RepositoryError, Result};
use super::traits::DataStore;

pub const PLAYER_POSITION_KEY: &str = "player.position";
pub const PLAYER_DIRECTION_KEY: &str = "player.direction";
pub const MONSTERS_KEY: &str = "monsters.inParty";

/// Where the player stands and which way they face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub position: Position,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub item: u32,
    pub quantity: u32,
}

/// Default document written on first launch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub player: PlayerState,
    pub options: Value,
    pub monsters: PartySection,
    pub inventory: Vec<InventoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartySection {
    #[serde(rename = "inParty")]
    pub in_party: Vec<Monster>,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            player: PlayerState {
                position: Position::from_tile(6, 21),
                direction: Direction::Down,
            },
            options: json!({
                "textSpeed": "MID",
                "battleSceneAnimations": "ON",
                "battleStyle": "SHIFT",
                "sound": "ON",
                "volume": 4,
                "menuColor": 0,
            }),
            monsters: PartySection {
                in_party: vec![Monster::new(1, "Iguanignite", SpeciesId(1), 5, 25, 5)],
            },
            inventory: vec![InventoryEntry {
                item: 1,
                quantity: 10,
            }],
        }
    }
}

impl SaveData {
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

fn read_as<T: serde::de::DeserializeOwned>(store: &dyn DataStore, key: &str) -> Result<Option<T>> {
    store
        .get(key)
        .map(|value| {
            serde_json::from_value(value.clone())
                .map_err(|e| RepositoryError::CorruptedData(format!("{key}: {e}")))
        })
        .transpose()
}

/// Reads the persisted player state; `None` if either half is missing.
pub fn load_player_state(store: &dyn DataStore) -> Result<Option<PlayerState>> {
    let position = read_as::<Position>(store, PLAYER_POSITION_KEY)?;
    let direction = read_as::<Direction>(store, PLAYER_DIRECTION_KEY)?;
    Ok(position
        .zip(direction)
        .map(|(position, direction)| PlayerState {
            position,
            direction,
        }))
}

pub fn save_player_state(store: &mut dyn DataStore, state: PlayerState) -> Result<()> {
    store.set(PLAYER_POSITION_KEY, serde_json::to_value(state.position)?)?;
    store.set(PLAYER_DIRECTION_KEY, serde_json::to_value(state.direction)?)?;
    Ok(())
}

pub fn load_party(store: &dyn DataStore) -> Result<Vec<Monster>> {
    Ok(read_as::<Vec<Monster>>(store, MONSTERS_KEY)?.unwrap_or_default())
}

pub fn save_party(store: &mut dyn DataStore, party: &[Monster]) -> Result<()> {
    store.set(MONSTERS_KEY, serde_json::to_value(party)?)
}
