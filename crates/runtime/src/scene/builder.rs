use std::collections::HashMap;

use game_content::MapData;
use game_core::{Direction, EncounterTable, EntityId, GameConfig, NpcSpec, Player, Position};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::WorldScene;
use crate::api::{Result, RuntimeError};
use crate::config::RuntimeConfig;
use crate::events::EventBus;
use crate::oracle::TileLayer;
use crate::repository::{DataStore, JsonStore, load_player_state};
use crate::tween::TweenDriver;

/// Assembles a [`WorldScene`] from content and runtime services.
///
/// Only the tile layer is required. Without a store the scene persists into
/// a fresh in-memory [`JsonStore`]; without a seed the encounter RNG is seeded
/// from OS entropy.
pub struct WorldSceneBuilder {
    config: GameConfig,
    layer: Option<TileLayer>,
    spawn: (Position, Direction),
    npcs: Vec<NpcSpec>,
    encounters: Vec<EncounterTable>,
    store: Option<Box<dyn DataStore>>,
    bus: Option<EventBus>,
    event_buffer_size: usize,
    seed: Option<u64>,
}

impl WorldSceneBuilder {
    pub(super) fn new() -> Self {
        Self {
            config: GameConfig::default(),
            layer: None,
            spawn: (Position::ORIGIN, Direction::Down),
            npcs: Vec::new(),
            encounters: Vec::new(),
            store: None,
            bus: None,
            event_buffer_size: RuntimeConfig::default().event_buffer_size,
            seed: None,
        }
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Takes game config, RNG seed and event capacity from `runtime`.
    pub fn runtime_config(mut self, runtime: &RuntimeConfig) -> Self {
        self.config = runtime.game_config.clone();
        self.seed = runtime.seed;
        self.event_buffer_size = runtime.event_buffer_size;
        self
    }

    /// Uses the map's tiles, player spawn and NPCs.
    pub fn map(mut self, map: &MapData) -> Self {
        self.layer = Some(TileLayer::from_map(map));
        self.spawn = (map.player_spawn, map.player_direction);
        self.npcs = map.npcs.clone();
        self
    }

    pub fn layer(mut self, layer: TileLayer) -> Self {
        self.layer = Some(layer);
        self
    }

    /// Where the player starts when the store holds no usable position.
    pub fn player_spawn(mut self, position: Position, direction: Direction) -> Self {
        self.spawn = (position, direction);
        self
    }

    pub fn npc(mut self, spec: NpcSpec) -> Self {
        self.npcs.push(spec);
        self
    }

    pub fn npcs(mut self, specs: impl IntoIterator<Item = NpcSpec>) -> Self {
        self.npcs.extend(specs);
        self
    }

    pub fn encounters(mut self, tables: impl IntoIterator<Item = EncounterTable>) -> Self {
        self.encounters.extend(tables);
        self
    }

    pub fn store(mut self, store: impl DataStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Shares an existing bus instead of creating one.
    pub fn bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<WorldScene> {
        let layer = self.layer.ok_or(RuntimeError::MissingMap)?;
        let store = self
            .store
            .unwrap_or_else(|| Box::new(JsonStore::new()) as Box<dyn DataStore>);

        let (spawn, spawn_direction) = self.spawn;
        let (position, direction) = match load_player_state(store.as_ref())? {
            Some(saved) if layer.is_walkable(saved.position) => (saved.position, saved.direction),
            Some(saved) => {
                tracing::debug!(
                    saved = %saved.position,
                    %spawn,
                    "saved player position is not walkable on this map, using spawn"
                );
                (spawn, spawn_direction)
            }
            None => (spawn, spawn_direction),
        };
        let step_duration = self.config.step_duration();
        let player = Player::new(position, direction, step_duration);

        let npcs = self
            .npcs
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let npc = spec.spawn(EntityId(index as u32 + 1), step_duration);
                if !layer.is_walkable(spec.spawn_position()) {
                    tracing::warn!(npc = %spec.name, tile = ?spec.tile, "npc spawned on a blocked tile");
                }
                npc
            })
            .collect::<Vec<_>>();

        let mut encounters = HashMap::new();
        for table in self.encounters {
            let area = table.area;
            if encounters.insert(area, table).is_some() {
                tracing::warn!(area, "duplicate encounter table, keeping the last one");
            }
        }

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let bus = self
            .bus
            .unwrap_or_else(|| EventBus::with_capacity(self.event_buffer_size));

        tracing::info!(
            npcs = npcs.len(),
            encounter_areas = encounters.len(),
            player = %position,
            "world scene ready"
        );

        Ok(WorldScene {
            config: self.config,
            layer,
            player,
            npcs,
            tweens: TweenDriver::new(),
            bus,
            store,
            encounters,
            rng,
            dialog: None,
            cutscene: None,
            pending_encounter: None,
        })
    }
}
