//! Monster Tamer headless client.
//!
//! Composition root: reads configuration from the environment, loads content,
//! opens the save file, builds a [`WorldScene`] and plays the demo script
//! against it while a background task reports dialog and encounter events.
//!
//! ```bash
//! GAME_SEED=7 RUST_LOG=debug cargo run -p monster-client
//! ```

mod demo;
mod logging;

use anyhow::{Context, Result};
use game_content::{ConfigLoader, ContentFactory, EncounterLoader, MapData, MapLoader};
use game_core::{EncounterTable, GameConfig, exp_gained_from_defeat};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use runtime::{
    Event, EventBus, FileDataStore, RuntimeConfig, Topic, WorldScene, load_party,
    save_party,
};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

const DEFAULT_MAP: &str = "route_1";
/// Experience yield shared by every wild species until species data exists.
const WILD_BASE_EXP: u32 = 64;

struct Content {
    config: GameConfig,
    map: MapData,
    encounters: Vec<EncounterTable>,
}

/// Loads builtin content, honouring the path overrides of `runtime`.
fn load_content(runtime: &RuntimeConfig) -> Result<Content> {
    let factory = ContentFactory::builtin();

    let config = match &runtime.game_config_path {
        Some(path) => ConfigLoader::load(path),
        None => factory.load_config(),
    }
    .context("loading game config")?;

    let map = match &runtime.map_path {
        Some(path) => MapLoader::load(path),
        None => factory.load_map(DEFAULT_MAP),
    }
    .context("loading map")?;

    let encounters = match &runtime.encounters_path {
        Some(path) => EncounterLoader::load(path),
        None => factory.load_encounters(),
    }
    .context("loading encounter tables")?;

    Ok(Content {
        config,
        map,
        encounters,
    })
}

/// Logs dialog and encounter events until the scene (and its bus) is dropped.
fn spawn_event_logger(bus: &EventBus) -> JoinHandle<()> {
    let mut dialog = bus.subscribe(Topic::Dialog);
    let mut encounters = bus.subscribe(Topic::Encounter);

    tokio::spawn(async move {
        let mut dialog_open = true;
        let mut encounters_open = true;
        while dialog_open || encounters_open {
            let received = tokio::select! {
                event = dialog.recv(), if dialog_open => event.map_err(|e| (Topic::Dialog, e)),
                event = encounters.recv(), if encounters_open => event.map_err(|e| (Topic::Encounter, e)),
            };
            match received {
                Ok(Event::Dialog(event)) => tracing::info!(?event, "dialog"),
                Ok(Event::Encounter(event)) => {
                    tracing::info!(area = event.area, species = %event.species, "encounter")
                }
                Ok(_) => {}
                Err((topic, RecvError::Lagged(skipped))) => {
                    tracing::warn!(?topic, skipped, "event logger lagged");
                }
                Err((Topic::Dialog, RecvError::Closed)) => dialog_open = false,
                Err((_, RecvError::Closed)) => encounters_open = false,
            }
        }
    })
}

/// Grants the lead party monster the experience for a defeated wild monster.
fn award_experience(scene: &mut WorldScene, rng: &mut StdRng) -> Result<()> {
    let mut party = load_party(scene.store())?;
    let Some(lead) = party.first_mut() else {
        tracing::warn!("party is empty, no experience awarded");
        return Ok(());
    };

    let wild_level = rng.gen_range(2..=5);
    let gained = exp_gained_from_defeat(WILD_BASE_EXP, wild_level);
    let changes = lead.gain_experience(gained, rng);
    tracing::info!(
        monster = %lead.name,
        gained,
        level = lead.current_level,
        to_next = lead.exp_to_next_level(),
        "experience awarded"
    );
    if changes.leveled_up() {
        tracing::info!(
            levels = changes.levels_gained,
            max_hp = changes.max_hp,
            attack = changes.attack,
            "level up"
        );
    }

    save_party(scene.store_mut(), &party)?;
    scene.store_mut().flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let mut runtime_config = RuntimeConfig::from_env();

    // 2. Setup logging
    let _log_guard = logging::setup_logging()?;
    tracing::info!("Starting Monster Tamer client");

    // 3. Load content
    let content = load_content(&runtime_config)?;
    runtime_config.game_config = content.config;

    // 4. Open save data and build the scene
    let save_path = runtime_config.save_file_path();
    let store = FileDataStore::open(&save_path)
        .with_context(|| format!("opening save data at {}", save_path.display()))?;
    tracing::info!("Save file: {}", save_path.display());

    let mut scene = WorldScene::builder()
        .runtime_config(&runtime_config)
        .map(&content.map)
        .encounters(content.encounters)
        .store(store)
        .build()?;

    let logger = spawn_event_logger(scene.bus());

    // 5. Play
    let report = demo::run(&mut scene)?;
    tracing::info!(
        lines = report.lines_heard,
        grass_steps = report.grass_steps,
        "demo finished"
    );

    if report.encounter.is_some() {
        let mut rng = match runtime_config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        award_experience(&mut scene, &mut rng)?;
    } else {
        tracing::info!("no wild monster appeared");
    }

    // 6. Shutdown: dropping the scene closes the bus and ends the logger
    drop(scene);
    logger.await?;
    tracing::info!("Client shutdown complete");
    Ok(())
}
