//! Scripted headless play-through of the builtin route.
//!
//! Stands in for an input device: each phase feeds [`Input`] into the scene
//! and then ticks frames until the scene settles.

use std::time::Duration;

use anyhow::Result;
use game_core::{Character, Direction, EntityId, Position};
use runtime::{Cutscene, EncounterEvent, Input, WorldScene};

const FRAME: Duration = Duration::from_millis(16);
const MAX_SETTLE_FRAMES: usize = 600;
const MAX_GRASS_STEPS: usize = 40;

/// Tile the cutscene walks the player to before searching for monsters.
pub const GRASS_TILE: (i32, i32) = (6, 5);

#[derive(Debug, Default)]
pub struct DemoReport {
    pub lines_heard: usize,
    pub grass_steps: usize,
    pub encounter: Option<EncounterEvent>,
}

/// Ticks frames until the player is idle and no cutscene runs.
///
/// Returns `false` if the scene did not settle within the frame budget.
fn settle(scene: &mut WorldScene) -> Result<bool> {
    for _ in 0..MAX_SETTLE_FRAMES {
        scene.update(FRAME)?;
        if !scene.player().is_moving() && !scene.is_cutscene_playing() {
            return Ok(true);
        }
    }
    Ok(false)
}

fn step(scene: &mut WorldScene, direction: Direction) -> Result<()> {
    scene.handle_input(Input::Move(direction))?;
    settle(scene)?;
    Ok(())
}

/// Talks to whoever stands in front of the player until the dialog closes.
fn talk(scene: &mut WorldScene) -> Result<usize> {
    scene.handle_input(Input::Interact)?;
    let mut lines = 0;
    while let Some(line) = scene.dialog_line() {
        tracing::info!("\"{line}\"");
        lines += 1;
        scene.handle_input(Input::Interact)?;
    }
    Ok(lines)
}

pub fn run(scene: &mut WorldScene) -> Result<DemoReport> {
    let mut report = DemoReport::default();

    step(scene, Direction::Right)?;
    report.lines_heard = talk(scene)?;

    let grass = Position::from_tile(GRASS_TILE.0, GRASS_TILE.1);
    let walk = Cutscene::new().walk_to(EntityId::PLAYER, scene.player().position(), grass)?;
    scene.play_cutscene(walk)?;
    if !settle(scene)? {
        scene.stop_cutscene();
        tracing::warn!(
            position = %scene.player().position(),
            "path to the tall grass is blocked, ending demo"
        );
        return Ok(report);
    }

    let mut direction = Direction::Right;
    while report.grass_steps < MAX_GRASS_STEPS {
        step(scene, direction)?;
        report.grass_steps += 1;
        if let Some(encounter) = scene.take_encounter() {
            report.encounter = Some(encounter);
            break;
        }
        direction = direction.opposite();
    }

    Ok(report)
}
