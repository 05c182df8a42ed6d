//! World scene orchestration.
//!
//! [`WorldScene`] owns every character of one map together with the services
//! that drive them: the tile layer, the tween driver, the event bus, the data
//! store and the encounter RNG. Clients feed it [`Input`] and frame deltas;
//! everything else (step completion, persistence, encounters, patrols,
//! cutscenes) happens inside [`WorldScene::update`].
mod builder;
mod observer;

pub use builder::WorldSceneBuilder;

use std::collections::HashMap;
use std::time::Duration;

use game_core::{
    Character, Direction, EncounterTable, EntityId, GameConfig, MoveEnv, MoveOutcome, Npc, Player,
    Position, target_position_from_direction,
};
use rand::rngs::StdRng;

use crate::api::{Result, RuntimeError};
use crate::cutscene::{Cutscene, CutsceneStage};
use crate::events::{DialogEvent, EncounterEvent, Event, EventBus, MovementEvent};
use crate::oracle::{SceneCollision, TileLayer};
use crate::repository::{DataStore, PlayerState, save_player_state};
use crate::tween::TweenDriver;

use observer::BusObserver;

/// One frame of player intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Input {
    Move(Direction),
    /// Talk to the faced NPC, or advance the open dialog.
    Interact,
    #[default]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Dialog {
    npc: EntityId,
    line: usize,
}

pub struct WorldScene {
    config: GameConfig,
    layer: TileLayer,
    player: Player,
    npcs: Vec<Npc>,
    tweens: TweenDriver,
    bus: EventBus,
    store: Box<dyn DataStore>,
    encounters: HashMap<u16, EncounterTable>,
    rng: StdRng,
    dialog: Option<Dialog>,
    cutscene: Option<Cutscene>,
    pending_encounter: Option<EncounterEvent>,
}

fn character_mut<'a>(
    player: &'a mut Player,
    npcs: &'a mut [Npc],
    id: EntityId,
) -> Result<&'a mut dyn Character> {
    if id == player.id() {
        return Ok(player as &mut dyn Character);
    }
    npcs.iter_mut()
        .find(|npc| npc.id() == id)
        .map(|npc| npc as &mut dyn Character)
        .ok_or(RuntimeError::UnknownEntity(id))
}

impl WorldScene {
    pub fn builder() -> WorldSceneBuilder {
        WorldSceneBuilder::new()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn layer(&self) -> &TileLayer {
        &self.layer
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn npcs(&self) -> &[Npc] {
        &self.npcs
    }

    pub fn npc(&self, id: EntityId) -> Option<&Npc> {
        self.npcs.iter().find(|npc| npc.id() == id)
    }

    pub fn npc_named(&self, name: &str) -> Option<&Npc> {
        self.npcs.iter().find(|npc| npc.name() == name)
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn store(&self) -> &dyn DataStore {
        self.store.as_ref()
    }

    pub fn store_mut(&mut self) -> &mut dyn DataStore {
        self.store.as_mut()
    }

    pub fn is_dialog_active(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn is_cutscene_playing(&self) -> bool {
        self.cutscene.is_some()
    }

    /// Line currently shown by the open dialog.
    pub fn dialog_line(&self) -> Option<&str> {
        let dialog = self.dialog?;
        self.npc(dialog.npc)
            .and_then(|npc| npc.messages().get(dialog.line))
            .map(String::as_str)
    }

    pub fn pending_encounter(&self) -> Option<&EncounterEvent> {
        self.pending_encounter.as_ref()
    }

    /// Hands the pending encounter to the caller and unlocks input.
    pub fn take_encounter(&mut self) -> Option<EncounterEvent> {
        self.pending_encounter.take()
    }

    /// Sprite position in world pixels: the tween position mid-step, the
    /// tile position otherwise.
    pub fn visual_position(&self, id: EntityId) -> Option<(f32, f32)> {
        if let Some(position) = self.tweens.visual_position(id) {
            return Some(position);
        }
        let position = if id == self.player.id() {
            self.player.position()
        } else {
            self.npc(id)?.position()
        };
        Some((position.x as f32, position.y as f32))
    }

    fn input_locked(&self) -> bool {
        self.dialog.is_some() || self.cutscene.is_some() || self.pending_encounter.is_some()
    }

    /// Applies one frame of player input.
    ///
    /// Movement and new conversations are ignored while a dialog, cutscene or
    /// unclaimed encounter is active; `Interact` still advances a dialog.
    pub fn handle_input(&mut self, input: Input) -> Result<()> {
        match input {
            Input::Interact if self.dialog.is_some() => self.advance_dialog(),
            _ if self.input_locked() => {
                tracing::trace!(?input, "input ignored while scene is locked");
                Ok(())
            }
            Input::Interact => {
                self.interact();
                Ok(())
            }
            Input::Move(direction) => self
                .step_character(EntityId::PLAYER, direction)
                .map(|_| ()),
            Input::None => Ok(()),
        }
    }

    /// Starts `cutscene`; player input is ignored until it finishes.
    pub fn play_cutscene(&mut self, cutscene: Cutscene) -> Result<()> {
        if self.cutscene.is_some() {
            return Err(RuntimeError::CutsceneInProgress);
        }
        tracing::debug!(steps = cutscene.remaining_steps(), "cutscene started");
        self.cutscene = Some(cutscene);
        Ok(())
    }

    /// Drops the playing cutscene and unlocks input. Steps already in flight
    /// still land.
    pub fn stop_cutscene(&mut self) -> Option<Cutscene> {
        let cutscene = self.cutscene.take();
        if let Some(cutscene) = &cutscene {
            tracing::debug!(steps = cutscene.remaining_steps(), "cutscene stopped");
        }
        cutscene
    }

    /// Advances the scene by one frame.
    ///
    /// Order: tweens, step completion (persistence and encounters for the
    /// player), cutscene, NPC patrols, idle frames.
    ///
    /// Every landed step is completed before the first completion error is
    /// returned; the rest of that frame is skipped.
    pub fn update(&mut self, dt: Duration) -> Result<()> {
        let mut failure = None;
        for entity in self.tweens.advance(dt) {
            if let Err(err) = self.finish_step(entity) {
                tracing::warn!(%entity, error = %err, "step completion failed");
                failure.get_or_insert(err);
            }
        }
        if let Some(err) = failure {
            return Err(err);
        }

        if let Some(mut cutscene) = self.cutscene.take() {
            if cutscene.advance(dt, &mut *self)? {
                tracing::debug!("cutscene finished");
            } else {
                self.cutscene = Some(cutscene);
            }
        }

        for index in 0..self.npcs.len() {
            self.patrol(index);
        }

        self.player.update();
        for npc in &mut self.npcs {
            npc.update();
        }
        Ok(())
    }

    /// Attempts one step of `actor` against the layer and every other
    /// character.
    fn step_character(&mut self, actor: EntityId, direction: Direction) -> Result<MoveOutcome> {
        let mut collision = SceneCollision::new(&self.layer);
        if actor != self.player.id() {
            collision.claim(self.player.movement());
        }
        for npc in self.npcs.iter().filter(|npc| npc.id() != actor) {
            collision.claim(npc.movement());
        }

        let character = character_mut(&mut self.player, &mut self.npcs, actor)?;
        let mut observer = BusObserver::new(&self.bus);
        let mut env = MoveEnv::new(&collision, &mut self.tweens, &mut observer);
        let outcome = character.move_character(direction, &mut env);

        self.publish_step(actor, outcome);
        Ok(outcome)
    }

    fn patrol(&mut self, index: usize) {
        let mut collision = SceneCollision::new(&self.layer);
        collision.claim(self.player.movement());
        for (other, npc) in self.npcs.iter().enumerate() {
            if other != index {
                collision.claim(npc.movement());
            }
        }

        let npc = &mut self.npcs[index];
        let mut observer = BusObserver::new(&self.bus);
        let mut env = MoveEnv::new(&collision, &mut self.tweens, &mut observer);
        if let Some(outcome) = npc.patrol_tick(&mut env) {
            let id = npc.id();
            self.publish_step(id, outcome);
        }
    }

    fn publish_step(&self, entity: EntityId, outcome: MoveOutcome) {
        if let MoveOutcome::Started { from, to } = outcome {
            tracing::debug!(%entity, %from, %to, "step started");
            self.bus
                .publish(Event::Movement(MovementEvent::StepStarted { entity, from, to }));
        }
    }

    fn finish_step(&mut self, entity: EntityId) -> Result<()> {
        let character = character_mut(&mut self.player, &mut self.npcs, entity)?;
        let position = character.finish_step(&mut BusObserver::new(&self.bus))?;

        if entity.is_player() {
            let saved = self.save_player(position);
            self.roll_encounter(position)?;
            saved?;
        }
        Ok(())
    }

    fn save_player(&mut self, position: Position) -> Result<()> {
        let state = PlayerState {
            position,
            direction: self.player.direction(),
        };
        save_player_state(self.store.as_mut(), state)?;
        self.store.flush()?;
        Ok(())
    }

    fn roll_encounter(&mut self, position: Position) -> Result<()> {
        let Some(area) = self.layer.encounter_area_at(position) else {
            return Ok(());
        };
        let Some(table) = self.encounters.get(&area) else {
            tracing::warn!(area, "no encounter table for area");
            return Ok(());
        };

        let Some(species) = table.roll(self.config.encounter_chance_percent, &mut self.rng)?
        else {
            return Ok(());
        };

        tracing::info!(area, %species, %position, "wild monster appeared");
        let event = EncounterEvent {
            area,
            species,
            position,
        };
        self.bus.publish(Event::Encounter(event.clone()));
        self.pending_encounter = Some(event);
        Ok(())
    }

    fn interact(&mut self) {
        if self.player.is_moving() {
            return;
        }
        let facing = self.player.direction();
        let faced = target_position_from_direction(self.player.position(), facing);
        let Some(index) = self
            .npcs
            .iter()
            .position(|npc| npc.position() == faced && !npc.is_moving())
        else {
            return;
        };

        let npc = &mut self.npcs[index];
        let Some(first) = npc.messages().first().cloned() else {
            tracing::debug!(npc = npc.name(), "npc has nothing to say");
            return;
        };
        npc.start_dialog(facing);
        tracing::info!(npc = npc.name(), "dialog started");
        self.bus.publish(Event::Dialog(DialogEvent::Started {
            npc: npc.id(),
            name: npc.name().to_string(),
            line: first,
        }));
        self.dialog = Some(Dialog {
            npc: npc.id(),
            line: 0,
        });
    }

    fn advance_dialog(&mut self) -> Result<()> {
        let Some(mut dialog) = self.dialog else {
            return Ok(());
        };
        let npc = self
            .npcs
            .iter_mut()
            .find(|npc| npc.id() == dialog.npc)
            .ok_or(RuntimeError::UnknownEntity(dialog.npc))?;

        dialog.line += 1;
        if let Some(line) = npc.messages().get(dialog.line).cloned() {
            self.bus.publish(Event::Dialog(DialogEvent::Advanced {
                npc: npc.id(),
                line,
            }));
            self.dialog = Some(dialog);
        } else {
            npc.end_dialog();
            tracing::info!(npc = npc.name(), "dialog ended");
            self.bus
                .publish(Event::Dialog(DialogEvent::Ended { npc: npc.id() }));
            self.dialog = None;
        }
        Ok(())
    }
}

impl CutsceneStage for WorldScene {
    fn walk(&mut self, actor: EntityId, direction: Direction) -> Result<MoveOutcome> {
        self.step_character(actor, direction)
    }

    /// Turns through the movement state machine against a solid wall, so the
    /// facing change is observed like any other.
    fn face(&mut self, actor: EntityId, direction: Direction) -> Result<MoveOutcome> {
        let wall = |_: i32, _: i32| true;
        let character = character_mut(&mut self.player, &mut self.npcs, actor)?;
        let mut observer = BusObserver::new(&self.bus);
        let mut env = MoveEnv::new(&wall, &mut self.tweens, &mut observer);
        Ok(character.move_character(direction, &mut env))
    }

    fn is_moving(&self, actor: EntityId) -> Result<bool> {
        if actor == self.player.id() {
            return Ok(self.player.is_moving());
        }
        self.npc(actor)
            .map(Character::is_moving)
            .ok_or(RuntimeError::UnknownEntity(actor))
    }
}
