//! Scripted character sequences.
//!
//! A cutscene is a queue of steps, each started and then awaited before the
//! next one begins. The scene plays it through the [`CutsceneStage`] trait once
//! per update, after finished steps have been applied, so a walk step that
//! just landed hands over to the next step in the same frame.

use std::collections::VecDeque;
use std::time::Duration;

use game_core::{Direction, EntityId, MoveOutcome, Position, path_between};

use crate::api::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutsceneStep {
    /// One tile step; retried every frame while blocked.
    Walk { actor: EntityId, direction: Direction },
    Wait(Duration),
    /// Turn without moving; waits for a step in flight to land first.
    Face { actor: EntityId, direction: Direction },
}

/// The scene-side operations a cutscene needs.
pub trait CutsceneStage {
    fn walk(&mut self, actor: EntityId, direction: Direction) -> Result<MoveOutcome>;

    /// Turns `actor` in place. `Busy` means the turn was not applied.
    fn face(&mut self, actor: EntityId, direction: Direction) -> Result<MoveOutcome>;

    fn is_moving(&self, actor: EntityId) -> Result<bool>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Active {
    Walking(EntityId),
    Waiting(Duration),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cutscene {
    steps: VecDeque<CutsceneStep>,
    active: Option<Active>,
}

impl Cutscene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, step: CutsceneStep) -> Self {
        self.steps.push_back(step);
        self
    }

    pub fn walk(self, actor: EntityId, direction: Direction) -> Self {
        self.then(CutsceneStep::Walk { actor, direction })
    }

    pub fn wait(self, duration: Duration) -> Self {
        self.then(CutsceneStep::Wait(duration))
    }

    pub fn face(self, actor: EntityId, direction: Direction) -> Self {
        self.then(CutsceneStep::Face { actor, direction })
    }

    /// Appends the walk steps that lead `actor` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Propagates [`game_core::PathError`] for misaligned endpoints.
    pub fn walk_to(mut self, actor: EntityId, from: Position, to: Position) -> Result<Self> {
        let path = path_between(from, to)?;
        self.steps.extend(
            path.directions
                .into_iter()
                .map(|direction| CutsceneStep::Walk { actor, direction }),
        );
        Ok(self)
    }

    pub fn remaining_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn is_finished(&self) -> bool {
        self.steps.is_empty() && self.active.is_none()
    }

    /// Plays as far as possible within `dt`. Returns `true` once every step
    /// has completed.
    pub fn advance(&mut self, dt: Duration, stage: &mut dyn CutsceneStage) -> Result<bool> {
        let mut budget = dt;
        loop {
            match self.active {
                Some(Active::Walking(actor)) => {
                    if stage.is_moving(actor)? {
                        return Ok(false);
                    }
                    self.active = None;
                }
                Some(Active::Waiting(remaining)) => {
                    if budget < remaining {
                        self.active = Some(Active::Waiting(remaining - budget));
                        return Ok(false);
                    }
                    budget -= remaining;
                    self.active = None;
                }
                None => {
                    let Some(step) = self.steps.pop_front() else {
                        return Ok(true);
                    };
                    match step {
                        CutsceneStep::Face { actor, direction } => {
                            if stage.face(actor, direction)? == MoveOutcome::Busy {
                                tracing::debug!(%actor, ?direction, "cutscene actor busy, turn deferred");
                                self.steps.push_front(step);
                                return Ok(false);
                            }
                        }
                        CutsceneStep::Wait(duration) => {
                            self.active = Some(Active::Waiting(duration));
                        }
                        CutsceneStep::Walk { actor, direction } => {
                            match stage.walk(actor, direction)? {
                                MoveOutcome::Started { .. } => {
                                    self.active = Some(Active::Walking(actor));
                                }
                                MoveOutcome::Idle => {}
                                MoveOutcome::Busy | MoveOutcome::Blocked { .. } => {
                                    tracing::debug!(%actor, ?direction, "cutscene walk blocked, retrying");
                                    self.steps.push_front(step);
                                    return Ok(false);
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use game_core::target_position_from_direction;

    use super::*;
    use crate::api::RuntimeError;

    /// Stage whose walks land after one `advance` call.
    #[derive(Default)]
    struct FakeStage {
        positions: HashMap<EntityId, Position>,
        facing: HashMap<EntityId, Direction>,
        moving: HashMap<EntityId, bool>,
        wall: Option<Position>,
        log: Vec<String>,
    }

    impl FakeStage {
        fn land_all(&mut self) {
            for moving in self.moving.values_mut() {
                *moving = false;
            }
        }
    }

    impl CutsceneStage for FakeStage {
        fn walk(&mut self, actor: EntityId, direction: Direction) -> Result<MoveOutcome> {
            let from = *self
                .positions
                .get(&actor)
                .ok_or(RuntimeError::UnknownEntity(actor))?;
            let to = target_position_from_direction(from, direction);
            self.facing.insert(actor, direction);
            if Some(to) == self.wall {
                return Ok(MoveOutcome::Blocked { destination: to });
            }
            self.positions.insert(actor, to);
            self.moving.insert(actor, true);
            self.log.push(format!("walk {direction}"));
            Ok(MoveOutcome::Started { from, to })
        }

        fn face(&mut self, actor: EntityId, direction: Direction) -> Result<MoveOutcome> {
            if self.is_moving(actor)? {
                return Ok(MoveOutcome::Busy);
            }
            self.facing.insert(actor, direction);
            self.log.push(format!("face {direction}"));
            Ok(MoveOutcome::Idle)
        }

        fn is_moving(&self, actor: EntityId) -> Result<bool> {
            Ok(self.moving.get(&actor).copied().unwrap_or(false))
        }
    }

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn steps_run_in_order_and_await_completion() {
        let actor = EntityId(1);
        let mut stage = FakeStage::default();
        stage.positions.insert(actor, Position::ORIGIN);

        let mut cutscene = Cutscene::new()
            .face(actor, Direction::Right)
            .walk(actor, Direction::Right)
            .walk(actor, Direction::Down);

        assert!(!cutscene.advance(FRAME, &mut stage).unwrap());
        assert_eq!(stage.log, ["face RIGHT", "walk RIGHT"]);

        // second walk waits for the first one to land
        assert!(!cutscene.advance(FRAME, &mut stage).unwrap());
        assert_eq!(stage.log.len(), 2);

        stage.land_all();
        assert!(!cutscene.advance(FRAME, &mut stage).unwrap());
        assert_eq!(stage.log, ["face RIGHT", "walk RIGHT", "walk DOWN"]);

        stage.land_all();
        assert!(cutscene.advance(FRAME, &mut stage).unwrap());
        assert!(cutscene.is_finished());
        assert_eq!(stage.positions[&actor], Position::from_tile(1, 1));
    }

    #[test]
    fn wait_consumes_frame_time() {
        let actor = EntityId(2);
        let mut stage = FakeStage::default();
        let mut cutscene = Cutscene::new()
            .wait(Duration::from_millis(40))
            .face(actor, Direction::Up);

        assert!(!cutscene.advance(Duration::from_millis(30), &mut stage).unwrap());
        assert!(stage.log.is_empty());
        assert!(cutscene.advance(Duration::from_millis(10), &mut stage).unwrap());
        assert_eq!(stage.log, ["face UP"]);
    }

    #[test]
    fn blocked_walk_is_retried() {
        let actor = EntityId(3);
        let mut stage = FakeStage {
            wall: Some(Position::from_tile(1, 0)),
            ..FakeStage::default()
        };
        stage.positions.insert(actor, Position::ORIGIN);
        let mut cutscene = Cutscene::new().walk(actor, Direction::Right);

        assert!(!cutscene.advance(FRAME, &mut stage).unwrap());
        assert_eq!(cutscene.remaining_steps(), 1);

        stage.wall = None;
        assert!(!cutscene.advance(FRAME, &mut stage).unwrap());
        stage.land_all();
        assert!(cutscene.advance(FRAME, &mut stage).unwrap());
    }

    #[test]
    fn face_waits_for_a_step_in_flight() {
        let actor = EntityId(4);
        let mut stage = FakeStage::default();
        stage.moving.insert(actor, true);
        let mut cutscene = Cutscene::new().face(actor, Direction::Up);

        assert!(!cutscene.advance(FRAME, &mut stage).unwrap());
        assert_eq!(cutscene.remaining_steps(), 1);
        assert!(stage.log.is_empty());

        stage.land_all();
        assert!(cutscene.advance(FRAME, &mut stage).unwrap());
        assert_eq!(stage.facing[&actor], Direction::Up);
    }

    #[test]
    fn walk_to_expands_path() {
        let cutscene = Cutscene::new()
            .walk_to(EntityId::PLAYER, Position::ORIGIN, Position::from_tile(1, 2))
            .unwrap();
        assert_eq!(cutscene.remaining_steps(), 3);

        let misaligned = Cutscene::new().walk_to(EntityId::PLAYER, Position::new(5, 0), Position::ORIGIN);
        assert!(matches!(misaligned, Err(RuntimeError::Path(_))));
    }

    #[test]
    fn unknown_actor_aborts() {
        let mut stage = FakeStage::default();
        let mut cutscene = Cutscene::new().walk(EntityId(99), Direction::Left);
        assert!(matches!(
            cutscene.advance(FRAME, &mut stage),
            Err(RuntimeError::UnknownEntity(EntityId(99)))
        ));
    }
}
