//! NPC patrol controller.
//!
//! An NPC walks a cyclic list of waypoints one tile per idle tick. Index 0 is
//! the spawn cell; after the last waypoint the index wraps back to 0. The
//! controller only ever decides a direction and hands it to the shared
//! movement state machine.

use core::time::Duration;

use super::{Character, CharacterMovement, IdleFrames, MoveOutcome};
use crate::env::MoveEnv;
use crate::grid::{Direction, Position};
use crate::types::EntityId;

/// How an NPC moves on its own.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum MovementPattern {
    /// Stands still and only turns when spoken to.
    #[default]
    Idle,
    /// Walks the patrol path in order, forever.
    Clockwise,
}

/// Direction towards a waypoint, horizontal axis first.
///
/// This ordering is intentionally not the one used by
/// [`crate::grid::direction_from_positions`]; patrol routes authored against
/// it depend on the horizontal leg being walked first.
pub fn patrol_direction(current: Position, waypoint: Position) -> Direction {
    if waypoint.x > current.x {
        Direction::Right
    } else if waypoint.x < current.x {
        Direction::Left
    } else if waypoint.y < current.y {
        Direction::Up
    } else if waypoint.y > current.y {
        Direction::Down
    } else {
        Direction::None
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Npc {
    movement: CharacterMovement,
    name: String,
    path: Vec<Position>,
    path_index: usize,
    pattern: MovementPattern,
    talking_to_player: bool,
    messages: Vec<String>,
}

impl Npc {
    pub fn new(
        id: EntityId,
        position: Position,
        direction: Direction,
        idle_frames: IdleFrames,
        step_duration: Duration,
    ) -> Self {
        Self {
            movement: CharacterMovement::new(id, position, direction, idle_frames, step_duration),
            name: String::new(),
            path: vec![position],
            path_index: 0,
            pattern: MovementPattern::Idle,
            talking_to_player: false,
            messages: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replaces the patrol path. `waypoints` follow the spawn cell, which
    /// always stays at index 0.
    pub fn with_waypoints(mut self, waypoints: impl IntoIterator<Item = Position>) -> Self {
        let spawn = self.path.first().copied().unwrap_or(self.position());
        self.path = core::iter::once(spawn).chain(waypoints).collect();
        self.path_index = 0;
        self
    }

    pub fn with_pattern(mut self, pattern: MovementPattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_messages(mut self, messages: Vec<String>) -> Self {
        self.messages = messages;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &[Position] {
        &self.path
    }

    pub fn path_index(&self) -> usize {
        self.path_index
    }

    pub fn pattern(&self) -> MovementPattern {
        self.pattern
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn is_talking_to_player(&self) -> bool {
        self.talking_to_player
    }

    /// Picks the next patrol direction, advancing the path index.
    ///
    /// While the NPC is not yet on `path[path_index]` (a previous step was
    /// blocked, or waypoints are several tiles apart) it keeps heading there.
    /// Once on it, the next waypoint is selected; past the end the route wraps
    /// to index 0 without advancing further this tick.
    fn next_patrol_direction(&mut self) -> Direction {
        let current = self.position();
        let Some(&waypoint) = self.path.get(self.path_index) else {
            self.path_index = 0;
            return Direction::None;
        };

        let next = if waypoint != current {
            waypoint
        } else if let Some(&next) = self.path.get(self.path_index + 1) {
            self.path_index += 1;
            next
        } else {
            self.path_index = 0;
            self.path[0]
        };

        patrol_direction(current, next)
    }

    /// Idle-tick hook. Returns the movement outcome if a step was attempted.
    pub fn patrol_tick(&mut self, env: &mut MoveEnv<'_>) -> Option<MoveOutcome> {
        if self.talking_to_player
            || self.pattern == MovementPattern::Idle
            || self.movement.is_moving()
        {
            return None;
        }

        let direction = self.next_patrol_direction();
        Some(self.movement.move_character(direction, env))
    }

    /// Shows the idle frame that looks back at a player facing
    /// `player_direction`. Display only: facing and path are untouched.
    pub fn face_player(&mut self, player_direction: Direction) {
        let frame = self
            .movement
            .idle_frames()
            .frame_for(player_direction.opposite());
        self.movement.show_frame(frame);
    }

    /// Suspends patrol and turns towards the player.
    pub fn start_dialog(&mut self, player_direction: Direction) {
        self.talking_to_player = true;
        self.face_player(player_direction);
    }

    pub fn end_dialog(&mut self) {
        self.talking_to_player = false;
        self.movement.refresh_idle_frame();
    }
}

impl Character for Npc {
    fn movement(&self) -> &CharacterMovement {
        &self.movement
    }

    fn movement_mut(&mut self) -> &mut CharacterMovement {
        &mut self.movement
    }

    fn update(&mut self) {
        // facing the player is held for the whole conversation
        if !self.talking_to_player {
            self.movement.refresh_idle_frame();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::SpriteFrame;
    use crate::env::StepAnimation;

    fn square_patroller() -> Npc {
        Npc::new(
            EntityId(1),
            Position::from_tile(0, 0),
            Direction::Down,
            IdleFrames::npc_sheet(10),
            Duration::from_millis(200),
        )
        .with_waypoints([
            Position::from_tile(1, 0),
            Position::from_tile(1, 1),
            Position::from_tile(0, 1),
        ])
        .with_pattern(MovementPattern::Clockwise)
    }

    fn tick_and_land(npc: &mut Npc) -> Option<MoveOutcome> {
        let open = |_: i32, _: i32| false;
        let mut animations: Vec<StepAnimation> = Vec::new();
        let mut sink = ();
        let outcome = {
            let mut env = MoveEnv::new(&open, &mut animations, &mut sink);
            npc.patrol_tick(&mut env)
        };
        if npc.is_moving() {
            npc.finish_step(&mut ()).unwrap();
        }
        outcome
    }

    #[test]
    fn square_route_cycles_without_skipping() {
        let mut npc = square_patroller();
        let expected = [
            (Position::from_tile(1, 0), Direction::Right),
            (Position::from_tile(1, 1), Direction::Down),
            (Position::from_tile(0, 1), Direction::Left),
            (Position::from_tile(0, 0), Direction::Up),
            (Position::from_tile(1, 0), Direction::Right),
        ];

        for (step, (position, direction)) in expected.into_iter().enumerate() {
            let outcome = tick_and_land(&mut npc);
            assert!(outcome.is_some_and(MoveOutcome::started), "step {step}");
            assert_eq!(npc.position(), position, "step {step}");
            assert_eq!(npc.direction(), direction, "step {step}");
        }
        assert_eq!(npc.path_index(), 1);
    }

    #[test]
    fn wrap_resets_index_to_start() {
        let mut npc = square_patroller();
        for _ in 0..4 {
            tick_and_land(&mut npc);
        }
        assert_eq!(npc.path_index(), 0);
        assert_eq!(npc.position(), Position::from_tile(0, 0));
    }

    #[test]
    fn talking_suspends_patrol() {
        let mut npc = square_patroller();
        npc.start_dialog(Direction::Up);

        for _ in 0..10 {
            assert_eq!(tick_and_land(&mut npc), None);
        }
        assert_eq!(npc.position(), Position::from_tile(0, 0));
        assert_eq!(npc.path_index(), 0);
    }

    #[test]
    fn idle_pattern_never_moves() {
        let mut npc = square_patroller().with_pattern(MovementPattern::Idle);
        for _ in 0..4 {
            assert_eq!(tick_and_land(&mut npc), None);
        }
        assert_eq!(npc.position(), Position::from_tile(0, 0));
    }

    #[test]
    fn blocked_step_retries_same_waypoint() {
        let mut npc = square_patroller();
        let walls = |_: i32, _: i32| true;
        let mut animations: Vec<StepAnimation> = Vec::new();
        let mut sink = ();
        {
            let mut env = MoveEnv::new(&walls, &mut animations, &mut sink);
            assert_eq!(
                npc.patrol_tick(&mut env),
                Some(MoveOutcome::Blocked {
                    destination: Position::from_tile(1, 0)
                })
            );
        }
        assert_eq!(npc.path_index(), 1);

        // still heading to waypoint 1 once the way clears
        assert!(tick_and_land(&mut npc).is_some_and(MoveOutcome::started));
        assert_eq!(npc.position(), Position::from_tile(1, 0));
        assert_eq!(npc.path_index(), 1);
    }

    #[test]
    fn distant_waypoints_are_walked_tile_by_tile() {
        let mut npc = Npc::new(
            EntityId(2),
            Position::from_tile(0, 0),
            Direction::Down,
            IdleFrames::npc_sheet(0),
            Duration::from_millis(200),
        )
        .with_waypoints([Position::from_tile(2, 1)])
        .with_pattern(MovementPattern::Clockwise);

        let mut visited = Vec::new();
        for _ in 0..6 {
            tick_and_land(&mut npc);
            visited.push(npc.position());
        }

        assert_eq!(
            visited,
            vec![
                Position::from_tile(1, 0),
                Position::from_tile(2, 0),
                Position::from_tile(2, 1),
                Position::from_tile(1, 1),
                Position::from_tile(0, 1),
                Position::from_tile(0, 0),
            ]
        );
    }

    #[test]
    fn patrol_direction_prefers_horizontal_axis() {
        let here = Position::from_tile(3, 3);
        assert_eq!(
            patrol_direction(here, Position::from_tile(4, 5)),
            Direction::Right
        );
        assert_eq!(
            patrol_direction(here, Position::from_tile(1, 0)),
            Direction::Left
        );
        assert_eq!(patrol_direction(here, Position::from_tile(3, 1)), Direction::Up);
        assert_eq!(
            patrol_direction(here, Position::from_tile(3, 9)),
            Direction::Down
        );
        assert_eq!(patrol_direction(here, here), Direction::None);
    }

    #[test]
    fn facing_player_shows_mirrored_frame() {
        let mut npc = square_patroller();

        npc.face_player(Direction::Down);
        assert_eq!(npc.movement().display_frame(), SpriteFrame::new(11));

        npc.face_player(Direction::Left);
        assert_eq!(npc.movement().display_frame(), SpriteFrame::flipped(12));

        npc.face_player(Direction::Right);
        assert_eq!(npc.movement().display_frame(), SpriteFrame::new(12));
        assert_eq!(npc.direction(), Direction::Down, "facing is display only");
    }

    #[test]
    fn dialog_holds_frame_until_it_ends() {
        let mut npc = square_patroller();
        npc.start_dialog(Direction::Down);
        npc.update();
        assert_eq!(npc.movement().display_frame(), SpriteFrame::new(11));

        npc.end_dialog();
        npc.update();
        assert!(!npc.is_talking_to_player());
        assert_eq!(npc.movement().display_frame(), SpriteFrame::new(10));
    }
}
