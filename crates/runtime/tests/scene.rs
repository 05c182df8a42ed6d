use std::time::Duration;

use game_content::ContentFactory;
use game_core::{
    Character, Direction, EncounterTable, EntityId, GameConfig, MovementPattern, NpcSpec,
    Position, SpeciesId, StaticTile, TerrainKind,
};
use runtime::{
    Cutscene, DataStore, Event, FileDataStore, Input, PlayerState, TileLayer, Topic, WorldScene,
    load_player_state,
};

const STEP: Duration = Duration::from_millis(300);

fn open_field() -> TileLayer {
    TileLayer::filled(8, 8)
}

#[test]
fn finished_step_is_persisted_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.json");

    let mut scene = WorldScene::builder()
        .layer(open_field())
        .player_spawn(Position::from_tile(1, 1), Direction::Down)
        .store(FileDataStore::open(&path).unwrap())
        .seed(1)
        .build()
        .unwrap();

    scene.handle_input(Input::Move(Direction::Right)).unwrap();
    // nothing is written while the step is still animating
    assert!(!path.exists());
    scene.update(STEP).unwrap();

    let reopened = FileDataStore::open(&path).unwrap();
    assert_eq!(
        load_player_state(&reopened).unwrap(),
        Some(PlayerState {
            position: Position::from_tile(2, 1),
            direction: Direction::Right,
        })
    );

    // a fresh scene over the same save resumes where the player stopped
    let resumed = WorldScene::builder()
        .layer(open_field())
        .player_spawn(Position::from_tile(1, 1), Direction::Down)
        .store(reopened)
        .build()
        .unwrap();
    assert_eq!(resumed.player().position(), Position::from_tile(2, 1));
    assert_eq!(resumed.player().direction(), Direction::Right);
}

#[test]
fn dialog_suspends_patrol() {
    let mut ranger = NpcSpec::new("Ranger", 1, 2);
    ranger.pattern = MovementPattern::Clockwise;
    ranger.path = vec![(2, 2)];
    ranger.messages = vec!["Lovely day.".into()];

    let mut scene = WorldScene::builder()
        .layer(open_field())
        .player_spawn(Position::from_tile(1, 1), Direction::Down)
        .npc(ranger)
        .seed(2)
        .build()
        .unwrap();
    let ranger_id = scene.npcs()[0].id();

    scene.handle_input(Input::Interact).unwrap();
    assert!(scene.is_dialog_active());

    for _ in 0..5 {
        scene.update(STEP).unwrap();
    }
    let ranger = scene.npc(ranger_id).unwrap();
    assert_eq!(ranger.position(), Position::from_tile(1, 2));
    assert!(!ranger.is_moving());

    // closing the dialog resumes the route
    scene.handle_input(Input::Interact).unwrap();
    assert!(!scene.is_dialog_active());
    scene.update(Duration::ZERO).unwrap();
    let ranger = scene.npc(ranger_id).unwrap();
    assert!(ranger.is_moving());
    assert_eq!(ranger.position(), Position::from_tile(2, 2));
}

fn grass_scene(chance_percent: u32) -> WorldScene {
    let grass = StaticTile::new(TerrainKind::TallGrass).with_encounter_area(1);
    WorldScene::builder()
        .config(GameConfig::new().with_encounter_chance(chance_percent))
        .layer(open_field().with_tile(2, 1, grass))
        .player_spawn(Position::from_tile(0, 1), Direction::Right)
        .encounters([EncounterTable::new(1, vec![(SpeciesId(4), 1)])])
        .seed(3)
        .build()
        .unwrap()
}

#[test]
fn encounters_roll_only_on_encounter_tiles() {
    let mut scene = grass_scene(100);
    let mut encounters = scene.bus().subscribe(Topic::Encounter);

    scene.handle_input(Input::Move(Direction::Right)).unwrap();
    scene.update(STEP).unwrap();
    assert!(scene.pending_encounter().is_none());
    assert!(encounters.try_recv().is_err());

    scene.handle_input(Input::Move(Direction::Right)).unwrap();
    scene.update(STEP).unwrap();

    let pending = scene.pending_encounter().cloned().expect("grass at 100%");
    assert_eq!(pending.species, SpeciesId(4));
    assert_eq!(pending.area, 1);
    assert_eq!(pending.position, Position::from_tile(2, 1));
    assert_eq!(encounters.try_recv().unwrap(), Event::Encounter(pending.clone()));

    // input stays locked until the encounter is claimed
    scene.handle_input(Input::Move(Direction::Right)).unwrap();
    assert!(!scene.player().is_moving());
    assert_eq!(scene.take_encounter(), Some(pending));
    scene.handle_input(Input::Move(Direction::Right)).unwrap();
    assert!(scene.player().is_moving());
}

#[test]
fn zero_chance_never_triggers() {
    let mut scene = grass_scene(0);
    scene.handle_input(Input::Move(Direction::Right)).unwrap();
    scene.update(STEP).unwrap();
    scene.handle_input(Input::Move(Direction::Right)).unwrap();
    scene.update(STEP).unwrap();

    assert_eq!(scene.player().position(), Position::from_tile(2, 1));
    assert!(scene.pending_encounter().is_none());
}

#[test]
fn cutscene_walks_the_player_and_blocks_input() {
    let mut scene = WorldScene::builder()
        .layer(open_field())
        .player_spawn(Position::ORIGIN, Direction::Down)
        .seed(4)
        .build()
        .unwrap();

    let target = Position::from_tile(2, 1);
    let cutscene = Cutscene::new()
        .walk_to(EntityId::PLAYER, Position::ORIGIN, target)
        .unwrap()
        .face(EntityId::PLAYER, Direction::Up);
    scene.play_cutscene(cutscene).unwrap();

    let mut frames = 0;
    scene.update(Duration::ZERO).unwrap();
    while scene.is_cutscene_playing() {
        scene.handle_input(Input::Move(Direction::Down)).unwrap();
        scene.update(STEP).unwrap();
        frames += 1;
        assert!(frames < 10, "cutscene never finished");
    }

    assert_eq!(frames, 3);
    assert_eq!(scene.player().position(), target);
    assert_eq!(scene.player().direction(), Direction::Up);
    assert!(!scene.player().is_moving());
}

#[test]
fn builtin_route_professor_greets_the_player() {
    let factory = ContentFactory::builtin();
    let map = factory.load_map("route_1").unwrap();

    let mut scene = WorldScene::builder()
        .config(factory.load_config().unwrap())
        .map(&map)
        .encounters(factory.load_encounters().unwrap())
        .seed(5)
        .build()
        .unwrap();
    let mut dialog = scene.bus().subscribe(Topic::Dialog);

    scene.handle_input(Input::Move(Direction::Right)).unwrap();
    scene.update(STEP).unwrap();
    assert_eq!(scene.player().position(), Position::from_tile(3, 2));

    scene.handle_input(Input::Interact).unwrap();
    assert_eq!(scene.dialog_line(), Some("Ah, there you are!"));
    let professor = scene.npc_named("Professor").unwrap();
    assert!(professor.is_talking_to_player());
    assert!(matches!(dialog.try_recv(), Ok(Event::Dialog(_))));

    assert!(scene.store().get("player.position").is_some());
}
