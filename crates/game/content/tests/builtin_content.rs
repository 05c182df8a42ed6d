use std::fs;

use game_content::{ContentFactory, MapLoader};
use game_core::{Direction, MovementPattern, Position, SpeciesId, TerrainKind};

#[test]
fn builtin_route_loads() {
    let factory = ContentFactory::builtin();

    let map = factory.load_map("route_1").expect("route_1 should load");
    assert_eq!(map.dimensions.width, 10);
    assert_eq!(map.dimensions.height, 8);
    assert_eq!(map.player_spawn, Position::from_tile(2, 2));
    assert_eq!(map.player_direction, Direction::Down);
    assert_eq!(map.tile(5, 1).map(|t| t.terrain()), Some(TerrainKind::Wall));
    assert_eq!(map.tile(7, 5).and_then(|t| t.encounter_area()), Some(1));

    let names: Vec<_> = map.npcs.iter().map(|npc| npc.name.as_str()).collect();
    assert_eq!(names, ["Professor", "Ranger"]);
    assert_eq!(map.npcs[1].pattern, MovementPattern::Clockwise);
}

#[test]
fn builtin_tables_and_config_load() {
    let factory = ContentFactory::builtin();

    let tables = factory.load_encounters().expect("encounters should load");
    let meadow = tables.iter().find(|t| t.area == 1).expect("area 1");
    assert_eq!(meadow.species[0], (SpeciesId(1), 45));

    let config = factory.load_config().expect("config should load");
    assert_eq!(config.step_duration_ms, 300);
    assert_eq!(config.encounter_chance_percent, 20);
}

#[test]
fn map_file_with_bad_npc_still_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.ron");
    fs::write(
        &path,
        r#"(
            dimensions: (3, 3),
            player: (tile: (1, 1), direction: "UP"),
            npcs: [
                (name: "fine", tile: (0, 0)),
                (name: "broken", tile: (2, 2), pattern: "SPIRAL"),
            ],
        )"#,
    )
    .unwrap();

    let map = MapLoader::load(&path).unwrap();
    assert_eq!(map.player_direction, Direction::Up);
    assert_eq!(map.npcs.len(), 1);
    assert_eq!(map.npcs[0].name, "fine");
}
