#![cfg(feature = "serde")]

use tactics_nav::{PathfinderConfig, TileGraph, TileMap, TilePos, TileType};

#[test]
fn tile_map_survives_json() {
    let map = TileMap::from_rows(&["..~", "#..", "..."], |c| match c {
        '.' => Some(TileType::floor()),
        '#' => Some(TileType::wall()),
        '~' => Some(TileType::new("mud", true, 3.0)),
        _ => None,
    })
    .expect("map");

    let json = serde_json::to_string(&map).expect("serialize");
    let back: TileMap = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, map);

    let start = TilePos::new(0, 0);
    let goal = TilePos::new(2, 2);
    let before = TileGraph::new(map).expect("graph").path(start, goal);
    let after = TileGraph::new(back).expect("graph").path(start, goal);
    assert_eq!(before, after);
}

#[test]
fn malformed_tile_map_is_rejected() {
    let floor = r#"{"name":"floor","walkable":true,"move_cost":1.0}"#;

    let short = format!(r#"{{"width":3,"height":3,"tiles":[{floor}]}}"#);
    let err = serde_json::from_str::<TileMap>(&short).expect_err("short tiles");
    assert!(err.to_string().contains("needs 9 tiles, got 1"), "{err}");

    let empty = r#"{"width":0,"height":4,"tiles":[]}"#;
    let err = serde_json::from_str::<TileMap>(empty).expect_err("empty map");
    assert!(err.to_string().contains("non-empty"), "{err}");

    let exact = format!(r#"{{"width":1,"height":1,"tiles":[{floor}]}}"#);
    let map: TileMap = serde_json::from_str(&exact).expect("1x1 map");
    assert!(TileGraph::new(map).expect("graph").graph().len() == 1);
}

#[test]
fn pathfinder_config_fields_default() {
    let config: PathfinderConfig = serde_json::from_str("{}").expect("empty object");
    assert_eq!(config, PathfinderConfig::default());

    let config: PathfinderConfig =
        serde_json::from_str(r#"{"max_expansions": 128}"#).expect("budget");
    assert_eq!(config.max_expansions, Some(128));
}
