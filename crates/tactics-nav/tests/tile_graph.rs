use tactics_nav::{AStarQuery, PathError, TileGraph, TileMap, TileMapError, TilePos, TileType};

fn legend(c: char) -> Option<TileType> {
    match c {
        '.' => Some(TileType::floor()),
        '#' => Some(TileType::wall()),
        '~' => Some(TileType::new("mud", true, 5.0)),
        _ => None,
    }
}

fn tiles(rows: &[&str]) -> TileGraph {
    let map = TileMap::from_rows(rows, legend).expect("valid rows");
    TileGraph::new(map).expect("tile graph")
}

#[test]
fn path_threads_the_gap_in_a_wall() {
    let graph = tiles(&[
        ".....", //
        ".....",
        "##.##",
        ".....",
        ".....",
    ]);

    let path = graph
        .path(TilePos::new(0, 0), TilePos::new(0, 4))
        .expect("path through gap");

    assert_eq!(path.first(), Some(&TilePos::new(0, 0)));
    assert_eq!(path.last(), Some(&TilePos::new(0, 4)));
    assert!(path.contains(&TilePos::new(2, 2)));
    assert_eq!(path.len(), 9);
    assert_eq!(graph.path_cost(&path), Some(8.0));

    for step in path.windows(2) {
        assert_eq!(step[0].manhattan(step[1]), 1, "non-adjacent step {step:?}");
        assert!(graph.map().is_walkable(step[1]));
    }
}

#[test]
fn expensive_terrain_is_walked_around() {
    let graph = tiles(&[
        "...", //
        ".~.",
        "...",
    ]);

    let path = graph
        .path(TilePos::new(1, 0), TilePos::new(1, 2))
        .expect("path");

    // Both detours cost 4; +x is explored before -x.
    assert_eq!(
        path,
        vec![
            TilePos::new(1, 0),
            TilePos::new(2, 0),
            TilePos::new(2, 1),
            TilePos::new(2, 2),
            TilePos::new(1, 2),
        ]
    );
    assert_eq!(graph.path_cost(&path), Some(4.0));
}

#[test]
fn walls_and_out_of_bounds_tiles_are_not_nodes() {
    let graph = tiles(&["#.."]);

    assert_eq!(
        graph.path(TilePos::new(0, 0), TilePos::new(2, 0)),
        Err(PathError::UnknownStart)
    );
    assert_eq!(
        graph.path(TilePos::new(1, 0), TilePos::new(7, 0)),
        Err(PathError::UnknownGoal)
    );
    assert_eq!(graph.graph().len(), 2);
}

#[test]
fn terrain_edits_apply_on_refresh() {
    let mut graph = tiles(&["..."]);
    let (start, goal) = (TilePos::new(0, 0), TilePos::new(2, 0));
    assert_eq!(graph.path(start, goal).expect("open corridor").len(), 3);

    assert!(graph.set_tile(TilePos::new(1, 0), TileType::wall()));
    assert!(graph.is_dirty());
    assert!(!graph.set_tile(TilePos::new(1, 0), TileType::wall()));

    // Until refreshed, queries run against the previous topology.
    assert!(graph.path(start, goal).is_ok());

    assert_eq!(graph.refresh(), Ok(true));
    assert!(!graph.is_dirty());
    assert_eq!(graph.graph().generation(), 1);
    assert_eq!(graph.path(start, goal), Err(PathError::NoPathFound));

    assert_eq!(graph.refresh(), Ok(false));
    assert_eq!(graph.graph().generation(), 1);
}

#[test]
fn path_cost_uses_the_built_topology() {
    let mut graph = tiles(&["...", "..."]);
    let path = graph
        .path(TilePos::new(0, 0), TilePos::new(2, 0))
        .expect("path");
    assert_eq!(path.len(), 3);

    assert!(graph.set_tile(TilePos::new(1, 0), TileType::new("mud", true, 5.0)));
    assert_eq!(graph.path_cost(&path), Some(2.0));

    assert_eq!(graph.refresh(), Ok(true));
    assert_eq!(graph.path_cost(&path), Some(6.0));

    // Non-adjacent steps and tiles outside the graph have no price.
    assert_eq!(
        graph.path_cost(&[TilePos::new(0, 0), TilePos::new(2, 0)]),
        None
    );
    assert_eq!(
        graph.path_cost(&[TilePos::new(0, 0), TilePos::new(0, 5)]),
        None
    );
}

#[test]
fn reused_query_gives_the_same_answer() {
    let graph = tiles(&[
        "....", //
        ".##.",
        "....",
    ]);
    let mut query = AStarQuery::default();

    let first = graph
        .path_with(TilePos::new(0, 0), TilePos::new(3, 2), &mut query)
        .expect("path");
    let second = graph
        .path_with(TilePos::new(0, 0), TilePos::new(3, 2), &mut query)
        .expect("path");

    assert_eq!(first, second);
    assert_eq!(first, graph.path(TilePos::new(0, 0), TilePos::new(3, 2)).expect("path"));
}

#[test]
fn nearest_walkable_skips_walls() {
    let graph = tiles(&["#.."]);

    assert_eq!(graph.nearest_walkable(0.1, 0.0), Some(TilePos::new(1, 0)));
    assert_eq!(graph.nearest_walkable(1.6, 0.2), Some(TilePos::new(2, 0)));
    // Equidistant: first tile in row order wins.
    assert_eq!(graph.nearest_walkable(1.5, 0.0), Some(TilePos::new(1, 0)));

    let walled = tiles(&["##"]);
    assert_eq!(walled.nearest_walkable(0.0, 0.0), None);
}

#[test]
fn from_rows_rejects_bad_input() {
    assert!(TileMap::from_rows(&[], legend).is_none());
    assert!(TileMap::from_rows(&["..", "..."], legend).is_none());
    assert!(TileMap::from_rows(&[".?"], legend).is_none());

    let map = TileMap::from_rows(&[".#", "~."], legend).expect("map");
    assert_eq!((map.width(), map.height()), (2, 2));
    assert_eq!(map.get(TilePos::new(0, 1)).map(|t| t.move_cost), Some(5.0));
    assert!(!map.is_walkable(TilePos::new(1, 0)));
    assert!(map.get(TilePos::new(-1, 0)).is_none());
}

#[test]
fn from_tiles_checks_dimensions() {
    let floor = TileType::floor();

    let map = TileMap::from_tiles(2, 1, vec![floor.clone(), TileType::wall()]).expect("map");
    assert!(map.is_walkable(TilePos::new(0, 0)));
    assert!(!map.is_walkable(TilePos::new(1, 0)));

    assert_eq!(
        TileMap::from_tiles(3, 3, vec![floor.clone()]),
        Err(TileMapError::SizeMismatch {
            width: 3,
            height: 3,
            expected: 9,
            actual: 1,
        })
    );
    assert_eq!(
        TileMap::from_tiles(0, 2, Vec::new()),
        Err(TileMapError::Empty {
            width: 0,
            height: 2
        })
    );
    assert_eq!(
        TileMap::from_tiles(u32::MAX, 1, vec![floor]),
        Err(TileMapError::TooLarge {
            width: u32::MAX,
            height: 1
        })
    );
}

#[test]
#[should_panic(expected = "non-empty")]
fn empty_tile_map_panics() {
    let _ = TileMap::new(0, 3, TileType::floor());
}
