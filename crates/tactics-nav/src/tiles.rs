use std::borrow::Cow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::astar::{self, AStarQuery, PathfinderConfig};
use crate::{Graph, GraphError, PathError, TileMapError};

/// Terrain kind of a tile.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TileType {
    pub name: Cow<'static, str>,
    pub walkable: bool,
    /// Cost to enter a tile of this type.
    pub move_cost: f32,
}

impl TileType {
    pub fn new(name: impl Into<Cow<'static, str>>, walkable: bool, move_cost: f32) -> Self {
        Self {
            name: name.into(),
            walkable,
            move_cost,
        }
    }

    pub fn floor() -> Self {
        Self::new("floor", true, 1.0)
    }

    pub fn wall() -> Self {
        Self::new("wall", false, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: TilePos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Fixed order for determinism: +y, +x, -y, -x.
    pub fn neighbors(self) -> [TilePos; 4] {
        [
            TilePos::new(self.x, self.y + 1),
            TilePos::new(self.x + 1, self.y),
            TilePos::new(self.x, self.y - 1),
            TilePos::new(self.x - 1, self.y),
        ]
    }
}

/// Rectangular terrain grid. Row `y` of the map is stored after row `y - 1`.
///
/// Deserialized maps go through the same checks as [`TileMap::from_tiles`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "RawTileMap")
)]
pub struct TileMap {
    width: u32,
    height: u32,
    tiles: Vec<TileType>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawTileMap {
    width: u32,
    height: u32,
    tiles: Vec<TileType>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTileMap> for TileMap {
    type Error = TileMapError;

    fn try_from(raw: RawTileMap) -> Result<Self, Self::Error> {
        Self::from_tiles(raw.width, raw.height, raw.tiles)
    }
}

// Positions are `i32`, so both dimensions must fit.
fn tile_count(width: u32, height: u32) -> Result<usize, TileMapError> {
    if width == 0 || height == 0 {
        return Err(TileMapError::Empty { width, height });
    }
    let max = i32::MAX as u32;
    if width > max || height > max {
        return Err(TileMapError::TooLarge { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(TileMapError::TooLarge { width, height })
}

impl TileMap {
    /// # Panics
    ///
    /// If either dimension is zero or the map is too large to address.
    pub fn new(width: u32, height: u32, fill: TileType) -> Self {
        match tile_count(width, height) {
            Ok(count) => Self {
                width,
                height,
                tiles: vec![fill; count],
            },
            Err(err) => panic!("{err}"),
        }
    }

    /// Build from row-major tiles, `width * height` of them.
    pub fn from_tiles(
        width: u32,
        height: u32,
        tiles: Vec<TileType>,
    ) -> Result<Self, TileMapError> {
        let expected = tile_count(width, height)?;
        if tiles.len() != expected {
            return Err(TileMapError::SizeMismatch {
                width,
                height,
                expected,
                actual: tiles.len(),
            });
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Build from text rows, one character per tile. Row 0 is `y == 0`.
    ///
    /// `legend` maps a character to its tile type; unknown characters yield `None` and abort.
    pub fn from_rows<F>(rows: &[&str], mut legend: F) -> Option<Self>
    where
        F: FnMut(char) -> Option<TileType>,
    {
        let height = rows.len();
        let width = rows.first()?.chars().count();
        if width == 0 || rows.iter().any(|r| r.chars().count() != width) {
            return None;
        }

        let mut tiles = Vec::with_capacity(width * height);
        for row in rows {
            for c in row.chars() {
                tiles.push(legend(c)?);
            }
        }

        let width = u32::try_from(width).ok()?;
        let height = u32::try_from(height).ok()?;
        Self::from_tiles(width, height, tiles).ok()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, pos: TilePos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    fn idx(&self, pos: TilePos) -> Option<usize> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(pos.y as usize * self.width as usize + pos.x as usize)
    }

    pub fn get(&self, pos: TilePos) -> Option<&TileType> {
        self.idx(pos).map(|i| &self.tiles[i])
    }

    pub fn is_walkable(&self, pos: TilePos) -> bool {
        self.get(pos).is_some_and(|t| t.walkable)
    }

    /// Change the type of a tile. Returns whether anything changed; out-of-bounds is a no-op.
    pub fn set(&mut self, pos: TilePos, tile: TileType) -> bool {
        let Some(idx) = self.idx(pos) else {
            return false;
        };
        if self.tiles[idx] == tile {
            return false;
        }
        self.tiles[idx] = tile;
        true
    }

    /// Every position, row by row.
    pub fn positions(&self) -> impl Iterator<Item = TilePos> + '_ {
        let width = self.width as i32;
        (0..self.height as i32).flat_map(move |y| (0..width).map(move |x| TilePos::new(x, y)))
    }

    /// Walkable neighbours of `pos` in [`TilePos::neighbors`] order.
    pub fn walkable_neighbors(&self, pos: TilePos) -> impl Iterator<Item = TilePos> + '_ {
        pos.neighbors()
            .into_iter()
            .filter(move |n| self.is_walkable(*n))
    }
}

/// Pathfinding graph over the walkable tiles of a [`TileMap`].
///
/// Edges connect 4-neighbours and cost the destination tile's `move_cost`. Terrain edits mark the
/// graph dirty; [`TileGraph::refresh`] rebuilds it wholesale, invalidating earlier node handles.
#[derive(Debug, Clone)]
pub struct TileGraph {
    map: TileMap,
    graph: Graph<TilePos, TilePos>,
    min_move_cost: f32,
    dirty: bool,
    config: PathfinderConfig,
}

impl TileGraph {
    pub fn new(map: TileMap) -> Result<Self, GraphError> {
        let graph = Graph::from_adjacency(walkable_items(&map), |pos, _| edges_of(&map, *pos))?;
        let min_move_cost = min_move_cost(&map);
        Ok(Self {
            map,
            graph,
            min_move_cost,
            dirty: false,
            config: PathfinderConfig::default(),
        })
    }

    pub fn with_config(mut self, config: PathfinderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn graph(&self) -> &Graph<TilePos, TilePos> {
        &self.graph
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Edit terrain. The graph keeps its old topology until [`TileGraph::refresh`].
    pub fn set_tile(&mut self, pos: TilePos, tile: TileType) -> bool {
        let changed = self.map.set(pos, tile);
        self.dirty |= changed;
        changed
    }

    /// Rebuild the graph if terrain changed since the last build. Returns whether it rebuilt.
    pub fn refresh(&mut self) -> Result<bool, GraphError> {
        if !self.dirty {
            return Ok(false);
        }
        tracing::debug!(
            width = self.map.width(),
            height = self.map.height(),
            "rebuilding tile graph"
        );
        let map = &self.map;
        self.graph
            .rebuild(walkable_items(map), |pos, _| edges_of(map, *pos))?;
        self.min_move_cost = min_move_cost(map);
        self.dirty = false;
        Ok(true)
    }

    /// Admissible estimate: every step costs at least the cheapest walkable tile.
    pub fn heuristic(&self) -> impl Fn(&TilePos, &TilePos) -> f32 {
        let scale = self.min_move_cost;
        move |a: &TilePos, b: &TilePos| a.manhattan(*b) as f32 * scale
    }

    /// Cheapest tile path from `start` to `goal`, both included, on the last built topology.
    pub fn path(&self, start: TilePos, goal: TilePos) -> Result<Vec<TilePos>, PathError> {
        let mut query = AStarQuery::default();
        self.path_with(start, goal, &mut query)
    }

    pub fn path_with(
        &self,
        start: TilePos,
        goal: TilePos,
        query: &mut AStarQuery,
    ) -> Result<Vec<TilePos>, PathError> {
        if self.dirty {
            tracing::debug!("pathing on a tile graph with pending terrain changes");
        }
        let heuristic = self.heuristic();
        let path = self
            .graph
            .find_path_with(&start, &goal, &heuristic, &self.config, query)
            .inspect_err(|err| tracing::debug!(?start, ?goal, %err, "tile path failed"))?;
        Ok(path.into_iter().copied().collect())
    }

    /// Sum of entry costs along a tile path (the start tile is free), priced on the last built
    /// topology like [`TileGraph::path`].
    ///
    /// `None` if a tile is not in the graph or two consecutive tiles are not connected.
    pub fn path_cost(&self, path: &[TilePos]) -> Option<f32> {
        let ids = path
            .iter()
            .map(|pos| self.graph.id(pos))
            .collect::<Option<Vec<_>>>()?;
        astar::path_cost(&self.graph, &ids)
    }

    /// The walkable tile whose centre is closest to a continuous position. Ties go to the first
    /// tile in row order.
    pub fn nearest_walkable(&self, x: f32, y: f32) -> Option<TilePos> {
        let mut best: Option<(f32, TilePos)> = None;
        for (_, pos, _) in self.graph.iter() {
            let dx = pos.x as f32 - x;
            let dy = pos.y as f32 - y;
            let d2 = dx * dx + dy * dy;
            if best.map_or(true, |(b, _)| d2 < b) {
                best = Some((d2, *pos));
            }
        }
        best.map(|(_, pos)| pos)
    }
}

fn walkable_items(map: &TileMap) -> impl Iterator<Item = (TilePos, TilePos)> + '_ {
    map.positions()
        .filter(|p| map.is_walkable(*p))
        .map(|p| (p, p))
}

fn edges_of(map: &TileMap, pos: TilePos) -> Vec<(TilePos, f32)> {
    map.walkable_neighbors(pos)
        .filter_map(|n| map.get(n).map(|t| (n, t.move_cost)))
        .collect()
}

fn min_move_cost(map: &TileMap) -> f32 {
    map.tiles
        .iter()
        .filter(|t| t.walkable)
        .map(|t| t.move_cost)
        .filter(|c| c.is_finite() && *c >= 0.0)
        .min_by(f32::total_cmp)
        .unwrap_or(0.0)
}
