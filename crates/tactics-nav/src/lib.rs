//! Weighted graphs, A* pathfinding and tile-map graph providers.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod astar;
pub mod error;
pub mod graph;
pub mod tiles;

pub use astar::{
    find_path, find_path_into, no_heuristic, path_cost, AStarQuery, Heuristic, PathfinderConfig,
};
pub use error::{GraphError, PathError, TileMapError};
pub use graph::{Edge, Graph, GraphBuilder, Node, NodeId};
pub use tiles::{TileGraph, TileMap, TilePos, TileType};
