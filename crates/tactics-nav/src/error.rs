use thiserror::Error;

/// A graph that breaks the build contract. Search never runs on such a graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("duplicate node key {key}")]
    DuplicateKey { key: String },

    #[error("edge {from} -> {to} targets a key with no node")]
    DanglingEdge { from: String, to: String },

    #[error("edge {from} -> {to} has invalid cost {cost} (must be finite and >= 0)")]
    InvalidCost { from: String, to: String, cost: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("start key has no node in the graph")]
    UnknownStart,

    #[error("goal key has no node in the graph")]
    UnknownGoal,

    #[error("goal is unreachable from start")]
    NoPathFound,

    #[error("search gave up after {limit} expansions")]
    BudgetExceeded { limit: usize },
}

/// Tile data that does not describe a rectangular map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TileMapError {
    #[error("tile map must be non-empty (got {width}x{height})")]
    Empty { width: u32, height: u32 },

    #[error("tile map {width}x{height} exceeds the addressable range")]
    TooLarge { width: u32, height: u32 },

    #[error("tile map {width}x{height} needs {expected} tiles, got {actual}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}
