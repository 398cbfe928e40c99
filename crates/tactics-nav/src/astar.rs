use core::cmp::Ordering;
use std::collections::BinaryHeap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Graph, NodeId, PathError};

/// Estimate of the remaining cost from one payload to the goal payload.
///
/// Must be non-negative. Admissible heuristics (never overestimating) keep A* optimal; the zero
/// heuristic turns the search into Dijkstra.
pub trait Heuristic<T: ?Sized> {
    fn estimate(&self, from: &T, goal: &T) -> f32;
}

impl<T, F> Heuristic<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> f32,
{
    fn estimate(&self, from: &T, goal: &T) -> f32 {
        self(from, goal)
    }
}

/// The constant-zero heuristic.
pub fn no_heuristic<T: ?Sized>(_from: &T, _goal: &T) -> f32 {
    0.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct PathfinderConfig {
    /// Give up after this many node expansions. `None` searches the whole component.
    pub max_expansions: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
struct OpenNode {
    f: f32,
    seq: u64,
    node: usize,
}

impl OpenNode {
    fn cmp_key(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other.cmp_key(self)
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reusable scratch buffers for A* queries.
///
/// This avoids per-query allocations when the same agent paths every frame.
#[derive(Debug, Default)]
pub struct AStarQuery {
    open: BinaryHeap<OpenNode>,
    g_score: Vec<f32>,
    f_score: Vec<f32>,
    came_from: Vec<Option<usize>>,
    // Position in the open list, assigned on first insertion. Equal f-scores pop in this order.
    open_seq: Vec<Option<u64>>,
    closed: Vec<bool>,
    expansions: usize,
}

impl AStarQuery {
    /// Node expansions performed by the last query.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    fn reset(&mut self, len: usize) {
        self.open.clear();
        self.g_score.clear();
        self.g_score.resize(len, f32::INFINITY);
        self.f_score.clear();
        self.f_score.resize(len, f32::INFINITY);
        self.came_from.clear();
        self.came_from.resize(len, None);
        self.open_seq.clear();
        self.open_seq.resize(len, None);
        self.closed.clear();
        self.closed.resize(len, false);
        self.expansions = 0;
    }
}

/// Lowest-cost path from `start` to `goal`, both ends included, or `None` when `goal` is
/// unreachable.
///
/// Among open nodes with equal f-score, the one discovered first is expanded first, so results
/// are deterministic for a given graph.
pub fn find_path<K, T, H>(
    graph: &Graph<K, T>,
    start: NodeId,
    goal: NodeId,
    heuristic: &H,
) -> Option<Vec<NodeId>>
where
    K: Ord,
    H: Heuristic<T> + ?Sized,
{
    let mut query = AStarQuery::default();
    let mut out = Vec::new();
    find_path_into(
        graph,
        start,
        goal,
        heuristic,
        &PathfinderConfig::default(),
        &mut query,
        &mut out,
    )
    .ok()?;
    Some(out)
}

/// [`find_path`] with caller-owned buffers and an optional expansion budget.
///
/// `out` is cleared first and holds the path on success.
pub fn find_path_into<K, T, H>(
    graph: &Graph<K, T>,
    start: NodeId,
    goal: NodeId,
    heuristic: &H,
    config: &PathfinderConfig,
    query: &mut AStarQuery,
    out: &mut Vec<NodeId>,
) -> Result<(), PathError>
where
    K: Ord,
    H: Heuristic<T> + ?Sized,
{
    out.clear();
    let goal_data = graph.data(goal);
    let start_data = graph.data(start);

    if start == goal {
        out.push(start);
        return Ok(());
    }

    let start_idx = start.index();
    let goal_idx = goal.index();
    query.reset(graph.len());

    let mut seq: u64 = 0;
    let h0 = estimate(heuristic, start_data, goal_data);
    query.g_score[start_idx] = 0.0;
    query.f_score[start_idx] = h0;
    query.open_seq[start_idx] = Some(seq);
    query.open.push(OpenNode {
        f: h0,
        seq,
        node: start_idx,
    });
    seq += 1;

    while let Some(entry) = query.open.pop() {
        let current = entry.node;
        if query.closed[current] || entry.f != query.f_score[current] {
            // Stale heap entry.
            continue;
        }

        if current == goal_idx {
            reconstruct_path(graph, &query.came_from, current, out);
            tracing::trace!(
                expansions = query.expansions,
                len = out.len(),
                "path found"
            );
            return Ok(());
        }

        if let Some(limit) = config.max_expansions {
            if query.expansions >= limit {
                tracing::debug!(limit, "path search exceeded expansion budget");
                return Err(PathError::BudgetExceeded { limit });
            }
        }
        query.expansions += 1;

        query.closed[current] = true;
        query.open_seq[current] = None;

        let current_g = query.g_score[current];
        for edge in graph.node_at(current).edges() {
            let neighbor = edge.to().index();
            if query.closed[neighbor] {
                continue;
            }

            let tentative_g = current_g + edge.cost();
            if tentative_g >= query.g_score[neighbor] {
                continue;
            }

            query.came_from[neighbor] = Some(current);
            query.g_score[neighbor] = tentative_g;
            let f = tentative_g + estimate(heuristic, graph.node_at(neighbor).data(), goal_data);
            query.f_score[neighbor] = f;

            let neighbor_seq = match query.open_seq[neighbor] {
                Some(existing) => existing,
                None => {
                    query.open_seq[neighbor] = Some(seq);
                    seq += 1;
                    seq - 1
                }
            };
            query.open.push(OpenNode {
                f,
                seq: neighbor_seq,
                node: neighbor,
            });
        }
    }

    tracing::trace!(expansions = query.expansions, "open set exhausted");
    Err(PathError::NoPathFound)
}

/// Sum of edge costs along `path`, taking the cheapest edge between consecutive nodes.
///
/// Returns `None` if two consecutive nodes are not connected.
pub fn path_cost<K, T>(graph: &Graph<K, T>, path: &[NodeId]) -> Option<f32>
where
    K: Ord,
{
    let mut total = 0.0;
    for pair in path.windows(2) {
        let step = graph
            .edges(pair[0])
            .iter()
            .filter(|e| e.to() == pair[1])
            .map(|e| e.cost())
            .min_by(f32::total_cmp)?;
        total += step;
    }
    Some(total)
}

fn estimate<T, H>(heuristic: &H, from: &T, goal: &T) -> f32
where
    T: ?Sized,
    H: Heuristic<T> + ?Sized,
{
    let h = heuristic.estimate(from, goal);
    debug_assert!(h >= 0.0, "heuristic must be non-negative (got {h})");
    h
}

fn reconstruct_path<K, T>(
    graph: &Graph<K, T>,
    came_from: &[Option<usize>],
    mut current: usize,
    out: &mut Vec<NodeId>,
) where
    K: Ord,
{
    out.push(graph.id_at(current));
    while let Some(prev) = came_from[current] {
        current = prev;
        out.push(graph.id_at(current));
    }
    out.reverse();
}
