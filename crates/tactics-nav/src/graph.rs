use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;

use crate::astar::{self, AStarQuery, Heuristic, PathfinderConfig};
use crate::{GraphError, PathError};

/// Handle of a node inside one build of a [`Graph`].
///
/// Handles are only valid for the generation that produced them; [`Graph::rebuild`] invalidates
/// all of them. Using a stale handle panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub fn index(self) -> usize {
        self.index as usize
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

/// Directed, weighted connection to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    cost: f32,
    to: NodeId,
}

impl Edge {
    pub fn cost(&self) -> f32 {
        self.cost
    }

    pub fn to(&self) -> NodeId {
        self.to
    }
}

/// A vertex: payload plus outgoing edges in exploration order.
#[derive(Debug, Clone)]
pub struct Node<T> {
    data: T,
    edges: Vec<Edge>,
}

impl<T> Node<T> {
    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// Nodes addressed by an external key (map cell, waypoint name, ...).
///
/// Topology is fixed once built. Terrain changes go through [`Graph::rebuild`], which replaces
/// every node and edge and bumps the generation.
#[derive(Debug, Clone)]
pub struct Graph<K, T> {
    generation: u32,
    keys: Vec<K>,
    nodes: Vec<Node<T>>,
    index: BTreeMap<K, NodeId>,
}

impl<K, T> Graph<K, T>
where
    K: Ord + Clone + Debug,
{
    /// Build from `(key, payload)` items and an adjacency rule returning `(neighbour key, cost)`
    /// pairs for each item. Edges keep the order the rule yields them in.
    pub fn from_adjacency<I, F, E>(items: I, adjacency: F) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (K, T)>,
        F: FnMut(&K, &T) -> E,
        E: IntoIterator<Item = (K, f32)>,
    {
        Self::assemble(0, items, adjacency)
    }

    /// Replace the whole topology. On error the graph is left untouched.
    pub fn rebuild<I, F, E>(&mut self, items: I, adjacency: F) -> Result<(), GraphError>
    where
        I: IntoIterator<Item = (K, T)>,
        F: FnMut(&K, &T) -> E,
        E: IntoIterator<Item = (K, f32)>,
    {
        *self = Self::assemble(self.generation.wrapping_add(1), items, adjacency)?;
        Ok(())
    }

    fn assemble<I, F, E>(generation: u32, items: I, mut adjacency: F) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (K, T)>,
        F: FnMut(&K, &T) -> E,
        E: IntoIterator<Item = (K, f32)>,
    {
        let mut keys = Vec::new();
        let mut nodes = Vec::new();
        let mut index = BTreeMap::new();

        for (key, data) in items {
            if index.contains_key(&key) {
                return Err(GraphError::DuplicateKey {
                    key: format!("{key:?}"),
                });
            }
            let id = NodeId {
                index: nodes.len() as u32,
                generation,
            };
            index.insert(key.clone(), id);
            keys.push(key);
            nodes.push(Node {
                data,
                edges: Vec::new(),
            });
        }

        let mut edge_count = 0usize;
        for i in 0..nodes.len() {
            let mut edges = Vec::new();
            for (to_key, cost) in adjacency(&keys[i], &nodes[i].data) {
                let Some(&to) = index.get(&to_key) else {
                    return Err(GraphError::DanglingEdge {
                        from: format!("{:?}", keys[i]),
                        to: format!("{to_key:?}"),
                    });
                };
                if !(cost.is_finite() && cost >= 0.0) {
                    return Err(GraphError::InvalidCost {
                        from: format!("{:?}", keys[i]),
                        to: format!("{to_key:?}"),
                        cost,
                    });
                }
                edges.push(Edge { cost, to });
            }
            edge_count += edges.len();
            nodes[i].edges = edges;
        }

        tracing::debug!(generation, nodes = nodes.len(), edges = edge_count, "built graph");

        Ok(Self {
            generation,
            keys,
            nodes,
            index,
        })
    }
}

impl<K, T> Graph<K, T>
where
    K: Ord,
{
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum()
    }

    pub fn id(&self, key: &K) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    /// Whether `id` belongs to the current generation of this graph.
    pub fn contains(&self, id: NodeId) -> bool {
        id.generation == self.generation && id.index() < self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[self.checked(id)]
    }

    pub fn data(&self, id: NodeId) -> &T {
        &self.node(id).data
    }

    pub fn key(&self, id: NodeId) -> &K {
        &self.keys[self.checked(id)]
    }

    pub fn edges(&self, id: NodeId) -> &[Edge] {
        &self.node(id).edges
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        let generation = self.generation;
        (0..self.nodes.len()).map(move |i| NodeId {
            index: i as u32,
            generation,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &K, &Node<T>)> + '_ {
        self.ids()
            .zip(self.keys.iter())
            .zip(self.nodes.iter())
            .map(|((id, key), node)| (id, key, node))
    }

    /// A* between two keys with no expansion budget.
    pub fn find_path<H>(&self, start: &K, goal: &K, heuristic: &H) -> Result<Vec<&K>, PathError>
    where
        H: Heuristic<T> + ?Sized,
    {
        let mut query = AStarQuery::default();
        self.find_path_with(
            start,
            goal,
            heuristic,
            &PathfinderConfig::default(),
            &mut query,
        )
    }

    pub fn find_path_with<H>(
        &self,
        start: &K,
        goal: &K,
        heuristic: &H,
        config: &PathfinderConfig,
        query: &mut AStarQuery,
    ) -> Result<Vec<&K>, PathError>
    where
        H: Heuristic<T> + ?Sized,
    {
        let start = self.id(start).ok_or(PathError::UnknownStart)?;
        let goal = self.id(goal).ok_or(PathError::UnknownGoal)?;

        let mut ids = Vec::new();
        astar::find_path_into(self, start, goal, heuristic, config, query, &mut ids)?;
        Ok(ids.into_iter().map(|id| &self.keys[id.index()]).collect())
    }

    fn checked(&self, id: NodeId) -> usize {
        assert!(
            self.contains(id),
            "stale or foreign {id:?} used with graph generation {}",
            self.generation
        );
        id.index()
    }

    pub(crate) fn node_at(&self, index: usize) -> &Node<T> {
        &self.nodes[index]
    }

    pub(crate) fn id_at(&self, index: usize) -> NodeId {
        NodeId {
            index: index as u32,
            generation: self.generation,
        }
    }
}

/// Incremental construction for hand-written graphs.
#[derive(Debug, Clone)]
pub struct GraphBuilder<K, T> {
    nodes: Vec<(K, T)>,
    edges: BTreeMap<K, Vec<(K, f32)>>,
}

impl<K, T> Default for GraphBuilder<K, T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: BTreeMap::new(),
        }
    }
}

impl<K, T> GraphBuilder<K, T>
where
    K: Ord + Clone + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(mut self, key: K, data: T) -> Self {
        self.add_node(key, data);
        self
    }

    pub fn edge(mut self, from: K, to: K, cost: f32) -> Self {
        self.add_edge(from, to, cost);
        self
    }

    /// Two opposing edges with the same cost.
    pub fn undirected_edge(mut self, a: K, b: K, cost: f32) -> Self {
        self.add_edge(a.clone(), b.clone(), cost);
        self.add_edge(b, a, cost);
        self
    }

    pub fn add_node(&mut self, key: K, data: T) {
        self.nodes.push((key, data));
    }

    pub fn add_edge(&mut self, from: K, to: K, cost: f32) {
        self.edges.entry(from).or_default().push((to, cost));
    }

    pub fn try_build(self) -> Result<Graph<K, T>, GraphError> {
        let Self { nodes, mut edges } = self;

        let known: BTreeSet<&K> = nodes.iter().map(|(k, _)| k).collect();
        if let Some((from, targets)) = edges.iter().find(|(from, _)| !known.contains(from)) {
            return Err(GraphError::DanglingEdge {
                from: format!("{from:?}"),
                to: targets
                    .first()
                    .map(|(to, _)| format!("{to:?}"))
                    .unwrap_or_default(),
            });
        }
        drop(known);

        Graph::from_adjacency(nodes, |key, _| edges.remove(key).unwrap_or_default())
    }

    /// Like [`GraphBuilder::try_build`], but a malformed graph is a programming error and panics.
    pub fn build(self) -> Graph<K, T> {
        self.try_build()
            .unwrap_or_else(|err| panic!("malformed graph: {err}"))
    }
}
