use std::collections::{HashMap, HashSet};

use crate::all_pairs::AllPairsShortestPaths;
use crate::centrality;
use crate::components;
use crate::error::Result;
use crate::search::{find_all_paths_dijkstra, AStar, GoalSearch, PathNode, SearchSpace, SearchState};

/// Node identifier.
pub type NodeId = u64;

/// A directed weighted edge in the adjacency list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: NodeId,
    pub weight: f64,
}

/// In-memory weighted graph: adjacency lists in both directions.
///
/// Edges are stored twice: `outgoing[a]` holds edges from a, `incoming[b]`
/// holds edges into b (with `target` pointing back at the source). Node
/// order is insertion order, so every algorithm run on a `Graph` sees the
/// same deterministic node sequence.
#[derive(Debug, Clone)]
pub struct Graph {
    outgoing: HashMap<NodeId, Vec<Edge>>,
    incoming: HashMap<NodeId, Vec<Edge>>,
    order: Vec<NodeId>,
    known: HashSet<NodeId>,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            outgoing: HashMap::new(),
            incoming: HashMap::new(),
            order: Vec::new(),
            known: HashSet::new(),
        }
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(node_count: usize) -> Self {
        Self {
            outgoing: HashMap::with_capacity(node_count),
            incoming: HashMap::with_capacity(node_count),
            order: Vec::with_capacity(node_count),
            known: HashSet::with_capacity(node_count),
        }
    }

    /// Register a node. Adding a known node is a no-op.
    pub fn add_node(&mut self, id: NodeId) {
        if self.known.insert(id) {
            self.order.push(id);
        }
    }

    /// Add a directed edge, registering both endpoints.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) {
        self.add_node(from);
        self.add_node(to);
        self.outgoing
            .entry(from)
            .or_default()
            .push(Edge { target: to, weight });
        self.incoming
            .entry(to)
            .or_default()
            .push(Edge { target: from, weight });
    }

    /// Add the edge in both directions.
    pub fn add_undirected_edge(&mut self, a: NodeId, b: NodeId, weight: f64) {
        self.add_edge(a, b, weight);
        self.add_edge(b, a, weight);
    }

    /// Bulk load from `(from, to, weight)` tuples.
    pub fn load_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (NodeId, NodeId, f64)>,
    {
        for (from, to, weight) in edges {
            self.add_edge(from, to, weight);
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.known.contains(&id)
    }

    /// Nodes in insertion order.
    pub fn node_ids(&self) -> &[NodeId] {
        &self.order
    }

    /// Get outgoing edges for a node.
    pub fn neighbors_out(&self, id: NodeId) -> &[Edge] {
        self.outgoing.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Get incoming edges for a node.
    pub fn neighbors_in(&self, id: NodeId) -> &[Edge] {
        self.incoming.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Targets of the outgoing edges of `id`.
    pub fn successors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.neighbors_out(id).iter().map(|e| e.target)
    }

    /// Every edge as `(from, to, weight)`, grouped by source in node order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, f64)> + '_ {
        self.order
            .iter()
            .flat_map(move |&from| self.neighbors_out(from).iter().map(move |e| (from, e.target, e.weight)))
    }

    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.values().map(|v| v.len()).sum()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let nodes_mem = self.order.len() * (2 * size_of::<NodeId>() + 40);
        let out_edges: usize = self.outgoing.values().map(|v| v.len() * size_of::<Edge>()).sum();
        let in_edges: usize = self.incoming.values().map(|v| v.len() * size_of::<Edge>()).sum();

        nodes_mem + out_edges + in_edges
    }

    /// Cheapest distance from `start` to every reachable node.
    pub fn shortest_distances(&self, start: NodeId) -> HashMap<NodeId, f64> {
        find_all_paths_dijkstra(self, Hop::start(start))
            .into_iter()
            .map(|(id, hop)| (id, hop.cost))
            .collect()
    }

    /// Cheapest route from `start` to `target` under `heuristic`.
    pub fn route<H>(&self, start: NodeId, target: NodeId, heuristic: H) -> Result<SearchState<NodeId, Hop>>
    where
        H: Fn(NodeId) -> f64,
    {
        let search = RouteSearch::new(self, target, heuristic);
        AStar::new(&search, search.start(start)).run()
    }

    /// Floyd–Warshall tables over every node and edge.
    pub fn all_pairs(&self) -> Result<AllPairsShortestPaths<NodeId>> {
        AllPairsShortestPaths::compute(self.order.iter().copied(), self.edges())
    }

    /// Strongly connected components following outgoing edges.
    pub fn strongly_connected_components(&self) -> Vec<HashSet<NodeId>> {
        components::strongly_connected_components(self.order.iter().copied(), |&id| self.successors(id))
    }

    /// Unweighted betweenness, treating every edge as undirected.
    pub fn betweenness_centrality(&self) -> HashMap<NodeId, f64> {
        centrality::betweenness_centrality(self.order.iter().copied(), |&id| self.undirected_neighbors(id))
    }

    /// Unweighted betweenness following edge direction.
    pub fn directed_betweenness_centrality(&self) -> HashMap<NodeId, f64> {
        centrality::directed_betweenness_centrality(self.order.iter().copied(), |&id| self.successors(id))
    }

    /// Distinct neighbors across both directions.
    fn undirected_neighbors(&self, id: NodeId) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        self.neighbors_out(id)
            .iter()
            .chain(self.neighbors_in(id))
            .map(|e| e.target)
            .filter(|&t| t != id && seen.insert(t))
            .collect()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

/// A node reached during a search over a [`Graph`], with the total weight of
/// the path that reached it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hop {
    pub node: NodeId,
    pub cost: f64,
}

impl Hop {
    pub fn start(node: NodeId) -> Self {
        Self { node, cost: 0.0 }
    }
}

impl PathNode for Hop {
    fn cost(&self) -> f64 {
        self.cost
    }
}

impl SearchSpace for Graph {
    type Key = NodeId;
    type Node = Hop;

    fn node_key(&self, hop: &Hop) -> NodeId {
        hop.node
    }

    fn neighbors(&self, hop: &Hop) -> impl IntoIterator<Item = Hop> {
        let base = hop.cost;
        self.neighbors_out(hop.node).iter().map(move |e| Hop {
            node: e.target,
            cost: base + e.weight,
        })
    }
}

/// Point-to-point search over a [`Graph`].
pub struct RouteSearch<'g, H> {
    graph: &'g Graph,
    target: NodeId,
    heuristic: H,
}

impl<'g, H: Fn(NodeId) -> f64> RouteSearch<'g, H> {
    pub fn new(graph: &'g Graph, target: NodeId, heuristic: H) -> Self {
        Self {
            graph,
            target,
            heuristic,
        }
    }

    /// The zero-cost initial node for a search from `node`.
    pub fn start(&self, node: NodeId) -> Hop {
        Hop::start(node)
    }

    pub fn target(&self) -> NodeId {
        self.target
    }
}

impl<H: Fn(NodeId) -> f64> SearchSpace for RouteSearch<'_, H> {
    type Key = NodeId;
    type Node = Hop;

    fn node_key(&self, hop: &Hop) -> NodeId {
        hop.node
    }

    fn neighbors(&self, hop: &Hop) -> impl IntoIterator<Item = Hop> {
        self.graph.neighbors(hop)
    }
}

impl<H: Fn(NodeId) -> f64> GoalSearch for RouteSearch<'_, H> {
    fn estimate(&self, hop: &Hop) -> f64 {
        (self.heuristic)(hop.node)
    }

    fn reached_goal(&self, hop: &Hop) -> bool {
        hop.node == self.target
    }
}
