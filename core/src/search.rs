//! Resumable A* and reachability Dijkstra over caller-defined search spaces.
//!
//! Explored paths live in an arena of records; each record points at its
//! parent by [`PathId`], so partial paths share their prefixes and cloning
//! a snapshot copies handles rather than chains.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{Result, SearchError};
use crate::priority_queue::IndexedPriorityQueue;

/// A search node carrying its accumulated path cost.
pub trait PathNode {
    fn cost(&self) -> f64;
}

/// The caller's graph model: node identity and successor generation.
pub trait SearchSpace {
    /// Deduplication identity. Two nodes with equal keys are the same vertex
    /// reached by (possibly) different paths.
    type Key: Hash + Eq + Clone;
    type Node: PathNode;

    fn node_key(&self, node: &Self::Node) -> Self::Key;

    /// Successor records of `node`, each with its full accumulated cost.
    fn neighbors(&self, node: &Self::Node) -> impl IntoIterator<Item = Self::Node>;
}

/// A search space with a goal test and an optional heuristic.
pub trait GoalSearch: SearchSpace {
    /// Estimated remaining cost to the goal. Must not overestimate for the
    /// found path to be optimal. Zero turns A* into Dijkstra.
    fn estimate(&self, _node: &Self::Node) -> f64 {
        0.0
    }

    fn reached_goal(&self, node: &Self::Node) -> bool;
}

/// Handle of a record in the path arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathId(usize);

#[derive(Debug, Clone)]
struct PathRecord<N> {
    node: N,
    parent: Option<PathId>,
}

/// Everything a search run carries between steps.
#[derive(Debug, Clone)]
pub struct SearchState<K, N> {
    records: Vec<PathRecord<N>>,
    shortest: HashMap<K, PathId>,
    frontier: IndexedPriorityQueue<K>,
    found_goal: Option<PathId>,
    expanded: usize,
}

impl<K: Hash + Eq + Clone, N: PathNode> SearchState<K, N> {
    fn seeded(key: K, initial: N, priority: f64) -> Self {
        let mut frontier = IndexedPriorityQueue::new();
        frontier.enqueue(key.clone(), priority);
        let mut shortest = HashMap::new();
        shortest.insert(key, PathId(0));
        Self {
            records: vec![PathRecord {
                node: initial,
                parent: None,
            }],
            shortest,
            frontier,
            found_goal: None,
            expanded: 0,
        }
    }

    /// Pop the cheapest frontier key and return the record currently held
    /// for it.
    fn pop_frontier(&mut self) -> Option<PathId> {
        while let Some((key, _)) = self.frontier.dequeue() {
            if let Some(&id) = self.shortest.get(&key) {
                self.expanded += 1;
                return Some(id);
            }
        }
        None
    }

    /// Relax every neighbor of `current`: accept it when its key is new or
    /// its cost is strictly lower than the best known one.
    fn relax<S, F>(&mut self, space: &S, current: PathId, estimate: F)
    where
        S: SearchSpace<Key = K, Node = N>,
        F: Fn(&N) -> f64,
    {
        let neighbors: Vec<N> = space.neighbors(&self.records[current.0].node).into_iter().collect();

        for neighbor in neighbors {
            let key = space.node_key(&neighbor);
            let improves = match self.shortest.get(&key) {
                Some(&existing) => neighbor.cost() < self.records[existing.0].node.cost(),
                None => true,
            };
            if !improves {
                continue;
            }

            let priority = neighbor.cost() + estimate(&neighbor);
            let id = PathId(self.records.len());
            self.records.push(PathRecord {
                node: neighbor,
                parent: Some(current),
            });
            self.frontier.enqueue(key.clone(), priority);
            self.shortest.insert(key, id);
        }
    }

    /// The node held by an arena record.
    pub fn node(&self, id: PathId) -> &N {
        &self.records[id.0].node
    }

    /// The predecessor record on the path to `id`, `None` for the root.
    pub fn parent(&self, id: PathId) -> Option<PathId> {
        self.records[id.0].parent
    }

    /// Best node known so far for `key`.
    pub fn shortest_to(&self, key: &K) -> Option<&N> {
        self.shortest.get(key).map(|&id| self.node(id))
    }

    /// Every discovered key with its best known node.
    pub fn shortest(&self) -> impl Iterator<Item = (&K, &N)> + '_ {
        self.shortest.iter().map(|(k, &id)| (k, self.node(id)))
    }

    pub fn discovered(&self) -> usize {
        self.shortest.len()
    }

    pub fn frontier(&self) -> &IndexedPriorityQueue<K> {
        &self.frontier
    }

    /// Number of frontier pops performed so far.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    pub fn found_goal(&self) -> Option<&N> {
        self.found_goal.map(|id| self.node(id))
    }

    /// Root-first chain of nodes ending at record `id`.
    pub fn path(&self, id: PathId) -> Vec<&N> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(step) = current {
            path.push(self.node(step));
            current = self.parent(step);
        }
        path.reverse();
        path
    }

    /// Root-first path to the best known node for `key`.
    pub fn path_to(&self, key: &K) -> Option<Vec<&N>> {
        self.shortest.get(key).map(|&id| self.path(id))
    }

    /// Root-first path to the goal, once found.
    pub fn goal_path(&self) -> Option<Vec<&N>> {
        self.found_goal.map(|id| self.path(id))
    }

    /// Consume the state into `key → best node`.
    pub fn into_shortest_map(self) -> HashMap<K, N> {
        let mut nodes: Vec<Option<N>> = self.records.into_iter().map(|r| Some(r.node)).collect();
        self.shortest
            .into_iter()
            .filter_map(|(key, id)| nodes[id.0].take().map(|node| (key, node)))
            .collect()
    }
}

/// Outcome of a single [`AStar::step`].
#[derive(Debug)]
pub enum SearchStep<'s, K, N> {
    /// One node was expanded; the search can go on.
    Continue(&'s SearchState<K, N>),
    /// The goal was reached. Terminal: further steps return this again.
    Found(&'s SearchState<K, N>),
    /// The frontier is empty and the goal was never reached.
    Exhausted,
}

/// A* search driven one frontier pop at a time.
///
/// ```
/// use graph_search_core::{AStar, Graph, RouteSearch};
///
/// let mut graph = Graph::new();
/// graph.load_edges(vec![(0, 1, 2.0), (1, 2, 2.0), (0, 2, 5.0)]);
/// let route = RouteSearch::new(&graph, 2, |_| 0.0);
///
/// let state = AStar::new(&route, route.start(0)).run().unwrap();
/// assert_eq!(state.found_goal().map(|hop| hop.cost), Some(4.0));
/// ```
pub struct AStar<'p, P: GoalSearch> {
    problem: &'p P,
    state: SearchState<P::Key, P::Node>,
}

impl<'p, P: GoalSearch> AStar<'p, P> {
    /// Seed the frontier with `initial` at priority `estimate(initial)`.
    pub fn new(problem: &'p P, initial: P::Node) -> Self {
        let key = problem.node_key(&initial);
        let priority = problem.estimate(&initial);
        Self {
            problem,
            state: SearchState::seeded(key, initial, priority),
        }
    }

    /// Current state; before the first step this is the seeded frontier.
    pub fn state(&self) -> &SearchState<P::Key, P::Node> {
        &self.state
    }

    /// Independent deep copy of the current state.
    pub fn snapshot(&self) -> SearchState<P::Key, P::Node>
    where
        P::Node: Clone,
    {
        self.state.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.state.found_goal.is_some()
    }

    /// Expand the cheapest frontier node.
    pub fn step(&mut self) -> SearchStep<'_, P::Key, P::Node> {
        if self.state.found_goal.is_some() {
            return SearchStep::Found(&self.state);
        }

        let Some(current) = self.state.pop_frontier() else {
            tracing::debug!(
                expanded = self.state.expanded,
                discovered = self.state.discovered(),
                "frontier exhausted"
            );
            return SearchStep::Exhausted;
        };

        if self.problem.reached_goal(self.state.node(current)) {
            self.state.found_goal = Some(current);
            tracing::debug!(
                expanded = self.state.expanded,
                cost = self.state.node(current).cost(),
                "goal reached"
            );
            return SearchStep::Found(&self.state);
        }

        let problem = self.problem;
        self.state.relax(problem, current, |node| problem.estimate(node));
        tracing::trace!(
            expanded = self.state.expanded,
            frontier = self.state.frontier.len(),
            "expanded node"
        );
        SearchStep::Continue(&self.state)
    }

    /// Step until the goal is found; fails with `NoPathFound` when the
    /// frontier runs dry.
    pub fn run(mut self) -> Result<SearchState<P::Key, P::Node>> {
        let found = loop {
            match self.step() {
                SearchStep::Continue(_) => {}
                SearchStep::Found(_) => break true,
                SearchStep::Exhausted => break false,
            }
        };

        if found {
            Ok(self.state)
        } else {
            Err(SearchError::NoPathFound {
                expanded: self.state.expanded,
            })
        }
    }
}

/// Drain the whole reachable space from `initial` with plain Dijkstra and
/// return the cheapest node found for every key.
///
/// There is no goal, so this never fails; unreachable keys are simply
/// absent from the result.
#[tracing::instrument(skip_all)]
pub fn find_all_paths_dijkstra<S: SearchSpace>(space: &S, initial: S::Node) -> HashMap<S::Key, S::Node> {
    let key = space.node_key(&initial);
    let mut state = SearchState::seeded(key, initial, 0.0);

    while let Some(current) = state.pop_frontier() {
        state.relax(space, current, |_| 0.0);
    }

    tracing::debug!(
        expanded = state.expanded,
        reached = state.discovered(),
        "dijkstra drained"
    );
    state.into_shortest_map()
}
