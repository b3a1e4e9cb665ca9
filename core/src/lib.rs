//! graph-search-core: In-memory graph search and decomposition toolkit.
//!
//! A pure Rust library of reusable search building blocks: an indexed
//! priority queue with in-place priority updates, a ring-buffer dequeue,
//! resumable A* and reachability Dijkstra over caller-defined search spaces,
//! Floyd–Warshall with path counting, Tarjan strongly connected components
//! and Brandes betweenness centrality.
//!
//! Callers describe their problem through the [`SearchSpace`] and
//! [`GoalSearch`] traits (or plain neighbor closures for the decomposition
//! algorithms). [`Graph`] is a ready-made weighted adjacency list for the
//! common case and for the benchmark binary.

mod all_pairs;
mod centrality;
mod components;
mod dequeue;
mod error;
mod graph;
mod history;
mod priority_queue;
mod search;

pub use all_pairs::AllPairsShortestPaths;
pub use centrality::{betweenness_centrality, directed_betweenness_centrality};
pub use components::strongly_connected_components;
pub use dequeue::Dequeue;
pub use error::{Result, SearchError};
pub use graph::{Edge, Graph, Hop, NodeId, RouteSearch};
pub use history::SearchHistory;
pub use priority_queue::IndexedPriorityQueue;
pub use search::{
    find_all_paths_dijkstra, AStar, GoalSearch, PathId, PathNode, SearchSpace, SearchState, SearchStep,
};
