use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{Result, SearchError};

/// Dense all-pairs shortest paths (Floyd–Warshall) with predecessor and
/// shortest-path-count tables.
///
/// Tables are flat `n × n` row-major vectors indexed by the position of each
/// node in the node list given to [`AllPairsShortestPaths::compute`].
#[derive(Debug, Clone)]
pub struct AllPairsShortestPaths<N> {
    nodes: Vec<N>,
    index: HashMap<N, usize>,
    distances: Vec<f64>,
    predecessors: Vec<Option<usize>>,
    counts: Vec<u64>,
}

impl<N: Hash + Eq + Clone + Debug> AllPairsShortestPaths<N> {
    /// Build the tables from a node list and directed weighted edges.
    ///
    /// A node listed twice keeps its first index. Parallel edges are not
    /// merged: the last one supplied wins. Self-loops are ignored so the
    /// diagonal stays at distance 0.
    ///
    /// Fails with [`SearchError::UnknownNode`] before any relaxation if an
    /// edge endpoint is missing from `nodes`.
    #[tracing::instrument(skip_all)]
    pub fn compute<I, E>(nodes: I, edges: E) -> Result<Self>
    where
        I: IntoIterator<Item = N>,
        E: IntoIterator<Item = (N, N, f64)>,
    {
        let mut list = Vec::new();
        let mut index = HashMap::new();
        for node in nodes {
            if !index.contains_key(&node) {
                index.insert(node.clone(), list.len());
                list.push(node);
            }
        }

        let n = list.len();
        let mut distances = vec![f64::INFINITY; n * n];
        let mut predecessors = vec![None; n * n];
        let mut counts = vec![0u64; n * n];
        for i in 0..n {
            distances[i * n + i] = 0.0;
            predecessors[i * n + i] = Some(i);
            counts[i * n + i] = 1;
        }

        let lookup = |node: &N| {
            index
                .get(node)
                .copied()
                .ok_or_else(|| SearchError::UnknownNode(format!("{node:?}")))
        };
        let mut direct = Vec::new();
        for (from, to, weight) in edges {
            direct.push((lookup(&from)?, lookup(&to)?, weight));
        }

        for (u, v, weight) in direct {
            if u == v {
                continue;
            }
            distances[u * n + v] = weight;
            predecessors[u * n + v] = Some(u);
            counts[u * n + v] = 1;
        }

        let mut table = Self {
            nodes: list,
            index,
            distances,
            predecessors,
            counts,
        };
        table.relax_all();
        tracing::debug!(nodes = n, "all-pairs tables computed");
        Ok(table)
    }

    /// The O(n³) relaxation. An equally short route through `k` adds its
    /// path count; a strictly shorter one replaces distance, predecessor and
    /// count.
    fn relax_all(&mut self) {
        let n = self.nodes.len();
        for k in 0..n {
            for i in 0..n {
                let d_ik = self.distances[i * n + k];
                if i == k || d_ik == f64::INFINITY {
                    continue;
                }
                let c_ik = self.counts[i * n + k];

                for j in 0..n {
                    if j == k || j == i {
                        continue;
                    }
                    let d_kj = self.distances[k * n + j];
                    if d_kj == f64::INFINITY {
                        continue;
                    }

                    let through = d_ik + d_kj;
                    let via_k = c_ik.saturating_mul(self.counts[k * n + j]);
                    let ij = i * n + j;
                    if through < self.distances[ij] {
                        self.distances[ij] = through;
                        self.predecessors[ij] = self.predecessors[k * n + j];
                        self.counts[ij] = via_k;
                    } else if through == self.distances[ij] {
                        self.counts[ij] = self.counts[ij].saturating_add(via_k);
                    }
                }
            }
        }
    }

    fn pair(&self, from: &N, to: &N) -> Option<(usize, usize)> {
        Some((*self.index.get(from)?, *self.index.get(to)?))
    }

    /// Shortest distance, `f64::INFINITY` when unreachable or when either
    /// node is unknown.
    pub fn shortest_path_length(&self, from: &N, to: &N) -> f64 {
        self.pair(from, to)
            .map_or(f64::INFINITY, |(i, j)| self.distances[i * self.nodes.len() + j])
    }

    /// Nodes of one shortest path, `from` first and `to` last.
    pub fn shortest_path(&self, from: &N, to: &N) -> Option<Vec<&N>> {
        let (i, j) = self.pair(from, to)?;
        let n = self.nodes.len();

        let mut path = vec![&self.nodes[j]];
        let mut current = j;
        while current != i {
            current = self.predecessors[i * n + current]?;
            path.push(&self.nodes[current]);
            if path.len() > n {
                return None;
            }
        }

        path.reverse();
        Some(path)
    }

    /// Number of distinct shortest paths; 0 when unreachable.
    pub fn shortest_path_count(&self, from: &N, to: &N) -> u64 {
        self.pair(from, to)
            .map_or(0, |(i, j)| self.counts[i * self.nodes.len() + j])
    }

    /// Nodes in index order.
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
