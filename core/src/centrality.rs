use std::collections::HashMap;
use std::hash::Hash;

use crate::dequeue::Dequeue;

/// Betweenness centrality (Brandes) of an undirected graph.
///
/// `neighbors` must be symmetric: if `b` is listed for `a`, `a` is listed
/// for `b`. Every pair is then reached from both endpoints, so the raw
/// dependency sums are halved. Values are not normalized.
///
/// Every node of `nodes` gets an entry, 0 when it lies on no shortest path.
#[tracing::instrument(skip_all)]
pub fn betweenness_centrality<N, I, F>(
    nodes: impl IntoIterator<Item = N>,
    neighbors: F,
) -> HashMap<N, f64>
where
    N: Hash + Eq + Clone,
    I: IntoIterator<Item = N>,
    F: FnMut(&N) -> I,
{
    let mut centrality = brandes(nodes, neighbors);
    for value in centrality.values_mut() {
        *value /= 2.0;
    }
    centrality
}

/// Betweenness centrality over directed adjacency, without halving.
#[tracing::instrument(skip_all)]
pub fn directed_betweenness_centrality<N, I, F>(
    nodes: impl IntoIterator<Item = N>,
    neighbors: F,
) -> HashMap<N, f64>
where
    N: Hash + Eq + Clone,
    I: IntoIterator<Item = N>,
    F: FnMut(&N) -> I,
{
    brandes(nodes, neighbors)
}

/// BFS order, shortest-path counts and predecessor lists from one source.
struct Sweep<N> {
    order: Vec<N>,
    sigma: HashMap<N, f64>,
    preds: HashMap<N, Vec<N>>,
}

/// Unweighted BFS from `source`, counting shortest paths to each node.
fn sweep<N, I, F>(source: &N, neighbors: &mut F) -> Sweep<N>
where
    N: Hash + Eq + Clone,
    I: IntoIterator<Item = N>,
    F: FnMut(&N) -> I,
{
    let mut order = Vec::new();
    let mut sigma: HashMap<N, f64> = HashMap::new();
    let mut preds: HashMap<N, Vec<N>> = HashMap::new();
    let mut depth: HashMap<N, usize> = HashMap::new();

    sigma.insert(source.clone(), 1.0);
    depth.insert(source.clone(), 0);
    let mut queue = Dequeue::new();
    queue.enqueue(source.clone());

    while let Some(v) = queue.dequeue() {
        let d_v = depth[&v];
        let sigma_v = sigma[&v];

        for w in neighbors(&v) {
            let d_w = *depth.entry(w.clone()).or_insert_with(|| {
                queue.enqueue(w.clone());
                d_v + 1
            });
            if d_w == d_v + 1 {
                *sigma.entry(w.clone()).or_insert(0.0) += sigma_v;
                preds.entry(w).or_default().push(v.clone());
            }
        }
        order.push(v);
    }

    Sweep { order, sigma, preds }
}

/// Raw Brandes accumulation: one BFS per source, then dependencies are
/// propagated back along the predecessor lists in reverse BFS order.
fn brandes<N, I, F>(nodes: impl IntoIterator<Item = N>, mut neighbors: F) -> HashMap<N, f64>
where
    N: Hash + Eq + Clone,
    I: IntoIterator<Item = N>,
    F: FnMut(&N) -> I,
{
    let sources: Vec<N> = nodes.into_iter().collect();
    let mut centrality: HashMap<N, f64> = sources.iter().map(|n| (n.clone(), 0.0)).collect();

    for source in &sources {
        let Sweep {
            mut order,
            sigma,
            preds,
        } = sweep(source, &mut neighbors);

        let mut delta: HashMap<N, f64> = HashMap::with_capacity(order.len());
        while let Some(w) = order.pop() {
            let delta_w = delta.get(&w).copied().unwrap_or(0.0);
            let sigma_w = sigma[&w];
            if let Some(parents) = preds.get(&w) {
                for v in parents {
                    *delta.entry(v.clone()).or_insert(0.0) += sigma[v] / sigma_w * (1.0 + delta_w);
                }
            }
            if &w != source {
                *centrality.entry(w).or_insert(0.0) += delta_w;
            }
        }
    }

    tracing::debug!(sources = sources.len(), "betweenness accumulated");
    centrality
}

#[cfg(test)]
mod tests {
    use super::*;

    fn undirected(edges: &[(u32, u32)]) -> HashMap<u32, Vec<u32>> {
        let mut adj: HashMap<u32, Vec<u32>> = HashMap::new();
        for &(a, b) in edges {
            adj.entry(a).or_default().push(b);
            adj.entry(b).or_default().push(a);
        }
        adj
    }

    fn run(nodes: &[u32], edges: &[(u32, u32)]) -> HashMap<u32, f64> {
        let adj = undirected(edges);
        betweenness_centrality(nodes.iter().copied(), |n| {
            adj.get(n).cloned().unwrap_or_default()
        })
    }

    #[test]
    fn test_path_of_three() {
        let c = run(&[0, 1, 2], &[(0, 1), (1, 2)]);
        assert_eq!(c[&0], 0.0);
        assert_eq!(c[&1], 1.0);
        assert_eq!(c[&2], 0.0);
    }

    #[test]
    fn test_star_center_carries_every_pair() {
        // 4 leaves: C(4, 2) = 6 leaf pairs, all through the hub.
        let c = run(&[0, 1, 2, 3, 4], &[(0, 1), (0, 2), (0, 3), (0, 4)]);
        assert_eq!(c[&0], 6.0);
        for leaf in 1..=4 {
            assert_eq!(c[&leaf], 0.0);
        }
    }

    #[test]
    fn test_square_splits_between_routes() {
        // Opposite corners have two shortest routes; each middle node gets half.
        let c = run(&[0, 1, 2, 3], &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        for node in 0..4 {
            assert!((c[&node] - 0.5).abs() < 1e-12, "node {node}: {}", c[&node]);
        }
    }

    #[test]
    fn test_isolated_node_reported_as_zero() {
        let c = run(&[0, 1, 2, 9], &[(0, 1), (1, 2)]);
        assert_eq!(c.len(), 4);
        assert_eq!(c[&9], 0.0);
    }

    #[test]
    fn test_directed_keeps_raw_sums() {
        let adj: HashMap<u32, Vec<u32>> = [(0, vec![1]), (1, vec![2])].into_iter().collect();
        let c = directed_betweenness_centrality([0, 1, 2], |n| adj.get(n).cloned().unwrap_or_default());
        assert_eq!(c[&1], 1.0);
        assert_eq!(c[&0], 0.0);
        assert_eq!(c[&2], 0.0);
    }

    #[test]
    fn test_empty_graph() {
        let c = run(&[], &[]);
        assert!(c.is_empty());
    }
}
