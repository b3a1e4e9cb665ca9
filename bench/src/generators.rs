//! Synthetic weighted graphs. All O(n) or O(n + edges), single-threaded and
//! deterministic: the same node count always yields the same graph.

use graph_search_core::{Dequeue, Graph};

/// Simple LCG for deterministic, fast pseudo-random numbers.
pub struct FastRng(u64);

impl FastRng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }

    pub fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Edge weight in `[1, 10)`.
    pub fn weight(&mut self) -> f64 {
        1.0 + 9.0 * self.next_f64()
    }
}

pub type Generator = fn(u64) -> Graph;

/// L-system fractal tree: deep branching with self-similar structure.
///
/// Each node spawns `branching` children, giving log depth with exponential
/// width. Exercises deep searches and long reconstructed paths.
pub fn gen_lsystem(node_count: u64) -> Graph {
    let mut graph = Graph::with_capacity(node_count as usize);
    let mut rng = FastRng::new(42);

    let branching = 3u64;
    graph.add_node(0);

    let mut next_id: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next_id < node_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= node_count {
                    break;
                }
                let child = next_id;
                next_id += 1;
                graph.add_edge(parent, child, rng.weight());
                next_frontier.push(child);
            }
        }
        frontier = next_frontier;
    }

    graph
}

/// Scale-free via edge-list sampling (O(edges), not O(n²)).
///
/// Preferential attachment by picking a random existing edge endpoint, so
/// nodes with more edges are more likely to be picked. Edges run both ways
/// so hubs are reachable from the start node.
pub fn gen_scale_free(node_count: u64) -> Graph {
    let edges_per_node = 5u64;
    let mut graph = Graph::with_capacity(node_count as usize);
    let mut rng = FastRng::new(12345);

    let mut edge_endpoints: Vec<u64> = Vec::with_capacity((node_count * edges_per_node * 2) as usize);

    // Seed: small clique
    let seed = 5u64.min(node_count);
    for i in 0..seed {
        graph.add_node(i);
    }
    for i in 0..seed {
        for j in (i + 1)..seed {
            graph.add_undirected_edge(i, j, rng.weight());
            edge_endpoints.push(i);
            edge_endpoints.push(j);
        }
    }

    for new_node in seed..node_count {
        graph.add_node(new_node);

        let attach = edges_per_node.min(new_node);
        for _ in 0..attach {
            if edge_endpoints.is_empty() {
                break;
            }
            let idx = rng.next(edge_endpoints.len() as u64) as usize;
            let target = edge_endpoints[idx];
            if target != new_node {
                graph.add_undirected_edge(new_node, target, rng.weight());
                edge_endpoints.push(new_node);
                edge_endpoints.push(target);
            }
        }
    }

    graph
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
///
/// Each node links forward to its `k` nearest ring neighbors; each link is
/// rewired to a random node with probability `p`. High clustering, short
/// paths, one large strongly connected component.
pub fn gen_small_world(node_count: u64) -> Graph {
    let k = 4u64;
    let p = 0.05f64;
    let mut graph = Graph::with_capacity(node_count as usize);
    let mut rng = FastRng::new(67890);

    for i in 0..node_count {
        graph.add_node(i);
    }

    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = (i + j) % node_count;
            let weight = rng.weight();

            if rng.next_f64() < p {
                let rewired = rng.next(node_count);
                if rewired != i {
                    graph.add_edge(i, rewired, weight);
                    continue;
                }
            }
            if neighbor != i {
                graph.add_edge(i, neighbor, weight);
            }
        }
    }

    graph
}

/// Erdos-Renyi: uniform random directed edges, ~5 per node on average.
/// Baseline topology with no structure.
pub fn gen_random(node_count: u64) -> Graph {
    let target_edges = node_count * 5;
    let mut graph = Graph::with_capacity(node_count as usize);
    let mut rng = FastRng::new(54321);

    for i in 0..node_count {
        graph.add_node(i);
    }
    if node_count == 0 {
        return graph;
    }

    for _ in 0..target_edges {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        if from != to {
            graph.add_edge(from, to, rng.weight());
        }
    }

    graph
}

/// Barbell: two dense clusters joined by a thin bridge.
///
/// Worst case for "find path through bottleneck": every route from the first
/// cluster to the second crosses the ~10-node bridge chain, which also
/// dominates betweenness.
pub fn gen_barbell(node_count: u64) -> Graph {
    let bridge_len = 10u64.min(node_count);
    let clique_size = (node_count - bridge_len) / 2;
    let mut graph = Graph::with_capacity(node_count as usize);
    let mut rng = FastRng::new(99999);

    let fanout = 10u64.min(clique_size.saturating_sub(1));
    let mut cluster = |graph: &mut Graph, offset: u64| {
        for i in 0..clique_size {
            graph.add_node(offset + i);
        }
        for i in 0..clique_size {
            for _ in 0..fanout {
                let target = rng.next(clique_size);
                if target != i {
                    graph.add_edge(offset + i, offset + target, rng.weight());
                }
            }
        }
    };

    cluster(&mut graph, 0);

    // Bridge: chain from the last node of A to the first node of B
    let bridge_start = clique_size;
    for i in 0..bridge_len {
        let id = bridge_start + i;
        graph.add_node(id);
        if i > 0 {
            graph.add_edge(id - 1, id, 1.0);
        } else if clique_size > 0 {
            graph.add_edge(clique_size - 1, id, 1.0);
        }
    }

    let b_start = bridge_start + bridge_len;
    cluster(&mut graph, b_start);
    if clique_size > 0 && bridge_len > 0 {
        graph.add_edge(b_start - 1, b_start, 1.0);
    }

    graph
}

/// DLA (Diffusion-Limited Aggregation): organic branching growth.
///
/// Each new node attaches to a random node on a bounded "surface" of recent
/// additions, with occasional long-range second links that create loops.
pub fn gen_dla(node_count: u64) -> Graph {
    let mut graph = Graph::with_capacity(node_count as usize);
    let mut rng = FastRng::new(77777);

    graph.add_node(0);

    let surface_max = 10_000usize;
    let mut surface: Dequeue<u64> = Dequeue::with_capacity(surface_max + 1);
    surface.enqueue(0);

    for new_node in 1..node_count {
        // Attach to a random surface node (primary edge)
        let pick = rng.next(surface.len() as u64) as usize;
        let attach_to = surface.get(pick).copied().unwrap_or(0);
        graph.add_edge(attach_to, new_node, rng.weight());

        // 10% chance of a second connection (creates loops / shortcuts)
        if rng.next(10) == 0 && new_node > 1 {
            let other = rng.next(new_node);
            if other != attach_to {
                graph.add_edge(new_node, other, rng.weight());
            }
        }

        surface.enqueue(new_node);
        if surface.len() > surface_max {
            surface.dequeue();
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Generator; 6] = [
        gen_lsystem,
        gen_scale_free,
        gen_small_world,
        gen_random,
        gen_barbell,
        gen_dla,
    ];

    #[test]
    fn test_generators_hit_node_count() {
        for generator in ALL {
            let g = generator(200);
            assert_eq!(g.node_count(), 200);
            assert!(g.edge_count() > 0);
        }
    }

    #[test]
    fn test_generators_are_deterministic() {
        for generator in ALL {
            let a: Vec<_> = generator(100).edges().collect();
            let b: Vec<_> = generator(100).edges().collect();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_weights_in_range() {
        let mut rng = FastRng::new(1);
        for _ in 0..1000 {
            let w = rng.weight();
            assert!((1.0..10.0).contains(&w));
        }
    }

    #[test]
    fn test_tiny_counts_do_not_panic() {
        for generator in ALL {
            for n in 0..4 {
                generator(n);
            }
        }
    }
}
