mod generators;
mod logging;

use std::time::Instant;

use clap::{Parser, ValueEnum};
use graph_search_core::{Graph, NodeId, SearchError};
use serde::Serialize;

use generators::Generator;

/// Times every graph-search-core algorithm on synthetic graphs.
#[derive(Parser, Debug)]
#[command(name = "graph-search-bench")]
#[command(version, about, long_about = None)]
struct BenchConfig {
    /// Graph topology to generate
    #[arg(value_enum, default_value = "all")]
    mode: Mode,

    /// Nodes per generated graph
    #[arg(env = "GRAPH_SEARCH_BENCH_NODES", default_value_t = 100_000)]
    node_count: u64,

    /// Largest graph betweenness centrality is run on (O(V·E))
    #[arg(long, default_value_t = 2_000)]
    centrality_limit: u64,

    /// Largest graph all-pairs shortest paths are run on (O(V³))
    #[arg(long, default_value_t = 400)]
    all_pairs_limit: u64,

    /// Print one JSON report per graph instead of tables
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,

    /// Log level or filter directive (overridden by GRAPH_SEARCH_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Run all generators and benchmark each
    All,
    /// Fractal branching tree (deep paths)
    Lsystem,
    /// Preferential attachment via edge sampling (hub-and-spoke)
    Scalefree,
    /// Watts-Strogatz ring lattice + shortcuts
    Smallworld,
    /// Erdos-Renyi uniform random edges
    Random,
    /// Two dense clusters connected by a thin bridge
    Barbell,
    /// Diffusion-limited aggregation (organic branching)
    Dla,
}

impl Mode {
    fn generators(self) -> Vec<(&'static str, Generator)> {
        match self {
            Mode::Lsystem => vec![("L-system tree", generators::gen_lsystem)],
            Mode::Scalefree => vec![("Scale-free (edge sampling)", generators::gen_scale_free)],
            Mode::Smallworld => vec![("Small-world (Watts-Strogatz)", generators::gen_small_world)],
            Mode::Random => vec![("Erdos-Renyi random", generators::gen_random)],
            Mode::Barbell => vec![("Barbell (cluster-bridge-cluster)", generators::gen_barbell)],
            Mode::Dla => vec![("DLA (organic branching)", generators::gen_dla)],
            Mode::All => [
                Mode::Lsystem,
                Mode::Scalefree,
                Mode::Smallworld,
                Mode::Random,
                Mode::Barbell,
                Mode::Dla,
            ]
            .into_iter()
            .flat_map(Mode::generators)
            .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct BenchReport {
    generator: String,
    nodes: usize,
    edges: usize,
    memory_bytes: usize,
    generate_ms: f64,
    dijkstra: DijkstraReport,
    route: Option<RouteReport>,
    components: ComponentReport,
    betweenness: Option<CentralityReport>,
    all_pairs: Option<AllPairsReport>,
}

#[derive(Debug, Serialize)]
struct DijkstraReport {
    reached: usize,
    farthest: f64,
    ms: f64,
}

#[derive(Debug, Serialize)]
struct RouteReport {
    target: NodeId,
    cost: Option<f64>,
    hops: Option<usize>,
    expanded: usize,
    ms: f64,
}

#[derive(Debug, Serialize)]
struct ComponentReport {
    count: usize,
    largest: usize,
    ms: f64,
}

#[derive(Debug, Serialize)]
struct CentralityReport {
    top_node: Option<NodeId>,
    top_score: f64,
    ms: f64,
}

#[derive(Debug, Serialize)]
struct AllPairsReport {
    reachable_pairs: usize,
    path_count_max: u64,
    ms: f64,
}

fn millis(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = BenchConfig::parse();
    logging::init_tracing(config.verbose, config.log_level.as_deref())?;

    if !config.json {
        println!("graph-search-bench");
        println!("==================");
        println!();
    }

    for (name, generator) in config.mode.generators() {
        let report = run_benchmark(name, generator, &config)?;
        if config.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            print_report(&report);
        }
    }

    Ok(())
}

fn run_benchmark(name: &str, generator: Generator, config: &BenchConfig) -> Result<BenchReport, SearchError> {
    tracing::info!(generator = name, target_nodes = config.node_count, "generating graph");

    let t = Instant::now();
    let graph = generator(config.node_count);
    let generate_ms = millis(t);

    let dijkstra = bench_dijkstra(&graph);
    let route = bench_route(&graph)?;
    let components = bench_components(&graph);

    let size = graph.node_count() as u64;
    let betweenness = (size <= config.centrality_limit).then(|| bench_betweenness(&graph));
    let all_pairs = if size <= config.all_pairs_limit {
        Some(bench_all_pairs(&graph)?)
    } else {
        None
    };

    Ok(BenchReport {
        generator: name.to_string(),
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        memory_bytes: graph.memory_usage(),
        generate_ms,
        dijkstra,
        route,
        components,
        betweenness,
        all_pairs,
    })
}

/// Reachability Dijkstra from node 0 (typically a hub or root).
fn bench_dijkstra(graph: &Graph) -> DijkstraReport {
    let t = Instant::now();
    let distances = if graph.contains(0) {
        graph.shortest_distances(0)
    } else {
        Default::default()
    };
    let ms = millis(t);
    DijkstraReport {
        reached: distances.len(),
        farthest: distances.values().copied().fold(0.0, f64::max),
        ms,
    }
}

/// A* from node 0 to the last node. The synthetic graphs carry no
/// coordinates, so the heuristic is zero.
fn bench_route(graph: &Graph) -> Result<Option<RouteReport>, SearchError> {
    let Some(&target) = graph.node_ids().last() else {
        return Ok(None);
    };

    let t = Instant::now();
    let outcome = graph.route(0, target, |_| 0.0);
    let ms = millis(t);

    let report = match outcome {
        Ok(state) => RouteReport {
            target,
            cost: state.found_goal().map(|hop| hop.cost),
            hops: state.goal_path().map(|path| path.len() - 1),
            expanded: state.expanded(),
            ms,
        },
        Err(SearchError::NoPathFound { expanded }) => RouteReport {
            target,
            cost: None,
            hops: None,
            expanded,
            ms,
        },
        Err(err) => return Err(err),
    };
    Ok(Some(report))
}

fn bench_components(graph: &Graph) -> ComponentReport {
    let t = Instant::now();
    let components = graph.strongly_connected_components();
    let ms = millis(t);
    ComponentReport {
        count: components.len(),
        largest: components.iter().map(|c| c.len()).max().unwrap_or(0),
        ms,
    }
}

fn bench_betweenness(graph: &Graph) -> CentralityReport {
    let t = Instant::now();
    let centrality = graph.betweenness_centrality();
    let ms = millis(t);

    // Ties go to the lowest node id for stable output
    let top = centrality
        .iter()
        .max_by(|a, b| a.1.total_cmp(b.1).then(b.0.cmp(a.0)))
        .map(|(&node, &score)| (node, score));
    CentralityReport {
        top_node: top.map(|(node, _)| node),
        top_score: top.map_or(0.0, |(_, score)| score),
        ms,
    }
}

fn bench_all_pairs(graph: &Graph) -> Result<AllPairsReport, SearchError> {
    let t = Instant::now();
    let table = graph.all_pairs()?;
    let ms = millis(t);

    let nodes = table.nodes();
    let mut reachable_pairs = 0;
    let mut path_count_max = 0;
    for from in nodes {
        for to in nodes {
            if from != to && table.shortest_path_length(from, to).is_finite() {
                reachable_pairs += 1;
                path_count_max = path_count_max.max(table.shortest_path_count(from, to));
            }
        }
    }

    Ok(AllPairsReport {
        reachable_pairs,
        path_count_max,
        ms,
    })
}

fn print_report(report: &BenchReport) {
    println!("--- {} ---", report.generator);
    println!(
        "Generated in {:.2}s: {} nodes, {} edges, ~{:.1}MB",
        report.generate_ms / 1000.0,
        report.nodes,
        report.edges,
        report.memory_bytes as f64 / 1_048_576.0
    );
    println!();
    println!("{:>14} {:>28} {:>10}", "algorithm", "result", "time");
    println!("{:->14} {:->28} {:->10}", "", "", "");

    let d = &report.dijkstra;
    println!(
        "{:>14} {:>28} {:>8.1}ms",
        "dijkstra",
        format!("{} reached, max {:.1}", d.reached, d.farthest),
        d.ms
    );

    if let Some(r) = &report.route {
        let result = match (r.cost, r.hops) {
            (Some(cost), Some(hops)) => format!("0 → {}: {:.1} / {} hops", r.target, cost, hops),
            _ => format!("0 → {}: no path", r.target),
        };
        println!("{:>14} {:>28} {:>8.1}ms", "a*", result, r.ms);
        println!("{:>14} {:>28}", "", format!("{} expanded", r.expanded));
    }

    let c = &report.components;
    println!(
        "{:>14} {:>28} {:>8.1}ms",
        "scc",
        format!("{} components, largest {}", c.count, c.largest),
        c.ms
    );

    match &report.betweenness {
        Some(b) => {
            let top = b.top_node.map_or_else(|| "-".to_string(), |n| n.to_string());
            println!(
                "{:>14} {:>28} {:>8.1}ms",
                "betweenness",
                format!("top {} ({:.1})", top, b.top_score),
                b.ms
            );
        }
        None => println!("{:>14} {:>28}", "betweenness", "(skipped: over limit)"),
    }

    match &report.all_pairs {
        Some(a) => println!(
            "{:>14} {:>28} {:>8.1}ms",
            "all-pairs",
            format!("{} pairs, max count {}", a.reachable_pairs, a.path_count_max),
            a.ms
        ),
        None => println!("{:>14} {:>28}", "all-pairs", "(skipped: over limit)"),
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> BenchConfig {
        BenchConfig::parse_from(std::iter::once("graph-search-bench").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let c = config(&[]);
        assert_eq!(c.mode, Mode::All);
        assert!(!c.json);
        assert_eq!(c.centrality_limit, 2_000);
        assert_eq!(c.mode.generators().len(), 6);
    }

    #[test]
    fn test_positional_mode_and_count() {
        let c = config(&["barbell", "500", "--json", "--all-pairs-limit", "10"]);
        assert_eq!(c.mode, Mode::Barbell);
        assert_eq!(c.node_count, 500);
        assert!(c.json);
        assert_eq!(c.all_pairs_limit, 10);
        assert_eq!(c.mode.generators().len(), 1);
    }

    #[test]
    fn test_small_run_fills_every_section() {
        let c = config(&["barbell", "60"]);
        let report = run_benchmark("barbell", generators::gen_barbell, &c).unwrap();
        assert_eq!(report.nodes, 60);
        assert!(report.route.is_some());
        assert!(report.betweenness.is_some());
        assert!(report.all_pairs.is_some());
        assert!(report.components.count >= 1);
    }

    #[test]
    fn test_limits_skip_expensive_algorithms() {
        let c = config(&["random", "50", "--centrality-limit", "10", "--all-pairs-limit", "10"]);
        let report = run_benchmark("random", generators::gen_random, &c).unwrap();
        assert!(report.betweenness.is_none());
        assert!(report.all_pairs.is_none());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["all_pairs"].is_null());
        assert_eq!(json["nodes"], 50);
    }
}
