use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use flight_route_core::{
    cheapest, enumerate_paths, find_best_path, find_best_path_strict, DistanceTable, Graph, NodeId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Run every generator
    All,
    /// Cities scattered uniformly over a square map
    Scatter,
    /// Dense regional clusters far apart from each other
    Clustered,
    /// Cities strung along a long, slightly wavy corridor
    Corridor,
}

#[derive(Parser, Debug)]
#[command(about = "Benchmark for flight-route-core search and enumeration")]
struct Args {
    /// Generator to benchmark
    #[arg(value_enum, default_value = "all")]
    mode: Mode,

    /// Number of cities per generated map
    #[arg(default_value_t = 200)]
    node_count: usize,

    /// Random origin/destination pairs searched per map
    #[arg(long, default_value_t = 50)]
    queries: usize,

    /// Largest map that is also enumerated exhaustively
    #[arg(long, default_value_t = 10)]
    enumerate_limit: usize,

    /// Multiplier applied to straight-line estimates; above 1.0 the
    /// estimate overshoots and the settled search may miss the optimum
    #[arg(long, default_value_t = 1.0)]
    heuristic_scale: f64,
}

fn main() {
    let args = Args::parse();

    println!("flight-route-bench");
    println!("==================");
    println!();

    let generators: Vec<(&str, fn(usize) -> Vec<(f64, f64)>)> = match args.mode {
        Mode::Scatter => vec![("Uniform scatter", gen_scatter)],
        Mode::Clustered => vec![("Regional clusters", gen_clustered)],
        Mode::Corridor => vec![("Long corridor", gen_corridor)],
        Mode::All => vec![
            ("Uniform scatter", gen_scatter as fn(usize) -> Vec<(f64, f64)>),
            ("Regional clusters", gen_clustered),
            ("Long corridor", gen_corridor),
        ],
    };

    for (name, generator) in generators {
        run_benchmark(name, generator(args.node_count), &args);
        if args.node_count > args.enumerate_limit {
            let small = generator(args.enumerate_limit);
            run_benchmark(&format!("{} (enumerable)", name), small, &args);
        }
    }
}

fn run_benchmark(name: &str, points: Vec<(f64, f64)>, args: &Args) {
    println!("--- {} ---", name);
    if points.len() < 2 {
        println!("Need at least two cities, skipping");
        println!();
        return;
    }

    let t = Instant::now();
    let (graph, table) = build_map(&points, args.heuristic_scale);
    println!(
        "Built in {:.2}ms: {} cities, {} routes below average distance",
        t.elapsed().as_secs_f64() * 1000.0,
        graph.node_count(),
        graph.edge_count()
    );

    let n = graph.node_count() as u64;
    let mut rng = FastRng::new(2019);
    let queries: Vec<(NodeId, NodeId)> = (0..args.queries)
        .map(|_| (rng.next(n) as NodeId, rng.next(n) as NodeId))
        .collect();

    let mut settled_time = Duration::ZERO;
    let mut strict_time = Duration::ZERO;
    let mut settled_expansions = 0usize;
    let mut strict_expansions = 0usize;
    let mut found = 0usize;
    let mut divergent = 0usize;

    for &(start, goal) in &queries {
        let t = Instant::now();
        let settled = find_best_path(&graph, start, goal, &table);
        settled_time += t.elapsed();

        let t = Instant::now();
        let strict = find_best_path_strict(&graph, start, goal, &table);
        strict_time += t.elapsed();

        match (settled, strict) {
            (Ok(Some(s)), Ok(Some(x))) => {
                found += 1;
                settled_expansions += s.expansions;
                strict_expansions += x.expansions;
                if s.cost > x.cost + 1e-9 {
                    divergent += 1;
                }
            }
            (Ok(_), Ok(_)) => {}
            (Err(e), _) | (_, Err(e)) => {
                eprintln!("search {} -> {} failed: {}", start, goal, e);
                return;
            }
        }
    }

    println!();
    println!("{:>8} {:>10} {:>12} {:>12}", "mode", "found", "expansions", "time");
    println!("{:->8} {:->10} {:->12} {:->12}", "", "", "", "");
    println!(
        "{:>8} {:>10} {:>12} {:>10.2}ms",
        "settled",
        found,
        settled_expansions,
        settled_time.as_secs_f64() * 1000.0
    );
    println!(
        "{:>8} {:>10} {:>12} {:>10.2}ms",
        "strict",
        found,
        strict_expansions,
        strict_time.as_secs_f64() * 1000.0
    );
    println!("Settled search missed the optimum on {} of {} routes", divergent, found);

    if graph.node_count() <= args.enumerate_limit {
        let (start, goal) = (0, (graph.node_count() - 1) as NodeId);
        let t = Instant::now();
        let paths = enumerate_paths(&graph, start, goal);
        let elapsed = t.elapsed();
        match cheapest(&paths) {
            Some((_, cost)) => println!(
                "Enumerated {} simple paths {} -> {} in {:.2}ms, cheapest {:.1}",
                paths.len(),
                start,
                goal,
                elapsed.as_secs_f64() * 1000.0,
                cost
            ),
            None => println!(
                "No simple path {} -> {} ({:.2}ms)",
                start,
                goal,
                elapsed.as_secs_f64() * 1000.0
            ),
        }
    }
    println!();
}

/// Complete straight-line distance table plus every below-average pair as
/// a route, mirroring how the planner filters short hops.
fn build_map(points: &[(f64, f64)], heuristic_scale: f64) -> (Graph, DistanceTable) {
    let mut graph = Graph::with_capacity(points.len());
    for i in 0..points.len() {
        graph.intern_node(&format!("city-{}", i));
    }

    let mut measured = Vec::with_capacity(points.len() * points.len());
    for (i, &(x1, y1)) in points.iter().enumerate() {
        for (j, &(x2, y2)) in points.iter().enumerate() {
            if i != j {
                let d = ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt().max(1e-6);
                measured.push((i as NodeId, j as NodeId, d));
            }
        }
    }

    let mean = measured.iter().map(|m| m.2).sum::<f64>() / measured.len().max(1) as f64;
    let mut table = DistanceTable::with_capacity(measured.len());
    for &(from, to, d) in &measured {
        if table.insert(from, to, d * heuristic_scale).is_err() {
            continue;
        }
        if d < mean && graph.add_edge(from, to, d).is_err() {
            continue;
        }
    }
    (graph, table)
}

// ---------------------------------------------------------------------------
// Generators: deterministic city layouts on a 10000 x 10000 map
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

const MAP_SIZE: f64 = 10_000.0;

fn gen_scatter(node_count: usize) -> Vec<(f64, f64)> {
    let mut rng = FastRng::new(42);
    (0..node_count)
        .map(|_| (rng.next_f64() * MAP_SIZE, rng.next_f64() * MAP_SIZE))
        .collect()
}

/// Five regional hubs; each city lands within a small radius of one of them.
/// Below-average filtering keeps mostly intra-region hops.
fn gen_clustered(node_count: usize) -> Vec<(f64, f64)> {
    let mut rng = FastRng::new(12345);
    let hubs: Vec<(f64, f64)> = (0..5)
        .map(|_| (rng.next_f64() * MAP_SIZE, rng.next_f64() * MAP_SIZE))
        .collect();
    (0..node_count)
        .map(|_| {
            let (hx, hy) = hubs[rng.next(hubs.len() as u64) as usize];
            let angle = rng.next_f64() * std::f64::consts::TAU;
            let radius = rng.next_f64() * MAP_SIZE * 0.05;
            (hx + radius * angle.cos(), hy + radius * angle.sin())
        })
        .collect()
}

/// Cities along the map's diagonal with small sideways jitter: long,
/// chain-like best routes.
fn gen_corridor(node_count: usize) -> Vec<(f64, f64)> {
    let mut rng = FastRng::new(67890);
    (0..node_count)
        .map(|i| {
            let along = MAP_SIZE * i as f64 / node_count.max(1) as f64;
            let jitter = (rng.next_f64() - 0.5) * MAP_SIZE * 0.02;
            (along + jitter, along - jitter)
        })
        .collect()
}
