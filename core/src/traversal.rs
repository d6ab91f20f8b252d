use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, HashSet};

use crate::error::PathError;
use crate::graph::{Graph, NodeId, Path};
use crate::heuristic::DistanceTable;

/// Every enumerated path mapped to its total edge cost.
///
/// Ordered by node sequence so iteration is deterministic regardless of
/// the order the enumerator discovered the paths in.
pub type PathCosts = BTreeMap<Path, f64>;

/// Pruning policy for best-path search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Each node is expanded at most once: the first frontier entry ending at
    /// a node settles it and later entries ending there are dropped. The loop
    /// stops once the cheapest frontier priority reaches the best completed
    /// score. Fast, but an inconsistent heuristic can make it miss the optimum.
    #[default]
    Settled,
    /// No settled-node pruning. Entries whose real cost already reaches the
    /// best completed cost are dropped, and the loop drains the frontier.
    /// Always returns a minimum-cost path.
    Strict,
}

/// Outcome of a successful best-path search.
#[derive(Debug, Clone, PartialEq)]
pub struct BestPath {
    pub path: Path,
    /// Real accumulated edge cost of `path` (heuristic excluded).
    pub cost: f64,
    /// Frontier entries that were expanded (goal entries excluded).
    pub expansions: usize,
}

/// Partial path awaiting expansion.
///
/// `priority` is the running cost-so-far plus heuristic-to-goal, kept up to
/// date by subtracting the previous estimate and adding the next one.
/// `seq` is the push order; equal priorities pop first-pushed first.
#[derive(Debug, Clone)]
struct FrontierEntry {
    priority: f64,
    seq: u64,
    cost: f64,
    path: Path,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys: BinaryHeap is a max-heap.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-priority frontier with first-found tie-breaking.
struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_seq: u64,
}

impl Frontier {
    fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    fn push(&mut self, path: Path, priority: f64, cost: f64) {
        self.heap.push(FrontierEntry {
            priority,
            seq: self.next_seq,
            cost,
            path,
        });
        self.next_seq += 1;
    }

    /// Lowest priority on the frontier; +inf when empty.
    fn min_priority(&self) -> f64 {
        self.heap.peek().map(|e| e.priority).unwrap_or(f64::INFINITY)
    }

    fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }
}

/// Best path from `start` to `goal` with settled-node pruning.
///
/// The frontier starts with `[start]` primed at `distances(start, goal)`.
/// Returns `Ok(None)` when the goal is unreachable, and an error when the
/// distance table lacks an estimate the search needs.
pub fn find_best_path(
    graph: &Graph,
    start: NodeId,
    goal: NodeId,
    distances: &DistanceTable,
) -> Result<Option<BestPath>, PathError> {
    best_first(graph, start, goal, distances, SearchMode::Settled)
}

/// Best path from `start` to `goal` without settled-node pruning.
///
/// Same frontier ordering as [`find_best_path`], but guaranteed optimal.
pub fn find_best_path_strict(
    graph: &Graph,
    start: NodeId,
    goal: NodeId,
    distances: &DistanceTable,
) -> Result<Option<BestPath>, PathError> {
    best_first(graph, start, goal, distances, SearchMode::Strict)
}

/// Best-first search over simple paths in the given mode.
pub fn best_first(
    graph: &Graph,
    start: NodeId,
    goal: NodeId,
    distances: &DistanceTable,
    mode: SearchMode,
) -> Result<Option<BestPath>, PathError> {
    for node in [start, goal] {
        if !graph.contains(node) {
            return Err(PathError::UnknownNode(node));
        }
    }

    let mut frontier = Frontier::new();
    frontier.push(Path::start(start), distances.estimate(start, goal)?, 0.0);

    let mut settled: HashSet<NodeId> = HashSet::new();
    let mut best: Option<FrontierEntry> = None;
    let mut best_score = f64::INFINITY;
    let mut expansions = 0;

    loop {
        if mode == SearchMode::Settled && frontier.min_priority() >= best_score {
            break;
        }
        let Some(entry) = frontier.pop() else {
            break;
        };
        let last = entry.path.last();

        match mode {
            SearchMode::Settled => {
                if !settled.insert(last) {
                    tracing::trace!(node = last, "dropping entry ending at settled node");
                    continue;
                }
            }
            SearchMode::Strict => {
                if entry.cost >= best_score {
                    continue;
                }
            }
        }

        if last == goal {
            let score = match mode {
                SearchMode::Settled => entry.priority,
                SearchMode::Strict => entry.cost,
            };
            if score < best_score {
                tracing::debug!(score, hops = entry.path.hops(), "new best path");
                best_score = score;
                best = Some(entry);
            }
            continue;
        }

        expansions += 1;
        let last_estimate = distances.estimate(last, goal)?;
        for edge in graph.neighbors_out(last) {
            if entry.path.contains(edge.target) {
                continue;
            }
            let mut priority = entry.priority - last_estimate + edge.weight;
            if edge.target != goal {
                priority += distances.estimate(edge.target, goal)?;
            }
            frontier.push(
                entry.path.extended(edge.target),
                priority,
                entry.cost + edge.weight,
            );
        }
    }

    tracing::debug!(?mode, expansions, found = best.is_some(), "best-first search finished");

    Ok(best.map(|entry| BestPath {
        path: entry.path,
        cost: entry.cost,
        expansions,
    }))
}

/// All simple paths from `start` to `goal` with their total costs.
///
/// Depth-first over an explicit stack of partial paths. Exhaustive and
/// exponential in the worst case; meant for small, pre-filtered graphs.
/// A path must traverse at least one edge, so `start == goal` yields
/// nothing, as does a start node that is unknown or has no outgoing edges.
pub fn enumerate_paths(graph: &Graph, start: NodeId, goal: NodeId) -> PathCosts {
    let mut found = PathCosts::new();
    if start == goal || !graph.contains(start) {
        return found;
    }

    let mut stack: Vec<(Path, f64)> = vec![(Path::start(start), 0.0)];
    while let Some((path, cost)) = stack.pop() {
        for edge in graph.neighbors_out(path.last()) {
            if path.contains(edge.target) {
                continue;
            }
            let next = path.extended(edge.target);
            let next_cost = cost + edge.weight;
            if edge.target == goal {
                found.insert(next, next_cost);
            } else {
                stack.push((next, next_cost));
            }
        }
    }

    tracing::debug!(start, goal, paths = found.len(), "enumerated simple paths");
    found
}

/// Cheapest entry of an enumeration. Ties resolve to the first path in order.
pub fn cheapest(paths: &PathCosts) -> Option<(&Path, f64)> {
    paths
        .iter()
        .map(|(p, &c)| (p, c))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeRecord;

    const EPS: f64 = 1e-9;

    fn graph_of(edges: &[(&str, &str, f64)]) -> Graph {
        let mut g = Graph::new();
        g.load_edges(edges.iter().map(|&(a, b, w)| EdgeRecord::new(a, b, w)))
            .unwrap();
        g
    }

    fn table_of(g: &Graph, entries: &[(&str, &str, f64)]) -> DistanceTable {
        let mut t = DistanceTable::new();
        for &(a, b, d) in entries {
            t.insert(g.resolve(a).unwrap(), g.resolve(b).unwrap(), d).unwrap();
        }
        t
    }

    /// Zero estimates for every ordered pair, then the given overrides.
    fn zero_table_with(g: &Graph, overrides: &[(&str, &str, f64)]) -> DistanceTable {
        let mut t = DistanceTable::new();
        for (a, _) in g.nodes_iter() {
            for (b, _) in g.nodes_iter() {
                if a != b {
                    t.insert(a, b, 0.0).unwrap();
                }
            }
        }
        for &(a, b, d) in overrides {
            t.insert(g.resolve(a).unwrap(), g.resolve(b).unwrap(), d).unwrap();
        }
        t
    }

    fn ids(g: &Graph, labels: &[&str]) -> Path {
        Path::try_from(labels.iter().map(|l| g.resolve(l).unwrap()).collect::<Vec<_>>()).unwrap()
    }

    fn triangle() -> (Graph, DistanceTable) {
        let g = graph_of(&[("A", "B", 1.0), ("B", "C", 1.0), ("A", "C", 5.0)]);
        let t = zero_table_with(&g, &[("A", "B", 1.0), ("B", "C", 1.0), ("A", "C", 5.0)]);
        (g, t)
    }

    /// S->A->B->G costs 12, S->B->G costs 13. The estimate at A (2.5)
    /// overshoots A->B plus the estimate at B (0), so B settles via the
    /// direct edge before the cheaper route through A arrives.
    fn inconsistent_heuristic() -> (Graph, DistanceTable) {
        let g = graph_of(&[
            ("S", "A", 1.0),
            ("A", "B", 1.0),
            ("S", "B", 3.0),
            ("B", "G", 10.0),
        ]);
        let t = zero_table_with(&g, &[("A", "G", 2.5)]);
        (g, t)
    }

    /// Straight port of the unbounded linear-scan frontier, used to check
    /// the heap version selects identical paths.
    fn linear_scan_reference(
        g: &Graph,
        start: NodeId,
        goal: NodeId,
        t: &DistanceTable,
    ) -> Option<Path> {
        let mut settled: Vec<NodeId> = Vec::new();
        let mut queue = vec![Path::start(start)];
        let mut queue_cost = vec![t.estimate(start, goal).unwrap()];
        let mut best = None;
        let mut best_score = f64::INFINITY;

        loop {
            let min = queue_cost.iter().copied().fold(f64::INFINITY, f64::min);
            if !(min < best_score) {
                break;
            }
            let i = queue_cost.iter().position(|&c| c == min).unwrap();
            let path = queue.remove(i);
            let cost = queue_cost.remove(i);
            if settled.contains(&path.last()) {
                continue;
            }
            settled.push(path.last());
            if path.last() == goal {
                if cost < best_score {
                    best_score = cost;
                    best = Some(path);
                }
                continue;
            }
            for edge in g.neighbors_out(path.last()) {
                if path.contains(edge.target) {
                    continue;
                }
                let mut c = cost - t.estimate(path.last(), goal).unwrap() + edge.weight;
                if edge.target != goal {
                    c += t.estimate(edge.target, goal).unwrap();
                }
                queue.push(path.extended(edge.target));
                queue_cost.push(c);
            }
        }
        best
    }

    // --- Best-path search ---

    #[test]
    fn test_best_path_triangle() {
        let (g, t) = triangle();
        let a = g.resolve("A").unwrap();
        let c = g.resolve("C").unwrap();
        let best = find_best_path(&g, a, c, &t).unwrap().unwrap();
        assert_eq!(best.path, ids(&g, &["A", "B", "C"]));
        assert!((best.cost - 2.0).abs() < EPS);
    }

    #[test]
    fn test_best_path_start_is_goal() {
        let (g, t) = triangle();
        let b = g.resolve("B").unwrap();
        let best = find_best_path(&g, b, b, &t).unwrap().unwrap();
        assert_eq!(best.path, Path::start(b));
        assert_eq!(best.cost, 0.0);
        assert_eq!(best.expansions, 0);
    }

    #[test]
    fn test_best_path_start_is_goal_needs_no_table() {
        let (g, _) = triangle();
        let a = g.resolve("A").unwrap();
        let best = find_best_path(&g, a, a, &DistanceTable::new()).unwrap();
        assert_eq!(best.map(|b| b.path), Some(Path::start(a)));
    }

    #[test]
    fn test_best_path_no_outgoing_edges() {
        let (g, t) = triangle();
        let a = g.resolve("A").unwrap();
        let c = g.resolve("C").unwrap();
        assert_eq!(find_best_path(&g, c, a, &t).unwrap(), None);
        assert_eq!(find_best_path_strict(&g, c, a, &t).unwrap(), None);
    }

    #[test]
    fn test_best_path_isolated_node() {
        let (mut g, _) = triangle();
        let d = g.intern_node("D");
        let t = zero_table_with(&g, &[]);
        let a = g.resolve("A").unwrap();
        assert_eq!(find_best_path(&g, a, d, &t).unwrap(), None);
        assert!(enumerate_paths(&g, d, a).is_empty());
    }

    #[test]
    fn test_best_path_unknown_node() {
        let (g, t) = triangle();
        assert_eq!(
            find_best_path(&g, 0, 42, &t),
            Err(PathError::UnknownNode(42))
        );
    }

    #[test]
    fn test_best_path_missing_heuristic_start() {
        let (g, _) = triangle();
        let a = g.resolve("A").unwrap();
        let c = g.resolve("C").unwrap();
        let err = find_best_path(&g, a, c, &DistanceTable::new()).unwrap_err();
        assert_eq!(err, PathError::MissingHeuristic { from: a, to: c });
    }

    #[test]
    fn test_best_path_missing_heuristic_intermediate() {
        let (g, _) = triangle();
        let a = g.resolve("A").unwrap();
        let b = g.resolve("B").unwrap();
        let c = g.resolve("C").unwrap();
        let t = table_of(&g, &[("A", "C", 5.0)]);
        let err = find_best_path(&g, a, c, &t).unwrap_err();
        assert_eq!(err, PathError::MissingHeuristic { from: b, to: c });
    }

    #[test]
    fn test_heuristic_from_direct_edges() {
        // Every node on the way to C has a direct edge to C.
        let (g, _) = triangle();
        let t = DistanceTable::from_edges(&g);
        let a = g.resolve("A").unwrap();
        let c = g.resolve("C").unwrap();
        let best = find_best_path(&g, a, c, &t).unwrap().unwrap();
        assert_eq!(best.path, ids(&g, &["A", "B", "C"]));
    }

    #[test]
    fn test_best_path_asymmetric_weights() {
        let g = graph_of(&[("A", "B", 1.0), ("B", "A", 9.0), ("B", "C", 1.0), ("C", "A", 1.0)]);
        let t = zero_table_with(&g, &[]);
        let a = g.resolve("A").unwrap();
        let b = g.resolve("B").unwrap();
        let best = find_best_path(&g, b, a, &t).unwrap().unwrap();
        assert_eq!(best.path, ids(&g, &["B", "C", "A"]));
        assert!((best.cost - 2.0).abs() < EPS);
    }

    #[test]
    fn test_settled_pruning_misses_optimum() {
        let (g, t) = inconsistent_heuristic();
        let s = g.resolve("S").unwrap();
        let goal = g.resolve("G").unwrap();

        let settled = find_best_path(&g, s, goal, &t).unwrap().unwrap();
        assert_eq!(settled.path, ids(&g, &["S", "B", "G"]));
        assert!((settled.cost - 13.0).abs() < EPS);

        let strict = find_best_path_strict(&g, s, goal, &t).unwrap().unwrap();
        assert_eq!(strict.path, ids(&g, &["S", "A", "B", "G"]));
        assert!((strict.cost - 12.0).abs() < EPS);

        let (_, cheapest_cost) = cheapest(&enumerate_paths(&g, s, goal)).unwrap();
        assert!((strict.cost - cheapest_cost).abs() < EPS);
    }

    #[test]
    fn test_zero_heuristic_settled_is_optimal() {
        let (g, _) = inconsistent_heuristic();
        let t = zero_table_with(&g, &[]);
        let s = g.resolve("S").unwrap();
        let goal = g.resolve("G").unwrap();
        let best = find_best_path(&g, s, goal, &t).unwrap().unwrap();
        assert_eq!(best.path, ids(&g, &["S", "A", "B", "G"]));
    }

    #[test]
    fn test_ties_resolve_first_found() {
        // Two equal-cost routes; A->B was inserted before A->C.
        let g = graph_of(&[("A", "B", 1.0), ("A", "C", 1.0), ("B", "D", 1.0), ("C", "D", 1.0)]);
        let t = zero_table_with(&g, &[]);
        let a = g.resolve("A").unwrap();
        let d = g.resolve("D").unwrap();
        let best = find_best_path(&g, a, d, &t).unwrap().unwrap();
        assert_eq!(best.path, ids(&g, &["A", "B", "D"]));
        let strict = find_best_path_strict(&g, a, d, &t).unwrap().unwrap();
        assert_eq!(strict.path, ids(&g, &["A", "B", "D"]));
    }

    #[test]
    fn test_heap_matches_linear_scan() {
        let fixtures = vec![
            triangle(),
            inconsistent_heuristic(),
            {
                let g = graph_of(&[
                    ("A", "B", 2.0),
                    ("A", "C", 2.0),
                    ("B", "D", 2.0),
                    ("C", "D", 2.0),
                    ("B", "C", 1.0),
                    ("C", "B", 1.0),
                    ("D", "E", 1.0),
                    ("A", "E", 6.0),
                ]);
                let t = zero_table_with(&g, &[("B", "E", 1.0), ("C", "E", 2.0), ("A", "E", 3.0)]);
                (g, t)
            },
        ];

        for (g, t) in &fixtures {
            for (start, _) in g.nodes_iter() {
                for (goal, _) in g.nodes_iter() {
                    let heap = find_best_path(g, start, goal, t).unwrap().map(|b| b.path);
                    let scan = linear_scan_reference(g, start, goal, t);
                    assert_eq!(heap, scan, "divergence for {} -> {}", start, goal);
                }
            }
        }
    }

    #[test]
    fn test_best_path_avoids_cycles() {
        let g = graph_of(&[("A", "B", 1.0), ("B", "A", 1.0), ("B", "C", 1.0), ("C", "A", 1.0)]);
        let t = zero_table_with(&g, &[]);
        let a = g.resolve("A").unwrap();
        let c = g.resolve("C").unwrap();
        let best = find_best_path_strict(&g, a, c, &t).unwrap().unwrap();
        assert!(best.path.is_simple());
        assert_eq!(best.path, ids(&g, &["A", "B", "C"]));
    }

    #[test]
    fn test_best_path_cost_matches_recomputed() {
        let (g, t) = triangle();
        let a = g.resolve("A").unwrap();
        let c = g.resolve("C").unwrap();
        let best = find_best_path(&g, a, c, &t).unwrap().unwrap();
        assert_eq!(g.path_cost(&best.path), Ok(best.cost));
    }

    // --- Enumeration ---

    #[test]
    fn test_enumerate_triangle() {
        let (g, _) = triangle();
        let a = g.resolve("A").unwrap();
        let c = g.resolve("C").unwrap();
        let paths = enumerate_paths(&g, a, c);
        assert_eq!(paths.len(), 2);
        assert_eq!(paths.get(&ids(&g, &["A", "B", "C"])), Some(&2.0));
        assert_eq!(paths.get(&ids(&g, &["A", "C"])), Some(&5.0));
    }

    #[test]
    fn test_enumerate_start_is_goal() {
        let (g, _) = triangle();
        let a = g.resolve("A").unwrap();
        assert!(enumerate_paths(&g, a, a).is_empty());
    }

    #[test]
    fn test_enumerate_no_edges() {
        let mut g = Graph::new();
        let a = g.intern_node("A");
        let b = g.intern_node("B");
        assert!(enumerate_paths(&g, a, b).is_empty());
        assert!(enumerate_paths(&g, 17, b).is_empty());
    }

    #[test]
    fn test_enumerate_complete_graph() {
        // K4 directed both ways: paths 0 -> 3 are 0-3, 0-1-3, 0-2-3,
        // 0-1-2-3, 0-2-1-3.
        let mut g = Graph::new();
        for i in 0..4u32 {
            g.intern_node(&format!("N{}", i));
        }
        for i in 0..4u32 {
            for j in 0..4u32 {
                if i != j {
                    g.add_edge(i, j, 1.0 + i as f64 + j as f64).unwrap();
                }
            }
        }
        let paths = enumerate_paths(&g, 0, 3);
        assert_eq!(paths.len(), 5);
        for (path, &cost) in &paths {
            assert!(path.is_simple());
            assert_eq!(path.first(), 0);
            assert_eq!(path.last(), 3);
            assert_eq!(g.path_cost(path), Ok(cost));
        }
    }

    #[test]
    fn test_cheapest_agrees_with_search() {
        let g = graph_of(&[
            ("A", "B", 4.0),
            ("A", "C", 1.0),
            ("C", "B", 1.0),
            ("B", "D", 1.0),
            ("C", "D", 5.0),
        ]);
        let t = zero_table_with(&g, &[]);
        let a = g.resolve("A").unwrap();
        let d = g.resolve("D").unwrap();
        let paths = enumerate_paths(&g, a, d);
        let (path, cost) = cheapest(&paths).unwrap();
        let best = find_best_path(&g, a, d, &t).unwrap().unwrap();
        assert_eq!(&best.path, path);
        assert!((best.cost - cost).abs() < EPS);
    }

    #[test]
    fn test_cheapest_empty() {
        assert!(cheapest(&PathCosts::new()).is_none());
    }
}
