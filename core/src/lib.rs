//! flight-route-core: route search over a directed, distance-weighted city graph.
//!
//! A pure Rust library with no I/O. Callers supply a graph of directed edges
//! and a pairwise distance table; the crate provides a best-first search for
//! one cheapest route, exhaustive enumeration of every simple route, and a
//! probability distribution over the enumerated routes favoring short ones.
//!
//! The default search settles each node once, which is fast but can miss the
//! optimum when the distance table is not a consistent estimate. The strict
//! mode drops that pruning and is always optimal.

mod error;
mod graph;
mod heuristic;
mod probability;
mod traversal;

pub use error::{GraphError, PathError};
pub use graph::{Edge, EdgeRecord, Graph, NodeId, Path};
pub use heuristic::DistanceTable;
pub use probability::{path_probabilities, ranked, PathProbabilities};
pub use traversal::{
    best_first, cheapest, enumerate_paths, find_best_path, find_best_path_strict, BestPath,
    PathCosts, SearchMode,
};
