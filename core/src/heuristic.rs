use std::collections::HashMap;

use crate::error::{GraphError, PathError};
use crate::graph::{Graph, NodeId};

/// Precomputed remaining-distance estimates between ordered node pairs.
///
/// Independent of the edge set: a complete table covers every ordered pair
/// of distinct nodes, including pairs with no direct edge.
#[derive(Debug, Clone, Default)]
pub struct DistanceTable {
    entries: HashMap<(NodeId, NodeId), f64>,
}

impl DistanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(pairs: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(pairs),
        }
    }

    /// Heuristic from direct edge weights only. Pairs without an edge get
    /// no entry and will fail [`estimate`](Self::estimate).
    pub fn from_edges(graph: &Graph) -> Self {
        let mut table = Self::with_capacity(graph.edge_count());
        for (from, to, weight) in graph.edges_iter() {
            table.entries.insert((from, to), weight);
        }
        table
    }

    /// Insert or replace the estimate for `from -> to`.
    pub fn insert(&mut self, from: NodeId, to: NodeId, distance: f64) -> Result<(), GraphError> {
        if !distance.is_finite() || distance < 0.0 {
            return Err(GraphError::InvalidDistance { from, to, distance });
        }
        self.entries.insert((from, to), distance);
        Ok(())
    }

    pub fn get(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.entries.get(&(from, to)).copied()
    }

    /// Estimated remaining distance from `from` to `goal`.
    ///
    /// Zero when `from == goal`. A missing entry for distinct nodes is a
    /// caller error and is reported, never defaulted.
    pub fn estimate(&self, from: NodeId, goal: NodeId) -> Result<f64, PathError> {
        if from == goal {
            return Ok(0.0);
        }
        self.get(from, goal)
            .ok_or(PathError::MissingHeuristic { from, to: goal })
    }

    /// Ordered pairs of distinct graph nodes with no entry.
    pub fn missing_pairs(&self, graph: &Graph) -> Vec<(NodeId, NodeId)> {
        let ids: Vec<NodeId> = graph.nodes_iter().map(|(id, _)| id).collect();
        ids.iter()
            .flat_map(|&from| ids.iter().map(move |&to| (from, to)))
            .filter(|&(from, to)| from != to && !self.entries.contains_key(&(from, to)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mean of all stored distances, or None for an empty table.
    pub fn mean(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        Some(self.entries.values().sum::<f64>() / self.entries.len() as f64)
    }

    pub fn iter(&self) -> impl Iterator<Item = ((NodeId, NodeId), f64)> + '_ {
        self.entries.iter().map(|(&pair, &d)| (pair, d))
    }
}
