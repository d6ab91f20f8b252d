use std::collections::HashMap;
use std::fmt;

use crate::error::{GraphError, PathError};

/// Internal node identifier, assigned densely in interning order.
pub type NodeId = u32;

/// A directed, weighted edge in the adjacency list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: NodeId,
    pub weight: f64,
}

/// A route to load by label. Both endpoints are interned on load.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

impl EdgeRecord {
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }
}

/// An ordered sequence of nodes starting at the search origin.
///
/// Paths produced by this crate are simple (no node repeats) and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path(Vec<NodeId>);

impl Path {
    /// The length-1 path holding only `start`.
    pub fn start(node: NodeId) -> Self {
        Self(vec![node])
    }

    /// Copy of this path with `node` appended.
    pub fn extended(&self, node: NodeId) -> Self {
        let mut nodes = Vec::with_capacity(self.0.len() + 1);
        nodes.extend_from_slice(&self.0);
        nodes.push(node);
        Self(nodes)
    }

    pub fn first(&self) -> NodeId {
        self.0[0]
    }

    pub fn last(&self) -> NodeId {
        self.0[self.0.len() - 1]
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.0.contains(&node)
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.0.len() - 1
    }

    /// Always false: a path holds at least its start node.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Consecutive (from, to) pairs along the path.
    pub fn legs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    /// True when no node appears twice.
    pub fn is_simple(&self) -> bool {
        self.0
            .iter()
            .enumerate()
            .all(|(i, n)| !self.0[..i].contains(n))
    }
}

impl TryFrom<Vec<NodeId>> for Path {
    type Error = Vec<NodeId>;

    /// Rejects the empty vector, handing it back.
    fn try_from(nodes: Vec<NodeId>) -> Result<Self, Self::Error> {
        if nodes.is_empty() {
            Err(nodes)
        } else {
            Ok(Self(nodes))
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", node)?;
        }
        Ok(())
    }
}

/// In-memory directed graph: interned node labels + weighted adjacency lists.
///
/// Each (from, to) pair holds at most one weight. Outgoing edges keep their
/// insertion order, which is the expansion order of every traversal.
pub struct Graph {
    outgoing: HashMap<NodeId, Vec<Edge>>,
    labels: Vec<String>,
    label_index: HashMap<String, NodeId>,
    edge_count: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            outgoing: HashMap::new(),
            labels: Vec::new(),
            label_index: HashMap::new(),
            edge_count: 0,
        }
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(node_count: usize) -> Self {
        Self {
            outgoing: HashMap::with_capacity(node_count),
            labels: Vec::with_capacity(node_count),
            label_index: HashMap::with_capacity(node_count),
            edge_count: 0,
        }
    }

    /// Intern a node label, returning its id. Existing labels keep their id.
    pub fn intern_node(&mut self, label: &str) -> NodeId {
        if let Some(&id) = self.label_index.get(label) {
            return id;
        }
        let id = self.labels.len() as NodeId;
        self.labels.push(label.to_string());
        self.label_index.insert(label.to_string(), id);
        id
    }

    /// Look up a node by label.
    pub fn resolve(&self, label: &str) -> Option<NodeId> {
        self.label_index.get(label).copied()
    }

    /// Label of a node, or None for an unknown id.
    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.labels.get(id as usize).map(|s| s.as_str())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        (id as usize) < self.labels.len()
    }

    /// Add or replace the directed edge `from -> to`.
    ///
    /// Replacing keeps the edge's position among `from`'s outgoing edges.
    /// Both endpoints must already be interned.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) -> Result<(), GraphError> {
        for node in [from, to] {
            if !self.contains(node) {
                return Err(GraphError::UnknownNode(node));
            }
        }
        if from == to {
            return Err(GraphError::SelfLoop(from));
        }
        if !weight.is_finite() || weight <= 0.0 {
            return Err(GraphError::InvalidWeight { from, to, weight });
        }

        let edges = self.outgoing.entry(from).or_default();
        match edges.iter_mut().find(|e| e.target == to) {
            Some(existing) => {
                tracing::debug!(from, to, old = existing.weight, new = weight, "replacing edge weight");
                existing.weight = weight;
            }
            None => {
                edges.push(Edge { target: to, weight });
                self.edge_count += 1;
            }
        }
        Ok(())
    }

    /// Bulk load edges by label, interning endpoints as they appear.
    pub fn load_edges<I>(&mut self, edges: I) -> Result<(), GraphError>
    where
        I: IntoIterator<Item = EdgeRecord>,
    {
        for record in edges {
            let from = self.intern_node(&record.from);
            let to = self.intern_node(&record.to);
            self.add_edge(from, to, record.weight)?;
        }
        Ok(())
    }

    /// Weight of the edge `from -> to`, if present.
    pub fn weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.neighbors_out(from)
            .iter()
            .find(|e| e.target == to)
            .map(|e| e.weight)
    }

    /// Outgoing edges of a node in insertion order.
    pub fn neighbors_out(&self, id: NodeId) -> &[Edge] {
        self.outgoing.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// All node ids with their labels, in interning order.
    pub fn nodes_iter(&self) -> impl Iterator<Item = (NodeId, &str)> {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, label)| (i as NodeId, label.as_str()))
    }

    /// All edges as (from, to, weight), grouped by source in interning order.
    pub fn edges_iter(&self) -> impl Iterator<Item = (NodeId, NodeId, f64)> + '_ {
        (0..self.labels.len() as NodeId).flat_map(move |from| {
            self.neighbors_out(from)
                .iter()
                .map(move |e| (from, e.target, e.weight))
        })
    }

    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Sum of edge weights along the path. A single-node path costs 0.
    pub fn path_cost(&self, path: &Path) -> Result<f64, PathError> {
        path.legs().try_fold(0.0, |total, (from, to)| {
            self.weight(from, to)
                .map(|w| total + w)
                .ok_or(PathError::MissingEdge { from, to })
        })
    }

    /// Labels along a path; unknown ids render as their number.
    pub fn path_labels(&self, path: &Path) -> Vec<String> {
        path.nodes()
            .iter()
            .map(|&id| {
                self.label(id)
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| id.to_string())
            })
            .collect()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
