use thiserror::Error;

use crate::graph::NodeId;

/// Errors raised while building a graph or distance table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("edge {from} -> {to} has invalid weight {weight}; weights must be finite and positive")]
    InvalidWeight { from: NodeId, to: NodeId, weight: f64 },

    #[error("node {0} has not been interned")]
    UnknownNode(NodeId),

    #[error("self-loop on node {0} is not allowed")]
    SelfLoop(NodeId),

    #[error("distance {from} -> {to} is invalid ({distance}); distances must be finite and non-negative")]
    InvalidDistance { from: NodeId, to: NodeId, distance: f64 },
}

/// Errors raised by the search, enumeration and probability operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("node {0} is not in the graph")]
    UnknownNode(NodeId),

    #[error("distance table has no entry for {from} -> {to}")]
    MissingHeuristic { from: NodeId, to: NodeId },

    #[error("path uses {from} -> {to}, which is not an edge of the graph")]
    MissingEdge { from: NodeId, to: NodeId },

    #[error("path cost {0} is invalid; costs must be finite and non-negative")]
    InvalidCost(f64),
}
