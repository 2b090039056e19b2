use std::fmt;

use thiserror::Error;

use crate::graph::NodeId;

/// Convenient result alias for the Trailblazer library.
pub type Result<T> = std::result::Result<T, Error>;

/// Which end of a search request an [`Error::InvalidEndpoint`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Endpoint::Start => "start",
            Endpoint::End => "end",
        };
        f.write_str(value)
    }
}

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a search is requested for a node the graph does not contain.
    #[error("{role} node {node} is not present in the graph")]
    InvalidEndpoint { role: Endpoint, node: NodeId },

    /// Raised when an edge references a node that was never declared.
    #[error("edge references unknown node {node}")]
    UnknownNode { node: NodeId },

    /// Raised when the same node identifier is declared twice.
    #[error("node {node} declared more than once")]
    DuplicateNode { node: NodeId },

    /// Raised when an edge connects a node to itself.
    #[error("self-loop edge on node {node} is not allowed")]
    SelfLoop { node: NodeId },

    /// Raised when an edge cost is negative or not a finite number.
    #[error("edge {from}-{to} has invalid cost {cost}; costs must be finite and non-negative")]
    InvalidEdgeCost { from: NodeId, to: NodeId, cost: f64 },

    /// Raised when the configured maximum road speed is not strictly positive.
    #[error("maximum road speed must be strictly positive, got {speed}")]
    InvalidRoadSpeed { speed: f64 },

    /// Raised when the configured maximum road speed is slower than some edge
    /// of the graph, which would let the A* heuristic overestimate.
    #[error("maximum road speed {speed} is below the fastest edge speed {fastest}")]
    RoadSpeedBelowFastestEdge { speed: f64, fastest: f64 },

    /// Raised when a requested routing option cannot be combined with the
    /// chosen algorithm.
    #[error("route option {option} is not supported")]
    UnsupportedRouteOption { option: String },

    /// Raised when configuration values fail validation.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON configuration parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
