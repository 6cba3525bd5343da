//! Network error types.

use thiserror::Error;

use cw_core::{NodeId, RoadId};

/// Failure to build the road graph.  Fatal at startup.
#[derive(Debug, Error)]
pub enum GraphBuildError {
    #[error("network source contains no segments")]
    Empty,

    #[error("network source contains no valid segments ({rejected} rejected)")]
    NoValidSegments { rejected: usize },

    #[error("{0} appears on more than one segment")]
    DuplicateRoad(RoadId),

    #[error("{road} has degenerate geometry: {reason}")]
    Degenerate { road: RoadId, reason: &'static str },

    #[error("malformed network row at line {line}: {reason}")]
    Malformed { line: u64, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type GraphResult<T> = Result<T, GraphBuildError>;

/// Failure to find a path through the graph.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),
}
