use cw_agent::AgentRef;
use cw_core::{EdgeId, RoadId};
use cw_network::RouteError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OccupancyError {
    #[error("agent {agent:?} is already on {edge}")]
    AlreadyPlaced { agent: AgentRef, edge: EdgeId },

    #[error("agent {agent:?} is not on {edge}")]
    NotOnEdge { agent: AgentRef, edge: EdgeId },

    #[error("agent {0:?} has not been placed on any edge")]
    NotPlaced(AgentRef),
}

pub type OccupancyResult<T> = Result<T, OccupancyError>;

/// No route joins an agent's start edge to its goal edge.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot plan a path from {start} to {goal}: {source}")]
pub struct PathInitError {
    pub start: RoadId,
    pub goal: RoadId,
    pub source: RouteError,
}
