//! Per-edge occupant lists.
//!
//! Each edge maps to the agents currently on it, kept sorted by
//! [`AgentRef`].  A reverse index `AgentRef → EdgeId` makes "where is this
//! agent" O(1) and enforces that an agent is on at most one edge.
//!
//! Edges with no occupants have no map entry; [`EdgeOccupancy::occupants`]
//! returns an empty slice for them.

use cw_agent::AgentRef;
use cw_core::EdgeId;

use crate::{OccupancyError, OccupancyResult};

#[cfg(feature = "fx-hash")]
type Map<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
type Map<K, V> = std::collections::HashMap<K, V>;

#[derive(Debug, Default, Clone)]
pub struct EdgeOccupancy {
    by_edge: Map<EdgeId, Vec<AgentRef>>,
    by_agent: Map<AgentRef, EdgeId>,
}

impl EdgeOccupancy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `agent` on `edge`.
    ///
    /// # Errors
    ///
    /// [`OccupancyError::AlreadyPlaced`] if the agent is on any edge,
    /// including `edge` itself.
    pub fn enter(&mut self, edge: EdgeId, agent: AgentRef) -> OccupancyResult<()> {
        if let Some(&current) = self.by_agent.get(&agent) {
            return Err(OccupancyError::AlreadyPlaced { agent, edge: current });
        }
        let list = self.by_edge.entry(edge).or_default();
        if let Err(pos) = list.binary_search(&agent) {
            list.insert(pos, agent);
        }
        self.by_agent.insert(agent, edge);
        Ok(())
    }

    /// Remove `agent` from `edge`.
    ///
    /// # Errors
    ///
    /// [`OccupancyError::NotOnEdge`] if the agent is not on `edge`.
    pub fn leave(&mut self, edge: EdgeId, agent: AgentRef) -> OccupancyResult<()> {
        if self.by_agent.get(&agent) != Some(&edge) {
            return Err(OccupancyError::NotOnEdge { agent, edge });
        }
        self.by_agent.remove(&agent);
        if let Some(list) = self.by_edge.get_mut(&edge) {
            if let Ok(pos) = list.binary_search(&agent) {
                list.remove(pos);
            }
            if list.is_empty() {
                self.by_edge.remove(&edge);
            }
        }
        Ok(())
    }

    /// Move `agent` from wherever it is to `to`.  No-op if already there.
    pub fn transfer(&mut self, agent: AgentRef, to: EdgeId) -> OccupancyResult<()> {
        let from = self.edge_of(agent).ok_or(OccupancyError::NotPlaced(agent))?;
        if from == to {
            return Ok(());
        }
        self.leave(from, agent)?;
        self.enter(to, agent)
    }

    /// Agents on `edge`, sorted by [`AgentRef`].
    #[inline]
    pub fn occupants(&self, edge: EdgeId) -> &[AgentRef] {
        self.by_edge.get(&edge).map(Vec::as_slice).unwrap_or(&[])
    }

    #[inline]
    pub fn count(&self, edge: EdgeId) -> usize {
        self.occupants(edge).len()
    }

    /// Occupants of `edge` other than `agent`.
    #[inline]
    pub fn others_on(&self, edge: EdgeId, agent: AgentRef) -> usize {
        let n = self.count(edge);
        if self.by_agent.get(&agent) == Some(&edge) { n - 1 } else { n }
    }

    #[inline]
    pub fn edge_of(&self, agent: AgentRef) -> Option<EdgeId> {
        self.by_agent.get(&agent).copied()
    }

    /// Total number of placed agents.
    pub fn len(&self) -> usize {
        self.by_agent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_agent.is_empty()
    }

    /// Number of edges with at least one occupant.
    pub fn occupied_edges(&self) -> usize {
        self.by_edge.len()
    }
}
