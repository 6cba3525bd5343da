//! A single commuter.
//!
//! An agent always has a planned [`Route`] whose first step walks its start
//! edge and whose last step walks its goal edge.  Its [`Position`] is a step
//! index into that route plus the distance covered on that step, so the
//! agent's current edge is always `route.steps[position.step].edge`.

use cw_core::{AgentId, EdgeId, KindId};
use cw_network::{Route, Traversal};

use crate::MovementProfile;

/// Non-owning handle to an agent: which population, which member.
///
/// Ordered by kind first, then agent id, which gives every per-edge
/// occupant list a canonical order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentRef {
    pub kind: KindId,
    pub agent: AgentId,
}

impl AgentRef {
    #[inline]
    pub fn new(kind: KindId, agent: AgentId) -> Self {
        Self { kind, agent }
    }
}

/// Where along its route an agent is.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Position {
    /// Index into `Route::steps`.
    pub step: usize,
    /// Metres covered on the current step, in `[0, edge length]`.
    pub offset_m: f64,
}

#[derive(Debug, Clone)]
pub struct Agent {
    pub id: AgentId,
    pub kind: KindId,

    /// Opaque tract labels carried through from the population source.
    pub home_tract: String,
    pub work_tract: String,

    pub start_edge: EdgeId,
    pub goal_edge: EdgeId,

    /// Set once the agent has covered the whole of its goal edge; cleared
    /// by the direction flip.
    pub reached_destination: bool,

    pub route: Route,
    pub position: Position,
    pub profile: MovementProfile,
}

impl Agent {
    /// A freshly placed agent at the very beginning of `route`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id:         AgentId,
        kind:       KindId,
        home_tract: String,
        work_tract: String,
        start_edge: EdgeId,
        goal_edge:  EdgeId,
        route:      Route,
        profile:    MovementProfile,
    ) -> Self {
        Self {
            id,
            kind,
            home_tract,
            work_tract,
            start_edge,
            goal_edge,
            reached_destination: false,
            route,
            position: Position::default(),
            profile,
        }
    }

    #[inline]
    pub fn agent_ref(&self) -> AgentRef {
        AgentRef::new(self.kind, self.id)
    }

    /// The traversal the agent is currently walking.
    #[inline]
    pub fn current_traversal(&self) -> Option<Traversal> {
        self.route.steps.get(self.position.step).copied()
    }

    /// The edge the agent currently occupies.
    ///
    /// Falls back to `start_edge` for an agent without a route, which the
    /// loader never produces.
    #[inline]
    pub fn current_edge(&self) -> EdgeId {
        self.current_traversal().map_or(self.start_edge, |t| t.edge)
    }

    /// Reverse direction: the old goal becomes the start and vice versa.
    ///
    /// The route is walked backwards from its end, so an agent that had
    /// arrived begins the new trip on the edge it arrived on.
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.start_edge, &mut self.goal_edge);
        self.route = self.route.reversed();
        self.position = Position::default();
        self.reached_destination = false;
    }
}
