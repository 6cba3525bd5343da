//! Route planning and per-tick movement.

use cw_agent::{Agent, Position};
use cw_core::EdgeId;
use cw_network::{DijkstraRouter, RoadGraph, Route, Router, Traversal};

use crate::PathInitError;

/// Result of one movement step, computed without mutating anything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Advance {
    pub position: Position,
    /// Edge occupied after the move.
    pub edge: EdgeId,
    /// The agent has covered its whole goal edge.
    pub reached: bool,
}

/// Movement capability used by the loader and the scheduler.
///
/// `Send + Sync` so the scheduler's planning phase can share one walker
/// across threads.
pub trait Walker: Send + Sync {
    /// Plan the route an agent placed on `start` follows to reach `goal`.
    fn plan_route(&self, graph: &RoadGraph, start: EdgeId, goal: EdgeId)
        -> Result<Route, PathInitError>;

    /// Where `agent` ends up after one tick with `congestion` other agents
    /// on its current edge.
    fn advance(&self, graph: &RoadGraph, agent: &Agent, congestion: usize) -> Advance;
}

/// `(start forward, goal forward)` pairs tried by [`Walker::plan_route`],
/// in tie-break order.
pub const END_CHOICES: [(bool, bool); 4] =
    [(true, true), (true, false), (false, true), (false, false)];

/// Walks the start edge, then the router's shortest path, then the goal edge.
///
/// Start and goal edges may each be walked in either direction; the
/// shortest of the four combinations wins, ties going to the first listed
/// in [`END_CHOICES`].  A goal sharing a node with the start edge is
/// therefore reached without walking either edge twice.  When
/// `start == goal` the route is that single edge, walked forward.
#[derive(Debug, Clone, Default)]
pub struct EdgeWalker<R: Router = DijkstraRouter> {
    pub router: R,
}

impl<R: Router> EdgeWalker<R> {
    pub fn new(router: R) -> Self {
        Self { router }
    }
}

impl<R: Router> Walker for EdgeWalker<R> {
    fn plan_route(
        &self,
        graph: &RoadGraph,
        start: EdgeId,
        goal: EdgeId,
    ) -> Result<Route, PathInitError> {
        if start == goal {
            return Ok(Route::from_steps(graph, vec![Traversal::forward(start)]));
        }
        let candidates = END_CHOICES.map(|(start_fwd, goal_fwd)| {
            let first = Traversal { edge: start, forward: start_fwd };
            let last = Traversal { edge: goal, forward: goal_fwd };
            let from = graph.traversal_end(first);
            let to = graph.traversal_start(last);
            self.router.route(graph, from, to).map(|middle| {
                let mut steps = Vec::with_capacity(middle.steps.len() + 2);
                steps.push(first);
                steps.extend(middle.steps);
                steps.push(last);
                Route::from_steps(graph, steps)
            })
        });

        // `min_by` keeps the earliest of equal lengths.
        let best = candidates
            .iter()
            .filter_map(|c| c.as_ref().ok())
            .min_by(|a, b| a.length_m.total_cmp(&b.length_m));
        if let Some(route) = best {
            return Ok(route.clone());
        }
        let [both_forward, ..] = candidates;
        both_forward.map_err(|source| PathInitError {
            start: graph.edge(start).road_id,
            goal: graph.edge(goal).road_id,
            source,
        })
    }

    fn advance(&self, graph: &RoadGraph, agent: &Agent, congestion: usize) -> Advance {
        if agent.reached_destination {
            return Advance {
                position: agent.position,
                edge: agent.current_edge(),
                reached: true,
            };
        }

        let steps = &agent.route.steps;
        let mut budget = agent.profile.effective_speed(congestion);
        let mut pos = agent.position;

        while let Some(t) = steps.get(pos.step) {
            let len = graph.edge(t.edge).length_m;
            let remaining = (len - pos.offset_m).max(0.0);
            if budget < remaining {
                pos.offset_m += budget;
                return Advance { position: pos, edge: t.edge, reached: false };
            }
            budget -= remaining;
            if pos.step + 1 == steps.len() {
                pos.offset_m = len;
                return Advance { position: pos, edge: t.edge, reached: true };
            }
            pos.step += 1;
            pos.offset_m = 0.0;
        }

        // Only reachable for an agent without a route.
        Advance { position: pos, edge: agent.current_edge(), reached: true }
    }
}
