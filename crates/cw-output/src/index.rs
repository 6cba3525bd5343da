//! Spatial index over agent positions.
//!
//! Rebuilt from scratch on every `on_tick_end` with `RTree::bulk_load`,
//! which is cheaper than moving every entry when most agents move each tick.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use cw_agent::AgentRef;
use cw_core::{Point, Tick};
use cw_sim::{SimObserver, SimView};

#[derive(Clone, Copy, Debug, PartialEq)]
struct AgentEntry {
    point: [f64; 2],
    agent: AgentRef,
}

impl RTreeObject for AgentEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for AgentEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Agent positions as of the end of the last observed tick.
#[derive(Default)]
pub struct PositionIndex {
    tree: RTree<AgentEntry>,
    refreshed_at: Option<Tick>,
}

impl PositionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the index contents with the agents in `view`.
    pub fn rebuild(&mut self, view: &SimView<'_>) {
        let entries = view
            .agents()
            .map(|a| AgentEntry {
                point: view.position_of(a).to_array(),
                agent: a.agent_ref(),
            })
            .collect();
        self.tree = RTree::bulk_load(entries);
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Tick of the last refresh, `None` before the first one.
    pub fn refreshed_at(&self) -> Option<Tick> {
        self.refreshed_at
    }

    /// Closest agent to `point`.
    pub fn nearest(&self, point: Point) -> Option<(AgentRef, Point)> {
        self.tree
            .nearest_neighbor(&point.to_array())
            .map(|e| (e.agent, Point::new(e.point[0], e.point[1])))
    }

    /// Agents within `radius` of `point`, sorted.
    pub fn within(&self, point: Point, radius: f64) -> Vec<AgentRef> {
        let mut found: Vec<AgentRef> = self
            .tree
            .locate_within_distance(point.to_array(), radius * radius)
            .map(|e| e.agent)
            .collect();
        found.sort();
        found
    }
}

impl SimObserver for PositionIndex {
    fn on_tick_end(&mut self, tick: Tick, view: &SimView<'_>) {
        self.rebuild(view);
        self.refreshed_at = Some(tick);
    }
}
