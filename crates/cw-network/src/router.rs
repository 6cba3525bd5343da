//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! Movement code asks for paths through the [`Router`] trait, so a
//! different algorithm (A*, precomputed tables) can be swapped in without
//! touching the walkers.
//!
//! # Cost units
//!
//! Costs are edge lengths in integer **millimetres** (`u64`), which keeps
//! the heap ordering total and deterministic.  `Route::length_m` reports the
//! exact floating-point sum.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use cw_core::NodeId;

use crate::graph::{RoadGraph, Traversal};
use crate::RouteError;

// ── Route ─────────────────────────────────────────────────────────────────────

/// An ordered list of edge traversals and its total length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Route {
    pub steps: Vec<Traversal>,
    pub length_m: f64,
}

impl Route {
    /// Build a route from traversals, summing edge lengths from `graph`.
    pub fn from_steps(graph: &RoadGraph, steps: Vec<Traversal>) -> Self {
        let length_m = steps.iter().map(|t| graph.edge(t.edge).length_m).sum();
        Self { steps, length_m }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `true` if the route has no steps (source and target coincide).
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The same path walked from its end back to its start.
    pub fn reversed(&self) -> Route {
        Route {
            steps: self.steps.iter().rev().map(|t| t.reversed()).collect(),
            length_m: self.length_m,
        }
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable path finder over a [`RoadGraph`].
///
/// Implementations must be `Send + Sync` so walkers holding them can be
/// shared across threads with the `parallel` feature of `cw-sim`.
pub trait Router: Send + Sync {
    /// Compute a path of traversals from `from` to `to`.
    ///
    /// `from == to` yields an empty route rather than an error.
    fn route(&self, graph: &RoadGraph, from: NodeId, to: NodeId) -> Result<Route, RouteError>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Shortest path by length; every edge may be walked in either direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, graph: &RoadGraph, from: NodeId, to: NodeId) -> Result<Route, RouteError> {
        dijkstra(graph, from, to)
    }
}

#[inline]
fn cost_mm(graph: &RoadGraph, t: Traversal) -> u64 {
    (graph.edge(t.edge).length_m * 1000.0).round() as u64
}

fn dijkstra(graph: &RoadGraph, from: NodeId, to: NodeId) -> Result<Route, RouteError> {
    let n = graph.node_count();
    for node in [from, to] {
        if node.index() >= n {
            return Err(RouteError::NodeNotFound(node));
        }
    }
    if from == to {
        return Ok(Route::default());
    }

    let mut dist = vec![u64::MAX; n];
    let mut prev: Vec<Option<Traversal>> = vec![None; n];
    dist[from.index()] = 0;

    // Secondary key NodeId keeps tie-breaking deterministic.
    let mut heap: BinaryHeap<Reverse<(u64, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((0, from)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(graph, &prev, to));
        }
        if cost > dist[node.index()] {
            continue;
        }
        for &t in graph.traversals_from(node) {
            let next = graph.traversal_end(t);
            let new_cost = cost.saturating_add(cost_mm(graph, t));
            if new_cost < dist[next.index()] {
                dist[next.index()] = new_cost;
                prev[next.index()] = Some(t);
                heap.push(Reverse((new_cost, next)));
            }
        }
    }

    Err(RouteError::NoRoute { from, to })
}

fn reconstruct(graph: &RoadGraph, prev: &[Option<Traversal>], to: NodeId) -> Route {
    let mut steps = Vec::new();
    let mut cur = to;
    while let Some(t) = prev[cur.index()] {
        steps.push(t);
        cur = graph.traversal_start(t);
    }
    steps.reverse();
    Route::from_steps(graph, steps)
}
