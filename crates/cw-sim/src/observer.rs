//! Simulation observer trait and the read-only view handed to it.

use cw_agent::{Agent, Population};
use cw_core::{Point, Tick};
use cw_mobility::EdgeOccupancy;
use cw_network::RoadGraph;

/// Read-only snapshot of the simulation state at a tick boundary.
pub struct SimView<'a> {
    pub graph: &'a RoadGraph,
    pub populations: &'a [Population],
    pub occupancy: &'a EdgeOccupancy,
    /// Completed direction flips.
    pub cycles: u64,
}

impl SimView<'_> {
    /// All agents of all populations, population by population.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.populations.iter().flat_map(|p| p.agents.iter())
    }

    pub fn agent_count(&self) -> usize {
        self.populations.iter().map(Population::len).sum()
    }

    pub fn arrived_count(&self) -> usize {
        self.populations.iter().map(Population::arrived_count).sum()
    }

    /// Planar position of `agent` along its current edge.
    pub fn position_of(&self, agent: &Agent) -> Point {
        match agent.current_traversal() {
            Some(t) => self.graph.point_along(t, agent.position.offset_m),
            None => self.graph.node_pos(self.graph.edge(agent.start_edge).from),
        }
    }
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: flip logger
///
/// ```rust,ignore
/// struct FlipLogger;
///
/// impl SimObserver for FlipLogger {
///     fn on_flip(&mut self, tick: Tick, cycle: u64) {
///         println!("{tick}: everyone arrived, starting cycle {cycle}");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any movement.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called when the barrier reverses all populations.
    fn on_flip(&mut self, _tick: Tick, _cycle: u64) {}

    /// Called at the end of each tick, after movement and the barrier.
    ///
    /// Spatial indexes and renderers refresh from here.
    fn on_tick_end(&mut self, _tick: Tick, _view: &SimView<'_>) {}

    /// Called every `config.snapshot_interval_ticks` ticks, after
    /// `on_tick_end`.
    fn on_snapshot(&mut self, _tick: Tick, _view: &SimView<'_>) {}

    /// Called once when the run loop exits.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Fan out every callback to two observers, first `A` then `B`.
impl<A: SimObserver, B: SimObserver> SimObserver for (A, B) {
    fn on_tick_start(&mut self, tick: Tick) {
        self.0.on_tick_start(tick);
        self.1.on_tick_start(tick);
    }

    fn on_flip(&mut self, tick: Tick, cycle: u64) {
        self.0.on_flip(tick, cycle);
        self.1.on_flip(tick, cycle);
    }

    fn on_tick_end(&mut self, tick: Tick, view: &SimView<'_>) {
        self.0.on_tick_end(tick, view);
        self.1.on_tick_end(tick, view);
    }

    fn on_snapshot(&mut self, tick: Tick, view: &SimView<'_>) {
        self.0.on_snapshot(tick, view);
        self.1.on_snapshot(tick, view);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.0.on_sim_end(final_tick);
        self.1.on_sim_end(final_tick);
    }
}
