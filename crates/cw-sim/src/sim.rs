//! The `Sim` struct and its tick loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cw_agent::{Agent, Population};
use cw_core::Tick;
use cw_mobility::{Advance, EdgeOccupancy, Walker};
use cw_network::RoadGraph;

use crate::{BarrierOutcome, DirectionBarrier, SimConfig, SimObserver, SimResult, SimView};

// ── StopHandle ────────────────────────────────────────────────────────────────

/// Cloneable flag that ends [`Sim::run`] at the next tick boundary.
///
/// Safe to raise from another thread or a signal handler.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.  Owns every piece of run state.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<W: Walker> {
    pub config: SimConfig,

    /// Read-only after construction.
    pub graph: RoadGraph,

    /// Which agents are on which edge.  Mirrors `Agent::current_edge` for
    /// every agent after each apply phase.
    pub occupancy: EdgeOccupancy,

    /// One per kind, indexed by `KindId`.
    pub populations: Vec<Population>,

    pub barrier: DirectionBarrier,

    pub walker: W,

    /// The next tick to be processed.
    pub current_tick: Tick,

    stop: StopHandle,
}

impl<W: Walker> Sim<W> {
    pub(crate) fn new(
        config:      SimConfig,
        graph:       RoadGraph,
        occupancy:   EdgeOccupancy,
        populations: Vec<Population>,
        walker:      W,
    ) -> Self {
        Self {
            barrier: DirectionBarrier::new(config.barrier_interval_ticks),
            config,
            graph,
            occupancy,
            populations,
            walker,
            current_tick: Tick::ZERO,
            stop: StopHandle::new(),
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// A handle that stops [`run`](Self::run) between ticks.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn agent_count(&self) -> usize {
        self.populations.iter().map(Population::len).sum()
    }

    pub fn view(&self) -> SimView<'_> {
        SimView {
            graph: &self.graph,
            populations: &self.populations,
            occupancy: &self.occupancy,
            cycles: self.barrier.cycles(),
        }
    }

    /// Run until the stop handle is raised or `config.max_ticks` is reached.
    ///
    /// The stop flag is checked only between ticks, so every tick either
    /// runs completely or not at all.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        loop {
            if self.stop.is_stopped() {
                log::info!("stop requested, halting before {}", self.current_tick);
                break;
            }
            if self.config.max_ticks.is_some_and(|max| self.current_tick.0 >= max) {
                break;
            }
            self.step(observer)?;
        }
        observer.on_sim_end(self.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position, ignoring the stop
    /// handle and `max_ticks`.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Process one tick.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.current_tick;
        observer.on_tick_start(now);

        let moves = self.plan_moves();
        self.apply_moves(moves)?;

        if self.barrier.is_due(now) {
            match self.barrier.evaluate(&mut self.populations) {
                BarrierOutcome::Flipped { cycle } => {
                    log::info!("{now}: all agents arrived, direction flip #{cycle}");
                    observer.on_flip(now, cycle);
                }
                BarrierOutcome::Held => {
                    log::debug!(
                        "{now}: barrier held, {}/{} agents arrived",
                        self.view().arrived_count(),
                        self.agent_count()
                    );
                }
            }
        }

        let view = self.view();
        observer.on_tick_end(now, &view);
        let every = self.config.snapshot_interval_ticks;
        if every > 0 && now.0 % every == 0 {
            observer.on_snapshot(now, &view);
        }

        self.current_tick = now.next();
        Ok(())
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    /// Compute every agent's move against the pre-tick state.
    ///
    /// With the `parallel` Cargo feature each population is planned on
    /// Rayon's thread pool.
    fn plan_moves(&self) -> Vec<Vec<Advance>> {
        let graph = &self.graph;
        let occupancy = &self.occupancy;
        let walker = &self.walker;

        let plan_one = |agent: &Agent| {
            let congestion = occupancy.others_on(agent.current_edge(), agent.agent_ref());
            walker.advance(graph, agent, congestion)
        };

        self.populations
            .iter()
            .map(|population| {
                #[cfg(not(feature = "parallel"))]
                {
                    population.agents.iter().map(plan_one).collect()
                }

                #[cfg(feature = "parallel")]
                {
                    use rayon::prelude::*;
                    population.agents.par_iter().map(plan_one).collect()
                }
            })
            .collect()
    }

    /// Write planned moves back and keep occupancy in step.
    fn apply_moves(&mut self, moves: Vec<Vec<Advance>>) -> SimResult<()> {
        for (population, advances) in self.populations.iter_mut().zip(moves) {
            for (agent, advance) in population.agents.iter_mut().zip(advances) {
                let before = agent.current_edge();
                agent.position = advance.position;
                agent.reached_destination = advance.reached;
                if advance.edge != before {
                    self.occupancy.transfer(agent.agent_ref(), advance.edge)?;
                }
            }
        }
        Ok(())
    }
}
