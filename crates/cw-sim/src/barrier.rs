//! The population-wide direction barrier.
//!
//! A two-state machine.  While any agent of any population is still on its
//! way the barrier is `Running` and does nothing.  Once every agent has
//! arrived it is `AllArrived`: every population reverses direction, every
//! agent swaps start and goal and restarts its route from the other end,
//! and the barrier re-arms to `Running`.
//!
//! With no agents at all the scan is vacuously `AllArrived`, so empty
//! populations still flip on every due tick.

use cw_agent::Population;
use cw_core::Tick;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum BarrierState {
    #[default]
    Running,
    AllArrived,
}

/// What one evaluation of the barrier did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BarrierOutcome {
    /// Some agent has not arrived; nothing changed.
    Held,
    /// All populations reversed.  `cycle` counts completed flips from 1.
    Flipped { cycle: u64 },
}

#[derive(Debug, Clone)]
pub struct DirectionBarrier {
    interval: u64,
    state: BarrierState,
    cycles: u64,
}

impl DirectionBarrier {
    /// A barrier evaluated every `interval_ticks` ticks (at least 1).
    pub fn new(interval_ticks: u64) -> Self {
        Self {
            interval: interval_ticks.max(1),
            state: BarrierState::Running,
            cycles: 0,
        }
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub fn state(&self) -> BarrierState {
        self.state
    }

    /// Completed flips so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Whether the barrier runs at the end of `tick`.
    #[inline]
    pub fn is_due(&self, tick: Tick) -> bool {
        (tick.0 + 1) % self.interval == 0
    }

    /// Update the state from the populations without changing them.
    ///
    /// Stops at the first agent that has not arrived.
    pub fn scan(&mut self, populations: &[Population]) -> BarrierState {
        let all_arrived = populations
            .iter()
            .all(|p| p.agents.iter().all(|a| a.reached_destination));
        self.state = if all_arrived { BarrierState::AllArrived } else { BarrierState::Running };
        self.state
    }

    /// Scan, and flip everything if all agents have arrived.
    pub fn evaluate(&mut self, populations: &mut [Population]) -> BarrierOutcome {
        match self.scan(populations) {
            BarrierState::Running => BarrierOutcome::Held,
            BarrierState::AllArrived => {
                for population in populations.iter_mut() {
                    population.flip();
                }
                self.cycles += 1;
                self.state = BarrierState::Running;
                BarrierOutcome::Flipped { cycle: self.cycles }
            }
        }
    }
}
