//! Run configuration.

use serde::Deserialize;

use crate::{SimError, SimResult};

/// Top-level simulation configuration.
///
/// Typically read from the `[sim]` table of a scenario file; every field
/// has a default.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Master RNG seed.  The same seed always produces identical goal draws.
    pub seed: u64,

    /// The barrier is evaluated at the end of every tick `t` with
    /// `(t + 1) % barrier_interval_ticks == 0`.  Must be at least 1.
    pub barrier_interval_ticks: u64,

    /// Stop after this many ticks.  `None` runs until the stop handle is
    /// raised.
    pub max_ticks: Option<u64>,

    /// Call `on_snapshot` every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            barrier_interval_ticks: 10,
            max_ticks: None,
            snapshot_interval_ticks: 0,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> SimResult<()> {
        if self.barrier_interval_ticks == 0 {
            return Err(SimError::Config(
                "barrier_interval_ticks must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
