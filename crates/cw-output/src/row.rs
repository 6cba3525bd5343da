//! Plain data row types written by output backends.

/// One agent's place on the network at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub tick:     u64,
    pub kind:     u16,
    pub agent_id: u32,
    /// Stable id of the road the agent is on.
    pub road_id:  i64,
    /// Metres covered on that road in the agent's walking direction.
    pub offset_m: f64,
    pub reached:  bool,
    pub x:        f64,
    pub y:        f64,
}

/// Progress counters for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:    u64,
    pub agents:  u64,
    pub arrived: u64,
    /// Completed direction flips at the end of the tick.
    pub cycles:  u64,
}

/// A direction flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipRow {
    pub tick:  u64,
    pub cycle: u64,
}
