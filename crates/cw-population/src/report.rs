//! Per-file load summary and soft failures.

use std::fmt;

use cw_core::RoadId;
use thiserror::Error;

/// Which of a record's road ids failed to resolve.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FailureRole {
    Start,
    Goal,
}

impl fmt::Display for FailureRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailureRole::Start => "start",
            FailureRole::Goal => "goal",
        })
    }
}

/// A recoverable problem: the affected units are dropped, loading goes on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SoftFailure {
    /// The record's start road, or the goal drawn for it, is not in the
    /// network.  The whole record is skipped.
    #[error("line {line}: {role} {road} not in network, skipping {units} agent(s)")]
    UnresolvedEdgeId { line: u64, road: RoadId, role: FailureRole, units: usize },

    /// No path joins start and goal.  Every agent of the record is discarded.
    #[error("line {line}: no path from {start} to {goal}, discarding {units} agent(s)")]
    PathInitializationFailure { line: u64, start: RoadId, goal: RoadId, units: usize },
}

impl SoftFailure {
    /// Agents this failure cost.
    pub fn units(&self) -> usize {
        match *self {
            SoftFailure::UnresolvedEdgeId { units, .. }
            | SoftFailure::PathInitializationFailure { units, .. } => units,
        }
    }
}

/// Outcome of loading one population file.
///
/// `agents_placed == units_requested - units_lost()` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Data records read (header and blank lines excluded).
    pub records: usize,
    /// Sum of the count field over all records.
    pub units_requested: usize,
    pub agents_placed: usize,
    pub failures: Vec<SoftFailure>,
}

impl LoadReport {
    pub fn units_lost(&self) -> usize {
        self.failures.iter().map(SoftFailure::units).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
