//! The `OutputWriter` trait implemented by backend writers.

use crate::{AgentSnapshotRow, FlipRow, OutputResult, TickSummaryRow};

/// Sink for simulation output rows.
///
/// Errors are stored by [`SnapshotObserver`](crate::SnapshotObserver) and
/// retrieved with its `take_error`.
pub trait OutputWriter {
    /// Write a batch of agent snapshots.
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Record a direction flip.
    fn write_flip(&mut self, row: &FlipRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
