//! `SnapshotObserver<W>` bridges `SimObserver` to an `OutputWriter`.

use cw_core::Tick;
use cw_sim::{SimObserver, SimView};

use crate::row::{AgentSnapshotRow, FlipRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes tick summaries, flips, and agent snapshots
/// to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SnapshotObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SnapshotObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SnapshotObserver<W> {
    fn on_flip(&mut self, tick: Tick, cycle: u64) {
        let result = self.writer.write_flip(&FlipRow { tick: tick.0, cycle });
        self.store_err(result);
    }

    fn on_tick_end(&mut self, tick: Tick, view: &SimView<'_>) {
        let row = TickSummaryRow {
            tick:    tick.0,
            agents:  view.agent_count() as u64,
            arrived: view.arrived_count() as u64,
            cycles:  view.cycles,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, view: &SimView<'_>) {
        let rows: Vec<AgentSnapshotRow> = view
            .agents()
            .map(|agent| {
                let p = view.position_of(agent);
                AgentSnapshotRow {
                    tick:     tick.0,
                    kind:     agent.kind.0,
                    agent_id: agent.id.0,
                    road_id:  view.graph.edge(agent.current_edge()).road_id.0,
                    offset_m: agent.position.offset_m,
                    reached:  agent.reached_destination,
                    x:        p.x,
                    y:        p.y,
                }
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
