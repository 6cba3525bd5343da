//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `agent_snapshots.csv`
//! - `tick_summaries.csv`
//! - `flips.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, FlipRow, OutputResult, TickSummaryRow};

/// Writes simulation output to CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    flips:     Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the CSV files and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(["tick", "kind", "agent_id", "road_id", "offset_m", "reached", "x", "y"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "agents", "arrived", "cycles"])?;

        let mut flips = Writer::from_path(dir.join("flips.csv"))?;
        flips.write_record(["tick", "cycle"])?;

        Ok(Self {
            snapshots,
            summaries,
            flips,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.kind.to_string(),
                row.agent_id.to_string(),
                row.road_id.to_string(),
                format!("{:.3}", row.offset_m),
                (row.reached as u8).to_string(),
                format!("{:.3}", row.x),
                format!("{:.3}", row.y),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.agents.to_string(),
            row.arrived.to_string(),
            row.cycles.to_string(),
        ])?;
        Ok(())
    }

    fn write_flip(&mut self, row: &FlipRow) -> OutputResult<()> {
        self.flips.write_record(&[row.tick.to_string(), row.cycle.to_string()])?;
        // Flips are rare; flush so they survive an abrupt exit.
        self.flips.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.flips.flush()?;
        Ok(())
    }
}
