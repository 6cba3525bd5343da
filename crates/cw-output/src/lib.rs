//! `cw-output` — observers that index and record the running simulation.
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`index`]    | `PositionIndex`, an R-tree of agent positions, refreshed every tick |
//! | [`csv`]      | `CsvWriter`: `agent_snapshots.csv`, `tick_summaries.csv`, `flips.csv` |
//! | [`observer`] | `SnapshotObserver<W>` drives any `OutputWriter` from the tick loop |
//! | [`row`]      | Plain row types                                            |
//! | [`error`]    | `OutputError`, `OutputResult<T>`                           |
//!
//! Both observers implement `cw_sim::SimObserver`; pair them with a tuple
//! to use both in one run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cw_output::{CsvWriter, PositionIndex, SnapshotObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = (PositionIndex::new(), SnapshotObserver::new(writer));
//! sim.run(&mut obs).unwrap();
//! if let Some(e) = obs.1.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod index;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use index::PositionIndex;
pub use observer::SnapshotObserver;
pub use row::{AgentSnapshotRow, FlipRow, TickSummaryRow};
pub use writer::OutputWriter;
