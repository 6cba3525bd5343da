//! `cw-population` — turn tabular population records into placed agents.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`columns`]   | `RecordColumns`, `Column` (index or header name)            |
//! | [`loader`]    | `load_population_csv`, `load_population_reader`, `LoadContext` |
//! | [`report`]    | `LoadReport`, `SoftFailure`, `FailureRole`                  |
//! | [`error`]     | `PopulationLoadError`, `PopulationResult<T>`                |
//!
//! # Failure tiers
//!
//! A [`PopulationLoadError`] aborts the whole file: the source is unreadable,
//! a configured column is missing, or a count or road id does not parse.
//! Problems with a single record (a road id absent from the network) or a
//! single agent (no path to its goal) are collected as [`SoftFailure`]s in
//! the [`LoadReport`] and loading continues.

pub mod columns;
pub mod error;
pub mod loader;
pub mod report;


pub use columns::{Column, RecordColumns};
pub use error::{PopulationLoadError, PopulationResult};
pub use loader::{load_population_csv, load_population_reader, LoadContext};
pub use report::{FailureRole, LoadReport, SoftFailure};
