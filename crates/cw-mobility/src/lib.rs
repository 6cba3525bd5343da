//! `cw-mobility` — who is on which edge, and how agents move along routes.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                    |
//! |-----------------|-------------------------------------------------------------|
//! | [`occupancy`]   | `EdgeOccupancy`: `EdgeId → [AgentRef]` plus reverse index |
//! | [`walker`]      | `Walker` trait, `EdgeWalker<R>`, `Advance`                  |
//! | [`error`]       | `OccupancyError`, `PathInitError`                           |
//!
//! # Movement model
//!
//! Each tick every agent that has not arrived walks a distance along its
//! route that depends on its kind's speed and on how many other agents share
//! its edge.  [`Walker::advance`] only *computes* the new position; the
//! scheduler in `cw-sim` writes it back and moves the agent between edge
//! lists, so the computation can run in parallel.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                               |
//! |-----------|------------------------------------------------------|
//! | `fx-hash` | Uses `rustc-hash` maps inside `EdgeOccupancy`.       |

pub mod error;
pub mod occupancy;
pub mod walker;

#[cfg(test)]
mod tests;

pub use error::{OccupancyError, OccupancyResult, PathInitError};
pub use occupancy::EdgeOccupancy;
pub use walker::{Advance, EdgeWalker, Walker, END_CHOICES};
