//! `cw-core` — foundational types for the `commute-wave` simulator.
//!
//! This crate is a dependency of every other `cw-*` crate.  It has no
//! `cw-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `NodeId`, `EdgeId`, `KindId`, `RoadId`     |
//! | [`geo`]         | `Point` (planar, metres), Euclidean distance          |
//! | [`time`]        | `Tick`                                                |
//! | [`rng`]         | `SimRng` (seeded, deterministic)                      |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::Point;
pub use ids::{AgentId, EdgeId, KindId, NodeId, RoadId};
pub use rng::SimRng;
pub use time::Tick;
