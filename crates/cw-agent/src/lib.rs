//! `cw-agent` — commuter agents and the populations that own them.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`agent`]       | `Agent`, `AgentRef`, `Position`                           |
//! | [`population`]  | `Population`, `Direction`                                 |
//! | [`kind`]        | `KindSpec`, `MovementProfile` (deserializable config)     |
//! | [`error`]       | `AgentError`, `AgentResult<T>`                            |
//!
//! # One population type for every kind
//!
//! Agent kinds differ only in data: a display name, a goal set, and a
//! movement profile.  A single [`Population`] type carries that data in its
//! [`KindSpec`] and is tagged with a [`KindId`](cw_core::KindId), so adding a
//! kind is a configuration change rather than a new type.

pub mod agent;
pub mod error;
pub mod kind;
pub mod population;

#[cfg(test)]
mod tests;

pub use agent::{Agent, AgentRef, Position};
pub use error::{AgentError, AgentResult};
pub use kind::{KindSpec, MovementProfile};
pub use population::{Direction, Population};
