//! `cw-sim` — tick scheduler and population-wide direction barrier.
//!
//! # Tick loop
//!
//! ```text
//! for each tick until stopped:
//!   ① on_tick_start
//!   ② Plan:    every agent computes its move against the pre-tick
//!                occupancy (parallel with the `parallel` feature).
//!   ③ Apply:   positions and arrival flags are written back and agents
//!                change edge lists, sequentially.
//!   ④ Barrier: on due ticks, if every agent of every population has
//!                arrived, all populations reverse direction together.
//!   ⑤ on_tick_end  (spatial-index refresh hook)
//!   ⑥ on_snapshot  every `snapshot_interval_ticks`
//! ```
//!
//! Because ② reads only pre-tick state and ③ keeps occupant lists sorted,
//! the outcome of a tick does not depend on population or agent order.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the plan phase on Rayon's thread pool.            |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cw_mobility::EdgeWalker;
//! use cw_network::DijkstraRouter;
//! use cw_population::RecordColumns;
//! use cw_sim::{NoopObserver, SimBuilder, SimConfig};
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), graph, EdgeWalker::new(DijkstraRouter))
//!     .load_population_csv(main_spec, &RecordColumns::default(), "main.csv".as_ref())?
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod barrier;
pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod sim;


pub use barrier::{BarrierOutcome, BarrierState, DirectionBarrier};
pub use builder::{PopulationLoad, SimBuilder};
pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, SimView};
pub use sim::{Sim, StopHandle};
