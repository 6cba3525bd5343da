//! `cw-network` — planar road graph, segment loading, and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`graph`]   | `RoadGraph`, `Edge`, `Traversal`, `RoadGraphBuilder`        |
//! | [`router`]  | `Router` trait, `Route`, `DijkstraRouter`                  |
//! | [`loader`]  | `load_network_csv`, `load_network_reader` (WKT segments)    |
//! | [`error`]   | `GraphBuildError`, `RouteError`                             |
//!
//! # Graph model
//!
//! Every input road segment becomes exactly one [`Edge`], directed from its
//! first to its last vertex.  Segment endpoints that coincide (within the
//! builder's snap tolerance) share a node.  For movement an edge may be
//! walked either way; a walk along an edge is a [`Traversal`].

pub mod error;
pub mod graph;
pub mod loader;
pub mod router;


pub use error::{GraphBuildError, GraphResult, RouteError};
pub use graph::{Edge, RoadGraph, RoadGraphBuilder, Traversal, DEFAULT_SNAP_TOLERANCE};
pub use loader::{load_network_csv, load_network_reader, parse_linestring};
pub use router::{DijkstraRouter, Route, Router};
