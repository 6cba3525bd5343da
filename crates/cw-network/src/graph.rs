//! Road graph representation and builder.
//!
//! # Data layout
//!
//! Edges are stored densely, indexed by `EdgeId` in insertion order.  Node
//! adjacency uses **Compressed Sparse Row (CSR)** over half-edges: every
//! edge contributes a forward traversal leaving its `from` node and a
//! backward traversal leaving its `to` node.  The traversals leaving node
//! `n` occupy
//!
//! ```text
//! adjacency[ node_adj_start[n] .. node_adj_start[n+1] ]
//! ```
//!
//! # Node deduplication
//!
//! The builder keeps an R-tree (via `rstar`) of the nodes created so far.
//! Each new segment endpoint is snapped to an existing node if one lies
//! within `snap_tolerance`; otherwise a fresh node is created.  After
//! `build()` the same R-tree answers nearest-node queries.

use std::collections::HashMap;
use std::fmt;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use cw_core::{EdgeId, NodeId, Point, RoadId};

use crate::{GraphBuildError, GraphResult};

/// Default endpoint snapping distance, in coordinate units (metres).
pub const DEFAULT_SNAP_TOLERANCE: f64 = 1e-6;

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2],
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Edge / Traversal ──────────────────────────────────────────────────────────

/// One road segment of the network.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    /// Stable identifier from the network source.
    pub road_id: RoadId,
    /// Node at the first vertex of `geometry`.
    pub from: NodeId,
    /// Node at the last vertex of `geometry`.
    pub to: NodeId,
    /// Polyline, at least two vertices.
    pub geometry: Vec<Point>,
    /// Polyline length in metres.  Always `> 0`.
    pub length_m: f64,
}

/// A walk along one edge, either from `from` to `to` (`forward`) or back.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Traversal {
    pub edge: EdgeId,
    pub forward: bool,
}

impl Traversal {
    #[inline]
    pub fn forward(edge: EdgeId) -> Self {
        Self { edge, forward: true }
    }

    #[inline]
    pub fn backward(edge: EdgeId) -> Self {
        Self { edge, forward: false }
    }

    /// The same edge walked the other way.
    #[inline]
    pub fn reversed(self) -> Self {
        Self { edge: self.edge, forward: !self.forward }
    }
}

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Planar road graph plus a spatial index over its nodes.
///
/// Do not construct directly; use [`RoadGraphBuilder`] or
/// [`load_network_csv`](crate::load_network_csv).
pub struct RoadGraph {
    nodes: Vec<Point>,
    edges: Vec<Edge>,
    by_road: HashMap<RoadId, EdgeId>,
    /// CSR row pointer, length `node_count + 1`.
    node_adj_start: Vec<u32>,
    /// Half-edges grouped by departure node.
    adjacency: Vec<Traversal>,
    spatial_idx: RTree<NodeEntry>,
}

impl fmt::Debug for RoadGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoadGraph")
            .field("nodes", &self.nodes.len())
            .field("edges", &self.edges.len())
            .finish_non_exhaustive()
    }
}

impl RoadGraph {
    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Resolve a stable road identifier to its edge.
    pub fn edge_by_id(&self, road: RoadId) -> Option<&Edge> {
        self.edge_id(road).map(|e| &self.edges[e.index()])
    }

    /// Resolve a stable road identifier to its internal `EdgeId`.
    #[inline]
    pub fn edge_id(&self, road: RoadId) -> Option<EdgeId> {
        self.by_road.get(&road).copied()
    }

    /// # Panics
    /// Panics if `id` did not come from this graph.
    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    #[inline]
    pub fn node_pos(&self, id: NodeId) -> Point {
        self.nodes[id.index()]
    }

    /// All intersections (deduplicated endpoints) with their positions.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, Point)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, &p)| (NodeId(i as u32), p))
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter()
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// All traversals that depart from `node`, in both edge directions.
    #[inline]
    pub fn traversals_from(&self, node: NodeId) -> &[Traversal] {
        let start = self.node_adj_start[node.index()] as usize;
        let end = self.node_adj_start[node.index() + 1] as usize;
        &self.adjacency[start..end]
    }

    /// Node at which traversal `t` begins.
    #[inline]
    pub fn traversal_start(&self, t: Traversal) -> NodeId {
        let e = self.edge(t.edge);
        if t.forward { e.from } else { e.to }
    }

    /// Node at which traversal `t` ends.
    #[inline]
    pub fn traversal_end(&self, t: Traversal) -> NodeId {
        let e = self.edge(t.edge);
        if t.forward { e.to } else { e.from }
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    /// Position `offset_m` metres into traversal `t`, following the edge's
    /// polyline.  The offset is clamped to the edge length.
    pub fn point_along(&self, t: Traversal, offset_m: f64) -> Point {
        let e = self.edge(t.edge);
        let offset = offset_m.clamp(0.0, e.length_m);
        let mut remaining = if t.forward { offset } else { e.length_m - offset };

        for pair in e.geometry.windows(2) {
            let seg = pair[0].distance(pair[1]);
            if remaining <= seg {
                let frac = if seg > 0.0 { remaining / seg } else { 0.0 };
                return pair[0].lerp(pair[1], frac);
            }
            remaining -= seg;
        }
        e.geometry[e.geometry.len() - 1]
    }

    /// Nearest node to `pos`.  `None` only for a graph with no nodes.
    pub fn snap_to_node(&self, pos: Point) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&pos.to_array())
            .map(|e| e.id)
    }

    /// Bounding box of all nodes as `(min, max)`.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let first = *self.nodes.first()?;
        Some(self.nodes.iter().fold((first, first), |(lo, hi), p| {
            (
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }
}

// ── RoadGraphBuilder ──────────────────────────────────────────────────────────

/// Construct a [`RoadGraph`] segment by segment, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use cw_core::{Point, RoadId};
/// use cw_network::RoadGraphBuilder;
///
/// let mut b = RoadGraphBuilder::new();
/// b.add_segment(RoadId(1), vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]).unwrap();
/// b.add_segment(RoadId(2), vec![Point::new(100.0, 0.0), Point::new(100.0, 50.0)]).unwrap();
/// let graph = b.build().unwrap();
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.node_count(), 3); // shared endpoint at (100, 0)
/// ```
pub struct RoadGraphBuilder {
    snap_tolerance: f64,
    nodes: Vec<Point>,
    node_idx: RTree<NodeEntry>,
    edges: Vec<Edge>,
    by_road: HashMap<RoadId, EdgeId>,
    rejected: usize,
}

impl RoadGraphBuilder {
    pub fn new() -> Self {
        Self::with_tolerance(DEFAULT_SNAP_TOLERANCE)
    }

    /// Builder whose endpoints merge when closer than `snap_tolerance`.
    pub fn with_tolerance(snap_tolerance: f64) -> Self {
        Self {
            snap_tolerance: snap_tolerance.max(0.0),
            nodes: Vec::new(),
            node_idx: RTree::new(),
            edges: Vec::new(),
            by_road: HashMap::new(),
            rejected: 0,
        }
    }

    /// Add one road segment.
    ///
    /// # Errors
    ///
    /// - [`GraphBuildError::DuplicateRoad`] if `road` was already added.
    /// - [`GraphBuildError::Degenerate`] for fewer than two vertices,
    ///   non-finite coordinates, or zero length.  The segment is not added.
    pub fn add_segment(&mut self, road: RoadId, geometry: Vec<Point>) -> GraphResult<EdgeId> {
        if self.by_road.contains_key(&road) {
            return Err(GraphBuildError::DuplicateRoad(road));
        }
        let length_m = match validate_geometry(&geometry) {
            Ok(len) => len,
            Err(reason) => {
                self.rejected += 1;
                return Err(GraphBuildError::Degenerate { road, reason });
            }
        };

        let from = self.snap_or_insert(geometry[0]);
        let to = self.snap_or_insert(geometry[geometry.len() - 1]);

        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge { id, road_id: road, from, to, geometry, length_m });
        self.by_road.insert(road, id);
        Ok(id)
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Number of segments refused as degenerate so far.
    pub fn rejected_count(&self) -> usize { self.rejected }

    /// Consume the builder and produce a [`RoadGraph`].
    ///
    /// # Errors
    ///
    /// [`GraphBuildError::Empty`] when nothing was offered, or
    /// [`GraphBuildError::NoValidSegments`] when every segment was rejected.
    pub fn build(self) -> GraphResult<RoadGraph> {
        if self.edges.is_empty() {
            return Err(if self.rejected > 0 {
                GraphBuildError::NoValidSegments { rejected: self.rejected }
            } else {
                GraphBuildError::Empty
            });
        }

        let node_count = self.nodes.len();

        // Half-edge counts per departure node, then prefix sum.
        let mut node_adj_start = vec![0u32; node_count + 1];
        for e in &self.edges {
            node_adj_start[e.from.index() + 1] += 1;
            node_adj_start[e.to.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_adj_start[i] += node_adj_start[i - 1];
        }

        let mut cursor: Vec<u32> = node_adj_start[..node_count].to_vec();
        let mut adjacency = vec![Traversal::forward(EdgeId::INVALID); self.edges.len() * 2];
        for e in &self.edges {
            adjacency[cursor[e.from.index()] as usize] = Traversal::forward(e.id);
            cursor[e.from.index()] += 1;
            adjacency[cursor[e.to.index()] as usize] = Traversal::backward(e.id);
            cursor[e.to.index()] += 1;
        }
        debug_assert_eq!(node_adj_start[node_count] as usize, adjacency.len());

        Ok(RoadGraph {
            nodes: self.nodes,
            edges: self.edges,
            by_road: self.by_road,
            node_adj_start,
            adjacency,
            spatial_idx: self.node_idx,
        })
    }

    fn snap_or_insert(&mut self, p: Point) -> NodeId {
        let tol2 = self.snap_tolerance * self.snap_tolerance;
        let q = p.to_array();
        let existing = self
            .node_idx
            .nearest_neighbor(&q)
            .filter(|e| e.distance_2(&q) <= tol2)
            .map(|e| e.id);
        if let Some(id) = existing {
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(p);
        self.node_idx.insert(NodeEntry { point: p.to_array(), id });
        id
    }
}

impl Default for RoadGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_geometry(geometry: &[Point]) -> Result<f64, &'static str> {
    if geometry.len() < 2 {
        return Err("fewer than two vertices");
    }
    if !geometry.iter().all(|p| p.is_finite()) {
        return Err("non-finite coordinate");
    }
    let length: f64 = geometry.windows(2).map(|w| w[0].distance(w[1])).sum();
    if length <= 0.0 {
        return Err("zero length");
    }
    Ok(length)
}
