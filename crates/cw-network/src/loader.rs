//! CSV network loader.
//!
//! # CSV format
//!
//! One row per road segment, geometry as a WKT `LINESTRING` in projected
//! coordinates (metres):
//!
//! ```csv
//! road_id,geometry
//! 18081,"LINESTRING (615230.1 308411.7, 615260.4 308420.0)"
//! 519,"LINESTRING (615260.4 308420.0, 615300.0 308455.2, 615330.8 308460.1)"
//! ```
//!
//! `road_id` accepts integer or float syntax (see [`RoadId::parse`]).
//!
//! # Error policy
//!
//! An unparsable row aborts the load ([`GraphBuildError::Malformed`]).  A
//! parsable but degenerate segment (one vertex, zero length) is skipped
//! with a warning; if nothing valid remains, `build` reports
//! [`GraphBuildError::NoValidSegments`].

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use cw_core::{Point, RoadId};

use crate::graph::{RoadGraph, RoadGraphBuilder};
use crate::{GraphBuildError, GraphResult};

#[derive(Deserialize)]
struct SegmentRecord {
    #[serde(alias = "ROAD_ID")]
    road_id: String,
    #[serde(alias = "WKT", alias = "wkt")]
    geometry: String,
}

/// Load a road graph from a CSV file.
pub fn load_network_csv(path: &Path, snap_tolerance: f64) -> GraphResult<RoadGraph> {
    let file = std::fs::File::open(path)?;
    load_network_reader(file, snap_tolerance)
}

/// Like [`load_network_csv`] but accepts any `Read` source.
pub fn load_network_reader<R: Read>(reader: R, snap_tolerance: f64) -> GraphResult<RoadGraph> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut builder = RoadGraphBuilder::with_tolerance(snap_tolerance);

    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());

        let row: SegmentRecord = record
            .deserialize(Some(&headers))
            .map_err(|e| GraphBuildError::Malformed { line, reason: e.to_string() })?;
        let road = RoadId::parse(&row.road_id)
            .map_err(|e| GraphBuildError::Malformed { line, reason: e.to_string() })?;
        let geometry = parse_linestring(&row.geometry)
            .map_err(|reason| GraphBuildError::Malformed { line, reason })?;

        match builder.add_segment(road, geometry) {
            Ok(_) => {}
            Err(e @ GraphBuildError::Degenerate { .. }) => {
                log::warn!("skipping segment at line {line}: {e}");
            }
            Err(e) => return Err(e),
        }
    }

    let graph = builder.build()?;
    log::info!(
        "road graph built: {} edges, {} intersections",
        graph.edge_count(),
        graph.node_count()
    );
    Ok(graph)
}

/// Parse a WKT `LINESTRING (x y, x y, ...)` into vertices.
///
/// Extra ordinates (Z, M) after the first two are ignored.  `LINESTRING EMPTY`
/// yields no vertices, which the builder then rejects as degenerate.
pub fn parse_linestring(wkt: &str) -> Result<Vec<Point>, String> {
    let s = wkt.trim();
    let head = s.get(..10).unwrap_or("");
    if !head.eq_ignore_ascii_case("LINESTRING") {
        return Err(format!("expected LINESTRING, got {s:?}"));
    }
    let body = s[10..].trim_start();
    if body.split_whitespace().last().is_some_and(|w| w.eq_ignore_ascii_case("EMPTY")) {
        return Ok(Vec::new());
    }
    // Tolerate dimension tags such as `LINESTRING Z (...)`.
    let body = body.trim_start_matches(|c: char| c.is_ascii_alphabetic()).trim();
    let inner = body
        .strip_prefix('(')
        .and_then(|b| b.strip_suffix(')'))
        .ok_or_else(|| format!("unbalanced parentheses in {s:?}"))?;

    inner
        .split(',')
        .map(|pair| {
            let mut it = pair.split_whitespace();
            let x = it.next().and_then(|v| v.parse::<f64>().ok());
            let y = it.next().and_then(|v| v.parse::<f64>().ok());
            match (x, y) {
                (Some(x), Some(y)) => Ok(Point::new(x, y)),
                _ => Err(format!("invalid vertex {:?}", pair.trim())),
            }
        })
        .collect()
}
