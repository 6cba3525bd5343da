//! Integration tests for cw-output.

use std::io::Cursor;
use std::path::Path;

use cw_agent::{KindSpec, MovementProfile};
use cw_core::{Point, RoadId};
use cw_mobility::EdgeWalker;
use cw_network::{DijkstraRouter, RoadGraph, RoadGraphBuilder};
use cw_population::RecordColumns;
use cw_sim::{Sim, SimBuilder, SimConfig};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Roads 1, 2, 3 end to end along the x axis, 100 m each.
fn line_network() -> RoadGraph {
    let mut b = RoadGraphBuilder::new();
    for (i, road) in [1, 2, 3].into_iter().enumerate() {
        let x = i as f64 * 100.0;
        b.add_segment(RoadId(road), vec![Point::new(x, 0.0), Point::new(x + 100.0, 0.0)])
            .unwrap();
    }
    b.build().unwrap()
}

/// Two commuters from road 1 to road 3 at 50 m/tick.
fn commute_sim(config: SimConfig) -> Sim<EdgeWalker<DijkstraRouter>> {
    let spec = KindSpec::new("main", vec![RoadId(3)]).with_profile(MovementProfile {
        speed_m_per_tick: 50.0,
        traffic_sensitivity: 0.0,
    });
    let csv = Cursor::new("count,home_tract,work_tract,road_id\n2,H,W,1\n");
    SimBuilder::new(config, line_network(), EdgeWalker::new(DijkstraRouter))
        .load_population_reader(spec, &RecordColumns::default(), csv)
        .unwrap()
        .build()
        .unwrap()
}

fn read_rows(path: &Path) -> Vec<csv::StringRecord> {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    rdr.records().map(|r| r.unwrap()).collect()
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::CsvWriter;
    use crate::row::{AgentSnapshotRow, FlipRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap_row(agent_id: u32, tick: u64) -> AgentSnapshotRow {
        AgentSnapshotRow {
            tick,
            kind:     1,
            agent_id,
            road_id:  -7,
            offset_m: 12.5,
            reached:  true,
            x:        1.0,
            y:        -2.25,
        }
    }

    #[test]
    fn csv_files_created_in_new_dir() {
        let dir = tmp();
        let out = dir.path().join("nested").join("out");
        let _w = CsvWriter::new(&out).unwrap();
        assert!(out.join("agent_snapshots.csv").exists());
        assert!(out.join("tick_summaries.csv").exists());
        assert!(out.join("flips.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let headers = |name: &str| -> Vec<String> {
            let mut rdr = csv::Reader::from_path(dir.path().join(name)).unwrap();
            rdr.headers().unwrap().iter().map(str::to_owned).collect()
        };
        assert_eq!(
            headers("agent_snapshots.csv"),
            ["tick", "kind", "agent_id", "road_id", "offset_m", "reached", "x", "y"]
        );
        assert_eq!(headers("tick_summaries.csv"), ["tick", "agents", "arrived", "cycles"]);
        assert_eq!(headers("flips.csv"), ["tick", "cycle"]);
    }

    #[test]
    fn snapshot_row_format() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 5), snap_row(1, 5)]).unwrap();
        w.finish().unwrap();

        let rows = read_rows(&dir.path().join("agent_snapshots.csv"));
        assert_eq!(rows.len(), 2);
        let fields: Vec<&str> = rows[1].iter().collect();
        assert_eq!(fields, ["5", "1", "1", "-7", "12.500", "1", "1.000", "-2.250"]);
    }

    #[test]
    fn summary_and_flip_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow { tick: 3, agents: 10, arrived: 4, cycles: 2 })
            .unwrap();
        w.write_flip(&FlipRow { tick: 9, cycle: 1 }).unwrap();
        w.finish().unwrap();

        let summaries = read_rows(&dir.path().join("tick_summaries.csv"));
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].iter().collect::<Vec<_>>(), ["3", "10", "4", "2"]);

        let flips = read_rows(&dir.path().join("flips.csv"));
        assert_eq!(flips[0].iter().collect::<Vec<_>>(), ["9", "1"]);
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_snapshot_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use super::*;
    use crate::{CsvWriter, PositionIndex, SnapshotObserver};

    #[test]
    fn full_run_writes_every_file() {
        let config = SimConfig {
            max_ticks: Some(10),
            snapshot_interval_ticks: 5,
            ..SimConfig::default()
        };
        let mut sim = commute_sim(config);

        let dir = tempfile::tempdir().unwrap();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = (PositionIndex::new(), SnapshotObserver::new(writer));
        sim.run(&mut obs).unwrap();
        assert!(obs.1.take_error().is_none(), "no write errors expected");

        // One summary per tick T0..T9.
        let summaries = read_rows(&dir.path().join("tick_summaries.csv"));
        assert_eq!(summaries.len(), 10);
        assert_eq!(summaries[4].iter().collect::<Vec<_>>(), ["4", "2", "0", "0"]);
        assert_eq!(summaries[5].iter().collect::<Vec<_>>(), ["5", "2", "2", "0"]);
        // The flip at T9 clears the arrival flags.
        assert_eq!(summaries[9].iter().collect::<Vec<_>>(), ["9", "2", "0", "1"]);

        let flips = read_rows(&dir.path().join("flips.csv"));
        assert_eq!(flips.len(), 1);
        assert_eq!(flips[0].iter().collect::<Vec<_>>(), ["9", "1"]);

        // Snapshots at T0 and T5, two agents each.
        let snaps = read_rows(&dir.path().join("agent_snapshots.csv"));
        assert_eq!(snaps.len(), 4);
        assert_eq!(snaps[0].iter().collect::<Vec<_>>(), ["0", "0", "0", "1", "50.000", "0", "50.000", "0.000"]);
        assert_eq!(snaps[3].iter().collect::<Vec<_>>(), ["5", "0", "1", "3", "100.000", "1", "300.000", "0.000"]);

        assert_eq!(obs.0.len(), 2);
    }

    #[test]
    fn into_writer_returns_backend() {
        let dir = tempfile::tempdir().unwrap();
        let obs = SnapshotObserver::new(CsvWriter::new(dir.path()).unwrap());
        let mut writer = obs.into_writer();
        crate::OutputWriter::finish(&mut writer).unwrap();
    }
}

#[cfg(test)]
mod index_tests {
    use cw_agent::AgentRef;
    use cw_core::{AgentId, KindId, Tick};
    use cw_sim::NoopObserver;

    use super::*;
    use crate::PositionIndex;

    #[test]
    fn empty_before_first_tick() {
        let index = PositionIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.refreshed_at(), None);
        assert!(index.nearest(Point::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn refreshes_on_tick_end() {
        let mut sim = commute_sim(SimConfig::default());
        let mut index = PositionIndex::new();
        sim.run_ticks(1, &mut index).unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.refreshed_at(), Some(Tick(0)));

        let (_, p) = index.nearest(Point::new(0.0, 0.0)).unwrap();
        assert_eq!(p, Point::new(50.0, 0.0));

        let near = index.within(Point::new(50.0, 0.0), 1.0);
        assert_eq!(
            near,
            vec![
                AgentRef::new(KindId(0), AgentId(0)),
                AgentRef::new(KindId(0), AgentId(1)),
            ]
        );
        assert!(index.within(Point::new(200.0, 0.0), 10.0).is_empty());
    }

    #[test]
    fn manual_rebuild_tracks_view() {
        let mut sim = commute_sim(SimConfig::default());
        sim.run_ticks(3, &mut NoopObserver).unwrap();

        let mut index = PositionIndex::new();
        index.rebuild(&sim.view());
        // T0..T2 at 50 m/tick: 150 m along the line.
        assert_eq!(index.within(Point::new(150.0, 0.0), 0.5).len(), 2);
        assert_eq!(index.refreshed_at(), None);
    }
}
