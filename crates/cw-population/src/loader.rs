//! CSV population loader.
//!
//! # CSV format
//!
//! One row per origin/destination flow; the header row is discarded after
//! it has been used to resolve [`RecordColumns`].  With the default columns:
//!
//! ```csv
//! count,home_tract,work_tract,road_id
//! 12,01073000100,01073004500,18081
//! 3,01073000200,01073004500,519.0
//! ```
//!
//! `count` must be a non-negative integer and `road_id` an integer or float
//! (truncated); anything else aborts the file.  Blank lines are ignored.
//!
//! # Placement
//!
//! For each record one goal is drawn uniformly from the kind's goal set and
//! shared by all of the record's units.  Each unit becomes an agent on the
//! record's start road with a route planned by the [`Walker`].  Agents are
//! registered in the [`EdgeOccupancy`] only once the whole file has parsed,
//! so an aborted file leaves occupancy untouched.

use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use cw_agent::{Agent, KindSpec, Population};
use cw_core::{AgentId, KindId, RoadId, SimRng};
use cw_mobility::{EdgeOccupancy, Walker};
use cw_network::RoadGraph;

use crate::columns::ResolvedColumns;
use crate::{FailureRole, LoadReport, PopulationLoadError, PopulationResult, RecordColumns, SoftFailure};

/// Shared simulation state a loader reads from and places agents into.
pub struct LoadContext<'a, W: Walker> {
    pub graph: &'a RoadGraph,
    pub walker: &'a W,
    pub occupancy: &'a mut EdgeOccupancy,
    /// Draws the per-record goal.
    pub rng: &'a mut SimRng,
}

/// Load a population of `kind` from a CSV file.
pub fn load_population_csv<W: Walker>(
    path:    &Path,
    kind:    KindId,
    spec:    &KindSpec,
    columns: &RecordColumns,
    ctx:     LoadContext<'_, W>,
) -> PopulationResult<(Population, LoadReport)> {
    let file = std::fs::File::open(path)?;
    load_population_reader(file, kind, spec, columns, ctx)
}

/// Like [`load_population_csv`] but accepts any `Read` source.
pub fn load_population_reader<R: Read, W: Walker>(
    reader:  R,
    kind:    KindId,
    spec:    &KindSpec,
    columns: &RecordColumns,
    mut ctx: LoadContext<'_, W>,
) -> PopulationResult<(Population, LoadReport)> {
    spec.validate()?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let cols = columns.resolve(csv_reader.headers()?)?;

    let mut population = Population::new(kind, spec.clone());
    let mut report = LoadReport::default();

    for result in csv_reader.records() {
        let record = result?;
        report.records += 1;
        let row = parse_row(&record, &cols)?;
        report.units_requested += row.count;
        if row.count == 0 {
            continue;
        }
        match place_record(&row, spec, &mut population, &mut ctx) {
            Ok(()) => {}
            Err(failure) => {
                log::warn!("{}: {failure}", spec.name);
                report.failures.push(failure);
            }
        }
    }

    for agent in &population.agents {
        ctx.occupancy.enter(agent.start_edge, agent.agent_ref())?;
    }
    report.agents_placed = population.len();

    log::info!(
        "population {:?} loaded: {} records, {}/{} agents placed, {} soft failures",
        spec.name,
        report.records,
        report.agents_placed,
        report.units_requested,
        report.failures.len()
    );
    Ok((population, report))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

struct Row {
    line: u64,
    count: usize,
    home_tract: String,
    work_tract: String,
    road: RoadId,
}

fn parse_row(record: &StringRecord, cols: &ResolvedColumns) -> PopulationResult<Row> {
    let line = record.position().map_or(0, |p| p.line());
    let field = |i: usize| record.get(i).unwrap_or("");

    let count_str = field(cols.count);
    let count = count_str.parse::<usize>().map_err(|_| PopulationLoadError::Parse {
        line,
        field: "count",
        value: count_str.to_owned(),
    })?;

    let road_str = field(cols.road_id);
    let road = RoadId::parse(road_str).map_err(|_| PopulationLoadError::Parse {
        line,
        field: "road_id",
        value: road_str.to_owned(),
    })?;

    Ok(Row {
        line,
        count,
        home_tract: field(cols.home_tract).to_owned(),
        work_tract: field(cols.work_tract).to_owned(),
        road,
    })
}

/// Resolve, plan and push the agents of one record.
fn place_record<W: Walker>(
    row:        &Row,
    spec:       &KindSpec,
    population: &mut Population,
    ctx:        &mut LoadContext<'_, W>,
) -> Result<(), SoftFailure> {
    let graph = ctx.graph;
    let unresolved = |road, role| SoftFailure::UnresolvedEdgeId {
        line: row.line,
        road,
        role,
        units: row.count,
    };

    let start = graph.edge_id(row.road).ok_or_else(|| unresolved(row.road, FailureRole::Start))?;
    // `spec.validate()` guarantees a non-empty goal set.
    let goal_road = spec.goals[ctx.rng.gen_range(0..spec.goals.len())];
    let goal = graph.edge_id(goal_road).ok_or_else(|| unresolved(goal_road, FailureRole::Goal))?;

    let route = ctx.walker.plan_route(graph, start, goal).map_err(|e| {
        SoftFailure::PathInitializationFailure {
            line: row.line,
            start: e.start,
            goal: e.goal,
            units: row.count,
        }
    })?;

    let kind = population.kind;
    for _ in 0..row.count {
        population.push(Agent::new(
            AgentId::INVALID,
            kind,
            row.home_tract.clone(),
            row.work_tract.clone(),
            start,
            goal,
            route.clone(),
            spec.profile,
        ));
    }
    Ok(())
}
