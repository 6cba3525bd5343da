//! Fluent builder for constructing a [`Sim`].

use std::io::Read;
use std::path::Path;

use cw_agent::{KindSpec, Population};
use cw_core::{KindId, SimRng};
use cw_mobility::{EdgeOccupancy, Walker};
use cw_network::{load_network_csv, RoadGraph};
use cw_population::{
    load_population_csv, load_population_reader, LoadContext, LoadReport, PopulationLoadError,
    PopulationResult, RecordColumns,
};

use crate::{Sim, SimConfig, SimError, SimResult};

/// How loading one population file went.
#[derive(Debug)]
pub struct PopulationLoad {
    pub kind: KindId,
    pub name: String,
    pub outcome: Result<LoadReport, PopulationLoadError>,
}

/// Fluent builder for [`Sim<W>`].
///
/// Populations are loaded in call order and receive consecutive
/// [`KindId`]s.  Each one draws its goals from its own child of the root
/// RNG (`SimRng::child(seed, kind)`), so adding a population never changes
/// the draws of the ones before it.
///
/// A population file that fails to load is logged and kept as an empty
/// population of that kind; the other populations are unaffected.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, graph, EdgeWalker::new(DijkstraRouter))
///     .load_population_csv(main, &RecordColumns::census(), "main.csv".as_ref())?
///     .load_population_csv(ngo, &RecordColumns::census(), "ngo.csv".as_ref())?
///     .build()?;
/// ```
pub struct SimBuilder<W: Walker> {
    config:      SimConfig,
    graph:       RoadGraph,
    walker:      W,
    occupancy:   EdgeOccupancy,
    populations: Vec<Population>,
    loads:       Vec<PopulationLoad>,
}

impl<W: Walker> SimBuilder<W> {
    /// Create a builder around an already constructed road graph.
    pub fn new(config: SimConfig, graph: RoadGraph, walker: W) -> Self {
        Self {
            config,
            graph,
            walker,
            occupancy:   EdgeOccupancy::new(),
            populations: Vec::new(),
            loads:       Vec::new(),
        }
    }

    /// Create a builder, reading the road graph from a segment CSV.
    ///
    /// # Errors
    ///
    /// [`SimError::Graph`] if the network cannot be built.
    pub fn from_network_csv(
        config:         SimConfig,
        path:           &Path,
        snap_tolerance: f64,
        walker:         W,
    ) -> SimResult<Self> {
        let graph = load_network_csv(path, snap_tolerance)?;
        Ok(Self::new(config, graph, walker))
    }

    /// Load one population from a CSV file.
    pub fn load_population_csv(
        self,
        spec:    KindSpec,
        columns: &RecordColumns,
        path:    &Path,
    ) -> SimResult<Self> {
        self.load_with(spec, |kind, spec, ctx| {
            load_population_csv(path, kind, spec, columns, ctx)
        })
    }

    /// Load one population from any `Read` source.
    pub fn load_population_reader<R: Read>(
        self,
        spec:    KindSpec,
        columns: &RecordColumns,
        reader:  R,
    ) -> SimResult<Self> {
        self.load_with(spec, |kind, spec, ctx| {
            load_population_reader(reader, kind, spec, columns, ctx)
        })
    }

    /// Outcomes of the population loads so far, in load order.
    pub fn loads(&self) -> &[PopulationLoad] {
        &self.loads
    }

    pub fn graph(&self) -> &RoadGraph {
        &self.graph
    }

    /// Validate the configuration and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<W>> {
        self.config.validate()?;
        let sim = Sim::new(self.config, self.graph, self.occupancy, self.populations, self.walker);
        log::info!(
            "simulation ready: {} populations, {} agents, barrier every {} ticks",
            sim.populations.len(),
            sim.agent_count(),
            sim.barrier.interval()
        );
        Ok(sim)
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn load_with<F>(mut self, spec: KindSpec, load: F) -> SimResult<Self>
    where
        F: FnOnce(KindId, &KindSpec, LoadContext<'_, W>) -> PopulationResult<(Population, LoadReport)>,
    {
        let kind = KindId::try_from(self.populations.len())
            .ok()
            .filter(|k| *k != KindId::INVALID)
            .ok_or(SimError::TooManyKinds)?;
        let mut rng = SimRng::child(self.config.seed, kind.0 as u64);

        let ctx = LoadContext {
            graph: &self.graph,
            walker: &self.walker,
            occupancy: &mut self.occupancy,
            rng: &mut rng,
        };
        let (population, outcome) = match load(kind, &spec, ctx) {
            Ok((population, report)) => (population, Ok(report)),
            Err(e) => {
                log::error!("population {:?} failed to load, keeping it empty: {e}", spec.name);
                (Population::new(kind, spec.clone()), Err(e))
            }
        };

        self.loads.push(PopulationLoad { kind, name: spec.name, outcome });
        self.populations.push(population);
        Ok(self)
    }
}
