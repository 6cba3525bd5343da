//! commute — run a commute-wave scenario.
//!
//! Loads the road network and every population named in a TOML scenario,
//! runs the tick loop until `max_ticks` (or Ctrl+C), and writes
//! `agent_snapshots.csv`, `tick_summaries.csv` and `flips.csv` to the
//! output directory.
//!
//! ```text
//! cargo run --release -p commute -- --scenario demos/commute/data/scenario.toml
//! RUST_LOG=debug cargo run -p commute -- --ticks 50 --seed 7
//! ```

mod scenario;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use cw_core::Point;
use cw_mobility::EdgeWalker;
use cw_network::DijkstraRouter;
use cw_output::{CsvWriter, PositionIndex, SnapshotObserver};
use cw_sim::SimBuilder;

use scenario::Scenario;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Scenario file.
    #[arg(long, default_value = "demos/commute/data/scenario.toml")]
    scenario: PathBuf,

    /// Override `[sim] max_ticks`.
    #[arg(long)]
    ticks: Option<u64>,

    /// Override `[output] dir`.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Override `[sim] seed`.
    #[arg(long)]
    seed: Option<u64>,
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = Cli::parse();
    log::info!("{args:?}");

    let mut scenario = Scenario::load(&args.scenario)?;
    if let Some(ticks) = args.ticks {
        scenario.sim.max_ticks = Some(ticks);
    }
    if let Some(seed) = args.seed {
        scenario.sim.seed = seed;
    }
    let out_dir = args.output.unwrap_or(scenario.output.dir);

    // 1. Road network.
    let mut builder = SimBuilder::from_network_csv(
        scenario.sim,
        &scenario.network.path,
        scenario.network.snap_tolerance,
        EdgeWalker::new(DijkstraRouter),
    )
    .with_context(|| format!("failed to load network {}", scenario.network.path.display()))?;
    println!(
        "Road network: {} nodes, {} edges",
        builder.graph().node_count(),
        builder.graph().edge_count()
    );

    // 2. Populations, in scenario order.
    for population in scenario.populations {
        builder = builder.load_population_csv(population.spec, &population.columns, &population.path)?;
    }

    println!();
    println!("{:<18} {:>8} {:>8} {:>8} {:>8}", "Population", "Records", "Units", "Placed", "Lost");
    println!("{}", "-".repeat(54));
    for load in builder.loads() {
        match &load.outcome {
            Ok(report) => println!(
                "{:<18} {:>8} {:>8} {:>8} {:>8}",
                load.name,
                report.records,
                report.units_requested,
                report.agents_placed,
                report.units_lost()
            ),
            Err(e) => println!("{:<18} failed: {e}", load.name),
        }
    }
    println!();

    let mut sim = builder.build()?;

    // 3. Ctrl+C ends the run at the next tick boundary.
    let stop = sim.stop_handle();
    ctrlc::set_handler(move || {
        log::info!("shutdown signal received, finishing current tick");
        stop.stop();
    })
    .context("failed to install Ctrl+C handler")?;

    // 4. Run.
    let writer = CsvWriter::new(&out_dir)
        .with_context(|| format!("failed to open output dir {}", out_dir.display()))?;
    let mut obs = (PositionIndex::new(), SnapshotObserver::new(writer));

    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    let (index, mut output) = obs;
    if let Some(e) = output.take_error() {
        return Err(anyhow::Error::new(e).context("failed to write output"));
    }

    // 5. Summary.
    let view = sim.view();
    println!(
        "Ran {} ticks in {:.3} s: {} flips, {}/{} agents arrived",
        sim.current_tick.0,
        elapsed.as_secs_f64(),
        view.cycles,
        view.arrived_count(),
        view.agent_count()
    );
    for population in &sim.populations {
        println!(
            "  {:<18} {:>6} agents  {:>6} arrived  heading {:?}",
            population.name(),
            population.len(),
            population.arrived_count(),
            population.direction
        );
    }

    if let Some((lo, hi)) = sim.graph.bounds() {
        let centre = Point::new((lo.x + hi.x) / 2.0, (lo.y + hi.y) / 2.0);
        let radius = lo.distance(hi) / 4.0;
        println!(
            "  {} agents within {radius:.0} m of the network centre",
            index.within(centre, radius).len()
        );
    }
    println!("Output written to {}", out_dir.display());

    Ok(())
}
