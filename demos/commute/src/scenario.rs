//! TOML scenario files.
//!
//! ```toml
//! [sim]
//! seed = 42
//! max_ticks = 200
//!
//! [network]
//! path = "network.csv"
//!
//! [[population]]
//! name  = "main"
//! goals = [18081, 519]
//! path  = "main.csv"
//! ```
//!
//! Network and population paths are resolved against the directory holding
//! the scenario file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use cw_agent::KindSpec;
use cw_network::DEFAULT_SNAP_TOLERANCE;
use cw_population::RecordColumns;
use cw_sim::SimConfig;

#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub sim: SimConfig,
    pub network: NetworkSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(rename = "population", default)]
    pub populations: Vec<PopulationSection>,
}

#[derive(Debug, Deserialize)]
pub struct NetworkSection {
    pub path: PathBuf,
    #[serde(default = "default_snap_tolerance")]
    pub snap_tolerance: f64,
}

fn default_snap_tolerance() -> f64 {
    DEFAULT_SNAP_TOLERANCE
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub dir: PathBuf,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self { dir: PathBuf::from("output/commute") }
    }
}

#[derive(Debug, Deserialize)]
pub struct PopulationSection {
    #[serde(flatten)]
    pub spec: KindSpec,
    pub path: PathBuf,
    #[serde(default)]
    pub columns: RecordColumns,
}

impl Scenario {
    /// Read and parse `path`, making data paths absolute.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        let mut scenario: Scenario = toml::from_str(&text)
            .with_context(|| format!("failed to parse scenario {}", path.display()))?;

        if scenario.populations.is_empty() {
            bail!("scenario {} defines no [[population]]", path.display());
        }

        let base = path.parent().unwrap_or(Path::new("."));
        scenario.network.path = base.join(&scenario.network.path);
        for population in &mut scenario.populations {
            population.path = base.join(&population.path);
        }
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use cw_core::RoadId;
    use cw_population::Column;

    use super::*;

    const SCENARIO: &str = r#"
[sim]
seed = 7
max_ticks = 30

[network]
path = "net.csv"

[[population]]
name  = "main"
goals = [18081, 519]
path  = "main.csv"

[[population]]
name    = "elderly"
goals   = [60608]
path    = "elderly.csv"
profile = { speed_m_per_tick = 25.0 }
columns = { count = 39, road_id = "ROAD_ID" }
"#;

    fn write(dir: &Path, text: &str) -> PathBuf {
        let path = dir.join("scenario.toml");
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn parses_and_resolves_paths() {
        let dir = tempfile::tempdir().unwrap();
        let scenario = Scenario::load(&write(dir.path(), SCENARIO)).unwrap();

        assert_eq!(scenario.sim.seed, 7);
        assert_eq!(scenario.sim.max_ticks, Some(30));
        assert_eq!(scenario.sim.barrier_interval_ticks, 10);
        assert_eq!(scenario.network.path, dir.path().join("net.csv"));
        assert_eq!(scenario.network.snap_tolerance, DEFAULT_SNAP_TOLERANCE);
        assert_eq!(scenario.output.dir, PathBuf::from("output/commute"));

        let main = &scenario.populations[0];
        assert_eq!(main.spec.name, "main");
        assert_eq!(main.spec.goals, vec![RoadId(18081), RoadId(519)]);
        assert_eq!(main.columns, RecordColumns::default());
        assert_eq!(main.path, dir.path().join("main.csv"));

        let elderly = &scenario.populations[1];
        assert_eq!(elderly.spec.profile.speed_m_per_tick, 25.0);
        assert_eq!(elderly.spec.profile.traffic_sensitivity, 0.0);
        assert_eq!(elderly.columns.count, Column::Index(39));
        assert_eq!(elderly.columns.road_id, Column::Name("ROAD_ID".into()));
        assert_eq!(elderly.columns.home_tract, Column::Name("home_tract".into()));
    }

    #[test]
    fn no_population_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "[network]\npath = \"net.csv\"\n");
        assert!(Scenario::load(&path).is_err());
    }

    #[test]
    fn bundled_scenario_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/scenario.toml");
        let scenario = Scenario::load(&path).unwrap();
        assert_eq!(scenario.populations.len(), 4);
        assert!(scenario.populations.iter().all(|p| p.path.exists()));
    }
}
