use cw_agent::AgentError;
use cw_mobility::OccupancyError;
use thiserror::Error;

/// Fatal for one population file.
#[derive(Debug, Error)]
pub enum PopulationLoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("column {column} for field `{field}` not found in header")]
    MissingColumn { field: &'static str, column: String },

    #[error("line {line}: cannot parse `{field}` from {value:?}")]
    Parse { line: u64, field: &'static str, value: String },

    #[error("invalid kind: {0}")]
    Kind(#[from] AgentError),

    #[error("placement failed: {0}")]
    Occupancy(#[from] OccupancyError),
}

pub type PopulationResult<T> = Result<T, PopulationLoadError>;
