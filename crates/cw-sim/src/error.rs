use cw_mobility::OccupancyError;
use cw_network::GraphBuildError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("cannot register more than 65535 populations")]
    TooManyKinds,

    #[error("road network: {0}")]
    Graph(#[from] GraphBuildError),

    #[error("occupancy out of sync: {0}")]
    Occupancy(#[from] OccupancyError),
}

pub type SimResult<T> = Result<T, SimError>;
