use thiserror::Error;

use crate::grid::Topology;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions {cols}x{rows} are empty or too large")]
    InvalidDimensions { cols: usize, rows: usize },
    #[error("coordinate ({col}, {row}) lies outside the grid")]
    CellOutOfRange { col: usize, row: usize },
    #[error("cell id {0} lies outside the grid")]
    InvalidCell(usize),
    #[error("cells {0} and {1} are not neighbors in this topology")]
    NotAdjacent(usize, usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgorithmError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("algorithm requires a full grid as starting point")]
    FullGridRequired,
    #[error("algorithm requires a grid without edges as starting point")]
    EmptyGridRequired,
    #[error("{algorithm} does not support {topology:?} topology")]
    UnsupportedTopology {
        algorithm: &'static str,
        topology: Topology,
    },
    #[error("grid has {cells} cells, recursive algorithm is limited to {limit}")]
    GridTooLarge { cells: usize, limit: usize },
    #[error("{heuristic} heuristic overestimates distances on {topology:?} topology")]
    InadmissibleHeuristic {
        heuristic: &'static str,
        topology: Topology,
    },
    #[error("algorithm run was interrupted")]
    Interrupted,
}

impl AlgorithmError {
    /// Cancellation is an expected outcome, not a fault
    pub fn is_interrupted(&self) -> bool {
        matches!(self, AlgorithmError::Interrupted)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to write configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("unknown algorithm '{0}'")]
    UnknownAlgorithm(String),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
