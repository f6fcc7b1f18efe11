use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::control::RunOptions;
use crate::errors::ConfigError;
use crate::generators::GeneratorKind;
use crate::geometry::Heuristic;
use crate::grid::Topology;
use crate::search::SearchKind;


/// Grid resolution and algorithm choice, loadable from TOML
///
/// ```toml
/// cols = 30
/// rows = 20
/// topology = "eight-neighbors"
/// generator = "wilson-hilbert"
/// search = "astar"
/// heuristic = "chebyshev"
/// seed = 7
/// start = [0, 0]
/// ```
///
/// Missing keys take their default values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MazeConfig {
    pub cols: usize,
    pub rows: usize,
    pub topology: Topology,
    pub generator: GeneratorKind,
    pub search: SearchKind,
    pub heuristic: Heuristic,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// (col, row) handed to the generator
    pub start: (usize, usize),
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            cols: 20,
            rows: 20,
            topology: Topology::FourNeighbors,
            generator: GeneratorKind::IterativeDfs,
            search: SearchKind::Bfs,
            heuristic: Heuristic::Euclidean,
            seed: None,
            start: (0, 0),
        }
    }
}

impl MazeConfig {

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        debug!("loading configuration from {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Parse and validate
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: MazeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols == 0 || self.rows == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.cols, self.rows
            )));
        }
        if self.cols.checked_mul(self.rows).is_none() {
            return Err(ConfigError::Invalid(format!(
                "grid of {}x{} cells is too large",
                self.cols, self.rows
            )));
        }

        let (col, row) = self.start;
        if col >= self.cols || row >= self.rows {
            return Err(ConfigError::Invalid(format!(
                "start ({col}, {row}) lies outside the {}x{} grid",
                self.cols, self.rows
            )));
        }

        if !self.generator.supports(self.topology) {
            return Err(ConfigError::Invalid(format!(
                "generator {} does not support {:?} grids",
                self.generator, self.topology
            )));
        }

        let checks_heuristic = matches!(self.search, SearchKind::AStar | SearchKind::BidiAStar);
        if checks_heuristic && !self.heuristic.is_admissible_for(self.topology) {
            return Err(ConfigError::Invalid(format!(
                "{} heuristic is not admissible for {} on {:?} grids",
                self.heuristic.name(),
                self.search,
                self.topology
            )));
        }

        Ok(())
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            seed: self.seed,
            ..RunOptions::default()
        }
    }
}
