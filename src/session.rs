//! One grid together with the algorithms configured to work on it

use log::{debug, info};

use crate::config::MazeConfig;
use crate::control::{Interrupt, RunOptions};
use crate::errors::{AlgorithmError, ConfigError, GridError};
use crate::generators::{GeneratorKind, prepare_grid};
use crate::geometry::Heuristic;
use crate::grid::observable::ObservableGridGraph;
use crate::grid::{GridGraph, Label};
use crate::search::{NoOpSearchObserver, Path, SearchKind, SearchObserver};


/// Owns the grid and the algorithm choice of a front end
/// Observers attached to the grid survive generation runs and resolution changes.
pub struct Session {
    config: MazeConfig,
    grid: ObservableGridGraph,
    interrupt: Interrupt,
}

impl Session {

    pub fn new(config: MazeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = GridGraph::empty(config.cols, config.rows, config.topology, Label::Unvisited)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        debug!("session with {}x{} {:?} grid", config.cols, config.rows, config.topology);
        Ok(Self {
            config,
            grid: ObservableGridGraph::new(grid),
            interrupt: Interrupt::new(),
        })
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn grid(&self) -> &ObservableGridGraph {
        &self.grid
    }

    /// For attaching observers or editing the grid by hand
    pub fn grid_mut(&mut self) -> &mut ObservableGridGraph {
        &mut self.grid
    }

    /// Handle to stop the running algorithm from another thread or an observer
    pub fn interrupt(&self) -> Interrupt {
        self.interrupt.clone()
    }

    fn run_options(&self) -> RunOptions {
        self.config.run_options().with_interrupt(self.interrupt.clone())
    }

    /// Reset the grid to the generator's starting state and carve a new maze
    /// Each run starts with a cleared interrupt. After an error the grid holds
    /// whatever the generator had done so far.
    pub fn generate(&mut self) -> Result<(), AlgorithmError> {
        self.interrupt.reset();
        let mut generator = self.config.generator.create(&self.run_options());
        prepare_grid(&mut self.grid, generator.info().requirement);

        let (col, row) = self.config.start;
        let result = generator.create_maze(&mut self.grid, col, row);
        match &result {
            Ok(()) => info!("{} generated {} edges", self.config.generator, self.grid.num_edges()),
            Err(e) if e.is_interrupted() => info!("{} interrupted", self.config.generator),
            Err(e) => debug!("{} failed: {e}", self.config.generator),
        }
        result
    }

    pub fn solve(&mut self, source: usize, target: usize) -> Result<Path, AlgorithmError> {
        self.solve_with(source, target, &mut NoOpSearchObserver)
    }

    /// Solve and report every search step to the observer
    pub fn solve_with(&mut self, source: usize, target: usize, observer: &mut dyn SearchObserver) -> Result<Path, AlgorithmError> {
        self.interrupt.reset();
        let mut search = self.config.search.create(&self.run_options(), self.config.heuristic);
        let path = search.search(&self.grid, source, target, observer)?;
        debug!("{} found {} steps from {source} to {target}", self.config.search, path.num_steps());
        Ok(path)
    }

    /// Top-left to bottom-right
    pub fn solve_corners(&mut self) -> Result<Path, AlgorithmError> {
        let last = self.grid.num_vertices() - 1;
        self.solve(0, last)
    }

    /// Replace the grid by an empty one of the new resolution
    /// The generator start cell is clamped into the new grid.
    pub fn resize(&mut self, cols: usize, rows: usize) -> Result<(), GridError> {
        let grid = GridGraph::empty(cols, rows, self.config.topology, Label::Unvisited)?;
        self.grid.replace_grid(grid);

        self.config.cols = cols;
        self.config.rows = rows;
        let (col, row) = self.config.start;
        self.config.start = (col.min(cols - 1), row.min(rows - 1));
        debug!("session resized to {cols}x{rows}");
        Ok(())
    }

    pub fn set_generator(&mut self, generator: GeneratorKind) -> Result<(), ConfigError> {
        self.update(MazeConfig { generator, ..self.config.clone() })
    }

    pub fn set_search(&mut self, search: SearchKind, heuristic: Heuristic) -> Result<(), ConfigError> {
        self.update(MazeConfig { search, heuristic, ..self.config.clone() })
    }

    fn update(&mut self, config: MazeConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }
}
