//! Row-scanning generators for 4-neighbor grids
//!
//! Both visit each cell once and need no bookkeeping beyond the current row,
//! at the price of a visible bias towards the north-west.

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use super::{GeneratorInfo, GeneratorKind, MazeGenerator, begin, carve, finish};
use crate::control::{Interrupt, RunOptions};
use crate::errors::AlgorithmError;
use crate::grid::observable::ObservableGridGraph;
use crate::grid::{Direction, Label};


/// Binary tree: every cell opens a passage north or west
pub struct BinaryTree {
    rng: StdRng,
    interrupt: Interrupt,
}

impl BinaryTree {

    pub fn new(options: &RunOptions) -> Self {
        Self { rng: options.rng(), interrupt: options.interrupt.clone() }
    }
}

impl MazeGenerator for BinaryTree {

    fn info(&self) -> GeneratorInfo {
        GeneratorKind::BinaryTree.info()
    }

    fn create_maze(&mut self, grid: &mut ObservableGridGraph, start_col: usize, start_row: usize) -> Result<(), AlgorithmError> {
        let info = self.info();
        begin(&info, grid, start_col, start_row, &self.interrupt)?;

        let mut options = Vec::with_capacity(2);
        for cell in 0..grid.num_vertices() {
            self.interrupt.check()?;

            options.clear();
            options.extend([Direction::North, Direction::West].into_iter().filter_map(|dir| grid.neighbor(cell, dir)));
            if let Some(&parent) = options.choose(&mut self.rng) {
                carve(grid, parent, cell)?;
            }
        }

        finish(&info, grid);
        Ok(())
    }
}


/// Sidewinder
/// The first row is one corridor. Further rows are split into runs going east;
/// when a run is closed, one random cell of it opens a passage north.
pub struct Sidewinder {
    rng: StdRng,
    interrupt: Interrupt,
}

impl Sidewinder {

    pub fn new(options: &RunOptions) -> Self {
        Self { rng: options.rng(), interrupt: options.interrupt.clone() }
    }
}

impl MazeGenerator for Sidewinder {

    fn info(&self) -> GeneratorInfo {
        GeneratorKind::Sidewinder.info()
    }

    fn create_maze(&mut self, grid: &mut ObservableGridGraph, start_col: usize, start_row: usize) -> Result<(), AlgorithmError> {
        let info = self.info();
        begin(&info, grid, start_col, start_row, &self.interrupt)?;

        let cols = grid.num_cols();
        let mut run = Vec::with_capacity(cols);

        for row in 0..grid.num_rows() {
            run.clear();
            for col in 0..cols {
                self.interrupt.check()?;

                let cell = grid.cell(col, row);
                grid.set_label(cell, Label::Visited);
                run.push(cell);

                let at_east_border = col + 1 == cols;
                let close_run = row > 0 && (at_east_border || self.rng.random_bool(0.5));

                if close_run {
                    if let Some(&member) = run.choose(&mut self.rng) {
                        let north = grid.cell(grid.col(member), row - 1);
                        grid.add_edge(north, member)?;
                    }
                    run.clear();
                } else if !at_east_border {
                    let east = grid.cell(col + 1, row);
                    carve(grid, cell, east)?;
                }
            }
        }

        finish(&info, grid);
        Ok(())
    }
}
