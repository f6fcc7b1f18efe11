//! Uniform spanning trees from random walks

use log::trace;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use super::{CellOrder, GeneratorInfo, GeneratorKind, MazeGenerator, begin, carve, finish};
use crate::control::{Interrupt, RunOptions};
use crate::errors::AlgorithmError;
use crate::grid::Label;
use crate::grid::observable::ObservableGridGraph;


/// Aldous-Broder
/// Random walk over the whole grid, keeping the edge of each first visit.
/// Uniform, but the walk takes a long time to reach the last cells.
pub struct AldousBroder {
    rng: StdRng,
    interrupt: Interrupt,
}

impl AldousBroder {

    pub fn new(options: &RunOptions) -> Self {
        Self { rng: options.rng(), interrupt: options.interrupt.clone() }
    }
}

impl MazeGenerator for AldousBroder {

    fn info(&self) -> GeneratorInfo {
        GeneratorKind::AldousBroder.info()
    }

    fn create_maze(&mut self, grid: &mut ObservableGridGraph, start_col: usize, start_row: usize) -> Result<(), AlgorithmError> {
        let info = self.info();
        let start = begin(&info, grid, start_col, start_row, &self.interrupt)?;
        grid.set_label(start, Label::Visited);

        let mut remaining = grid.num_vertices() - 1;
        let mut cell = start;
        let mut neighbors = Vec::with_capacity(grid.topology().max_degree());
        let mut steps: u64 = 0;

        while remaining > 0 {
            self.interrupt.check()?;
            steps += 1;

            neighbors.clear();
            neighbors.extend(grid.neighbors(cell));
            let Some(&next) = neighbors.choose(&mut self.rng) else {
                break;
            };
            if grid.label(next) == Label::Unvisited {
                carve(grid, cell, next)?;
                remaining -= 1;
            }
            cell = next;
        }
        trace!("{} walked {steps} steps", info.name);

        finish(&info, grid);
        Ok(())
    }
}


/// Wilson's algorithm
/// https://en.wikipedia.org/wiki/Loop-erased_random_walk
/// The tree starts as the start cell. Taking cells in the configured order, each
/// cell outside the tree starts a random walk that runs until it hits the tree;
/// the walk with its loops erased is added to the tree.
pub struct Wilson {
    kind: GeneratorKind,
    order: CellOrder,
    rng: StdRng,
    interrupt: Interrupt,
}

impl Wilson {

    pub fn new(kind: GeneratorKind, order: CellOrder, options: &RunOptions) -> Self {
        Self {
            kind,
            order,
            rng: options.rng(),
            interrupt: options.interrupt.clone(),
        }
    }
}

impl MazeGenerator for Wilson {

    fn info(&self) -> GeneratorInfo {
        self.kind.info()
    }

    fn create_maze(&mut self, grid: &mut ObservableGridGraph, start_col: usize, start_row: usize) -> Result<(), AlgorithmError> {
        let info = self.info();
        let start = begin(&info, grid, start_col, start_row, &self.interrupt)?;

        let n = grid.num_vertices();
        let mut in_tree = vec![false; n];
        in_tree[start] = true;
        grid.set_label(start, Label::Visited);

        // last exit taken from each cell; overwriting it erases loops
        let mut exit = vec![usize::MAX; n];
        let mut neighbors = Vec::with_capacity(grid.topology().max_degree());

        let order = self.order.cells(grid, &mut self.rng);
        self.interrupt.check()?;

        'walks: for walk_start in order {
            let mut cell = walk_start;
            while !in_tree[cell] {
                self.interrupt.check()?;

                neighbors.clear();
                neighbors.extend(grid.neighbors(cell));
                let Some(&next) = neighbors.choose(&mut self.rng) else {
                    continue 'walks;
                };
                exit[cell] = next;
                cell = next;
            }

            let mut cell = walk_start;
            while !in_tree[cell] {
                let next = exit[cell];
                in_tree[cell] = true;
                grid.add_edge(cell, next)?;
                grid.set_label(cell, Label::Visited);
                cell = next;
            }
        }

        finish(&info, grid);
        Ok(())
    }
}
