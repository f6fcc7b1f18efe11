//! Minimum spanning trees over randomly weighted edges
//!
//! Every edge the topology allows gets a random weight; the minimum spanning
//! tree of that weighting is the maze.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::trace;
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::{GeneratorInfo, GeneratorKind, MazeGenerator, begin, carve, finish};
use crate::collections::Partition;
use crate::control::{Interrupt, RunOptions};
use crate::errors::AlgorithmError;
use crate::grid::Label;
use crate::grid::observable::ObservableGridGraph;


/// Kruskal's algorithm
/// https://en.wikipedia.org/wiki/Kruskal%27s_algorithm
/// A shuffled edge list stands in for sorting by random weight.
pub struct Kruskal {
    rng: StdRng,
    interrupt: Interrupt,
}

impl Kruskal {

    pub fn new(options: &RunOptions) -> Self {
        Self { rng: options.rng(), interrupt: options.interrupt.clone() }
    }
}

impl MazeGenerator for Kruskal {

    fn info(&self) -> GeneratorInfo {
        GeneratorKind::Kruskal.info()
    }

    fn create_maze(&mut self, grid: &mut ObservableGridGraph, start_col: usize, start_row: usize) -> Result<(), AlgorithmError> {
        let info = self.info();
        begin(&info, grid, start_col, start_row, &self.interrupt)?;

        let mut edges: Vec<(usize, usize)> = grid.all_possible_edges().collect();
        edges.shuffle(&mut self.rng);

        let target_edges = grid.num_vertices() - 1;
        let mut partition = Partition::new(grid.num_vertices());

        for (u, v) in edges {
            self.interrupt.check()?;
            if grid.num_edges() == target_edges {
                break;
            }
            if partition.union(u, v) {
                grid.add_edge(u, v)?;
                grid.set_label(u, Label::Visited);
                grid.set_label(v, Label::Visited);
            }
        }

        finish(&info, grid);
        Ok(())
    }
}


/// Prim's algorithm
/// https://en.wikipedia.org/wiki/Prim%27s_algorithm
/// Grows from the start cell, always taking the lightest edge out of the tree.
pub struct Prim {
    rng: StdRng,
    interrupt: Interrupt,
}

impl Prim {

    pub fn new(options: &RunOptions) -> Self {
        Self { rng: options.rng(), interrupt: options.interrupt.clone() }
    }

    fn push_edges(&mut self, grid: &ObservableGridGraph, cell: usize, heap: &mut BinaryHeap<Reverse<(u32, usize, usize)>>) {
        for next in grid.neighbors(cell) {
            if grid.label(next) == Label::Unvisited {
                heap.push(Reverse((self.rng.random(), cell, next)));
            }
        }
    }
}

impl MazeGenerator for Prim {

    fn info(&self) -> GeneratorInfo {
        GeneratorKind::Prim.info()
    }

    fn create_maze(&mut self, grid: &mut ObservableGridGraph, start_col: usize, start_row: usize) -> Result<(), AlgorithmError> {
        let info = self.info();
        let start = begin(&info, grid, start_col, start_row, &self.interrupt)?;
        grid.set_label(start, Label::Visited);

        // (weight, tree cell, outside cell), lightest first
        let mut heap = BinaryHeap::new();
        self.push_edges(grid, start, &mut heap);

        while let Some(Reverse((_, cell, next))) = heap.pop() {
            self.interrupt.check()?;

            // both ends joined the tree since the edge was queued
            if grid.label(next) != Label::Unvisited {
                continue;
            }
            carve(grid, cell, next)?;
            self.push_edges(grid, next, &mut heap);
        }

        finish(&info, grid);
        Ok(())
    }
}


/// Borůvka's algorithm
/// https://en.wikipedia.org/wiki/Bor%C5%AFvka%27s_algorithm
/// Each round every component picks its lightest outgoing edge and all picks are
/// merged at once. Rounds run one after another on the calling thread.
pub struct Boruvka {
    rng: StdRng,
    interrupt: Interrupt,
}

impl Boruvka {

    pub fn new(options: &RunOptions) -> Self {
        Self { rng: options.rng(), interrupt: options.interrupt.clone() }
    }
}

impl MazeGenerator for Boruvka {

    fn info(&self) -> GeneratorInfo {
        GeneratorKind::Boruvka.info()
    }

    fn create_maze(&mut self, grid: &mut ObservableGridGraph, start_col: usize, start_row: usize) -> Result<(), AlgorithmError> {
        let info = self.info();
        begin(&info, grid, start_col, start_row, &self.interrupt)?;

        // position in the shuffled list is the weight, all weights distinct
        let mut edges: Vec<(usize, usize)> = grid.all_possible_edges().collect();
        edges.shuffle(&mut self.rng);

        let n = grid.num_vertices();
        let mut partition = Partition::new(n);
        let mut round = 0;

        while partition.num_sets() > 1 {
            self.interrupt.check()?;
            round += 1;

            edges.retain(|&(u, v)| !partition.same(u, v));

            // lightest outgoing edge per component root; edges are in weight order
            let mut lightest: Vec<Option<usize>> = vec![None; n];
            for (i, &(u, v)) in edges.iter().enumerate() {
                for root in [partition.find(u), partition.find(v)] {
                    if lightest[root].is_none() {
                        lightest[root] = Some(i);
                    }
                }
            }

            let mut merged = 0;
            for i in lightest.into_iter().flatten() {
                self.interrupt.check()?;
                let (u, v) = edges[i];
                // two components may have picked the same edge
                if partition.union(u, v) {
                    grid.add_edge(u, v)?;
                    grid.set_label(u, Label::Visited);
                    grid.set_label(v, Label::Visited);
                    merged += 1;
                }
            }
            trace!("{} round {round}: {merged} merges, {} components left", info.name, partition.num_sets());

            if merged == 0 {
                break;
            }
        }

        finish(&info, grid);
        Ok(())
    }
}
