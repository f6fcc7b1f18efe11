//! Generators that grow a single tree from the start cell by randomized traversal

use std::collections::VecDeque;

use log::{trace, warn};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};

use super::{GeneratorInfo, GeneratorKind, MazeGenerator, begin, carve, finish, unvisited_neighbors};
use crate::control::{Interrupt, RunOptions};
use crate::errors::AlgorithmError;
use crate::grid::Label;
use crate::grid::observable::ObservableGridGraph;


/// Largest grid the recursive generator accepts unless told otherwise
pub const DEFAULT_RECURSION_LIMIT: usize = 2048;


/// Randomized depth-first search using the call stack
/// Recursion depth grows with the number of cells, grids above the limit are refused
/// up front with [`AlgorithmError::GridTooLarge`].
pub struct RecursiveDfs {
    rng: StdRng,
    interrupt: Interrupt,
    limit: usize,
}

impl RecursiveDfs {

    pub fn new(options: &RunOptions) -> Self {
        Self {
            rng: options.rng(),
            interrupt: options.interrupt.clone(),
            limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    fn visit(&mut self, grid: &mut ObservableGridGraph, cell: usize) -> Result<(), AlgorithmError> {
        self.interrupt.check()?;

        let mut candidates = Vec::new();
        unvisited_neighbors(grid, cell, &mut candidates);
        candidates.shuffle(&mut self.rng);

        for next in candidates {
            // may have been reached by a deeper call meanwhile
            if grid.label(next) != Label::Unvisited {
                continue;
            }
            carve(grid, cell, next)?;
            self.visit(grid, next)?;
        }
        grid.set_label(cell, Label::Completed);
        Ok(())
    }
}

impl MazeGenerator for RecursiveDfs {

    fn info(&self) -> GeneratorInfo {
        GeneratorKind::RecursiveDfs.info()
    }

    fn create_maze(&mut self, grid: &mut ObservableGridGraph, start_col: usize, start_row: usize) -> Result<(), AlgorithmError> {
        let info = self.info();
        if grid.num_vertices() > self.limit {
            warn!("{} refused: {} cells above limit {}", info.name, grid.num_vertices(), self.limit);
            return Err(AlgorithmError::GridTooLarge {
                cells: grid.num_vertices(),
                limit: self.limit,
            });
        }

        let start = begin(&info, grid, start_col, start_row, &self.interrupt)?;
        grid.set_label(start, Label::Visited);
        self.visit(grid, start)?;
        finish(&info, grid);
        Ok(())
    }
}


/// Which active cell a growing tree extends next
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrowingTreePolicy {
    /// Oldest cell, long straight corridors
    First,
    /// Newest cell, the same as an iterative randomized DFS
    Last,
    Random,
    /// Newest or random with even odds
    LastOrRandom,
}


/// Growing tree
/// Keeps a list of active cells. The selected cell is extended into a random
/// unvisited neighbor, or retired once it has none left.
pub struct GrowingTree {
    kind: GeneratorKind,
    policy: GrowingTreePolicy,
    rng: StdRng,
    interrupt: Interrupt,
}

impl GrowingTree {

    pub fn new(kind: GeneratorKind, policy: GrowingTreePolicy, options: &RunOptions) -> Self {
        Self {
            kind,
            policy,
            rng: options.rng(),
            interrupt: options.interrupt.clone(),
        }
    }

    fn select(&mut self, len: usize) -> usize {
        match self.policy {
            GrowingTreePolicy::First => 0,
            GrowingTreePolicy::Last => len - 1,
            GrowingTreePolicy::Random => self.rng.random_range(0..len),
            GrowingTreePolicy::LastOrRandom => {
                if self.rng.random_bool(0.5) {
                    len - 1
                } else {
                    self.rng.random_range(0..len)
                }
            }
        }
    }
}

impl MazeGenerator for GrowingTree {

    fn info(&self) -> GeneratorInfo {
        self.kind.info()
    }

    fn create_maze(&mut self, grid: &mut ObservableGridGraph, start_col: usize, start_row: usize) -> Result<(), AlgorithmError> {
        let info = self.info();
        let start = begin(&info, grid, start_col, start_row, &self.interrupt)?;
        grid.set_label(start, Label::Visited);

        let mut active = vec![start];
        let mut candidates = Vec::with_capacity(grid.topology().max_degree());

        while !active.is_empty() {
            self.interrupt.check()?;

            let i = self.select(active.len());
            let cell = active[i];
            unvisited_neighbors(grid, cell, &mut candidates);

            match candidates.choose(&mut self.rng) {
                Some(&next) => {
                    trace!("{}: {cell} -> {next}", info.name);
                    carve(grid, cell, next)?;
                    active.push(next);
                }
                None => {
                    active.remove(i);
                    grid.set_label(cell, Label::Completed);
                }
            }
        }

        finish(&info, grid);
        Ok(())
    }
}


/// Randomized breadth-first traversal
/// Each dequeued cell is joined to all of its unvisited neighbors, in random order.
pub struct RandomBfs {
    rng: StdRng,
    interrupt: Interrupt,
}

impl RandomBfs {

    pub fn new(options: &RunOptions) -> Self {
        Self { rng: options.rng(), interrupt: options.interrupt.clone() }
    }
}

impl MazeGenerator for RandomBfs {

    fn info(&self) -> GeneratorInfo {
        GeneratorKind::RandomBfs.info()
    }

    fn create_maze(&mut self, grid: &mut ObservableGridGraph, start_col: usize, start_row: usize) -> Result<(), AlgorithmError> {
        let info = self.info();
        let start = begin(&info, grid, start_col, start_row, &self.interrupt)?;
        grid.set_label(start, Label::Visited);

        let mut queue = VecDeque::from([start]);
        let mut candidates = Vec::with_capacity(grid.topology().max_degree());

        while let Some(cell) = queue.pop_front() {
            self.interrupt.check()?;

            unvisited_neighbors(grid, cell, &mut candidates);
            candidates.shuffle(&mut self.rng);
            for &next in candidates.iter() {
                carve(grid, cell, next)?;
                queue.push_back(next);
            }
            grid.set_label(cell, Label::Completed);
        }

        finish(&info, grid);
        Ok(())
    }
}


/// Hunt-and-kill
/// Random walk into unvisited cells. At a dead end, scan the grid row by row for an
/// unvisited cell next to the tree, join it and walk on from there.
pub struct HuntAndKill {
    rng: StdRng,
    interrupt: Interrupt,
}

impl HuntAndKill {

    pub fn new(options: &RunOptions) -> Self {
        Self { rng: options.rng(), interrupt: options.interrupt.clone() }
    }

    /// Returns (tree cell, unvisited cell) to join
    /// Cells before `from` are known to be in the tree.
    fn hunt(&mut self, grid: &ObservableGridGraph, from: &mut usize) -> Option<(usize, usize)> {
        let mut in_tree = Vec::with_capacity(grid.topology().max_degree());

        for cell in *from..grid.num_vertices() {
            if grid.label(cell) != Label::Unvisited {
                if cell == *from {
                    *from += 1;
                }
                continue;
            }
            in_tree.clear();
            in_tree.extend(grid.neighbors(cell).filter(|&next| grid.label(next) != Label::Unvisited));
            if let Some(&parent) = in_tree.choose(&mut self.rng) {
                return Some((parent, cell));
            }
        }
        None
    }
}

impl MazeGenerator for HuntAndKill {

    fn info(&self) -> GeneratorInfo {
        GeneratorKind::HuntAndKill.info()
    }

    fn create_maze(&mut self, grid: &mut ObservableGridGraph, start_col: usize, start_row: usize) -> Result<(), AlgorithmError> {
        let info = self.info();
        let start = begin(&info, grid, start_col, start_row, &self.interrupt)?;
        grid.set_label(start, Label::Visited);

        let mut current = start;
        let mut scanned = 0;
        let mut candidates = Vec::with_capacity(grid.topology().max_degree());

        loop {
            self.interrupt.check()?;

            unvisited_neighbors(grid, current, &mut candidates);
            if let Some(&next) = candidates.choose(&mut self.rng) {
                carve(grid, current, next)?;
                current = next;
                continue;
            }

            grid.set_label(current, Label::Completed);
            match self.hunt(grid, &mut scanned) {
                Some((parent, cell)) => {
                    trace!("{}: hunted {cell} next to {parent}", info.name);
                    carve(grid, parent, cell)?;
                    current = cell;
                }
                None => break,
            }
        }

        finish(&info, grid);
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::{empty, run};
    use crate::grid::Topology;
    use crate::grid::analysis::is_spanning_tree;

    #[test]
    fn test_recursive_dfs_refuses_large_grids() {
        let mut grid = empty(5, 5, Topology::FourNeighbors);
        let mut generator = RecursiveDfs::new(&RunOptions::seeded(1)).with_limit(20);
        let result = generator.create_maze(&mut grid, 0, 0);
        assert_eq!(result, Err(AlgorithmError::GridTooLarge { cells: 25, limit: 20 }));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_recursive_dfs_deep_corridors() {
        let mut grid = empty(40, 25, Topology::FourNeighbors);
        RecursiveDfs::new(&RunOptions::seeded(2)).create_maze(&mut grid, 0, 0).unwrap();
        assert!(is_spanning_tree(&grid));
    }

    #[test]
    fn test_growing_tree_first_starts_with_a_corridor() {
        // the oldest active cell is the start cell until it is walled in,
        // so every neighbor of the start ends up joined to it
        let grid = run(GeneratorKind::GrowingTreeFirst, 4, 5, 5, Topology::FourNeighbors);
        assert_eq!(grid.degree(0), 2);
    }

    #[test]
    fn test_random_bfs_joins_every_neighbor_of_start() {
        let mut grid = empty(5, 5, Topology::FourNeighbors);
        RandomBfs::new(&RunOptions::seeded(6)).create_maze(&mut grid, 2, 2).unwrap();
        assert_eq!(grid.degree(grid.cell(2, 2)), 4);
        assert!(is_spanning_tree(&grid));
    }

    #[test]
    fn test_hunt_and_kill_from_corner() {
        let mut grid = empty(12, 9, Topology::EightNeighbors);
        HuntAndKill::new(&RunOptions::seeded(10)).create_maze(&mut grid, 11, 8).unwrap();
        assert!(is_spanning_tree(&grid));
    }

    #[test]
    fn test_growing_tree_policies_pick_inside_bounds() {
        let options = RunOptions::seeded(4);
        for policy in [GrowingTreePolicy::First, GrowingTreePolicy::Last, GrowingTreePolicy::Random, GrowingTreePolicy::LastOrRandom] {
            let mut generator = GrowingTree::new(GeneratorKind::GrowingTreeRandom, policy, &options);
            for len in 1..10 {
                assert!(generator.select(len) < len);
            }
        }
    }
}
