use log::{debug, warn};

use super::dijkstra::{Expansion, build_cost_graph};
use super::observer::conclude;
use super::path::shortest_path;
use super::{GraphSearch, Path, SearchObserver, check_endpoints};
use crate::control::Interrupt;
use crate::errors::AlgorithmError;
use crate::geometry::Heuristic;
use crate::grid::GridGraph;


/// A* Algorithm
/// https://en.wikipedia.org/wiki/A*_search_algorithm
/// The heuristic must be admissible (never overestimate the true cost to reach the goal)
/// on the grid's topology, otherwise the search is refused.
pub struct AStarSearch {
    heuristic: Heuristic,
    interrupt: Interrupt,
}

impl AStarSearch {

    pub fn new(heuristic: Heuristic, interrupt: Interrupt) -> Self {
        Self { heuristic, interrupt }
    }
}

impl GraphSearch for AStarSearch {

    fn name(&self) -> &'static str {
        "astar"
    }

    fn search(&mut self, grid: &GridGraph, source: usize, target: usize, observer: &mut dyn SearchObserver) -> Result<Path, AlgorithmError> {
        check_endpoints(grid, source, target)?;
        check_admissible(self.heuristic, grid)?;
        debug!("astar ({}) from {source} to {target}", self.heuristic.name());

        let heuristic = self.heuristic;
        let (node_map, goal_index) = build_cost_graph(
            grid,
            source,
            |cell| heuristic.estimate(grid, cell, target),
            |cell| cell == target,
            Expansion::Relaxing,
            &self.interrupt,
            observer,
        )?;

        let path = goal_index
            .map(|index| Path::new(shortest_path(&node_map, index)))
            .unwrap_or_default();
        Ok(conclude(observer, path))
    }
}


/// Greedy best-first search
/// Always expands the frontier cell that looks closest to the target, cost so far is ignored.
/// Informed but not optimal.
pub struct BestFirstSearch {
    heuristic: Heuristic,
    interrupt: Interrupt,
}

impl BestFirstSearch {

    pub fn new(heuristic: Heuristic, interrupt: Interrupt) -> Self {
        Self { heuristic, interrupt }
    }
}

impl GraphSearch for BestFirstSearch {

    fn name(&self) -> &'static str {
        "best-first"
    }

    fn search(&mut self, grid: &GridGraph, source: usize, target: usize, observer: &mut dyn SearchObserver) -> Result<Path, AlgorithmError> {
        check_endpoints(grid, source, target)?;
        debug!("best-first ({}) from {source} to {target}", self.heuristic.name());

        let heuristic = self.heuristic;
        let (node_map, goal_index) = build_cost_graph(
            grid,
            source,
            |cell| heuristic.estimate(grid, cell, target),
            |cell| cell == target,
            Expansion::Greedy,
            &self.interrupt,
            observer,
        )?;

        let path = goal_index
            .map(|index| Path::new(shortest_path(&node_map, index)))
            .unwrap_or_default();
        Ok(conclude(observer, path))
    }
}


pub(crate) fn check_admissible(heuristic: Heuristic, grid: &GridGraph) -> Result<(), AlgorithmError> {
    if heuristic.is_admissible_for(grid.topology()) {
        Ok(())
    } else {
        warn!("{} heuristic rejected on {:?} grid", heuristic.name(), grid.topology());
        Err(AlgorithmError::InadmissibleHeuristic {
            heuristic: heuristic.name(),
            topology: grid.topology(),
        })
    }
}
