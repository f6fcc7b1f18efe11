use std::collections::VecDeque;

use log::debug;

use super::observer::conclude;
use super::path::shortest_path;
use super::{GraphNodeMap, GraphSearch, Path, SearchObserver, check_endpoints};
use crate::control::Interrupt;
use crate::errors::{AlgorithmError, GridError};
use crate::geometry::Cost;
use crate::grid::GridGraph;


/// Breadth-first search
/// https://en.wikipedia.org/wiki/Breadth-first_search
/// FIFO frontier, returns a path with the fewest edges
pub struct BreadthFirstSearch {
    interrupt: Interrupt,
}

impl BreadthFirstSearch {

    pub fn new(interrupt: Interrupt) -> Self {
        Self { interrupt }
    }
}

impl GraphSearch for BreadthFirstSearch {

    fn name(&self) -> &'static str {
        "bfs"
    }

    fn search(&mut self, grid: &GridGraph, source: usize, target: usize, observer: &mut dyn SearchObserver) -> Result<Path, AlgorithmError> {
        check_endpoints(grid, source, target)?;
        debug!("bfs from {source} to {target}");

        // cost is the number of edges from the source
        let mut nodes: GraphNodeMap<usize> = GraphNodeMap::default();
        let start_index = nodes.insert_full(source, (usize::MAX, 0)).0;

        let mut queue = VecDeque::from([start_index]);
        observer.on_frontier_add(source);

        while let Some(index) = queue.pop_front() {
            self.interrupt.check()?;

            let Some((&cell, &(_, depth))) = nodes.get_index(index) else {
                continue;
            };
            observer.on_expand(cell, Cost(depth as f64));

            if cell == target {
                let path = Path::new(shortest_path(&nodes, index));
                debug!("bfs reached {target} in {} steps", path.num_steps());
                return Ok(conclude(observer, path));
            }

            for next in grid.adjacent(cell) {
                if nodes.contains_key(&next) {
                    continue;
                }
                let next_index = nodes.insert_full(next, (index, depth + 1)).0;
                observer.on_edge_traversed(cell, next);
                observer.on_frontier_add(next);
                queue.push_back(next_index);
            }
        }

        debug!("bfs exhausted {} cells without reaching {target}", nodes.len());
        Ok(conclude(observer, Path::unreachable()))
    }
}


/// Flood fill: edge distance from the source to every cell, None if unreachable
pub fn flood_fill(grid: &GridGraph, source: usize) -> Result<Vec<Option<usize>>, GridError> {
    grid.check_cell(source)?;

    let mut distances = vec![None; grid.num_vertices()];
    distances[source] = Some(0);
    let mut queue = VecDeque::from([source]);

    while let Some(cell) = queue.pop_front() {
        let depth = distances[cell].unwrap_or_default();
        for next in grid.adjacent(cell) {
            if distances[next].is_none() {
                distances[next] = Some(depth + 1);
                queue.push_back(next);
            }
        }
    }
    Ok(distances)
}
