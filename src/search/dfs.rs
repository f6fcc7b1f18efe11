use log::debug;

use super::observer::conclude;
use super::path::shortest_path;
use super::{GraphNodeMap, GraphSearch, Path, SearchObserver, check_endpoints};
use crate::control::Interrupt;
use crate::errors::AlgorithmError;
use crate::geometry::{Cost, Heuristic};
use crate::grid::GridGraph;


/// Depth-first search with an explicit stack
/// Neighbors are pushed in reverse so the first enumerated neighbor is explored first.
/// The path found is in general not the shortest.
pub struct DepthFirstSearch {
    interrupt: Interrupt,
}

impl DepthFirstSearch {

    pub fn new(interrupt: Interrupt) -> Self {
        Self { interrupt }
    }
}

impl GraphSearch for DepthFirstSearch {

    fn name(&self) -> &'static str {
        "dfs"
    }

    fn search(&mut self, grid: &GridGraph, source: usize, target: usize, observer: &mut dyn SearchObserver) -> Result<Path, AlgorithmError> {
        check_endpoints(grid, source, target)?;
        depth_first(grid, source, target, &self.interrupt, observer, |children| children.reverse())
    }
}


/// Hill climbing: depth-first, always continuing with the child closest to the target
/// Greedy, no optimality guarantee
pub struct HillClimbingSearch {
    heuristic: Heuristic,
    interrupt: Interrupt,
}

impl HillClimbingSearch {

    pub fn new(heuristic: Heuristic, interrupt: Interrupt) -> Self {
        Self { heuristic, interrupt }
    }
}

impl GraphSearch for HillClimbingSearch {

    fn name(&self) -> &'static str {
        "hill-climbing"
    }

    fn search(&mut self, grid: &GridGraph, source: usize, target: usize, observer: &mut dyn SearchObserver) -> Result<Path, AlgorithmError> {
        check_endpoints(grid, source, target)?;
        let heuristic = self.heuristic;

        // best child must end up on top of the stack, so sort worst first
        // stable sort: on ties the first enumerated child stays on top
        depth_first(grid, source, target, &self.interrupt, observer, |children| {
            children.reverse();
            children.sort_by(|a, b| {
                heuristic.estimate(grid, *b, target).cmp(&heuristic.estimate(grid, *a, target))
            });
        })
    }
}


/// Stack based traversal shared by DFS and hill climbing
/// order_children arranges the unvisited children so the one to explore next is last.
fn depth_first<F>(
    grid: &GridGraph,
    source: usize,
    target: usize,
    interrupt: &Interrupt,
    observer: &mut dyn SearchObserver,
    order_children: F,
) -> Result<Path, AlgorithmError>
where
    F: Fn(&mut Vec<usize>),
{
    debug!("depth-first search from {source} to {target}");

    // cost is the depth in the search tree
    let mut nodes: GraphNodeMap<usize> = GraphNodeMap::default();

    // (cell, parent_index, depth) - a cell may sit on the stack more than once
    let mut stack: Vec<(usize, usize, usize)> = vec![(source, usize::MAX, 0)];
    observer.on_frontier_add(source);

    let mut children = Vec::with_capacity(grid.topology().max_degree());

    while let Some((cell, parent_index, depth)) = stack.pop() {
        interrupt.check()?;

        if nodes.contains_key(&cell) {
            continue;
        }
        let index = nodes.insert_full(cell, (parent_index, depth)).0;
        if let Some((&parent, _)) = nodes.get_index(parent_index) {
            observer.on_edge_traversed(parent, cell);
        }
        observer.on_expand(cell, Cost(depth as f64));

        if cell == target {
            let path = Path::new(shortest_path(&nodes, index));
            return Ok(conclude(observer, path));
        }

        children.clear();
        children.extend(grid.adjacent(cell).filter(|next| !nodes.contains_key(next)));
        order_children(&mut children);

        for &next in children.iter() {
            observer.on_frontier_add(next);
            stack.push((next, index, depth + 1));
        }
    }

    Ok(conclude(observer, Path::unreachable()))
}
