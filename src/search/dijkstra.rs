use std::{cmp::Ordering, collections::BinaryHeap};

use indexmap::map::Entry::{Occupied, Vacant};
use log::debug;
use num_traits::Zero;

use super::observer::conclude;
use super::path::shortest_path;
use super::{GraphNodeMap, GraphSearch, Path, SearchObserver, check_endpoints};
use crate::control::Interrupt;
use crate::errors::AlgorithmError;
use crate::geometry::Cost;
use crate::grid::GridGraph;


/// Identify the shortest path using Dijkstra's Algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// Edge costs are the metric step lengths of the grid
pub struct DijkstraSearch {
    interrupt: Interrupt,
}

impl DijkstraSearch {

    pub fn new(interrupt: Interrupt) -> Self {
        Self { interrupt }
    }
}

impl GraphSearch for DijkstraSearch {

    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn search(&mut self, grid: &GridGraph, source: usize, target: usize, observer: &mut dyn SearchObserver) -> Result<Path, AlgorithmError> {
        check_endpoints(grid, source, target)?;
        debug!("dijkstra from {source} to {target}");

        let (node_map, goal_index) = build_cost_graph(
            grid,
            source,
            |_| Cost::zero(),
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


/// How the priority engine treats cells it has seen before
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Expansion {
    /// Reopen a cell whenever a cheaper path to it shows up (Dijkstra, A*)
    Relaxing,
    /// First discovery wins and only the heuristic orders the queue (greedy best-first)
    Greedy,
}


/// Traverses the grid in order of priority = cost + heuristic(cell), or heuristic(cell) alone when greedy
/// Returns a map of cells with their smallest known costs along with the index of the goal cell
pub(crate) fn build_cost_graph<H, G>(
    grid: &GridGraph,
    start: usize,
    heuristic_fn: H,
    goal_fn: G,
    expansion: Expansion,
    interrupt: &Interrupt,
    observer: &mut dyn SearchObserver,
) -> Result<(GraphNodeMap<Cost>, Option<usize>), AlgorithmError>
where
    H: Fn(usize) -> Cost,
    G: Fn(usize) -> bool,
{
    // Open list, sorted by f_cost
    let mut open_list: OpenList = OpenList::default();

    // Evaluated cells with (parent_index, cost), used to find the final path
    let mut node_map: GraphNodeMap<Cost> = GraphNodeMap::default();

    let start_index = node_map.insert_full(start, (usize::MAX, Zero::zero())).0;
    open_list.push(start_index, Zero::zero(), heuristic_fn(start));
    observer.on_frontier_add(start);

    while let Some(QueueNode { index, cost, .. }) = open_list.pop() {
        interrupt.check()?;

        // fetch current best cost for the cell
        let Some((&cell, &(_, c))) = node_map.get_index(index) else {
            continue;
        };

        // A cheaper path to this cell was already expanded
        if cost > c {
            continue;
        }
        observer.on_expand(cell, c);

        if goal_fn(cell) {
            return Ok((node_map, Some(index)));
        }

        for neighbor in grid.adjacent(cell) {
            let new_cost = c + grid.edge_cost(cell, neighbor);

            let neighbor_index = match node_map.entry(neighbor) {
                Vacant(e) => {
                    let i = e.index();
                    e.insert((index, new_cost));
                    i
                }
                Occupied(mut e) => {
                    if expansion == Expansion::Relaxing && e.get().1 > new_cost {
                        // We've found a better path to this neighbor
                        e.insert((index, new_cost));
                        e.index()
                    } else {
                        continue;
                    }
                }
            };

            observer.on_edge_traversed(cell, neighbor);
            observer.on_frontier_add(neighbor);
            let h_cost = heuristic_fn(neighbor);
            let priority = match expansion {
                Expansion::Relaxing => new_cost + h_cost,
                Expansion::Greedy => h_cost,
            };
            open_list.push(neighbor_index, new_cost, priority);
        }
    }
    Ok((node_map, None))
}


/// Priority queue entry
/// - for ordering we only need the priority and a way to identify the cell
/// - seq breaks ties first-in first-out
#[derive(Debug)]
pub(crate) struct QueueNode {
    pub index: usize, // index in the node map
    pub cost: Cost,   // cost to reach the cell when queued
    f_cost: Cost,     // priority
    seq: u64,
}

impl Ord for QueueNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f_cost.cmp(&self.f_cost).then_with(|| other.seq.cmp(&self.seq))
    }
}
impl PartialOrd for QueueNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for QueueNode {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost && self.seq == other.seq
    }
}
impl Eq for QueueNode {}


/// Min-heap on f_cost with FIFO tie-breaking
#[derive(Debug, Default)]
pub(crate) struct OpenList {
    heap: BinaryHeap<QueueNode>,
    seq: u64,
}

impl OpenList {

    pub fn push(&mut self, index: usize, cost: Cost, f_cost: Cost) {
        self.heap.push(QueueNode { index, cost, f_cost, seq: self.seq });
        self.seq += 1;
    }

    pub fn pop(&mut self) -> Option<QueueNode> {
        self.heap.pop()
    }

    /// Cost of the cheapest queued entry
    pub fn min_cost(&self) -> Option<Cost> {
        self.heap.peek().map(|node| node.cost)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Label, Topology};
    use crate::search::NoOpSearchObserver;
    use crate::search::test_support::open;

    #[test]
    fn test_open_list_ties_are_fifo() {
        let mut open_list = OpenList::default();
        open_list.push(7, Cost(1.0), Cost(2.0));
        open_list.push(3, Cost(1.0), Cost(2.0));
        open_list.push(5, Cost(0.0), Cost(1.0));

        assert_eq!(open_list.pop().map(|n| n.index), Some(5));
        assert_eq!(open_list.pop().map(|n| n.index), Some(7));
        assert_eq!(open_list.pop().map(|n| n.index), Some(3));
        assert!(open_list.is_empty());
    }

    #[test]
    fn test_build_cost_graph_full_costs() {
        let grid = open(3, 3);
        let (node_map, goal) = build_cost_graph(
            &grid,
            0,
            |_| Cost::zero(),
            |_| false,
            Expansion::Relaxing,
            &Interrupt::new(),
            &mut NoOpSearchObserver,
        ).unwrap();

        assert_eq!(goal, None);
        assert_eq!(node_map.len(), 9);
        assert_eq!(node_map.get(&8).map(|&(_, c)| c), Some(Cost(4.0)));
        assert_eq!(node_map.get(&4).map(|&(_, c)| c), Some(Cost(2.0)));
    }

    #[test]
    fn test_dijkstra_prefers_diagonals() {
        let grid = GridGraph::full(4, 4, Topology::EightNeighbors, Label::Unvisited).unwrap();
        let mut dijkstra = DijkstraSearch::new(Interrupt::new());
        let path = dijkstra.find_path(&grid, 0, 15).unwrap();
        assert_eq!(path.cells(), &[0, 5, 10, 15]);
        assert!((path.cost(&grid).value() - 3.0 * std::f64::consts::SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn test_dijkstra_routes_around_walls() {
        // left column only joins the rest of the grid along the bottom row
        let mut grid = open(3, 3);
        grid.remove_edge(0, 1).unwrap();
        grid.remove_edge(3, 4).unwrap();
        let mut dijkstra = DijkstraSearch::new(Interrupt::new());
        let path = dijkstra.find_path(&grid, 0, 2).unwrap();
        assert_eq!(path.num_steps(), 6);
        assert!(path.is_valid_in(&grid));
    }
}
