use num_traits::Zero;

use super::GraphNodeMap;
use crate::geometry::Cost;
use crate::grid::GridGraph;


/// Ordered cells from source to target, empty when the target is unreachable
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    cells: Vec<usize>,
}

impl Path {

    pub fn new(cells: Vec<usize>) -> Self {
        Self { cells }
    }

    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<usize> {
        self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter().copied()
    }

    /// Number of cells, including both ends
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of edges walked
    pub fn num_steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn source(&self) -> Option<usize> {
        self.cells.first().copied()
    }

    pub fn target(&self) -> Option<usize> {
        self.cells.last().copied()
    }

    /// Sum of the metric edge costs along the path
    pub fn cost(&self, grid: &GridGraph) -> Cost {
        self.cells
            .windows(2)
            .fold(Cost::zero(), |acc, pair| acc + grid.edge_cost(pair[0], pair[1]))
    }

    /// Consecutive cells are joined by edges of the grid
    pub fn is_valid_in(&self, grid: &GridGraph) -> bool {
        self.cells.iter().all(|&cell| grid.is_valid(cell))
            && self.cells.windows(2).all(|pair| grid.has_edge(pair[0], pair[1]))
    }
}

impl IntoIterator for Path {
    type Item = usize;
    type IntoIter = std::vec::IntoIter<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}


/// Construct the path from the root of the node map to the goal node
/// node_map: GraphNodeMap<C> - map of cells with their parent index and cost
/// goal_index: usize - index of the goal cell in the node_map
pub(crate) fn shortest_path<C>(node_map: &GraphNodeMap<C>, goal_index: usize) -> Vec<usize> {

    let mut path = Vec::new();
    let mut current_index = goal_index;

    // Trace back from goal to start
    while current_index != usize::MAX {
        match node_map.get_index(current_index) {
            Some((&cell, &(parent_index, _))) => {
                path.push(cell);
                current_index = parent_index;
            }
            None => break,
        }
    }

    // The path is in reverse order, so reverse it
    path.reverse();
    path
}

/// Path from the root of the node map to a cell the map contains
pub(crate) fn path_to<C>(node_map: &GraphNodeMap<C>, cell: usize) -> Vec<usize> {
    match node_map.get_index_of(&cell) {
        Some(index) => shortest_path(node_map, index),
        None => Vec::new(),
    }
}
