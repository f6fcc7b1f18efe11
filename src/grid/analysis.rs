//! Structural checks used to verify generator output

use std::collections::VecDeque;

use super::GridGraph;
use crate::collections::Partition;


/// Number of connected components over the current edge set
pub fn num_components(grid: &GridGraph) -> usize {
    let mut partition = Partition::new(grid.num_vertices());
    for (u, v) in grid.edges() {
        partition.union(u, v);
    }
    partition.num_sets()
}

/// Every cell reachable from cell 0
pub fn is_connected(grid: &GridGraph) -> bool {
    let mut seen = vec![false; grid.num_vertices()];
    let mut queue = VecDeque::from([0]);
    seen[0] = true;
    let mut count = 1;

    while let Some(cell) = queue.pop_front() {
        for next in grid.adjacent(cell) {
            if !seen[next] {
                seen[next] = true;
                count += 1;
                queue.push_back(next);
            }
        }
    }
    count == grid.num_vertices()
}

/// A forest has exactly |V| - components edges, anything above closes a cycle
pub fn has_cycle(grid: &GridGraph) -> bool {
    grid.num_edges() + num_components(grid) > grid.num_vertices()
}

/// Connected, acyclic and touching every cell
pub fn is_spanning_tree(grid: &GridGraph) -> bool {
    grid.num_edges() + 1 == grid.num_vertices() && is_connected(grid)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Label, Topology};

    #[test]
    fn test_empty_grid_components() {
        let grid = GridGraph::empty(3, 2, Topology::FourNeighbors, Label::Unvisited).unwrap();
        assert_eq!(num_components(&grid), 6);
        assert!(!is_connected(&grid));
        assert!(!has_cycle(&grid));
        assert!(!is_spanning_tree(&grid));
    }

    #[test]
    fn test_full_grid_has_cycle() {
        let grid = GridGraph::full(3, 3, Topology::FourNeighbors, Label::Unvisited).unwrap();
        assert!(is_connected(&grid));
        assert!(has_cycle(&grid));
        assert!(!is_spanning_tree(&grid));
    }

    #[test]
    fn test_snake_is_spanning_tree() {
        // boustrophedon path through a 3x3 grid
        let mut grid = GridGraph::empty(3, 3, Topology::FourNeighbors, Label::Unvisited).unwrap();
        for (u, v) in [(0, 1), (1, 2), (2, 5), (5, 4), (4, 3), (3, 6), (6, 7), (7, 8)] {
            grid.add_edge(u, v).unwrap();
        }
        assert!(is_spanning_tree(&grid));
        assert!(!has_cycle(&grid));
        assert_eq!(num_components(&grid), 1);
    }

    #[test]
    fn test_single_cell_is_spanning_tree() {
        let grid = GridGraph::empty(1, 1, Topology::EightNeighbors, Label::Unvisited).unwrap();
        assert!(is_spanning_tree(&grid));
    }
}
