//! Path searches over the edges of a grid
//!
//! Every search takes the grid read-only and returns a [`Path`] that is empty
//! iff the target cannot be reached. Progress is reported to a
//! [`SearchObserver`] as the run goes.

pub mod a_star;
pub mod bfs;
pub mod bidirectional;
pub mod dfs;
pub mod dijkstra;
pub mod iddfs;
mod observer;
mod path;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::collections::FxIndexMap;
use crate::control::RunOptions;
use crate::errors::{AlgorithmError, ConfigError};
use crate::geometry::Heuristic;
use crate::grid::GridGraph;

pub use a_star::{AStarSearch, BestFirstSearch};
pub use bfs::{BreadthFirstSearch, flood_fill};
pub use bidirectional::{BidiAStarSearch, BidiBreadthFirstSearch, BidiDijkstraSearch};
pub use dfs::{DepthFirstSearch, HillClimbingSearch};
pub use dijkstra::DijkstraSearch;
pub use iddfs::IterativeDeepeningSearch;
pub use observer::{NoOpSearchObserver, SearchObserver, SearchStep, SearchTrace};
pub use path::Path;

/// Type alias for the node map used by the searches
/// Keys are cell ids, the tuple contains (parent_index, cost) where:
/// - parent_index is the index of the parent cell in the map, usize::MAX for the root
/// - cost is the total cost to reach this cell from the root
pub type GraphNodeMap<C> = FxIndexMap<usize, (usize, C)>;


pub trait GraphSearch {

    fn name(&self) -> &'static str;

    /// Run the search, reporting each step to the observer
    fn search(
        &mut self,
        grid: &GridGraph,
        source: usize,
        target: usize,
        observer: &mut dyn SearchObserver,
    ) -> Result<Path, AlgorithmError>;

    fn find_path(&mut self, grid: &GridGraph, source: usize, target: usize) -> Result<Path, AlgorithmError> {
        self.search(grid, source, target, &mut NoOpSearchObserver)
    }
}


/// Capabilities of a search, checked instead of tags
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchInfo {
    pub kind: SearchKind,
    pub name: &'static str,
    /// Guided by a heuristic
    pub informed: bool,
    /// Returns minimum cost paths
    pub optimal: bool,
    pub slow: bool,
}


#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchKind {
    #[default]
    #[serde(rename = "bfs")]
    Bfs,
    #[serde(rename = "dfs")]
    Dfs,
    #[serde(rename = "iddfs")]
    Iddfs,
    #[serde(rename = "dijkstra")]
    Dijkstra,
    #[serde(rename = "astar")]
    AStar,
    #[serde(rename = "best-first")]
    BestFirst,
    #[serde(rename = "hill-climbing")]
    HillClimbing,
    #[serde(rename = "bidi-bfs")]
    BidiBfs,
    #[serde(rename = "bidi-dijkstra")]
    BidiDijkstra,
    #[serde(rename = "bidi-astar")]
    BidiAStar,
}

impl SearchKind {
    pub const ALL: [SearchKind; 10] = [
        SearchKind::Bfs,
        SearchKind::Dfs,
        SearchKind::Iddfs,
        SearchKind::Dijkstra,
        SearchKind::AStar,
        SearchKind::BestFirst,
        SearchKind::HillClimbing,
        SearchKind::BidiBfs,
        SearchKind::BidiDijkstra,
        SearchKind::BidiAStar,
    ];

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn info(self) -> SearchInfo {
        let (name, informed, optimal, slow) = match self {
            SearchKind::Bfs => ("bfs", false, false, false),
            SearchKind::Dfs => ("dfs", false, false, false),
            SearchKind::Iddfs => ("iddfs", false, false, true),
            SearchKind::Dijkstra => ("dijkstra", false, true, false),
            SearchKind::AStar => ("astar", true, true, false),
            SearchKind::BestFirst => ("best-first", true, false, false),
            SearchKind::HillClimbing => ("hill-climbing", true, false, false),
            SearchKind::BidiBfs => ("bidi-bfs", false, false, false),
            SearchKind::BidiDijkstra => ("bidi-dijkstra", false, true, false),
            SearchKind::BidiAStar => ("bidi-astar", true, false, false),
        };
        SearchInfo { kind: self, name, informed, optimal, slow }
    }

    /// Instantiate the search; uninformed searches ignore the heuristic
    pub fn create(self, options: &RunOptions, heuristic: Heuristic) -> Box<dyn GraphSearch> {
        let interrupt = options.interrupt.clone();
        match self {
            SearchKind::Bfs => Box::new(BreadthFirstSearch::new(interrupt)),
            SearchKind::Dfs => Box::new(DepthFirstSearch::new(interrupt)),
            SearchKind::Iddfs => Box::new(IterativeDeepeningSearch::new(interrupt)),
            SearchKind::Dijkstra => Box::new(DijkstraSearch::new(interrupt)),
            SearchKind::AStar => Box::new(AStarSearch::new(heuristic, interrupt)),
            SearchKind::BestFirst => Box::new(BestFirstSearch::new(heuristic, interrupt)),
            SearchKind::HillClimbing => Box::new(HillClimbingSearch::new(heuristic, interrupt)),
            SearchKind::BidiBfs => Box::new(BidiBreadthFirstSearch::new(interrupt)),
            SearchKind::BidiDijkstra => Box::new(BidiDijkstraSearch::new(interrupt)),
            SearchKind::BidiAStar => Box::new(BidiAStarSearch::new(heuristic, interrupt)),
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ConfigError::UnknownAlgorithm(s.to_string()))
    }
}


/// Reject endpoints outside the grid before any work is done
pub(crate) fn check_endpoints(grid: &GridGraph, source: usize, target: usize) -> Result<(), AlgorithmError> {
    grid.check_cell(source)?;
    grid.check_cell(target)?;
    Ok(())
}


#[cfg(test)]
pub(crate) mod test_support {
    use crate::grid::{GridGraph, Label, Topology};

    /// 5x5 grid shaped like a comb: an open top row with dead-end teeth hanging down
    ///
    /// ```text
    /// 0  1  2  3  4
    /// |  |  |  |  |
    /// 5  6  7  8  9
    /// ...
    /// ```
    pub fn comb() -> GridGraph {
        let mut grid = GridGraph::empty(5, 5, Topology::FourNeighbors, Label::Unvisited).unwrap();
        for col in 0..4 {
            grid.add_edge(grid.cell(col, 0), grid.cell(col + 1, 0)).unwrap();
        }
        for col in 0..5 {
            for row in 0..4 {
                grid.add_edge(grid.cell(col, row), grid.cell(col, row + 1)).unwrap();
            }
        }
        grid
    }

    /// Full 4-neighbor grid, many shortest paths
    pub fn open(cols: usize, rows: usize) -> GridGraph {
        GridGraph::full(cols, rows, Topology::FourNeighbors, Label::Unvisited).unwrap()
    }

    /// Two halves with no edge between them
    pub fn split(cols: usize, rows: usize) -> GridGraph {
        let mut grid = open(cols, rows);
        let mid = cols / 2;
        for row in 0..rows {
            grid.remove_edge(grid.cell(mid - 1, row), grid.cell(mid, row)).unwrap();
        }
        grid
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Label, Topology};

    #[test]
    fn test_search_names_round_trip() {
        for kind in SearchKind::ALL {
            assert_eq!(kind.name().parse::<SearchKind>().unwrap(), kind);
            assert_eq!(kind.info().kind, kind);
        }
        assert!("teleport".parse::<SearchKind>().is_err());
    }

    #[test]
    fn test_every_search_on_comb() {
        let grid = test_support::comb();
        let options = RunOptions::default();
        let source = grid.cell(0, 4);
        let target = grid.cell(4, 4);

        for kind in SearchKind::ALL {
            let mut search = kind.create(&options, Heuristic::Manhattan);
            let path = search.find_path(&grid, source, target).unwrap();
            assert!(path.is_valid_in(&grid), "{kind} returned a broken path");
            assert_eq!(path.source(), Some(source));
            assert_eq!(path.target(), Some(target));
            // the comb is a tree, every search must take the only path
            assert_eq!(path.num_steps(), 12, "{kind}");
        }
    }

    #[test]
    fn test_every_search_reports_unreachable() {
        let grid = test_support::split(6, 4);
        let options = RunOptions::default();
        for kind in SearchKind::ALL {
            let mut search = kind.create(&options, Heuristic::Euclidean);
            let mut trace = SearchTrace::new();
            let path = search.search(&grid, 0, grid.cell(5, 3), &mut trace).unwrap();
            assert!(path.is_empty(), "{kind}");
            assert_eq!(trace.steps().last(), Some(&SearchStep::NoPath), "{kind}");
        }
    }

    #[test]
    fn test_every_search_source_equals_target() {
        let grid = test_support::open(4, 4);
        let options = RunOptions::default();
        for kind in SearchKind::ALL {
            let path = kind.create(&options, Heuristic::Euclidean).find_path(&grid, 5, 5).unwrap();
            assert_eq!(path.cells(), &[5], "{kind}");
        }
    }

    #[test]
    fn test_every_search_rejects_invalid_cells() {
        let grid = GridGraph::empty(3, 3, Topology::FourNeighbors, Label::Unvisited).unwrap();
        let options = RunOptions::default();
        for kind in SearchKind::ALL {
            let result = kind.create(&options, Heuristic::Euclidean).find_path(&grid, 0, 9);
            assert!(matches!(result, Err(AlgorithmError::Grid(_))), "{kind}");
        }
    }

    #[test]
    fn test_every_search_honours_interrupt() {
        let grid = test_support::open(8, 8);
        let options = RunOptions::default();
        options.interrupt.interrupt();
        for kind in SearchKind::ALL {
            let result = kind.create(&options, Heuristic::Euclidean).find_path(&grid, 0, 63);
            assert_eq!(result, Err(AlgorithmError::Interrupted), "{kind}");
        }
    }
}
