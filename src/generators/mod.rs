//! Maze generators
//!
//! A generator turns a grid into a spanning tree of passages. Carving
//! generators start from a grid without edges, edge-deleting generators start
//! from a full grid. Every change goes through the [`ObservableGridGraph`] so
//! observers can animate the run.

pub mod division;
pub mod mst;
pub mod ordering;
pub mod reverse_delete;
pub mod simple;
pub mod traversal;
pub mod ust;

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::control::{Interrupt, RunOptions};
use crate::errors::{AlgorithmError, ConfigError};
use crate::grid::observable::ObservableGridGraph;
use crate::grid::{GridGraph, Label, Topology};
use crate::search::SearchKind;

pub use division::RecursiveDivision;
pub use mst::{Boruvka, Kruskal, Prim};
pub use ordering::CellOrder;
pub use reverse_delete::ReverseDelete;
pub use simple::{BinaryTree, Sidewinder};
pub use traversal::{GrowingTree, GrowingTreePolicy, HuntAndKill, RandomBfs, RecursiveDfs};
pub use ust::{AldousBroder, Wilson};


pub trait MazeGenerator {

    fn info(&self) -> GeneratorInfo;

    /// Carve a maze into the grid
    /// The start cell is where traversal based generators begin, others ignore it.
    /// The grid must be in the state [`GeneratorInfo::requirement`] asks for.
    /// On error the grid is left as it was when the error occurred.
    fn create_maze(&mut self, grid: &mut ObservableGridGraph, start_col: usize, start_row: usize) -> Result<(), AlgorithmError>;
}


/// Edge set a generator expects to start from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridRequirement {
    /// No edges, passages are carved
    Empty,
    /// All edges, walls are built by deleting edges
    Full,
}


/// Capabilities of a generator, checked instead of tags
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorInfo {
    pub kind: GeneratorKind,
    pub name: &'static str,
    pub requirement: GridRequirement,
    pub four_neighbors_only: bool,
    pub slow: bool,
    /// Uses the call stack, grid size is limited
    pub recursive: bool,
}


#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeneratorKind {
    RecursiveDfs,
    #[default]
    IterativeDfs,
    RandomBfs,
    GrowingTreeFirst,
    GrowingTreeLast,
    GrowingTreeRandom,
    GrowingTreeLastOrRandom,
    HuntAndKill,
    Kruskal,
    Prim,
    Boruvka,
    AldousBroder,
    WilsonRandom,
    WilsonRows,
    WilsonColumns,
    WilsonCircle,
    WilsonSpiral,
    WilsonHilbert,
    ReverseDeleteBfs,
    ReverseDeleteDfs,
    ReverseDeleteBestFirst,
    ReverseDeleteHillClimbing,
    #[serde(rename = "reverse-delete-bidi-astar")]
    ReverseDeleteBidiAStar,
    RecursiveDivision,
    BinaryTree,
    Sidewinder,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 26] = [
        GeneratorKind::RecursiveDfs,
        GeneratorKind::IterativeDfs,
        GeneratorKind::RandomBfs,
        GeneratorKind::GrowingTreeFirst,
        GeneratorKind::GrowingTreeLast,
        GeneratorKind::GrowingTreeRandom,
        GeneratorKind::GrowingTreeLastOrRandom,
        GeneratorKind::HuntAndKill,
        GeneratorKind::Kruskal,
        GeneratorKind::Prim,
        GeneratorKind::Boruvka,
        GeneratorKind::AldousBroder,
        GeneratorKind::WilsonRandom,
        GeneratorKind::WilsonRows,
        GeneratorKind::WilsonColumns,
        GeneratorKind::WilsonCircle,
        GeneratorKind::WilsonSpiral,
        GeneratorKind::WilsonHilbert,
        GeneratorKind::ReverseDeleteBfs,
        GeneratorKind::ReverseDeleteDfs,
        GeneratorKind::ReverseDeleteBestFirst,
        GeneratorKind::ReverseDeleteHillClimbing,
        GeneratorKind::ReverseDeleteBidiAStar,
        GeneratorKind::RecursiveDivision,
        GeneratorKind::BinaryTree,
        GeneratorKind::Sidewinder,
    ];

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn info(self) -> GeneratorInfo {
        use GridRequirement::{Empty, Full};

        // (name, requirement, four_neighbors_only, slow, recursive)
        let (name, requirement, four_neighbors_only, slow, recursive) = match self {
            GeneratorKind::RecursiveDfs => ("recursive-dfs", Empty, false, false, true),
            GeneratorKind::IterativeDfs => ("iterative-dfs", Empty, false, false, false),
            GeneratorKind::RandomBfs => ("random-bfs", Empty, false, false, false),
            GeneratorKind::GrowingTreeFirst => ("growing-tree-first", Empty, false, false, false),
            GeneratorKind::GrowingTreeLast => ("growing-tree-last", Empty, false, false, false),
            GeneratorKind::GrowingTreeRandom => ("growing-tree-random", Empty, false, false, false),
            GeneratorKind::GrowingTreeLastOrRandom => ("growing-tree-last-or-random", Empty, false, false, false),
            GeneratorKind::HuntAndKill => ("hunt-and-kill", Empty, false, false, false),
            GeneratorKind::Kruskal => ("kruskal", Empty, false, false, false),
            GeneratorKind::Prim => ("prim", Empty, false, false, false),
            GeneratorKind::Boruvka => ("boruvka", Empty, false, false, false),
            GeneratorKind::AldousBroder => ("aldous-broder", Empty, false, true, false),
            GeneratorKind::WilsonRandom => ("wilson-random", Empty, false, false, false),
            GeneratorKind::WilsonRows => ("wilson-rows", Empty, false, false, false),
            GeneratorKind::WilsonColumns => ("wilson-columns", Empty, false, false, false),
            GeneratorKind::WilsonCircle => ("wilson-circle", Empty, false, false, false),
            GeneratorKind::WilsonSpiral => ("wilson-spiral", Empty, false, false, false),
            GeneratorKind::WilsonHilbert => ("wilson-hilbert", Empty, false, false, false),
            GeneratorKind::ReverseDeleteBfs => ("reverse-delete-bfs", Full, false, true, false),
            GeneratorKind::ReverseDeleteDfs => ("reverse-delete-dfs", Full, false, true, false),
            GeneratorKind::ReverseDeleteBestFirst => ("reverse-delete-best-first", Full, false, true, false),
            GeneratorKind::ReverseDeleteHillClimbing => ("reverse-delete-hill-climbing", Full, false, true, false),
            GeneratorKind::ReverseDeleteBidiAStar => ("reverse-delete-bidi-astar", Full, false, true, false),
            GeneratorKind::RecursiveDivision => ("recursive-division", Full, true, false, false),
            GeneratorKind::BinaryTree => ("binary-tree", Empty, true, false, false),
            GeneratorKind::Sidewinder => ("sidewinder", Empty, true, false, false),
        };
        GeneratorInfo { kind: self, name, requirement, four_neighbors_only, slow, recursive }
    }

    pub fn supports(self, topology: Topology) -> bool {
        !self.info().four_neighbors_only || topology == Topology::FourNeighbors
    }

    pub fn create(self, options: &RunOptions) -> Box<dyn MazeGenerator> {
        match self {
            GeneratorKind::RecursiveDfs => Box::new(RecursiveDfs::new(options)),
            GeneratorKind::IterativeDfs => Box::new(GrowingTree::new(self, GrowingTreePolicy::Last, options)),
            GeneratorKind::RandomBfs => Box::new(RandomBfs::new(options)),
            GeneratorKind::GrowingTreeFirst => Box::new(GrowingTree::new(self, GrowingTreePolicy::First, options)),
            GeneratorKind::GrowingTreeLast => Box::new(GrowingTree::new(self, GrowingTreePolicy::Last, options)),
            GeneratorKind::GrowingTreeRandom => Box::new(GrowingTree::new(self, GrowingTreePolicy::Random, options)),
            GeneratorKind::GrowingTreeLastOrRandom => {
                Box::new(GrowingTree::new(self, GrowingTreePolicy::LastOrRandom, options))
            }
            GeneratorKind::HuntAndKill => Box::new(HuntAndKill::new(options)),
            GeneratorKind::Kruskal => Box::new(Kruskal::new(options)),
            GeneratorKind::Prim => Box::new(Prim::new(options)),
            GeneratorKind::Boruvka => Box::new(Boruvka::new(options)),
            GeneratorKind::AldousBroder => Box::new(AldousBroder::new(options)),
            GeneratorKind::WilsonRandom => Box::new(Wilson::new(self, CellOrder::Random, options)),
            GeneratorKind::WilsonRows => Box::new(Wilson::new(self, CellOrder::Rows, options)),
            GeneratorKind::WilsonColumns => Box::new(Wilson::new(self, CellOrder::Columns, options)),
            GeneratorKind::WilsonCircle => Box::new(Wilson::new(self, CellOrder::Circle, options)),
            GeneratorKind::WilsonSpiral => Box::new(Wilson::new(self, CellOrder::Spiral, options)),
            GeneratorKind::WilsonHilbert => Box::new(Wilson::new(self, CellOrder::Hilbert, options)),
            GeneratorKind::ReverseDeleteBfs => Box::new(ReverseDelete::new(self, SearchKind::Bfs, options)),
            GeneratorKind::ReverseDeleteDfs => Box::new(ReverseDelete::new(self, SearchKind::Dfs, options)),
            GeneratorKind::ReverseDeleteBestFirst => Box::new(ReverseDelete::new(self, SearchKind::BestFirst, options)),
            GeneratorKind::ReverseDeleteHillClimbing => {
                Box::new(ReverseDelete::new(self, SearchKind::HillClimbing, options))
            }
            GeneratorKind::ReverseDeleteBidiAStar => Box::new(ReverseDelete::new(self, SearchKind::BidiAStar, options)),
            GeneratorKind::RecursiveDivision => Box::new(RecursiveDivision::new(options)),
            GeneratorKind::BinaryTree => Box::new(BinaryTree::new(options)),
            GeneratorKind::Sidewinder => Box::new(Sidewinder::new(options)),
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeneratorKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeneratorKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ConfigError::UnknownAlgorithm(s.to_string()))
    }
}


/// Put the grid into the starting state a generator asks for, all labels Unvisited
pub fn prepare_grid(grid: &mut ObservableGridGraph, requirement: GridRequirement) {
    let enabled = grid.events_enabled();
    grid.set_events_enabled(false);
    match requirement {
        GridRequirement::Empty => grid.clear_edges(),
        GridRequirement::Full => grid.fill(),
    }
    grid.set_all_labels(Label::Unvisited);
    // one GraphChanged for the whole reset
    grid.set_events_enabled(enabled);
}


/// Check every precondition before touching the grid, then reset the labels
/// Returns the start cell
pub(crate) fn begin(
    info: &GeneratorInfo,
    grid: &mut ObservableGridGraph,
    start_col: usize,
    start_row: usize,
    interrupt: &Interrupt,
) -> Result<usize, AlgorithmError> {
    interrupt.check()?;

    if info.four_neighbors_only && grid.topology() != Topology::FourNeighbors {
        warn!("{} refused: {:?} grid", info.name, grid.topology());
        return Err(AlgorithmError::UnsupportedTopology {
            algorithm: info.name,
            topology: grid.topology(),
        });
    }

    match info.requirement {
        GridRequirement::Empty if !grid.is_empty() => {
            warn!("{} refused: grid has {} edges", info.name, grid.num_edges());
            return Err(AlgorithmError::EmptyGridRequired);
        }
        GridRequirement::Full if !grid.is_full() => {
            warn!("{} refused: grid is not full", info.name);
            return Err(AlgorithmError::FullGridRequired);
        }
        _ => {}
    }

    let start = grid.try_cell(start_col, start_row)?;
    debug!(
        "{} on {}x{} grid, start ({start_col}, {start_row})",
        info.name,
        grid.num_cols(),
        grid.num_rows()
    );
    grid.set_all_labels(Label::Unvisited);
    Ok(start)
}

/// Mark every cell Completed
pub(crate) fn finish(info: &GeneratorInfo, grid: &mut ObservableGridGraph) {
    for cell in 0..grid.num_vertices() {
        grid.set_label(cell, Label::Completed);
    }
    debug!("{} done, {} edges", info.name, grid.num_edges());
}

/// Open the passage and mark the cell reached through it
pub(crate) fn carve(grid: &mut ObservableGridGraph, from: usize, to: usize) -> Result<(), AlgorithmError> {
    grid.add_edge(from, to)?;
    grid.set_label(to, Label::Visited);
    Ok(())
}

/// Neighbors that no passage reaches yet
pub(crate) fn unvisited_neighbors(grid: &GridGraph, cell: usize, out: &mut Vec<usize>) {
    out.clear();
    out.extend(grid.neighbors(cell).filter(|&next| grid.label(next) == Label::Unvisited));
}


#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn empty(cols: usize, rows: usize, topology: Topology) -> ObservableGridGraph {
        ObservableGridGraph::new(GridGraph::empty(cols, rows, topology, Label::Unvisited).unwrap())
    }

    /// Grid in the starting state the generator needs
    pub fn prepared(kind: GeneratorKind, cols: usize, rows: usize, topology: Topology) -> ObservableGridGraph {
        let mut grid = empty(cols, rows, topology);
        prepare_grid(&mut grid, kind.info().requirement);
        grid
    }

    pub fn run(kind: GeneratorKind, seed: u64, cols: usize, rows: usize, topology: Topology) -> ObservableGridGraph {
        let mut grid = prepared(kind, cols, rows, topology);
        kind.create(&RunOptions::seeded(seed))
            .create_maze(&mut grid, 0, 0)
            .unwrap();
        grid
    }
}
