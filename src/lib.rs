//! Grid graphs, maze generators and path searches
//!
//! A [`GridGraph`] is a dense grid of cells joined by undirected passages.
//! Maze generators carve a spanning tree into an [`ObservableGridGraph`],
//! which reports every change to its observers, and graph searches find
//! paths through the result.
//!
//! ```
//! use mazegraph::{GeneratorKind, GridGraph, Label, ObservableGridGraph, RunOptions, SearchKind, Heuristic, Topology};
//!
//! let grid = GridGraph::empty(10, 10, Topology::FourNeighbors, Label::Unvisited).unwrap();
//! let mut grid = ObservableGridGraph::new(grid);
//!
//! let options = RunOptions::seeded(7);
//! GeneratorKind::IterativeDfs.create(&options).create_maze(&mut grid, 0, 0).unwrap();
//! assert_eq!(grid.num_edges(), 99);
//!
//! let path = SearchKind::Bfs
//!     .create(&options, Heuristic::default())
//!     .find_path(&grid, 0, 99)
//!     .unwrap();
//! assert!(path.is_valid_in(&grid));
//! ```

pub mod collections;
pub mod config;
pub mod control;
pub mod errors;
pub mod generators;
pub mod geometry;
pub mod grid;
pub mod search;
pub mod session;

pub use config::MazeConfig;
pub use control::{Interrupt, RunOptions};
pub use errors::{AlgorithmError, ConfigError, GridError};
pub use generators::{GeneratorInfo, GeneratorKind, GridRequirement, MazeGenerator};
pub use geometry::{Cost, Heuristic};
pub use grid::observable::{EventContext, GraphObserver, GridEvent, ObservableGridGraph, ObserverId};
pub use grid::{Direction, GridGraph, Label, Topology};
pub use search::{GraphSearch, Path, SearchInfo, SearchKind, SearchObserver, SearchStep, SearchTrace};
pub use session::Session;
