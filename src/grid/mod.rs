//! Dense 2D grid graphs
//!
//! Cells are addressed either by coordinate `(col, row)` or by the linear id
//! `row * cols + col`. Rows grow southwards. An edge is an open passage between
//! two cells that are neighbors in the grid's [`Topology`]; a missing edge
//! between neighbors is a wall.

pub mod analysis;
pub mod observable;

use serde::{Deserialize, Serialize};

use crate::errors::GridError;
use crate::geometry::Cost;


/// Adjacency rule for the cells of a grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topology {
    #[default]
    FourNeighbors,
    EightNeighbors,
}

impl Topology {

    /// Directions in neighbor enumeration order
    pub fn directions(self) -> &'static [Direction] {
        match self {
            Topology::FourNeighbors => &Direction::ORTHOGONAL,
            Topology::EightNeighbors => &Direction::ALL,
        }
    }

    /// Maximum number of neighbors of a cell
    pub fn max_degree(self) -> usize {
        self.directions().len()
    }
}


#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
    NorthEast = 4,
    SouthEast = 5,
    SouthWest = 6,
    NorthWest = 7,
}

impl Direction {
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// (dx, dy) of one step in this direction
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
            Direction::NorthWest => (-1, -1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::NorthEast => Direction::SouthWest,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
            Direction::NorthWest => Direction::SouthEast,
        }
    }

    pub fn is_diagonal(self) -> bool {
        (self as u8) >= 4
    }

    #[inline(always)]
    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}


/// Traversal state of a cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Label {
    #[default]
    Unvisited,
    Visited,
    Completed,
}


#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridGraph {
    cols: usize,
    rows: usize,
    topology: Topology,
    labels: Vec<Label>,

    // one bit per direction, kept symmetric: the edge u-v is stored at both ends
    edges: Vec<u8>,
    num_edges: usize,
}

impl GridGraph {

    /// Create a grid with either no edges or every edge the topology allows
    pub fn new(cols: usize, rows: usize, topology: Topology, full: bool, default_label: Label) -> Result<Self, GridError> {
        let num_cells = match cols.checked_mul(rows) {
            Some(n) if n > 0 => n,
            _ => return Err(GridError::InvalidDimensions { cols, rows }),
        };
        let mut grid = Self {
            cols,
            rows,
            topology,
            labels: vec![default_label; num_cells],
            edges: vec![0; num_cells],
            num_edges: 0,
        };
        if full {
            grid.fill();
        }
        Ok(grid)
    }

    pub fn empty(cols: usize, rows: usize, topology: Topology, default_label: Label) -> Result<Self, GridError> {
        Self::new(cols, rows, topology, false, default_label)
    }

    pub fn full(cols: usize, rows: usize, topology: Topology, default_label: Label) -> Result<Self, GridError> {
        Self::new(cols, rows, topology, true, default_label)
    }

    pub fn num_cols(&self) -> usize {
        self.cols
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn num_vertices(&self) -> usize {
        self.cols * self.rows
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Linear id of a coordinate
    ///
    /// # Panics
    ///
    /// If the coordinate lies outside the grid. Use [`GridGraph::try_cell`]
    /// for coordinates that are not known to be valid.
    #[inline]
    pub fn cell(&self, col: usize, row: usize) -> usize {
        assert!(self.contains(col, row), "({col}, {row}) outside {}x{} grid", self.cols, self.rows);
        row * self.cols + col
    }

    /// Checked version of [`GridGraph::cell`]
    pub fn try_cell(&self, col: usize, row: usize) -> Result<usize, GridError> {
        if self.contains(col, row) {
            Ok(row * self.cols + col)
        } else {
            Err(GridError::CellOutOfRange { col, row })
        }
    }

    #[inline]
    pub fn col(&self, cell: usize) -> usize {
        cell % self.cols
    }

    #[inline]
    pub fn row(&self, cell: usize) -> usize {
        cell / self.cols
    }

    #[inline]
    pub fn coord(&self, cell: usize) -> (usize, usize) {
        (self.col(cell), self.row(cell))
    }

    pub fn contains(&self, col: usize, row: usize) -> bool {
        col < self.cols && row < self.rows
    }

    pub fn is_valid(&self, cell: usize) -> bool {
        cell < self.num_vertices()
    }

    /// Returns the id back if it addresses a cell of this grid
    pub fn check_cell(&self, cell: usize) -> Result<usize, GridError> {
        if self.is_valid(cell) {
            Ok(cell)
        } else {
            Err(GridError::InvalidCell(cell))
        }
    }

    /// Cell one step away in the given direction, if inside the grid
    pub fn neighbor(&self, cell: usize, dir: Direction) -> Option<usize> {
        let (dx, dy) = dir.delta();
        let col = self.col(cell).checked_add_signed(dx)?;
        let row = self.row(cell).checked_add_signed(dy)?;
        if self.contains(col, row) {
            Some(self.cell(col, row))
        } else {
            None
        }
    }

    /// Topological neighbors in enumeration order, with or without edges
    pub fn neighbors(&self, cell: usize) -> impl Iterator<Item = usize> + '_ {
        self.topology
            .directions()
            .iter()
            .filter_map(move |&dir| self.neighbor(cell, dir))
    }

    /// Direction leading from u to v, if v is a neighbor of u
    pub fn direction(&self, u: usize, v: usize) -> Option<Direction> {
        if !self.is_valid(u) || !self.is_valid(v) {
            return None;
        }
        self.topology
            .directions()
            .iter()
            .copied()
            .find(|&dir| self.neighbor(u, dir) == Some(v))
    }

    pub fn are_neighbors(&self, u: usize, v: usize) -> bool {
        self.direction(u, v).is_some()
    }

    /// Open a passage between two neighbors
    /// Returns Ok(false) if the edge already existed
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<bool, GridError> {
        let dir = self.edge_direction(u, v)?;
        if self.edges[u] & dir.bit() != 0 {
            return Ok(false);
        }
        self.edges[u] |= dir.bit();
        self.edges[v] |= dir.opposite().bit();
        self.num_edges += 1;
        Ok(true)
    }

    /// Close the passage between two neighbors
    /// Returns Ok(false) if there was no edge
    pub fn remove_edge(&mut self, u: usize, v: usize) -> Result<bool, GridError> {
        let dir = self.edge_direction(u, v)?;
        if self.edges[u] & dir.bit() == 0 {
            return Ok(false);
        }
        self.edges[u] &= !dir.bit();
        self.edges[v] &= !dir.opposite().bit();
        self.num_edges -= 1;
        Ok(true)
    }

    fn edge_direction(&self, u: usize, v: usize) -> Result<Direction, GridError> {
        self.check_cell(u)?;
        self.check_cell(v)?;
        self.direction(u, v).ok_or(GridError::NotAdjacent(u, v))
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        match self.direction(u, v) {
            Some(dir) => self.edges[u] & dir.bit() != 0,
            None => false,
        }
    }

    /// Neighbors reachable through an edge
    pub fn adjacent(&self, cell: usize) -> impl Iterator<Item = usize> + '_ {
        let bits = self.edges[cell];
        self.topology
            .directions()
            .iter()
            .filter(move |dir| bits & dir.bit() != 0)
            .filter_map(move |&dir| self.neighbor(cell, dir))
    }

    pub fn degree(&self, cell: usize) -> usize {
        self.edges[cell].count_ones() as usize
    }

    /// Every edge once, as (u, v) with u < v
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.num_vertices()).flat_map(move |u| {
            self.adjacent(u).filter(move |&v| u < v).map(move |v| (u, v))
        })
    }

    /// Every edge the topology allows, as (u, v) with u < v
    pub fn all_possible_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.num_vertices()).flat_map(move |u| {
            self.neighbors(u).filter(move |&v| u < v).map(move |v| (u, v))
        })
    }

    pub fn num_possible_edges(&self) -> usize {
        let (c, r) = (self.cols, self.rows);
        let orthogonal = (c - 1) * r + c * (r - 1);
        match self.topology {
            Topology::FourNeighbors => orthogonal,
            Topology::EightNeighbors => orthogonal + 2 * (c - 1) * (r - 1),
        }
    }

    pub fn is_full(&self) -> bool {
        self.num_edges == self.num_possible_edges()
    }

    pub fn is_empty(&self) -> bool {
        self.num_edges == 0
    }

    /// Add every edge the topology allows
    pub fn fill(&mut self) {
        for cell in 0..self.num_vertices() {
            let mut bits = 0;
            for &dir in self.topology.directions() {
                if self.neighbor(cell, dir).is_some() {
                    bits |= dir.bit();
                }
            }
            self.edges[cell] = bits;
        }
        self.num_edges = self.num_possible_edges();
    }

    pub fn clear_edges(&mut self) {
        self.edges.fill(0);
        self.num_edges = 0;
    }

    /// Length of the step between two neighbors: 1 or sqrt(2)
    pub fn edge_cost(&self, u: usize, v: usize) -> Cost {
        match self.direction(u, v) {
            Some(dir) if dir.is_diagonal() => Cost(std::f64::consts::SQRT_2),
            _ => Cost(1.0),
        }
    }

    pub fn label(&self, cell: usize) -> Label {
        self.labels[cell]
    }

    /// Returns the previous label
    pub fn set_label(&mut self, cell: usize, label: Label) -> Label {
        std::mem::replace(&mut self.labels[cell], label)
    }

    pub fn set_all_labels(&mut self, label: Label) {
        self.labels.fill(label);
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }
}
