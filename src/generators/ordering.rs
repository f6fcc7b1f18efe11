//! Orders in which Wilson's algorithm starts its random walks
//!
//! The order changes how the maze grows on screen, not which trees are
//! possible: every order yields a uniform spanning tree.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::grid::GridGraph;


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellOrder {
    Random,
    /// Row by row, top to bottom
    Rows,
    /// Column by column, left to right
    Columns,
    /// By distance from the grid center, nearest first
    Circle,
    /// Outward spiral ending at the top-left corner
    Spiral,
    /// Along a Hilbert curve
    Hilbert,
}

impl CellOrder {

    /// Every cell of the grid exactly once
    pub fn cells(self, grid: &GridGraph, rng: &mut StdRng) -> Vec<usize> {
        match self {
            CellOrder::Random => {
                let mut cells: Vec<usize> = (0..grid.num_vertices()).collect();
                cells.shuffle(rng);
                cells
            }
            CellOrder::Rows => (0..grid.num_vertices()).collect(),
            CellOrder::Columns => columns(grid),
            CellOrder::Circle => circle(grid),
            CellOrder::Spiral => spiral(grid),
            CellOrder::Hilbert => hilbert(grid),
        }
    }
}


fn columns(grid: &GridGraph) -> Vec<usize> {
    (0..grid.num_cols())
        .flat_map(|col| (0..grid.num_rows()).map(move |row| grid.cell(col, row)))
        .collect()
}

fn circle(grid: &GridGraph) -> Vec<usize> {
    let cx = (grid.num_cols() - 1) as f64 / 2.0;
    let cy = (grid.num_rows() - 1) as f64 / 2.0;
    let distance = |cell: usize| {
        let (col, row) = grid.coord(cell);
        (col as f64 - cx).hypot(row as f64 - cy)
    };

    let mut cells: Vec<usize> = (0..grid.num_vertices()).collect();
    cells.sort_by(|&a, &b| distance(a).total_cmp(&distance(b)));
    cells
}

/// Clockwise inward spiral from the top-left corner, reversed
fn spiral(grid: &GridGraph) -> Vec<usize> {
    let mut cells = Vec::with_capacity(grid.num_vertices());
    let (mut left, mut right) = (0isize, grid.num_cols() as isize - 1);
    let (mut top, mut bottom) = (0isize, grid.num_rows() as isize - 1);
    let mut push = |col: isize, row: isize| cells.push(grid.cell(col as usize, row as usize));

    while left <= right && top <= bottom {
        for col in left..=right {
            push(col, top);
        }
        for row in top + 1..=bottom {
            push(right, row);
        }
        if top < bottom {
            for col in (left..right).rev() {
                push(col, bottom);
            }
        }
        if left < right {
            for row in (top + 1..bottom).rev() {
                push(left, row);
            }
        }
        left += 1;
        right -= 1;
        top += 1;
        bottom -= 1;
    }

    cells.reverse();
    cells
}

/// Cells sorted by their position along the Hilbert curve filling the
/// smallest power-of-two square that covers the grid
fn hilbert(grid: &GridGraph) -> Vec<usize> {
    let side = grid.num_cols().max(grid.num_rows()).next_power_of_two();
    let mut cells: Vec<usize> = (0..grid.num_vertices()).collect();
    cells.sort_by_cached_key(|&cell| hilbert_index(side, grid.coord(cell)));
    cells
}

/// Distance of (x, y) along the Hilbert curve filling a side x side square
/// https://en.wikipedia.org/wiki/Hilbert_curve
fn hilbert_index(side: usize, (mut x, mut y): (usize, usize)) -> u128 {
    let mut d = 0u128;
    let mut s = side / 2;
    while s > 0 {
        let rx = usize::from(x & s > 0);
        let ry = usize::from(y & s > 0);
        d += (s as u128) * (s as u128) * ((3 * rx) ^ ry) as u128;
        if ry == 0 {
            if rx == 1 {
                x = side - 1 - x;
                y = side - 1 - y;
            }
            std::mem::swap(&mut x, &mut y);
        }
        s /= 2;
    }
    d
}
