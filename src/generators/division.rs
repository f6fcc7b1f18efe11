use log::trace;
use rand::Rng;
use rand::rngs::StdRng;

use super::{GeneratorInfo, GeneratorKind, MazeGenerator, begin, finish};
use crate::control::{Interrupt, RunOptions};
use crate::errors::AlgorithmError;
use crate::grid::Label;
use crate::grid::observable::ObservableGridGraph;


/// Recursive division
/// Starts from the full grid. A region is cut in two by removing every edge across
/// a random line except one passage, then both halves are divided the same way.
/// Regions one cell wide or high are corridors and stay as they are.
/// Pending regions live on an explicit stack, grid size is not limited.
pub struct RecursiveDivision {
    rng: StdRng,
    interrupt: Interrupt,
}

#[derive(Clone, Copy, Debug)]
struct Region {
    col: usize,
    row: usize,
    width: usize,
    height: usize,
}

impl RecursiveDivision {

    pub fn new(options: &RunOptions) -> Self {
        Self { rng: options.rng(), interrupt: options.interrupt.clone() }
    }

    /// Cut the region and return both halves
    fn divide(&mut self, grid: &mut ObservableGridGraph, region: Region) -> Result<(Region, Region), AlgorithmError> {
        let Region { col, row, width, height } = region;

        let vertical = match width.cmp(&height) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => self.rng.random_bool(0.5),
        };

        if vertical {
            // wall between columns col + cut - 1 and col + cut
            let cut = self.rng.random_range(1..width);
            let passage = self.rng.random_range(0..height);
            for i in (0..height).filter(|&i| i != passage) {
                let west = grid.cell(col + cut - 1, row + i);
                let east = grid.cell(col + cut, row + i);
                grid.remove_edge(west, east)?;
            }
            Ok((
                Region { col, row, width: cut, height },
                Region { col: col + cut, row, width: width - cut, height },
            ))
        } else {
            let cut = self.rng.random_range(1..height);
            let passage = self.rng.random_range(0..width);
            for i in (0..width).filter(|&i| i != passage) {
                let north = grid.cell(col + i, row + cut - 1);
                let south = grid.cell(col + i, row + cut);
                grid.remove_edge(north, south)?;
            }
            Ok((
                Region { col, row, width, height: cut },
                Region { col, row: row + cut, width, height: height - cut },
            ))
        }
    }
}

impl MazeGenerator for RecursiveDivision {

    fn info(&self) -> GeneratorInfo {
        GeneratorKind::RecursiveDivision.info()
    }

    fn create_maze(&mut self, grid: &mut ObservableGridGraph, start_col: usize, start_row: usize) -> Result<(), AlgorithmError> {
        let info = self.info();
        begin(&info, grid, start_col, start_row, &self.interrupt)?;

        let mut stack = vec![Region {
            col: 0,
            row: 0,
            width: grid.num_cols(),
            height: grid.num_rows(),
        }];

        while let Some(region) = stack.pop() {
            self.interrupt.check()?;

            if region.width == 1 || region.height == 1 {
                for r in region.row..region.row + region.height {
                    for c in region.col..region.col + region.width {
                        let cell = grid.cell(c, r);
                        grid.set_label(cell, Label::Completed);
                    }
                }
                continue;
            }

            let (first, second) = self.divide(grid, region)?;
            trace!("{} split {region:?}", info.name);
            stack.push(second);
            stack.push(first);
        }

        finish(&info, grid);
        Ok(())
    }
}
