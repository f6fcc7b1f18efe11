use log::{debug, trace};

use super::observer::conclude;
use super::{GraphSearch, Path, SearchObserver, check_endpoints};
use crate::control::Interrupt;
use crate::errors::AlgorithmError;
use crate::geometry::Cost;
use crate::grid::GridGraph;


/// Iterative deepening depth-first search
/// https://en.wikipedia.org/wiki/Iterative_deepening_depth-first_search
/// Repeats a depth-bounded DFS with bound 1, 2, 3, ... and returns a path with
/// the fewest edges. Very slow; it is here for completeness, not performance.
pub struct IterativeDeepeningSearch {
    interrupt: Interrupt,
}

impl IterativeDeepeningSearch {

    pub fn new(interrupt: Interrupt) -> Self {
        Self { interrupt }
    }

    /// One bounded DFS
    /// Returns the path if found, and whether any branch was cut off by the bound
    fn depth_limited(
        &self,
        grid: &GridGraph,
        source: usize,
        target: usize,
        limit: usize,
        observer: &mut dyn SearchObserver,
    ) -> Result<(Option<Vec<usize>>, bool), AlgorithmError> {

        // smallest depth each cell was reached with in this iteration
        // revisiting at the same or larger depth cannot find anything new
        let mut best_depth = vec![usize::MAX; grid.num_vertices()];
        best_depth[source] = 0;
        observer.on_expand(source, Cost(0.0));

        let mut stack = vec![Frame::new(grid, source)];
        let mut cut_off = false;

        while !stack.is_empty() {
            self.interrupt.check()?;

            let depth = stack.len() - 1;
            let frame = &mut stack[depth];
            let parent = frame.cell;

            let Some(child) = frame.next_child() else {
                stack.pop();
                continue;
            };

            if best_depth[child] <= depth + 1 {
                continue;
            }
            if depth + 1 > limit {
                cut_off = true;
                continue;
            }
            best_depth[child] = depth + 1;

            observer.on_edge_traversed(parent, child);
            observer.on_expand(child, Cost((depth + 1) as f64));

            if child == target {
                let mut path: Vec<usize> = stack.iter().map(|frame| frame.cell).collect();
                path.push(child);
                return Ok((Some(path), cut_off));
            }
            stack.push(Frame::new(grid, child));
        }

        Ok((None, cut_off))
    }
}

impl GraphSearch for IterativeDeepeningSearch {

    fn name(&self) -> &'static str {
        "iddfs"
    }

    fn search(&mut self, grid: &GridGraph, source: usize, target: usize, observer: &mut dyn SearchObserver) -> Result<Path, AlgorithmError> {
        check_endpoints(grid, source, target)?;
        debug!("iddfs from {source} to {target}");
        self.interrupt.check()?;
        observer.on_frontier_add(source);

        if source == target {
            return Ok(conclude(observer, Path::new(vec![source])));
        }

        // a simple path never has more edges than the grid has cells
        for limit in 1..grid.num_vertices() {
            trace!("iddfs depth bound {limit}");
            let (found, cut_off) = self.depth_limited(grid, source, target, limit, observer)?;
            if let Some(cells) = found {
                return Ok(conclude(observer, Path::new(cells)));
            }
            if !cut_off {
                // the whole component fits under the bound
                break;
            }
        }

        Ok(conclude(observer, Path::unreachable()))
    }
}


/// Cell on the DFS stack together with the children still to try
struct Frame {
    cell: usize,
    children: Vec<usize>,
    next: usize,
}

impl Frame {

    fn new(grid: &GridGraph, cell: usize) -> Self {
        Self {
            cell,
            children: grid.adjacent(cell).collect(),
            next: 0,
        }
    }

    fn next_child(&mut self) -> Option<usize> {
        let child = self.children.get(self.next).copied();
        self.next += 1;
        child
    }
}
