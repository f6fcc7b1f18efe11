use log::trace;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::{GeneratorInfo, GeneratorKind, MazeGenerator, begin, finish};
use crate::control::{Interrupt, RunOptions};
use crate::errors::AlgorithmError;
use crate::geometry::Heuristic;
use crate::grid::observable::ObservableGridGraph;
use crate::grid::{Label, Topology};
use crate::search::{GraphSearch, SearchKind};


/// Reverse-delete
/// https://en.wikipedia.org/wiki/Reverse-delete_algorithm
/// Starts from the full grid and visits the edges in random order. Each edge is
/// removed, and put back if a search can no longer get from one end to the other.
/// Every search costs a traversal, so this is slow on anything but small grids.
pub struct ReverseDelete {
    kind: GeneratorKind,
    search: SearchKind,
    rng: StdRng,
    interrupt: Interrupt,
}

impl ReverseDelete {

    pub fn new(kind: GeneratorKind, search: SearchKind, options: &RunOptions) -> Self {
        Self {
            kind,
            search,
            rng: options.rng(),
            interrupt: options.interrupt.clone(),
        }
    }

    /// Connectivity check, sharing this generator's interrupt
    fn make_search(&self, topology: Topology) -> Box<dyn GraphSearch> {
        let heuristic = match topology {
            Topology::FourNeighbors => Heuristic::Manhattan,
            Topology::EightNeighbors => Heuristic::Euclidean,
        };
        let options = RunOptions::default().with_interrupt(self.interrupt.clone());
        self.search.create(&options, heuristic)
    }
}

impl MazeGenerator for ReverseDelete {

    fn info(&self) -> GeneratorInfo {
        self.kind.info()
    }

    fn create_maze(&mut self, grid: &mut ObservableGridGraph, start_col: usize, start_row: usize) -> Result<(), AlgorithmError> {
        let info = self.info();
        begin(&info, grid, start_col, start_row, &self.interrupt)?;

        let mut search = self.make_search(grid.topology());
        let mut edges: Vec<(usize, usize)> = grid.edges().collect();
        edges.shuffle(&mut self.rng);

        let target_edges = grid.num_vertices() - 1;
        let mut kept = 0;

        for (u, v) in edges {
            self.interrupt.check()?;
            if grid.num_edges() == target_edges {
                break;
            }

            grid.mark_edge(u, v);
            grid.remove_edge(u, v)?;
            if search.find_path(grid, u, v)?.is_empty() {
                // bridge, the grid would fall apart without it
                grid.add_edge(u, v)?;
                grid.set_label(u, Label::Visited);
                grid.set_label(v, Label::Visited);
                kept += 1;
            }
        }
        trace!("{} kept {kept} bridges on the way", info.name);

        finish(&info, grid);
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::generators::GridRequirement;
    use crate::generators::prepare_grid;
    use crate::generators::test_support::empty;
    use crate::grid::analysis::is_spanning_tree;
    use crate::grid::observable::{EventContext, GridEvent};

    #[test]
    fn test_reverse_delete_with_each_search() {
        for (kind, search) in [
            (GeneratorKind::ReverseDeleteBfs, SearchKind::Bfs),
            (GeneratorKind::ReverseDeleteDfs, SearchKind::Dfs),
            (GeneratorKind::ReverseDeleteBestFirst, SearchKind::BestFirst),
            (GeneratorKind::ReverseDeleteHillClimbing, SearchKind::HillClimbing),
            (GeneratorKind::ReverseDeleteBidiAStar, SearchKind::BidiAStar),
        ] {
            for topology in [Topology::FourNeighbors, Topology::EightNeighbors] {
                let mut grid = empty(6, 5, topology);
                prepare_grid(&mut grid, GridRequirement::Full);
                ReverseDelete::new(kind, search, &RunOptions::seeded(30))
                    .create_maze(&mut grid, 0, 0)
                    .unwrap();
                assert!(is_spanning_tree(&grid), "{kind} {topology:?}");
            }
        }
    }

    #[test]
    fn test_reverse_delete_marks_examined_edges() {
        let mut grid = empty(4, 4, Topology::FourNeighbors);
        prepare_grid(&mut grid, GridRequirement::Full);

        let marked = Arc::new(Mutex::new(0));
        let removed = Arc::new(Mutex::new(0));
        let (m, r) = (Arc::clone(&marked), Arc::clone(&removed));
        grid.on_event(move |event: &GridEvent, _ctx: &mut EventContext<'_>| match event {
            GridEvent::EdgeChanged(..) => *m.lock().unwrap() += 1,
            GridEvent::EdgeRemoved(..) => *r.lock().unwrap() += 1,
            _ => {}
        });

        ReverseDelete::new(GeneratorKind::ReverseDeleteBfs, SearchKind::Bfs, &RunOptions::seeded(4))
            .create_maze(&mut grid, 0, 0)
            .unwrap();

        // every removal was announced as examined first
        assert_eq!(*marked.lock().unwrap(), *removed.lock().unwrap());
        // 24 edges in a full 4x4 grid, 15 in the tree
        assert!(*removed.lock().unwrap() >= 9);
    }
}
