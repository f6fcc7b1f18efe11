//! Searches that grow one tree from the source and one from the target
//! and stitch the two partial paths together where they meet

use indexmap::map::Entry::{Occupied, Vacant};
use log::debug;
use num_traits::Zero;

use super::a_star::check_admissible;
use super::dijkstra::OpenList;
use super::observer::conclude;
use super::path::path_to;
use super::{GraphNodeMap, GraphSearch, Path, SearchObserver, check_endpoints};
use crate::control::Interrupt;
use crate::errors::AlgorithmError;
use crate::geometry::{Cost, Heuristic};
use crate::grid::GridGraph;


/// Bidirectional breadth-first search
/// Expands whole layers, always on the side with the smaller frontier.
/// Returns a path with the fewest edges, same length as plain BFS.
pub struct BidiBreadthFirstSearch {
    interrupt: Interrupt,
}

impl BidiBreadthFirstSearch {

    pub fn new(interrupt: Interrupt) -> Self {
        Self { interrupt }
    }
}

impl GraphSearch for BidiBreadthFirstSearch {

    fn name(&self) -> &'static str {
        "bidi-bfs"
    }

    fn search(&mut self, grid: &GridGraph, source: usize, target: usize, observer: &mut dyn SearchObserver) -> Result<Path, AlgorithmError> {
        check_endpoints(grid, source, target)?;
        debug!("bidi-bfs between {source} and {target}");
        self.interrupt.check()?;

        observer.on_frontier_add(source);
        if source == target {
            return Ok(conclude(observer, Path::new(vec![source])));
        }
        observer.on_frontier_add(target);

        // cost is the number of edges from the tree's root
        let mut forward: GraphNodeMap<usize> = GraphNodeMap::default();
        let mut backward: GraphNodeMap<usize> = GraphNodeMap::default();
        forward.insert(source, (usize::MAX, 0));
        backward.insert(target, (usize::MAX, 0));

        let mut forward_frontier = vec![source];
        let mut backward_frontier = vec![target];

        while !forward_frontier.is_empty() && !backward_frontier.is_empty() {
            let from_source = forward_frontier.len() <= backward_frontier.len();

            let meeting = if from_source {
                expand_layer(grid, &mut forward, &backward, &mut forward_frontier, &self.interrupt, observer)?
            } else {
                expand_layer(grid, &mut backward, &forward, &mut backward_frontier, &self.interrupt, observer)?
            };

            if let Some((near, far)) = meeting {
                let cells = if from_source {
                    stitch(&forward, near, &backward, far)
                } else {
                    stitch(&forward, far, &backward, near)
                };
                debug!("bidi-bfs trees met, path has {} cells", cells.len());
                return Ok(conclude(observer, Path::new(cells)));
            }
        }

        Ok(conclude(observer, Path::unreachable()))
    }
}


/// Expand every cell of one layer
/// Returns the cheapest edge (cell of this tree, cell of the other tree) joining the trees, if any.
/// The whole layer is scanned before deciding, a first hit is not necessarily the shortest.
fn expand_layer(
    grid: &GridGraph,
    this: &mut GraphNodeMap<usize>,
    other: &GraphNodeMap<usize>,
    frontier: &mut Vec<usize>,
    interrupt: &Interrupt,
    observer: &mut dyn SearchObserver,
) -> Result<Option<(usize, usize)>, AlgorithmError> {

    let mut next_frontier = Vec::new();
    // (total edges, near, far)
    let mut best: Option<(usize, usize, usize)> = None;

    for &cell in frontier.iter() {
        interrupt.check()?;

        let Some((index, _, &(_, depth))) = this.get_full(&cell) else {
            continue;
        };
        observer.on_expand(cell, Cost(depth as f64));

        for next in grid.adjacent(cell) {
            if let Some(&(_, other_depth)) = other.get(&next) {
                let total = depth + 1 + other_depth;
                if best.is_none_or(|(b, _, _)| total < b) {
                    best = Some((total, cell, next));
                }
            }
            if !this.contains_key(&next) {
                this.insert(next, (index, depth + 1));
                observer.on_edge_traversed(cell, next);
                observer.on_frontier_add(next);
                next_frontier.push(next);
            }
        }
    }

    *frontier = next_frontier;
    Ok(best.map(|(_, near, far)| (near, far)))
}

/// source .. forward_end, backward_end .. target
fn stitch<C>(forward: &GraphNodeMap<C>, forward_end: usize, backward: &GraphNodeMap<C>, backward_end: usize) -> Vec<usize> {
    let mut cells = path_to(forward, forward_end);
    let mut tail = path_to(backward, backward_end);
    tail.reverse();
    if cells.last() == tail.first() {
        tail.remove(0);
    }
    cells.extend(tail);
    cells
}


/// Bidirectional Dijkstra
/// Alternates single expansions and stops once the two cheapest frontier
/// costs add up to at least the best connection found. Optimal.
pub struct BidiDijkstraSearch {
    interrupt: Interrupt,
}

impl BidiDijkstraSearch {

    pub fn new(interrupt: Interrupt) -> Self {
        Self { interrupt }
    }
}

impl GraphSearch for BidiDijkstraSearch {

    fn name(&self) -> &'static str {
        "bidi-dijkstra"
    }

    fn search(&mut self, grid: &GridGraph, source: usize, target: usize, observer: &mut dyn SearchObserver) -> Result<Path, AlgorithmError> {
        check_endpoints(grid, source, target)?;
        debug!("bidi-dijkstra between {source} and {target}");
        bidirectional_best_first(grid, source, target, None, Meeting::Optimal, &self.interrupt, observer)
    }
}


/// Bidirectional A*
/// Each tree is guided towards the other tree's root. Terminates at the first
/// meeting point, so the path is not guaranteed to be the cheapest.
pub struct BidiAStarSearch {
    heuristic: Heuristic,
    interrupt: Interrupt,
}

impl BidiAStarSearch {

    pub fn new(heuristic: Heuristic, interrupt: Interrupt) -> Self {
        Self { heuristic, interrupt }
    }
}

impl GraphSearch for BidiAStarSearch {

    fn name(&self) -> &'static str {
        "bidi-astar"
    }

    fn search(&mut self, grid: &GridGraph, source: usize, target: usize, observer: &mut dyn SearchObserver) -> Result<Path, AlgorithmError> {
        check_endpoints(grid, source, target)?;
        check_admissible(self.heuristic, grid)?;
        debug!("bidi-astar ({}) between {source} and {target}", self.heuristic.name());
        bidirectional_best_first(grid, source, target, Some(self.heuristic), Meeting::First, &self.interrupt, observer)
    }
}


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Meeting {
    /// Stop at the first connection between the trees
    First,
    /// Keep going until no cheaper connection is possible
    Optimal,
}

/// One of the two search trees
struct Side {
    nodes: GraphNodeMap<Cost>,
    open: OpenList,
    /// Root of the other tree, where the heuristic points
    goal: usize,
}

impl Side {

    fn new(root: usize, goal: usize) -> Self {
        let mut nodes: GraphNodeMap<Cost> = GraphNodeMap::default();
        let index = nodes.insert_full(root, (usize::MAX, Zero::zero())).0;
        let mut open = OpenList::default();
        open.push(index, Zero::zero(), Zero::zero());
        Self { nodes, open, goal }
    }

    fn cost(&self, cell: usize) -> Option<Cost> {
        self.nodes.get(&cell).map(|&(_, c)| c)
    }
}

fn bidirectional_best_first(
    grid: &GridGraph,
    source: usize,
    target: usize,
    heuristic: Option<Heuristic>,
    meeting: Meeting,
    interrupt: &Interrupt,
    observer: &mut dyn SearchObserver,
) -> Result<Path, AlgorithmError> {
    interrupt.check()?;
    observer.on_frontier_add(source);
    if source == target {
        return Ok(conclude(observer, Path::new(vec![source])));
    }
    observer.on_frontier_add(target);

    let mut forward = Side::new(source, target);
    let mut backward = Side::new(target, source);

    // (cost of the connection, cell where the trees touch)
    let mut best: Option<(Cost, usize)> = None;
    let mut forward_turn = true;

    while !forward.open.is_empty() && !backward.open.is_empty() {
        if let (Some((mu, _)), Some(a), Some(b)) = (best, forward.open.min_cost(), backward.open.min_cost()) {
            if a + b >= mu {
                break;
            }
        }

        let (this, other) = if forward_turn {
            (&mut forward, &backward)
        } else {
            (&mut backward, &forward)
        };
        forward_turn = !forward_turn;

        let Some(candidate) = expand_one(grid, this, other, heuristic, interrupt, observer)? else {
            continue;
        };
        if best.is_none_or(|(mu, _)| candidate.0 < mu) {
            best = Some(candidate);
        }
        if meeting == Meeting::First {
            break;
        }
    }

    let path = match best {
        Some((_, cell)) => Path::new(stitch(&forward.nodes, cell, &backward.nodes, cell)),
        None => Path::unreachable(),
    };
    Ok(conclude(observer, path))
}

/// Pop the next live entry of one side and relax its edges
/// Returns the cheapest connection to the other tree seen while doing so
fn expand_one(
    grid: &GridGraph,
    this: &mut Side,
    other: &Side,
    heuristic: Option<Heuristic>,
    interrupt: &Interrupt,
    observer: &mut dyn SearchObserver,
) -> Result<Option<(Cost, usize)>, AlgorithmError> {

    while let Some(node) = this.open.pop() {
        interrupt.check()?;

        let Some((&cell, &(_, c))) = this.nodes.get_index(node.index) else {
            continue;
        };
        if node.cost > c {
            continue;
        }
        observer.on_expand(cell, c);

        let mut best: Option<(Cost, usize)> = other.cost(cell).map(|o| (c + o, cell));

        for neighbor in grid.adjacent(cell) {
            let new_cost = c + grid.edge_cost(cell, neighbor);

            let improved = match this.nodes.entry(neighbor) {
                Vacant(e) => {
                    let i = e.index();
                    e.insert((node.index, new_cost));
                    Some(i)
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        e.insert((node.index, new_cost));
                        Some(e.index())
                    } else {
                        None
                    }
                }
            };

            if let Some(neighbor_index) = improved {
                observer.on_edge_traversed(cell, neighbor);
                observer.on_frontier_add(neighbor);
                let h_cost = heuristic
                    .map(|h| h.estimate(grid, neighbor, this.goal))
                    .unwrap_or_default();
                this.open.push(neighbor_index, new_cost, new_cost + h_cost);
            }

            if let (Some(mine), Some(theirs)) = (this.cost(neighbor), other.cost(neighbor)) {
                let total = mine + theirs;
                if best.is_none_or(|(b, _)| total < b) {
                    best = Some((total, neighbor));
                }
            }
        }
        return Ok(best);
    }
    Ok(None)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Label, Topology};
    use crate::search::test_support::{comb, open};
    use crate::search::{BreadthFirstSearch, DijkstraSearch};

    #[test]
    fn test_bidi_bfs_matches_bfs_length() {
        let grid = open(7, 5);
        let mut bidi = BidiBreadthFirstSearch::new(Interrupt::new());
        let mut bfs = BreadthFirstSearch::new(Interrupt::new());
        for target in 1..grid.num_vertices() {
            let path = bidi.find_path(&grid, 0, target).unwrap();
            let expected = bfs.find_path(&grid, 0, target).unwrap();
            assert_eq!(path.num_steps(), expected.num_steps(), "target {target}");
            assert!(path.is_valid_in(&grid));
            assert_eq!(path.source(), Some(0));
            assert_eq!(path.target(), Some(target));
        }
    }

    #[test]
    fn test_bidi_bfs_adjacent_endpoints() {
        let grid = comb();
        let path = BidiBreadthFirstSearch::new(Interrupt::new()).find_path(&grid, 0, 1).unwrap();
        assert_eq!(path.cells(), &[0, 1]);
    }

    #[test]
    fn test_bidi_dijkstra_is_optimal() {
        let grid = GridGraph::full(6, 6, Topology::EightNeighbors, Label::Unvisited).unwrap();
        let mut bidi = BidiDijkstraSearch::new(Interrupt::new());
        let mut dijkstra = DijkstraSearch::new(Interrupt::new());
        for target in [5, 17, 30, 35] {
            let path = bidi.find_path(&grid, 0, target).unwrap();
            let expected = dijkstra.find_path(&grid, 0, target).unwrap();
            assert!((path.cost(&grid).value() - expected.cost(&grid).value()).abs() < 1e-9);
            assert!(path.is_valid_in(&grid));
        }
    }

    #[test]
    fn test_bidi_a_star_in_tree() {
        let grid = comb();
        let path = BidiAStarSearch::new(Heuristic::Manhattan, Interrupt::new())
            .find_path(&grid, grid.cell(0, 4), grid.cell(4, 4))
            .unwrap();
        assert_eq!(path.num_steps(), 12);
        assert!(path.is_valid_in(&grid));
    }

    #[test]
    fn test_stitch_drops_shared_cell() {
        let mut forward: GraphNodeMap<usize> = GraphNodeMap::default();
        let a = forward.insert_full(0, (usize::MAX, 0)).0;
        forward.insert(1, (a, 1));
        let mut backward: GraphNodeMap<usize> = GraphNodeMap::default();
        let b = backward.insert_full(2, (usize::MAX, 0)).0;
        backward.insert(1, (b, 1));

        assert_eq!(stitch(&forward, 1, &backward, 1), vec![0, 1, 2]);
        assert_eq!(stitch(&forward, 0, &backward, 1), vec![0, 1, 2]);
    }
}
