use std::{cmp::Ordering, fmt, ops::Add};

use num_traits::{Float, Num, Signed, Zero};
use serde::{Deserialize, Serialize};

use crate::grid::{GridGraph, Topology};


/// Manhattan distance
pub fn manhattan_distance<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Num + Copy + Signed,
    {
    (x1 - x2).abs() + (y1 - y2).abs()
}

/// Euclidean distance
pub fn euclidean<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Float,
    {
    ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
}

/// Chebyshev distance - number of king moves on a grid
pub fn chebyshev_distance<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Num + Copy + Signed + PartialOrd,
    {
    let dx = (x1 - x2).abs();
    let dy = (y1 - y2).abs();
    if dx > dy { dx } else { dy }
}


/// Path cost on the grid
/// f64 is not Ord, total_cmp gives the ordering the priority queues need.
/// Costs are never NaN: they are sums of coordinate distances.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cost(pub f64);

impl Cost {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Eq for Cost {}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}
impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for Cost {
    type Output = Cost;

    fn add(self, rhs: Self) -> Self::Output {
        Cost(self.0 + rhs.0)
    }
}

impl Zero for Cost {
    fn zero() -> Self {
        Cost(0.0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl From<f64> for Cost {
    fn from(value: f64) -> Self {
        Cost(value)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}


/// Distance estimate used by informed searches
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Heuristic {
    #[default]
    Euclidean,
    Manhattan,
    Chebyshev,
}

impl Heuristic {

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Euclidean => "euclidean",
            Heuristic::Manhattan => "manhattan",
            Heuristic::Chebyshev => "chebyshev",
        }
    }

    /// Estimated cost between two cells, from their coordinates only
    pub fn estimate(self, grid: &GridGraph, from: usize, to: usize) -> Cost {
        let (x1, y1) = grid.coord(from);
        let (x2, y2) = grid.coord(to);
        let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);

        let value = match self {
            Heuristic::Euclidean => euclidean(x1, y1, x2, y2),
            Heuristic::Manhattan => manhattan_distance(x1, y1, x2, y2),
            Heuristic::Chebyshev => chebyshev_distance(x1, y1, x2, y2),
        };
        Cost(value)
    }

    /// Never overestimates the true cost when diagonal steps cost sqrt(2)
    /// Manhattan distance counts a diagonal step as 2
    pub fn is_admissible_for(self, topology: Topology) -> bool {
        match self {
            Heuristic::Euclidean | Heuristic::Chebyshev => true,
            Heuristic::Manhattan => topology == Topology::FourNeighbors,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Label;

    #[test]
    fn test_distances() {
        assert_eq!(manhattan_distance(0i32, 0, 3, -4), 7);
        assert_eq!(chebyshev_distance(0i32, 0, 3, -4), 4);
        assert!((euclidean(0.0f64, 0.0, 3.0, 4.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_cost_ordering() {
        let mut costs = vec![Cost(2.5), Cost(0.0), Cost(1.0)];
        costs.sort();
        assert_eq!(costs, vec![Cost(0.0), Cost(1.0), Cost(2.5)]);
        assert_eq!(Cost(1.0) + Cost(0.5), Cost(1.5));
        assert!(Cost::zero().is_zero());
    }

    #[test]
    fn test_heuristic_estimates() {
        let grid = GridGraph::empty(10, 10, Topology::FourNeighbors, Label::Unvisited).unwrap();
        let from = grid.cell(1, 1);
        let to = grid.cell(4, 5);

        assert_eq!(Heuristic::Manhattan.estimate(&grid, from, to), Cost(7.0));
        assert_eq!(Heuristic::Chebyshev.estimate(&grid, from, to), Cost(4.0));
        assert_eq!(Heuristic::Euclidean.estimate(&grid, from, to), Cost(5.0));
    }

    #[test]
    fn test_heuristic_admissibility() {
        assert!(Heuristic::Manhattan.is_admissible_for(Topology::FourNeighbors));
        assert!(!Heuristic::Manhattan.is_admissible_for(Topology::EightNeighbors));
        assert!(Heuristic::Chebyshev.is_admissible_for(Topology::EightNeighbors));
        assert!(Heuristic::Euclidean.is_admissible_for(Topology::EightNeighbors));
    }
}
