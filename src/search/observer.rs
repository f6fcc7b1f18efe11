use super::Path;
use crate::geometry::Cost;


/// Hooks called synchronously while a search runs
pub trait SearchObserver {
    fn on_frontier_add(&mut self, _cell: usize) {}
    fn on_expand(&mut self, _cell: usize, _cost: Cost) {}
    fn on_edge_traversed(&mut self, _from: usize, _to: usize) {}
    fn on_path_found(&mut self, _path: &Path) {}
    fn on_no_path(&mut self) {}
}

pub struct NoOpSearchObserver;
impl SearchObserver for NoOpSearchObserver {}


#[derive(Clone, Debug, PartialEq)]
pub enum SearchStep {
    FrontierAdd(usize),
    Expand { cell: usize, cost: Cost },
    EdgeTraversed(usize, usize),
    PathFound(Path),
    NoPath,
}

/// Records a run so it can be replayed one step at a time
#[derive(Clone, Debug, Default)]
pub struct SearchTrace {
    steps: Vec<SearchStep>,
}

impl SearchTrace {

    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[SearchStep] {
        &self.steps
    }

    pub fn iter(&self) -> impl Iterator<Item = &SearchStep> {
        self.steps.iter()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Cells in the order they were expanded
    pub fn expanded(&self) -> Vec<usize> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                SearchStep::Expand { cell, .. } => Some(*cell),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }
}

impl SearchObserver for SearchTrace {
    fn on_frontier_add(&mut self, cell: usize) {
        self.steps.push(SearchStep::FrontierAdd(cell));
    }

    fn on_expand(&mut self, cell: usize, cost: Cost) {
        self.steps.push(SearchStep::Expand { cell, cost });
    }

    fn on_edge_traversed(&mut self, from: usize, to: usize) {
        self.steps.push(SearchStep::EdgeTraversed(from, to));
    }

    fn on_path_found(&mut self, path: &Path) {
        self.steps.push(SearchStep::PathFound(path.clone()));
    }

    fn on_no_path(&mut self) {
        self.steps.push(SearchStep::NoPath);
    }
}

impl<'a> IntoIterator for &'a SearchTrace {
    type Item = &'a SearchStep;
    type IntoIter = std::slice::Iter<'a, SearchStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}


/// Report the outcome of a run and hand the path back
pub(crate) fn conclude(observer: &mut dyn SearchObserver, path: Path) -> Path {
    if path.is_empty() {
        observer.on_no_path();
    } else {
        observer.on_path_found(&path);
    }
    path
}
