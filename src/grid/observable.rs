//! Grid decorator that reports every mutation to registered observers
//!
//! Observers run synchronously, before the mutating call returns. They may
//! unsubscribe themselves or other observers while handling an event; such
//! removals take effect immediately for the rest of the dispatch and the
//! observer list is compacted once the dispatch is over.

use std::fmt;
use std::ops::Deref;

use log::trace;

use super::{GridGraph, Label};
use crate::errors::GridError;


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridEvent {
    VertexChanged { cell: usize, old: Label, new: Label },
    EdgeAdded(usize, usize),
    EdgeRemoved(usize, usize),
    /// An existing edge should be redrawn
    EdgeChanged(usize, usize),
    /// Bulk change, observers should resync from the grid
    GraphChanged,
}


#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);


/// Handed to an observer together with each event
pub struct EventContext<'a> {
    grid: &'a GridGraph,
    observer: ObserverId,
    removed: &'a mut Vec<ObserverId>,
}

impl EventContext<'_> {

    /// Grid state after the mutation
    pub fn grid(&self) -> &GridGraph {
        self.grid
    }

    /// Id of the observer being notified
    pub fn observer(&self) -> ObserverId {
        self.observer
    }

    pub fn unsubscribe(&mut self, id: ObserverId) {
        if !self.removed.contains(&id) {
            self.removed.push(id);
        }
    }

    pub fn unsubscribe_self(&mut self) {
        self.unsubscribe(self.observer);
    }
}


pub trait GraphObserver {
    fn on_event(&mut self, event: &GridEvent, ctx: &mut EventContext<'_>);
}

impl<F> GraphObserver for F
where
    F: FnMut(&GridEvent, &mut EventContext<'_>),
{
    fn on_event(&mut self, event: &GridEvent, ctx: &mut EventContext<'_>) {
        self(event, ctx)
    }
}


type ObserverBox = Box<dyn GraphObserver + Send>;

pub struct ObservableGridGraph {
    grid: GridGraph,
    observers: Vec<(ObserverId, ObserverBox)>,
    next_id: u64,
    events_enabled: bool,
    // a change happened while muted
    muted_changes: bool,
}

impl ObservableGridGraph {

    pub fn new(grid: GridGraph) -> Self {
        Self {
            grid,
            observers: Vec::new(),
            next_id: 0,
            events_enabled: true,
            muted_changes: false,
        }
    }

    pub fn grid(&self) -> &GridGraph {
        &self.grid
    }

    pub fn into_inner(self) -> GridGraph {
        self.grid
    }

    pub fn add_observer<O>(&mut self, observer: O) -> ObserverId
    where
        O: GraphObserver + Send + 'static,
    {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Closure shorthand for [`ObservableGridGraph::add_observer`]
    pub fn on_event<F>(&mut self, f: F) -> ObserverId
    where
        F: FnMut(&GridEvent, &mut EventContext<'_>) + Send + 'static,
    {
        self.add_observer(f)
    }

    /// Returns false if no observer had this id
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    pub fn num_observers(&self) -> usize {
        self.observers.len()
    }

    /// Mute dispatch during bulk work
    /// Re-enabling announces one GraphChanged if the grid changed in between.
    pub fn set_events_enabled(&mut self, enabled: bool) {
        let was_enabled = self.events_enabled;
        self.events_enabled = enabled;
        if enabled && !was_enabled && std::mem::take(&mut self.muted_changes) {
            self.dispatch(GridEvent::GraphChanged);
        }
    }

    pub fn events_enabled(&self) -> bool {
        self.events_enabled
    }

    fn dispatch(&mut self, event: GridEvent) {
        if !self.events_enabled {
            if !matches!(event, GridEvent::EdgeChanged(..)) {
                self.muted_changes = true;
            }
            return;
        }
        if self.observers.is_empty() {
            return;
        }
        trace!("dispatch {event:?} to {} observers", self.observers.len());

        let mut removed: Vec<ObserverId> = Vec::new();
        for (id, observer) in self.observers.iter_mut() {
            if removed.contains(id) {
                continue;
            }
            let mut ctx = EventContext {
                grid: &self.grid,
                observer: *id,
                removed: &mut removed,
            };
            observer.on_event(&event, &mut ctx);
        }

        if !removed.is_empty() {
            self.observers.retain(|(id, _)| !removed.contains(id));
        }
    }

    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<bool, GridError> {
        let added = self.grid.add_edge(u, v)?;
        if added {
            self.dispatch(GridEvent::EdgeAdded(u, v));
        }
        Ok(added)
    }

    pub fn remove_edge(&mut self, u: usize, v: usize) -> Result<bool, GridError> {
        let removed = self.grid.remove_edge(u, v)?;
        if removed {
            self.dispatch(GridEvent::EdgeRemoved(u, v));
        }
        Ok(removed)
    }

    /// Announce an existing edge, e.g. one an algorithm is currently examining
    /// Returns false if there is no such edge
    pub fn mark_edge(&mut self, u: usize, v: usize) -> bool {
        if self.grid.has_edge(u, v) {
            self.dispatch(GridEvent::EdgeChanged(u, v));
            true
        } else {
            false
        }
    }

    /// Returns the previous label
    pub fn set_label(&mut self, cell: usize, label: Label) -> Label {
        let old = self.grid.set_label(cell, label);
        if old != label {
            self.dispatch(GridEvent::VertexChanged { cell, old, new: label });
        }
        old
    }

    pub fn set_all_labels(&mut self, label: Label) {
        if self.grid.labels().iter().any(|&old| old != label) {
            self.grid.set_all_labels(label);
            self.dispatch(GridEvent::GraphChanged);
        }
    }

    pub fn fill(&mut self) {
        if !self.grid.is_full() {
            self.grid.fill();
            self.dispatch(GridEvent::GraphChanged);
        }
    }

    pub fn clear_edges(&mut self) {
        if !self.grid.is_empty() {
            self.grid.clear_edges();
            self.dispatch(GridEvent::GraphChanged);
        }
    }

    /// Swap in a grid of a new resolution, observers stay attached
    pub fn replace_grid(&mut self, grid: GridGraph) -> GridGraph {
        let old = std::mem::replace(&mut self.grid, grid);
        self.dispatch(GridEvent::GraphChanged);
        old
    }
}

impl Deref for ObservableGridGraph {
    type Target = GridGraph;

    fn deref(&self) -> &Self::Target {
        &self.grid
    }
}

impl From<GridGraph> for ObservableGridGraph {
    fn from(grid: GridGraph) -> Self {
        Self::new(grid)
    }
}

impl fmt::Debug for ObservableGridGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableGridGraph")
            .field("grid", &self.grid)
            .field("observers", &self.observers.len())
            .field("events_enabled", &self.events_enabled)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Topology;
    use std::sync::{Arc, Mutex};

    fn observable(cols: usize, rows: usize) -> ObservableGridGraph {
        GridGraph::empty(cols, rows, Topology::FourNeighbors, Label::Unvisited)
            .unwrap()
            .into()
    }

    fn recorder(grid: &mut ObservableGridGraph) -> (ObserverId, Arc<Mutex<Vec<GridEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let id = grid.on_event(move |event: &GridEvent, _ctx: &mut EventContext<'_>| {
            sink.lock().unwrap().push(*event);
        });
        (id, events)
    }

    #[test]
    fn test_mutations_notify_observers() {
        let mut grid = observable(3, 3);
        let (_, events) = recorder(&mut grid);

        grid.add_edge(0, 1).unwrap();
        grid.add_edge(0, 1).unwrap(); // no change, no event
        grid.set_label(4, Label::Visited);
        grid.set_label(4, Label::Visited);
        grid.mark_edge(0, 1);
        assert!(!grid.mark_edge(1, 2));
        grid.remove_edge(1, 0).unwrap();
        grid.fill();

        assert_eq!(*events.lock().unwrap(), vec![
            GridEvent::EdgeAdded(0, 1),
            GridEvent::VertexChanged { cell: 4, old: Label::Unvisited, new: Label::Visited },
            GridEvent::EdgeChanged(0, 1),
            GridEvent::EdgeRemoved(1, 0),
            GridEvent::GraphChanged,
        ]);
    }

    #[test]
    fn test_observer_sees_state_after_mutation() {
        let mut grid = observable(2, 2);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        grid.on_event(move |_event: &GridEvent, ctx: &mut EventContext<'_>| {
            sink.lock().unwrap().push(ctx.grid().num_edges());
        });

        grid.add_edge(0, 1).unwrap();
        grid.add_edge(0, 2).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_rejected_edge_emits_nothing() {
        let mut grid = observable(4, 4);
        let (_, events) = recorder(&mut grid);
        assert!(grid.add_edge(0, 15).is_err());
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unsubscribe_during_dispatch() {
        let mut grid = observable(3, 1);
        let calls = Arc::new(Mutex::new(0));

        // first observer removes itself after one event
        let counter = Arc::clone(&calls);
        grid.on_event(move |_event: &GridEvent, ctx: &mut EventContext<'_>| {
            *counter.lock().unwrap() += 1;
            ctx.unsubscribe_self();
        });
        let (_, events) = recorder(&mut grid);

        grid.add_edge(0, 1).unwrap();
        grid.add_edge(1, 2).unwrap();

        assert_eq!(*calls.lock().unwrap(), 1);
        assert_eq!(events.lock().unwrap().len(), 2);
        assert_eq!(grid.num_observers(), 1);
    }

    #[test]
    fn test_unsubscribe_other_observer_during_dispatch() {
        let mut grid = observable(3, 1);
        // ids are handed out in order, the next observer gets ObserverId(1)
        grid.on_event(|_event: &GridEvent, ctx: &mut EventContext<'_>| {
            ctx.unsubscribe(ObserverId(1));
        });
        let (second_id, second_events) = recorder(&mut grid);
        assert_eq!(second_id, ObserverId(1));

        grid.add_edge(0, 1).unwrap();
        assert!(second_events.lock().unwrap().is_empty());
        assert_eq!(grid.num_observers(), 1);
    }

    #[test]
    fn test_remove_observer() {
        let mut grid = observable(2, 1);
        let (id, events) = recorder(&mut grid);
        assert!(grid.remove_observer(id));
        assert!(!grid.remove_observer(id));
        grid.add_edge(0, 1).unwrap();
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_muted_events() {
        let mut grid = observable(3, 3);
        let (_, events) = recorder(&mut grid);
        grid.set_events_enabled(false);
        grid.add_edge(0, 1).unwrap();
        grid.add_edge(1, 2).unwrap();
        grid.set_events_enabled(true);
        assert_eq!(*events.lock().unwrap(), vec![GridEvent::GraphChanged]);
        assert_eq!(grid.num_edges(), 2);
    }

    #[test]
    fn test_replace_grid_keeps_observers() {
        let mut grid = observable(2, 2);
        let (_, events) = recorder(&mut grid);
        let bigger = GridGraph::full(5, 5, Topology::EightNeighbors, Label::Unvisited).unwrap();
        let old = grid.replace_grid(bigger);
        assert_eq!(old.num_vertices(), 4);
        assert_eq!(grid.num_vertices(), 25);
        assert_eq!(grid.num_observers(), 1);
        assert_eq!(*events.lock().unwrap(), vec![GridEvent::GraphChanged]);
    }

    #[test]
    fn test_bulk_changes_without_effect_are_silent() {
        let mut grid = observable(3, 2);
        let (_, events) = recorder(&mut grid);
        grid.clear_edges();
        grid.set_all_labels(Label::Unvisited);
        assert!(events.lock().unwrap().is_empty());

        grid.fill();
        grid.fill();
        grid.set_all_labels(Label::Completed);
        grid.set_all_labels(Label::Completed);
        grid.clear_edges();
        grid.clear_edges();
        assert_eq!(*events.lock().unwrap(), vec![GridEvent::GraphChanged; 3]);
    }

    #[test]
    fn test_unmuting_without_changes_is_silent() {
        let mut grid = observable(3, 3);
        let (_, events) = recorder(&mut grid);
        grid.set_events_enabled(false);
        grid.clear_edges();
        grid.add_edge(0, 1).unwrap();
        grid.remove_edge(0, 1).unwrap();
        grid.set_events_enabled(true);
        assert_eq!(*events.lock().unwrap(), vec![GridEvent::GraphChanged]);

        grid.set_events_enabled(false);
        grid.clear_edges();
        grid.set_all_labels(Label::Unvisited);
        grid.set_events_enabled(true);
        assert_eq!(events.lock().unwrap().len(), 1);
    }
}
