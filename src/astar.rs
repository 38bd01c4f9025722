//! Best-first search with deterministic FIFO tie-breaking.
//!
//! This module implements a variant of A* in which the open set orders
//! entries by estimated total cost, with ties broken by insertion order
//! (earliest first). A node is enqueued exactly once, on first discovery;
//! later improvements update its recorded cost and predecessor but leave
//! its queue entry in place. Together with a consistent heuristic this
//! reproduces the expansion order of a FIFO-tie-broken priority queue
//! exactly, making searches fully deterministic.

use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::info;
use num_traits::Zero;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Signal returned by [SearchObserver::step], allowing the host to stop a
/// search cooperatively between expansions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepSignal {
    Continue,
    Abort,
}

/// Hook invoked by [astar_search] as cells change search status, so a host
/// can animate the search and request cancellation. All methods default to
/// no-ops; observers get read-only access to cells and cannot touch the
/// search state itself.
pub trait SearchObserver<N> {
    /// `cell` entered the open set (first discovery).
    fn frontier(&mut self, _cell: &N) {}
    /// `cell` was expanded and will not be expanded again. Never reported
    /// for the start cell, which keeps its own visual marker.
    fn closed(&mut self, _cell: &N) {}
    /// `cell` lies on the final path. Reported once per intermediate cell,
    /// in goal-to-start order; the endpoints keep their own markers.
    fn path_cell(&mut self, _cell: &N) {}
    /// Called once per expansion, after neighbour relaxation. This is the
    /// single suspension point of a run: repaint here, and return
    /// [StepSignal::Abort] to stop before the next expansion. An expansion
    /// already in progress always completes first.
    fn step(&mut self) -> StepSignal {
        StepSignal::Continue
    }
}

/// Observer that ignores every event; used for headless searches.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl<N> SearchObserver<N> for NoopObserver {}

/// Terminal state of a search run. All three are ordinary outcomes the
/// caller must handle; none of them is an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome<N> {
    /// A shortest path exists; holds the full start-to-goal sequence,
    /// endpoints included.
    Found(Vec<N>),
    /// The open set ran dry: the goal is unreachable.
    Exhausted,
    /// The observer requested a stop mid-search.
    Aborted,
}

impl<N> SearchOutcome<N> {
    /// The found path, if any.
    pub fn path(self) -> Option<Vec<N>> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }
}

struct OpenEntry<K> {
    estimated_cost: K,
    /// Slot of the node in the discovery map. Nodes are enqueued exactly
    /// once, in discovery order, so this doubles as the insertion counter
    /// used for tie-breaking.
    index: usize,
}

impl<K: PartialEq> Eq for OpenEntry<K> {}

impl<K: PartialEq> PartialEq for OpenEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost) && self.index == other.index
    }
}

impl<K: Ord> PartialOrd for OpenEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for OpenEntry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: reverse on cost so the cheapest entry
        // surfaces first, then reverse on index so equal-cost entries pop
        // in insertion order.
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => other.index.cmp(&self.index),
            s => s,
        }
    }
}

/// Walks predecessor slots from the goal's predecessor back to the
/// sentinel-parented start, yielding the intermediate nodes in
/// goal-to-start order. Both endpoints are excluded; the caller re-adds
/// them when assembling the public path.
fn trace_back<N, C>(parents: &FxIndexMap<N, (usize, C)>, goal_index: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
{
    let first = parents.get_index(goal_index).map(|(_, &(p, _))| p);
    itertools::unfold(first, |slot| {
        let ix = (*slot)?;
        parents.get_index(ix).and_then(|(node, &(parent_ix, _))| {
            if parent_ix == usize::MAX {
                // Reached the start, which has no predecessor.
                None
            } else {
                *slot = Some(parent_ix);
                Some(node.clone())
            }
        })
    })
    .collect()
}

/// Runs the search from `start` until a node satisfying `success` is
/// expanded, the open set is exhausted, or the observer aborts.
///
/// `successors` yields the neighbours of a node with their step costs, in
/// a fixed order: among equally estimated candidates the one discovered
/// first is expanded first, so the successor order decides which of
/// several shortest paths is returned. `heuristic` must never overestimate
/// the true remaining cost and must be consistent, or optimality is lost.
///
/// The start node is assumed not to satisfy `success` itself; callers
/// validate that endpoints are distinct before searching.
pub fn astar_search<N, C, FN, IN, FH, FS, O>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
    observer: &mut O,
) -> SearchOutcome<N>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
    O: SearchObserver<N>,
{
    let mut open = BinaryHeap::new();
    let mut parents: FxIndexMap<N, (usize, C)> = FxIndexMap::default();
    parents.insert(start.clone(), (usize::MAX, Zero::zero()));
    open.push(OpenEntry {
        estimated_cost: heuristic(start),
        index: 0,
    });
    while let Some(OpenEntry { index, .. }) = open.pop() {
        // The queue entry may carry a stale estimate if the node was
        // relaxed after being enqueued; the map always holds the best
        // known cost, so read it fresh.
        let (node, &(_, cost)) = parents.get_index(index).unwrap();
        if success(node) {
            let goal = node.clone();
            let intermediates = trace_back(&parents, index);
            for cell in &intermediates {
                observer.path_cell(cell);
            }
            // One more render pass so the host can draw the finished path.
            let _ = observer.step();
            let mut path = Vec::with_capacity(intermediates.len() + 2);
            path.push(start.clone());
            path.extend(intermediates.into_iter().rev());
            path.push(goal);
            return SearchOutcome::Found(path);
        }
        let node = node.clone();
        for (successor, move_cost) in successors(&node) {
            let new_cost = cost + move_cost;
            match parents.entry(successor) {
                Vacant(e) => {
                    let h = heuristic(e.key());
                    let n = e.index();
                    let cell = e.key().clone();
                    e.insert((index, new_cost));
                    open.push(OpenEntry {
                        estimated_cost: new_cost + h,
                        index: n,
                    });
                    observer.frontier(&cell);
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        // Strictly better route to an already-discovered
                        // node: update its cost and predecessor but keep
                        // the original queue entry and insertion order.
                        e.insert((index, new_cost));
                    }
                }
            }
        }
        let signal = observer.step();
        if index != 0 {
            observer.closed(&node);
        }
        if signal == StepSignal::Abort {
            info!("search aborted with {} cells discovered", parents.len());
            return SearchOutcome::Aborted;
        }
    }
    info!("open set exhausted without reaching the goal");
    SearchOutcome::Exhausted
}
