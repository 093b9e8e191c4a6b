//! Per-search node table.
//!
//! Algorithms never write to the network. Everything they need to remember
//! about a node during one run (visited flag, DFS depth, path cost,
//! heuristic estimate, predecessor) lives here, indexed by the node's
//! position in the network. A table must be clean when a search starts and
//! is cleaned again by the algorithm when it finishes, so one table can be
//! reused for any number of sequential searches.

use fixedbitset::FixedBitSet;

use super::network::RoadNetwork;
use crate::{Error, Kilometres, SegmentId};

/// Depth of a node the current search has not discovered
pub const UNVISITED_DEPTH: u32 = u32::MAX;

/// How a node was reached: previous node and the segment used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Step {
    pub(crate) node: usize,
    pub(crate) segment: SegmentId,
}

#[derive(Debug, Clone)]
pub struct SearchState {
    visited: FixedBitSet,
    depth: Vec<u32>,
    cost: Vec<Kilometres>,
    estimate: Vec<Option<Kilometres>>,
    predecessor: Vec<Option<Step>>,
    // Entries written since the last reset, so resetting is O(touched)
    touched: Vec<usize>,
    dirty: FixedBitSet,
}

impl SearchState {
    pub fn new(node_count: usize) -> Self {
        Self {
            visited: FixedBitSet::with_capacity(node_count),
            depth: vec![UNVISITED_DEPTH; node_count],
            cost: vec![Kilometres::INFINITY; node_count],
            estimate: vec![None; node_count],
            predecessor: vec![None; node_count],
            touched: Vec::new(),
            dirty: FixedBitSet::with_capacity(node_count),
        }
    }

    pub fn for_network(network: &RoadNetwork) -> Self {
        Self::new(network.node_count())
    }

    pub fn len(&self) -> usize {
        self.depth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    /// True when no node carries state from a previous search
    pub fn is_clean(&self) -> bool {
        self.touched.is_empty()
    }

    /// Restores sentinel values for every node written since the last reset
    pub fn reset(&mut self) {
        for ix in self.touched.drain(..) {
            self.visited.set(ix, false);
            self.depth[ix] = UNVISITED_DEPTH;
            self.cost[ix] = Kilometres::INFINITY;
            self.estimate[ix] = None;
            self.predecessor[ix] = None;
            self.dirty.set(ix, false);
        }
    }

    /// Checks that this table may be used for a new search over `network`
    pub(crate) fn begin(&self, network: &RoadNetwork) -> Result<(), Error> {
        if self.len() != network.node_count() {
            return Err(Error::StateSizeMismatch {
                state: self.len(),
                network: network.node_count(),
            });
        }
        if !self.is_clean() {
            return Err(Error::StaleSearchState);
        }
        Ok(())
    }

    fn touch(&mut self, ix: usize) {
        if !self.dirty.put(ix) {
            self.touched.push(ix);
        }
    }

    pub(crate) fn is_visited(&self, ix: usize) -> bool {
        self.visited.contains(ix)
    }

    /// Discovery depth, `None` while undiscovered
    pub(crate) fn depth(&self, ix: usize) -> Option<u32> {
        let depth = self.depth[ix];
        (depth != UNVISITED_DEPTH).then_some(depth)
    }

    pub(crate) fn discover(&mut self, ix: usize, depth: u32) {
        self.touch(ix);
        self.visited.insert(ix);
        self.depth[ix] = depth;
    }

    /// Best tentative cost seen so far, infinite if never reached
    pub(crate) fn cost(&self, ix: usize) -> Kilometres {
        self.cost[ix]
    }

    pub(crate) fn relax(&mut self, ix: usize, cost: Kilometres) {
        self.touch(ix);
        self.cost[ix] = cost;
    }

    /// Cached heuristic for a node, computed on first use
    pub(crate) fn estimate_with(
        &mut self,
        ix: usize,
        heuristic: impl FnOnce() -> Kilometres,
    ) -> Kilometres {
        if let Some(estimate) = self.estimate[ix] {
            return estimate;
        }
        let estimate = heuristic();
        self.touch(ix);
        self.estimate[ix] = Some(estimate);
        estimate
    }

    /// Finalizes a node with its cost and the step that reached it
    pub(crate) fn settle(&mut self, ix: usize, cost: Kilometres, via: Option<Step>) {
        self.touch(ix);
        self.visited.insert(ix);
        self.cost[ix] = cost;
        self.predecessor[ix] = via;
    }

    pub(crate) fn predecessor(&self, ix: usize) -> Option<Step> {
        self.predecessor[ix]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_restores_sentinels() {
        let mut state = SearchState::new(4);
        assert!(state.is_clean());

        state.discover(1, 3);
        state.relax(2, 1.5);
        state.settle(
            3,
            2.0,
            Some(Step {
                node: 2,
                segment: 0,
            }),
        );
        assert!(!state.is_clean());
        assert_eq!(state.depth(1), Some(3));
        assert!(state.is_visited(3));

        state.reset();

        assert!(state.is_clean());
        for ix in 0..4 {
            assert!(!state.is_visited(ix));
            assert_eq!(state.depth(ix), None);
            assert!(state.cost(ix).is_infinite());
            assert_eq!(state.predecessor(ix), None);
        }
    }

    #[test]
    fn estimates_are_cached() {
        let mut state = SearchState::new(2);
        assert_eq!(state.estimate_with(0, || 4.0), 4.0);
        assert_eq!(state.estimate_with(0, || 9.0), 4.0);

        state.reset();
        assert_eq!(state.estimate_with(0, || 9.0), 9.0);
    }

    #[test]
    fn repeated_writes_are_tracked_once() {
        let mut state = SearchState::new(3);
        state.relax(1, 5.0);
        state.relax(1, 4.0);
        state.settle(1, 4.0, None);

        assert_eq!(state.touched, vec![1]);
    }
}
