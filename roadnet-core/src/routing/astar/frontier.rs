use std::cmp::Ordering;

use crate::Kilometres;
use crate::model::state::Step;

/// Open-set entry. A node can sit in the heap several times with different
/// tentative costs; stale copies are dropped when popped.
#[derive(Copy, Clone, Debug)]
pub(super) struct Candidate {
    /// Cost so far plus heuristic to the target
    pub(super) estimate: Kilometres,
    pub(super) cost: Kilometres,
    pub(super) node: usize,
    pub(super) via: Option<Step>,
}

// Implement Ord for Candidate to use in BinaryHeap
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by estimate (reversed from standard Rust BinaryHeap)
        other
            .estimate
            .total_cmp(&self.estimate)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}
