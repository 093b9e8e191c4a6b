use std::collections::{BTreeSet, BinaryHeap};

use log::{debug, trace};

use super::frontier::Candidate;
use super::route::Route;
use crate::model::state::Step;
use crate::model::{RoadNetwork, SearchState};
use crate::{Error, NodeId};

/// A* search between two intersections over the one-way aware adjacency.
///
/// Returns `Ok(None)` if `target` cannot be reached from `start`.
///
/// # Errors
///
/// [`Error::UnknownNode`] if either id is not part of the network.
pub fn find_path(
    network: &RoadNetwork,
    start: NodeId,
    target: NodeId,
) -> Result<Option<Route>, Error> {
    let mut state = SearchState::for_network(network);
    find_path_with(network, &mut state, start, target)
}

/// Same as [`find_path`], reusing a caller-owned search table.
///
/// The table must be clean on entry and is reset before returning.
///
/// # Errors
///
/// [`Error::UnknownNode`] for ids outside the network,
/// [`Error::StaleSearchState`] or [`Error::StateSizeMismatch`] if `state`
/// cannot be used for this network.
pub fn find_path_with(
    network: &RoadNetwork,
    state: &mut SearchState,
    start: NodeId,
    target: NodeId,
) -> Result<Option<Route>, Error> {
    state.begin(network)?;
    let start_ix = network.index_of(start)?;
    let target_ix = network.index_of(target)?;

    if start_ix == target_ix {
        return Ok(Some(Route::stationary(start)));
    }

    let route = search(network, state, start_ix, target_ix);
    state.reset();

    match &route {
        Some(route) => debug!(
            "Route {start} -> {target}: {:.3} km over {} segments",
            route.distance,
            route.segments.len()
        ),
        None => debug!("No route {start} -> {target}"),
    }
    Ok(route)
}

fn search(
    network: &RoadNetwork,
    state: &mut SearchState,
    start: usize,
    target: usize,
) -> Option<Route> {
    let mut heap = BinaryHeap::new();
    let mut avoided_one_way = BTreeSet::new();
    let heuristic = |node: usize| network.distance_between(node, target);

    state.relax(start, 0.0);
    heap.push(Candidate {
        estimate: state.estimate_with(start, || heuristic(start)),
        cost: 0.0,
        node: start,
        via: None,
    });

    while let Some(Candidate {
        cost, node, via, ..
    }) = heap.pop()
    {
        // Lazy deletion: an already finalized node was settled by a cheaper
        // copy of this entry and must not be expanded again
        if state.is_visited(node) {
            continue;
        }
        state.settle(node, cost, via);

        // Stop once the target is finalized, not when it is first enqueued
        if node == target {
            return Some(Route::reconstruct(network, state, target, avoided_one_way));
        }

        let intersection = network.node_at(node);
        for &segment_id in intersection.segments() {
            let segment = &network.segments()[segment_id];
            if !network.is_traversable(segment, intersection.id) {
                trace!(
                    "Segment {segment_id} of one-way road {} rejected from node {}",
                    segment.road, intersection.id
                );
                avoided_one_way.insert(segment.road);
                continue;
            }

            let next = segment.other_end_ix(node);
            if state.is_visited(next) {
                continue;
            }

            let next_cost = cost + segment.length;
            if next_cost < state.cost(next) {
                state.relax(next, next_cost);
                heap.push(Candidate {
                    estimate: next_cost + state.estimate_with(next, || heuristic(next)),
                    cost: next_cost,
                    node: next,
                    via: Some(Step {
                        node,
                        segment: segment_id,
                    }),
                });
            }
        }
    }

    None
}
