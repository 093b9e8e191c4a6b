use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;

use crate::model::{RoadNetwork, SearchState};
use crate::{Error, Kilometres, NodeId, RoadId, SegmentId};

/// Shortest route between two intersections
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub start: NodeId,
    pub target: NodeId,
    /// Sum of the lengths of `segments`
    pub distance: Kilometres,
    /// Segments in travel order, start to target
    pub segments: Vec<SegmentId>,
    /// Intersections in travel order, one more than `segments`
    pub nodes: Vec<NodeId>,
    /// Distance travelled on each road, keyed by road name
    pub road_distances: BTreeMap<String, Kilometres>,
    /// One-way roads the search could not enter against their direction
    pub avoided_one_way: BTreeSet<RoadId>,
}

/// Consecutive stretch of a route on roads sharing one name
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLeg {
    pub road_name: String,
    pub from: NodeId,
    pub to: NodeId,
    pub distance: Kilometres,
    pub segment_count: usize,
}

impl Route {
    /// Zero-length route for a search whose start is its target
    pub(super) fn stationary(node: NodeId) -> Self {
        Self {
            start: node,
            target: node,
            distance: 0.0,
            segments: Vec::new(),
            nodes: vec![node],
            road_distances: BTreeMap::new(),
            avoided_one_way: BTreeSet::new(),
        }
    }

    /// Walks predecessor links back from the settled target
    pub(super) fn reconstruct(
        network: &RoadNetwork,
        state: &SearchState,
        target: usize,
        avoided_one_way: BTreeSet<RoadId>,
    ) -> Self {
        let mut segments = Vec::new();
        let mut nodes = vec![network.node_at(target).id];
        let mut current = target;
        while let Some(step) = state.predecessor(current) {
            segments.push(step.segment);
            nodes.push(network.node_at(step.node).id);
            current = step.node;
        }
        segments.reverse();
        nodes.reverse();

        let mut distance = 0.0;
        let mut road_distances: BTreeMap<String, Kilometres> = BTreeMap::new();
        for &segment_id in &segments {
            let segment = &network.segments()[segment_id];
            distance += segment.length;
            *road_distances
                .entry(network.road_of(segment).name.clone())
                .or_default() += segment.length;
        }

        Self {
            start: network.node_at(current).id,
            target: network.node_at(target).id,
            distance,
            segments,
            nodes,
            road_distances,
            avoided_one_way,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn avoided_one_way_count(&self) -> usize {
        self.avoided_one_way.len()
    }

    /// Groups consecutive segments by road name, in travel order
    ///
    /// # Errors
    ///
    /// [`Error::InvalidData`] if the route does not belong to `network` or
    /// its `nodes` and `segments` disagree.
    pub fn legs(&self, network: &RoadNetwork) -> Result<Vec<RouteLeg>, Error> {
        let steps = self
            .segments
            .iter()
            .enumerate()
            .map(|(position, &segment_id)| {
                let segment = network.segment(segment_id).ok_or_else(|| {
                    Error::InvalidData(format!("route uses unknown segment {segment_id}"))
                })?;
                Ok((position, segment))
            })
            .collect::<Result<Vec<_>, Error>>()?;

        let chunks = steps
            .into_iter()
            .chunk_by(|&(_, segment)| network.road_of(segment).name.as_str());

        let mut legs = Vec::new();
        for (road_name, group) in &chunks {
            let (first, last, distance, segment_count) = group.fold(
                (usize::MAX, 0, 0.0, 0),
                |(first, _, distance, count), (position, segment)| {
                    (
                        first.min(position),
                        position,
                        distance + segment.length,
                        count + 1,
                    )
                },
            );
            legs.push(RouteLeg {
                road_name: road_name.to_string(),
                from: self.node_on_route(first)?,
                to: self.node_on_route(last + 1)?,
                distance,
                segment_count,
            });
        }
        Ok(legs)
    }

    /// Intersection at `position` in travel order
    pub(super) fn node_on_route(&self, position: usize) -> Result<NodeId, Error> {
        self.nodes.get(position).copied().ok_or_else(|| {
            Error::InvalidData(format!(
                "route has {} segments but only {} nodes",
                self.segments.len(),
                self.nodes.len()
            ))
        })
    }
}
