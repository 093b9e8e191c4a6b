//! Articulation points (cut vertices) of the undirected road network.
//!
//! Tarjan's low-link DFS, driven by an explicit stack of frames so that
//! very deep traversals on large networks cannot exhaust the call stack.
//! One-way flags are ignored: connectivity is a property of the undirected
//! closure returned by [`RoadNetwork::undirected_view`].

use std::collections::BTreeSet;

use geojson::{FeatureCollection, Geometry, Value as GeoJsonValue};
use log::{debug, info};
use petgraph::graph::NodeIndex;
use serde_json::json;

use crate::model::{RoadNetwork, SearchState, UndirectedView};
use crate::routing::astar::to_feature;
use crate::{Error, NodeId};

/// Result of an articulation point search
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticulationPoints {
    /// Intersections whose removal disconnects part of the network
    pub points: BTreeSet<NodeId>,
    /// Connected components visited by the search
    pub components: usize,
}

/// One level of what would otherwise be a recursive call
#[derive(Debug)]
struct Frame {
    node: NodeIndex,
    depth: u32,
    /// Position of the parent frame on the stack, `None` for the subtree root
    parent: Option<usize>,
    reach_back: u32,
    /// Neighbours other than the parent node, consumed through `cursor`
    children: Vec<NodeIndex>,
    cursor: usize,
}

impl Frame {
    /// Marks `node` visited and queues its children
    fn enter(
        view: &UndirectedView,
        state: &mut SearchState,
        node: NodeIndex,
        depth: u32,
        parent_node: NodeIndex,
        parent: Option<usize>,
    ) -> Self {
        state.discover(node.index(), depth);
        Self {
            node,
            depth,
            parent,
            reach_back: depth,
            children: view
                .neighbors(node)
                .filter(|&child| child != parent_node)
                .collect(),
            cursor: 0,
        }
    }

    fn next_child(&mut self) -> Option<NodeIndex> {
        let child = self.children.get(self.cursor).copied();
        self.cursor += 1;
        child
    }
}

impl ArticulationPoints {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.points.contains(&node)
    }

    /// Converts the articulation points to a `GeoJSON` `FeatureCollection` of points
    pub fn to_geojson(&self, network: &RoadNetwork) -> Result<FeatureCollection, Error> {
        let features = self
            .points
            .iter()
            .map(|&node| {
                let intersection = network.intersection(node).ok_or(Error::UnknownNode(node))?;
                to_feature(json!({
                    "type": "Feature",
                    "geometry": Geometry::new(GeoJsonValue::from(&intersection.geometry)),
                    "properties": {
                        "kind": "articulation_point",
                        "node": node,
                        "degree": intersection.degree(),
                    }
                }))
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }
}

/// Finds every articulation point of the network, across all of its
/// connected components
pub fn find_articulation_points(network: &RoadNetwork) -> ArticulationPoints {
    let mut state = SearchState::for_network(network);
    let view = network.undirected_view();
    let result = search(view, &mut state, view.node_indices());
    state.reset();
    result
}

/// Articulation point search with a caller-owned search table, starting DFS
/// trees at `roots` in the given order.
///
/// Neighbours are followed wherever they lead, so the result covers every
/// component that contains at least one of `roots`.
///
/// # Errors
///
/// [`Error::UnknownNode`] if a root is not part of the network,
/// [`Error::StaleSearchState`] or [`Error::StateSizeMismatch`] if `state`
/// cannot be used for this network.
pub fn find_articulation_points_with(
    network: &RoadNetwork,
    state: &mut SearchState,
    roots: impl IntoIterator<Item = NodeId>,
) -> Result<ArticulationPoints, Error> {
    state.begin(network)?;
    let roots = roots
        .into_iter()
        .map(|id| network.index_of(id).map(NodeIndex::new))
        .collect::<Result<Vec<_>, Error>>()?;

    let result = search(network.undirected_view(), state, roots);
    state.reset();
    Ok(result)
}

fn search(
    view: &UndirectedView,
    state: &mut SearchState,
    roots: impl IntoIterator<Item = NodeIndex>,
) -> ArticulationPoints {
    let mut result = ArticulationPoints::default();
    let mut stack = Vec::new();

    for root in roots {
        if state.is_visited(root.index()) {
            continue;
        }
        result.components += 1;
        state.discover(root.index(), 0);

        // A root is a cut vertex iff it has more than one DFS subtree. An
        // isolated node has none.
        let mut subtrees = 0;
        for neighbour in view.neighbors(root) {
            if state.is_visited(neighbour.index()) {
                continue;
            }
            subtrees += 1;
            walk_subtree(view, state, &mut stack, root, neighbour, &mut result.points);
        }
        if subtrees > 1 {
            result.points.insert(view[root]);
        }
    }

    debug!(
        "Articulation search visited {} components",
        result.components
    );
    info!("Found {} articulation points", result.points.len());
    result
}

/// Iterative DFS below `root`, starting at its child `first`
fn walk_subtree(
    view: &UndirectedView,
    state: &mut SearchState,
    stack: &mut Vec<Frame>,
    root: NodeIndex,
    first: NodeIndex,
    points: &mut BTreeSet<NodeId>,
) {
    stack.push(Frame::enter(view, state, first, 1, root, None));

    while let Some(top) = stack.len().checked_sub(1) {
        let frame = &mut stack[top];

        if let Some(child) = frame.next_child() {
            match state.depth(child.index()) {
                // Back edge (or an edge to an already finished descendant,
                // whose depth is larger and changes nothing)
                Some(depth) => frame.reach_back = frame.reach_back.min(depth),
                None => {
                    let (depth, node) = (frame.depth + 1, frame.node);
                    stack.push(Frame::enter(view, state, child, depth, node, Some(top)));
                }
            }
            continue;
        }

        let Some(done) = stack.pop() else { break };
        if let Some(parent_pos) = done.parent {
            let parent = &mut stack[parent_pos];
            // The subtree below `done` cannot climb above its parent
            if done.reach_back >= parent.depth {
                points.insert(view[parent.node]);
            }
            parent.reach_back = parent.reach_back.min(done.reach_back);
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::fixtures::undirected;
    use proptest::prelude::*;

    prop_compose! {
        /// Simple graph: no self-loops, no repeated edges
        fn simple_graph()(n in 1u32..40)(
            n in Just(n),
            edges in prop::collection::vec((0..n, 0..n), 0..80),
        ) -> (Vec<NodeId>, Vec<(NodeId, NodeId)>) {
            let mut edges: Vec<_> = edges
                .into_iter()
                .filter(|(a, b)| a != b)
                .map(|(a, b)| (a.min(b), a.max(b)))
                .collect();
            edges.sort_unstable();
            edges.dedup();
            ((0..n).collect(), edges)
        }
    }

    proptest! {
        /// Agrees with the recursive implementation in rustworkx
        #[test]
        fn matches_rustworkx((nodes, edges) in simple_graph()) {
            let network = undirected(&nodes, &edges);
            let view = network.undirected_view();

            let expected: BTreeSet<NodeId> =
                rustworkx_core::connectivity::articulation_points(view, None)
                    .into_iter()
                    .map(|ix| view[ix])
                    .collect();

            prop_assert_eq!(find_articulation_points(&network).points, expected);
        }

        /// Root order changes the DFS trees but never the answer
        #[test]
        fn independent_of_root_order((nodes, edges) in simple_graph()) {
            let network = undirected(&nodes, &edges);
            let mut state = SearchState::for_network(&network);

            let forward = find_articulation_points_with(&network, &mut state, nodes.iter().copied())
                .unwrap();
            let backward =
                find_articulation_points_with(&network, &mut state, nodes.iter().rev().copied())
                    .unwrap();

            prop_assert_eq!(&forward, &backward);
            prop_assert!(state.is_clean());
            for &node in &forward.points {
                prop_assert!(network.intersection(node).unwrap().degree() >= 2);
            }
        }
    }
}
