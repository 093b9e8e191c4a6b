//! Road network analysis: one-way aware A* routing and articulation points.
//!
//! The [`RoadNetwork`] is built once from node, road and segment records
//! (usually read from tab separated map files by [`create_road_network`]).
//! Algorithms borrow the network immutably and keep their transient per-node
//! bookkeeping in a [`SearchState`] table.

pub mod algo;
pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod search;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::Error;

pub use algo::articulation::{
    ArticulationPoints, find_articulation_points, find_articulation_points_with,
};
pub use loading::{NODES_FILE, NetworkConfig, ROADS_FILE, SEGMENTS_FILE, create_road_network};
pub use model::{
    Intersection, NetworkSummary, NodeRecord, Road, RoadNetwork, RoadRecord, SearchState,
    Segment, SegmentRecord,
};
pub use routing::astar::{Route, RouteLeg, find_path, find_path_with};
pub use search::{RoadIndex, RoadMatches};

/// Intersection identifier as found in the node table
pub type NodeId = u32;
/// Road identifier as found in the road table
pub type RoadId = u32;
/// Position of a segment in the network's segment table
pub type SegmentId = usize;
/// Lengths and distances are kilometres
pub type Kilometres = f64;
