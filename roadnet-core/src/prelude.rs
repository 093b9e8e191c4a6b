// Re-export key components
pub use crate::algo::articulation::{
    ArticulationPoints, find_articulation_points, find_articulation_points_with,
};
pub use crate::loading::{NetworkConfig, create_road_network};
pub use crate::model::{
    Intersection, NetworkSummary, NodeRecord, Road, RoadNetwork, RoadRecord, SearchState,
    Segment, SegmentRecord,
};
pub use crate::routing::astar::{Route, RouteLeg, find_path, find_path_with};
pub use crate::search::{RoadIndex, RoadMatches};

// Core identifiers
pub use crate::Kilometres;
pub use crate::NodeId;
pub use crate::RoadId;
pub use crate::SegmentId;

pub use crate::Error;
