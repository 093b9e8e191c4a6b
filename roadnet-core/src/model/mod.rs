//! Data model for road network analysis
//!
//! Contains the entity store (intersections, segments, roads), the
//! adjacency derived from it and the per-search node table.

pub mod components;
pub mod network;
pub mod records;
pub mod state;

pub use components::{AccessRestrictions, Intersection, Road, Segment};
pub use network::{NetworkSummary, RoadNetwork, UndirectedView};
pub use records::{NodeRecord, RoadRecord, SegmentRecord};
pub use state::SearchState;
