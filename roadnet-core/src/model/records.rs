//! Entity records the network is built from

use crate::{Kilometres, NodeId, RoadId};

/// One row of the node table
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
}

/// One row of the road table.
///
/// Only `id`, `name`, `city` and `one_way` influence the algorithms, the
/// remaining attributes are carried for reporting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoadRecord {
    pub id: RoadId,
    pub kind: u32,
    pub name: String,
    pub city: String,
    pub one_way: bool,
    pub speed: u32,
    pub road_class: u32,
    pub not_for_car: bool,
    pub not_for_pedestrians: bool,
    pub not_for_bicycles: bool,
}

/// One row of the segment table
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentRecord {
    pub road: RoadId,
    pub length: Kilometres,
    pub start: NodeId,
    pub end: NodeId,
    /// Polyline as `(lat, lon)` pairs, display only
    pub coords: Vec<(f64, f64)>,
}

impl NodeRecord {
    pub fn new(id: NodeId, lat: f64, lon: f64) -> Self {
        Self { id, lat, lon }
    }
}

impl RoadRecord {
    /// Road with default attributes, mostly useful when building networks by hand
    pub fn new(id: RoadId, name: impl Into<String>, one_way: bool) -> Self {
        Self {
            id,
            name: name.into(),
            one_way,
            ..Self::default()
        }
    }
}

impl SegmentRecord {
    /// Straight segment without an intermediate polyline
    pub fn new(road: RoadId, start: NodeId, end: NodeId, length: Kilometres) -> Self {
        Self {
            road,
            length,
            start,
            end,
            coords: Vec::new(),
        }
    }
}
