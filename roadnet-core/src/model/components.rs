//! Road network components - intersections, segments and roads

use geo::{LineString, Point};

use crate::{Kilometres, NodeId, RoadId, SegmentId};

/// Road network node
#[derive(Debug, Clone)]
pub struct Intersection {
    /// Id from the node table
    pub id: NodeId,
    /// Node coordinates, x is longitude and y is latitude
    pub geometry: Point<f64>,
    pub(crate) segments: Vec<SegmentId>,
    pub(crate) out_segments: Vec<SegmentId>,
    pub(crate) in_segments: Vec<SegmentId>,
    pub(crate) neighbours: Vec<NodeId>,
    pub(crate) adjacent_roads: Vec<RoadId>,
}

/// Road network edge between two intersections
#[derive(Debug, Clone)]
pub struct Segment {
    /// Owning road
    pub road: RoadId,
    pub start: NodeId,
    pub end: NodeId,
    pub length: Kilometres,
    /// Optional geometry for visualization
    pub geometry: LineString<f64>,
    pub(crate) road_ix: usize,
    pub(crate) start_ix: usize,
    pub(crate) end_ix: usize,
}

/// Access flags from the road table, `true` means the mode is not allowed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessRestrictions {
    pub not_for_car: bool,
    pub not_for_pedestrians: bool,
    pub not_for_bicycles: bool,
}

/// Named road made of one or more segments
#[derive(Debug, Clone)]
pub struct Road {
    pub id: RoadId,
    pub name: String,
    pub city: String,
    /// Segments may only be travelled from their start to their end
    pub one_way: bool,
    pub kind: u32,
    pub speed: u32,
    pub road_class: u32,
    pub access: AccessRestrictions,
    pub(crate) length: Kilometres,
    pub(crate) segments: Vec<SegmentId>,
}

impl Intersection {
    pub(crate) fn new(id: NodeId, geometry: Point<f64>) -> Self {
        Self {
            id,
            geometry,
            segments: Vec::new(),
            out_segments: Vec::new(),
            in_segments: Vec::new(),
            neighbours: Vec::new(),
            adjacent_roads: Vec::new(),
        }
    }

    pub fn lat(&self) -> f64 {
        self.geometry.y()
    }

    pub fn lon(&self) -> f64 {
        self.geometry.x()
    }

    /// Every segment touching this intersection, regardless of direction
    pub fn segments(&self) -> &[SegmentId] {
        &self.segments
    }

    /// Segments that may be used to leave this intersection
    pub fn out_segments(&self) -> &[SegmentId] {
        &self.out_segments
    }

    /// Segments that may be used to arrive at this intersection
    pub fn in_segments(&self) -> &[SegmentId] {
        &self.in_segments
    }

    /// Intersections reachable over a single legal segment
    pub fn neighbours(&self) -> &[NodeId] {
        &self.neighbours
    }

    /// Roads that can be entered from this intersection
    pub fn adjacent_roads(&self) -> &[RoadId] {
        &self.adjacent_roads
    }

    pub fn degree(&self) -> usize {
        self.segments.len()
    }

    pub(crate) fn add_neighbour(&mut self, node: NodeId) {
        if node != self.id && !self.neighbours.contains(&node) {
            self.neighbours.push(node);
        }
    }

    pub(crate) fn add_road(&mut self, road: RoadId) {
        if !self.adjacent_roads.contains(&road) {
            self.adjacent_roads.push(road);
        }
    }
}

impl Segment {
    /// The endpoint opposite to `node`. For a loop this is `node` itself.
    pub fn other_end(&self, node: NodeId) -> NodeId {
        if self.start == node {
            self.end
        } else {
            self.start
        }
    }

    /// Whether the segment connects `a` and `b`, in either orientation
    pub fn joins(&self, a: NodeId, b: NodeId) -> bool {
        (self.start == a && self.end == b) || (self.start == b && self.end == a)
    }

    pub fn is_loop(&self) -> bool {
        self.start == self.end
    }

    pub(crate) fn other_end_ix(&self, node_ix: usize) -> usize {
        if self.start_ix == node_ix {
            self.end_ix
        } else {
            self.start_ix
        }
    }
}

impl Road {
    /// Sum of the lengths of all segments of this road
    pub fn length(&self) -> Kilometres {
        self.length
    }

    pub fn segments(&self) -> &[SegmentId] {
        &self.segments
    }
}
