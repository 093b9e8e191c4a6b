//! Small hand-built networks for unit tests

use crate::model::{NodeRecord, RoadNetwork, RoadRecord, SegmentRecord};
use crate::{Kilometres, NodeId, RoadId};

const ORIGIN_LAT: f64 = -36.85;
const ORIGIN_LON: f64 = 174.76;
/// Grid spacing in degrees, roughly 0.1 km
const GRID_STEP: f64 = 0.001;

#[derive(Default)]
pub(crate) struct Fixture {
    nodes: Vec<NodeRecord>,
    roads: Vec<RoadRecord>,
    segments: Vec<SegmentRecord>,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn grid_node(mut self, id: NodeId, row: u32, col: u32) -> Self {
        self.nodes.push(NodeRecord::new(
            id,
            ORIGIN_LAT + f64::from(row) * GRID_STEP,
            ORIGIN_LON + f64::from(col) * GRID_STEP,
        ));
        self
    }

    pub(crate) fn road(mut self, id: RoadId, name: &str, one_way: bool) -> Self {
        self.roads.push(RoadRecord::new(id, name, one_way));
        self
    }

    pub(crate) fn segment(
        mut self,
        road: RoadId,
        start: NodeId,
        end: NodeId,
        length: Kilometres,
    ) -> Self {
        self.segments
            .push(SegmentRecord::new(road, start, end, length));
        self
    }

    pub(crate) fn build(self) -> RoadNetwork {
        RoadNetwork::build(self.nodes, self.roads, self.segments).unwrap()
    }
}

/// Bidirectional network with one road per edge, every edge 1 km long.
/// Nodes are laid out on a line, which keeps the heuristic admissible.
pub(crate) fn undirected(nodes: &[NodeId], edges: &[(NodeId, NodeId)]) -> RoadNetwork {
    let mut fixture = Fixture::new();
    for (position, &id) in nodes.iter().enumerate() {
        fixture = fixture.grid_node(id, 0, position as u32);
    }
    for (road, &(a, b)) in edges.iter().enumerate() {
        let road = road as RoadId;
        fixture = fixture
            .road(road, &format!("Road {a}-{b}"), false)
            .segment(road, a, b, 1.0);
    }
    fixture.build()
}
