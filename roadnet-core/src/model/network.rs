//! The road network store and everything derived from it at build time

use geo::{Coord, Distance, Haversine, LineString, Point};
use hashbrown::HashMap;
use log::{debug, warn};
use petgraph::graph::{NodeIndex, UnGraph};
use rstar::{RTree, primitives::GeomWithData};

use super::components::{AccessRestrictions, Intersection, Road, Segment};
use super::records::{NodeRecord, RoadRecord, SegmentRecord};
use crate::{Error, Kilometres, NodeId, RoadId, SegmentId};

/// Undirected closure of the network: one edge per segment, one-way flags
/// ignored. Node index `i` is the intersection stored at position `i`.
pub type UndirectedView = UnGraph<NodeId, SegmentId>;

type IndexedPoint = GeomWithData<[f64; 2], usize>;

/// How many R-tree candidates are re-ranked by haversine distance
const NEAREST_CANDIDATES: usize = 8;

/// Road network graph.
///
/// Owns every intersection, road and segment. Entities refer to each other
/// by id only; positions in the internal vectors never change after
/// [`RoadNetwork::build`].
pub struct RoadNetwork {
    nodes: Vec<Intersection>,
    roads: Vec<Road>,
    segments: Vec<Segment>,
    node_index: HashMap<NodeId, usize>,
    road_index: HashMap<RoadId, usize>,
    undirected: UndirectedView,
    rtree: RTree<IndexedPoint>,
}

/// Size and length totals of a network
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkSummary {
    pub nodes: usize,
    pub roads: usize,
    pub segments: usize,
    pub one_way_roads: usize,
    pub total_length: Kilometres,
}

impl std::fmt::Debug for RoadNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoadNetwork")
            .field("nodes", &self.nodes.len())
            .field("roads", &self.roads.len())
            .field("segments", &self.segments.len())
            .finish_non_exhaustive()
    }
}

impl RoadNetwork {
    /// Builds the network and derives its adjacency.
    ///
    /// # Errors
    ///
    /// Fails if ids repeat, if a segment references a node or road that is
    /// not in the input, or if a segment length is negative or not finite.
    pub fn build(
        nodes: Vec<NodeRecord>,
        roads: Vec<RoadRecord>,
        segments: Vec<SegmentRecord>,
    ) -> Result<Self, Error> {
        let mut node_index = HashMap::with_capacity(nodes.len());
        let mut intersections = Vec::with_capacity(nodes.len());
        for record in nodes {
            if node_index.insert(record.id, intersections.len()).is_some() {
                return Err(Error::DuplicateNode(record.id));
            }
            intersections.push(Intersection::new(
                record.id,
                Point::new(record.lon, record.lat),
            ));
        }

        let mut road_index = HashMap::with_capacity(roads.len());
        let mut network_roads = Vec::with_capacity(roads.len());
        for record in roads {
            if road_index.insert(record.id, network_roads.len()).is_some() {
                return Err(Error::DuplicateRoad(record.id));
            }
            network_roads.push(Road {
                id: record.id,
                name: record.name,
                city: record.city,
                one_way: record.one_way,
                kind: record.kind,
                speed: record.speed,
                road_class: record.road_class,
                access: AccessRestrictions {
                    not_for_car: record.not_for_car,
                    not_for_pedestrians: record.not_for_pedestrians,
                    not_for_bicycles: record.not_for_bicycles,
                },
                length: 0.0,
                segments: Vec::new(),
            });
        }

        let mut network_segments = Vec::with_capacity(segments.len());
        let mut zero_length = 0_usize;
        for (segment_id, record) in segments.into_iter().enumerate() {
            let road_ix = *road_index
                .get(&record.road)
                .ok_or(Error::DanglingRoad {
                    segment: segment_id,
                    road: record.road,
                })?;
            let start_ix = *node_index.get(&record.start).ok_or(Error::DanglingNode {
                segment: segment_id,
                node: record.start,
            })?;
            let end_ix = *node_index.get(&record.end).ok_or(Error::DanglingNode {
                segment: segment_id,
                node: record.end,
            })?;
            if !record.length.is_finite() || record.length < 0.0 {
                return Err(Error::InvalidLength {
                    segment: segment_id,
                    length: record.length,
                });
            }
            if record.length == 0.0 {
                zero_length += 1;
            }

            let geometry: LineString<f64> = record
                .coords
                .iter()
                .map(|&(lat, lon)| Coord { x: lon, y: lat })
                .collect();

            let road = &mut network_roads[road_ix];
            road.segments.push(segment_id);
            road.length += record.length;

            intersections[start_ix].segments.push(segment_id);
            if end_ix != start_ix {
                intersections[end_ix].segments.push(segment_id);
            }

            network_segments.push(Segment {
                road: record.road,
                start: record.start,
                end: record.end,
                length: record.length,
                geometry,
                road_ix,
                start_ix,
                end_ix,
            });
        }

        if zero_length > 0 {
            warn!("{zero_length} segments have zero length");
        }

        derive_adjacency(&mut intersections, &network_segments, &network_roads);
        let undirected = build_undirected_view(&intersections, &network_segments);
        let rtree = build_rtree(&intersections);

        debug!(
            "Built network with {} intersections, {} roads and {} segments",
            intersections.len(),
            network_roads.len(),
            network_segments.len()
        );

        Ok(Self {
            nodes: intersections,
            roads: network_roads,
            segments: network_segments,
            node_index,
            road_index,
            undirected,
            rtree,
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_index.contains_key(&id)
    }

    pub fn intersection(&self, id: NodeId) -> Option<&Intersection> {
        self.node_index.get(&id).map(|&ix| &self.nodes[ix])
    }

    pub fn intersections(&self) -> &[Intersection] {
        &self.nodes
    }

    /// Intersections reachable from `id` over a single legal segment
    pub fn neighbours(&self, id: NodeId) -> Option<&[NodeId]> {
        self.intersection(id).map(Intersection::neighbours)
    }

    pub fn road(&self, id: RoadId) -> Option<&Road> {
        self.road_index.get(&id).map(|&ix| &self.roads[ix])
    }

    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(id)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Road a segment belongs to. Always present for segments of this network.
    pub fn road_of(&self, segment: &Segment) -> &Road {
        &self.roads[segment.road_ix]
    }

    /// Whether `segment` may be travelled starting at `from`.
    ///
    /// Bidirectional roads can be entered from either end, one-way roads
    /// only from the segment's recorded start.
    pub fn is_traversable(&self, segment: &Segment, from: NodeId) -> bool {
        !self.road_of(segment).one_way || segment.start == from
    }

    /// Great-circle distance between two intersections
    pub fn straight_line_km(&self, a: NodeId, b: NodeId) -> Option<Kilometres> {
        let a = self.node_index.get(&a)?;
        let b = self.node_index.get(&b)?;
        Some(self.distance_between(*a, *b))
    }

    /// Closest intersection to `point` (x = longitude, y = latitude), if any
    /// lies within `max_distance` kilometres
    pub fn nearest_intersection(
        &self,
        point: Point<f64>,
        max_distance: Kilometres,
    ) -> Option<(NodeId, Kilometres)> {
        self.rtree
            .nearest_neighbor_iter(&[point.x(), point.y()])
            .take(NEAREST_CANDIDATES)
            .map(|candidate| {
                let node = &self.nodes[candidate.data];
                (node.id, haversine_km(node.geometry, point))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .filter(|(_, distance)| *distance <= max_distance)
    }

    /// Sorted, de-duplicated names of the roads touching an intersection
    pub fn road_names_at(&self, id: NodeId) -> Option<Vec<&str>> {
        let node = self.intersection(id)?;
        let mut names: Vec<&str> = node
            .segments
            .iter()
            .map(|&segment| self.roads[self.segments[segment].road_ix].name.as_str())
            .collect();
        names.sort_unstable();
        names.dedup();
        Some(names)
    }

    /// Undirected closure used by connectivity algorithms
    pub fn undirected_view(&self) -> &UndirectedView {
        &self.undirected
    }

    pub fn summary(&self) -> NetworkSummary {
        NetworkSummary {
            nodes: self.nodes.len(),
            roads: self.roads.len(),
            segments: self.segments.len(),
            one_way_roads: self.roads.iter().filter(|road| road.one_way).count(),
            total_length: self.segments.iter().map(|segment| segment.length).sum(),
        }
    }

    pub(crate) fn index_of(&self, id: NodeId) -> Result<usize, Error> {
        self.node_index
            .get(&id)
            .copied()
            .ok_or(Error::UnknownNode(id))
    }

    pub(crate) fn node_at(&self, ix: usize) -> &Intersection {
        &self.nodes[ix]
    }

    pub(crate) fn distance_between(&self, a: usize, b: usize) -> Kilometres {
        haversine_km(self.nodes[a].geometry, self.nodes[b].geometry)
    }
}

fn haversine_km(a: Point<f64>, b: Point<f64>) -> Kilometres {
    Haversine.distance(a, b) / 1000.0
}

/// Fills in/out segment lists, neighbours and adjacent roads.
///
/// Bidirectional segments are linked both ways, one-way segments only from
/// start to end.
fn derive_adjacency(nodes: &mut [Intersection], segments: &[Segment], roads: &[Road]) {
    for (segment_id, segment) in segments.iter().enumerate() {
        let (a, b) = (segment.start_ix, segment.end_ix);

        nodes[a].out_segments.push(segment_id);
        nodes[b].in_segments.push(segment_id);
        nodes[a].add_road(segment.road);
        nodes[a].add_neighbour(segment.end);

        if !roads[segment.road_ix].one_way && a != b {
            nodes[b].out_segments.push(segment_id);
            nodes[a].in_segments.push(segment_id);
            nodes[b].add_road(segment.road);
            nodes[b].add_neighbour(segment.start);
        }
    }
}

fn build_undirected_view(nodes: &[Intersection], segments: &[Segment]) -> UndirectedView {
    let mut graph = UndirectedView::with_capacity(nodes.len(), segments.len());
    for node in nodes {
        graph.add_node(node.id);
    }
    for (segment_id, segment) in segments.iter().enumerate() {
        graph.add_edge(
            NodeIndex::new(segment.start_ix),
            NodeIndex::new(segment.end_ix),
            segment_id,
        );
    }
    graph
}

fn build_rtree(nodes: &[Intersection]) -> RTree<IndexedPoint> {
    let points = nodes
        .iter()
        .enumerate()
        .map(|(ix, node)| GeomWithData::new([node.geometry.x(), node.geometry.y()], ix))
        .collect();
    RTree::bulk_load(points)
}
