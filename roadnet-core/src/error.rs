use thiserror::Error;

use crate::{NodeId, RoadId, SegmentId};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown node id {0}")]
    UnknownNode(NodeId),
    #[error("Duplicate node id {0}")]
    DuplicateNode(NodeId),
    #[error("Duplicate road id {0}")]
    DuplicateRoad(RoadId),
    #[error("Segment {segment} references unknown node {node}")]
    DanglingNode { segment: SegmentId, node: NodeId },
    #[error("Segment {segment} references unknown road {road}")]
    DanglingRoad { segment: SegmentId, road: RoadId },
    #[error("Segment {segment} has invalid length {length}")]
    InvalidLength { segment: SegmentId, length: f64 },
    #[error("Search state was not reset after the previous search")]
    StaleSearchState,
    #[error("Search state covers {state} nodes but the network has {network}")]
    StateSizeMismatch { state: usize, network: usize },
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
