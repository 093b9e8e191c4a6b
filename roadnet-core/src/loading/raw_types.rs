use serde::Deserialize;

use crate::model::{NodeRecord, RoadRecord};
use crate::{NodeId, RoadId};

/// Row of the node table, read by position
#[derive(Debug, Deserialize)]
pub(crate) struct FileNode {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
}

/// Row of the road table, read by header name
#[derive(Debug, Deserialize)]
pub(crate) struct FileRoad {
    #[serde(rename = "roadid")]
    pub id: RoadId,
    #[serde(rename = "type")]
    pub kind: u32,
    pub label: String,
    pub city: String,
    pub oneway: u8,
    pub speed: u32,
    #[serde(rename = "roadclass")]
    pub road_class: u32,
    #[serde(rename = "notforcar")]
    pub not_for_car: u8,
    #[serde(rename = "notforpede")]
    pub not_for_pedestrians: u8,
    #[serde(rename = "notforbicy")]
    pub not_for_bicycles: u8,
}

impl From<FileNode> for NodeRecord {
    fn from(row: FileNode) -> Self {
        Self::new(row.id, row.lat, row.lon)
    }
}

impl From<FileRoad> for RoadRecord {
    fn from(row: FileRoad) -> Self {
        Self {
            id: row.id,
            kind: row.kind,
            name: row.label,
            city: row.city,
            one_way: row.oneway != 0,
            speed: row.speed,
            road_class: row.road_class,
            not_for_car: row.not_for_car != 0,
            not_for_pedestrians: row.not_for_pedestrians != 0,
            not_for_bicycles: row.not_for_bicycles != 0,
        }
    }
}
