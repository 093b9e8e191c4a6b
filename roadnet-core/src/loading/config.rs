use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Node table file name inside a map directory
pub const NODES_FILE: &str = "nodeID-lat-lon.tab";
/// Road table file name inside a map directory
pub const ROADS_FILE: &str = "roadID-roadInfo.tab";
/// Segment table file name inside a map directory
pub const SEGMENTS_FILE: &str = "roadSeg-roadID-length-nodeID-nodeID-coords.tab";

/// Locations of the three tables a road network is loaded from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub nodes_path: PathBuf,
    pub roads_path: PathBuf,
    pub segments_path: PathBuf,
}

impl NetworkConfig {
    /// Config for a map directory using the standard file names
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            nodes_path: dir.join(NODES_FILE),
            roads_path: dir.join(ROADS_FILE),
            segments_path: dir.join(SEGMENTS_FILE),
        }
    }

    pub(crate) fn paths(&self) -> [(&'static str, &Path); 3] {
        [
            ("Node", self.nodes_path.as_path()),
            ("Road", self.roads_path.as_path()),
            ("Segment", self.segments_path.as_path()),
        ]
    }
}
