//! Loading of road networks from the tab separated map tables
//! (nodes, roads, segments).

mod builder;
mod config;
mod parser;
mod raw_types;

pub use builder::create_road_network;
pub use config::{NODES_FILE, NetworkConfig, ROADS_FILE, SEGMENTS_FILE};
