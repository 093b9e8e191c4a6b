//! A* shortest paths that respect one-way roads

mod frontier;
mod route;
mod search;
mod to_geojson;

pub use route::{Route, RouteLeg};
pub use search::{find_path, find_path_with};
pub(crate) use to_geojson::to_feature;
