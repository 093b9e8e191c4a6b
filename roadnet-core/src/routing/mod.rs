//! Routing algorithms over the road network

pub mod astar;

pub use astar::{Route, RouteLeg, find_path, find_path_with};
