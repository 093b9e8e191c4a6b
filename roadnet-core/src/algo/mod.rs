//! Graph analyses over the road network

pub mod articulation;

pub use articulation::{
    ArticulationPoints, find_articulation_points, find_articulation_points_with,
};
