//! Request and response bodies

use roadnet_core::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub from: NodeId,
    pub to: NodeId,
}

#[derive(Debug, Deserialize)]
pub struct NearestQuery {
    pub lat: f64,
    pub lon: f64,
    /// Search radius in kilometres
    pub max_distance: Option<Kilometres>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct NetworkResponse {
    pub intersections: usize,
    pub roads: usize,
    pub segments: usize,
    pub one_way_roads: usize,
    pub total_length_km: Kilometres,
}

#[derive(Debug, Serialize)]
pub struct NodeResponse {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
    pub degree: usize,
    /// Intersections reachable over one legal segment
    pub neighbours: Vec<NodeId>,
    pub roads: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct NearestResponse {
    pub node: NodeId,
    pub distance_km: Kilometres,
}

#[derive(Debug, Serialize)]
pub struct RoadDistance {
    pub name: String,
    pub distance_km: Kilometres,
}

#[derive(Debug, Serialize)]
pub struct LegResponse {
    pub road: String,
    pub from: NodeId,
    pub to: NodeId,
    pub distance_km: Kilometres,
    pub segments: usize,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub start: NodeId,
    pub target: NodeId,
    pub distance_km: Kilometres,
    pub nodes: Vec<NodeId>,
    pub segments: Vec<SegmentId>,
    pub roads: Vec<RoadDistance>,
    pub legs: Vec<LegResponse>,
    pub avoided_one_way: Vec<RoadId>,
    pub avoided_one_way_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ArticulationResponse {
    pub count: usize,
    pub components: usize,
    pub points: Vec<NodeId>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub exact: bool,
    pub roads: Vec<RoadId>,
    pub names: Vec<String>,
}

impl From<NetworkSummary> for NetworkResponse {
    fn from(summary: NetworkSummary) -> Self {
        Self {
            intersections: summary.nodes,
            roads: summary.roads,
            segments: summary.segments,
            one_way_roads: summary.one_way_roads,
            total_length_km: summary.total_length,
        }
    }
}

impl NodeResponse {
    pub fn new(network: &RoadNetwork, intersection: &Intersection) -> Self {
        Self {
            id: intersection.id,
            lat: intersection.lat(),
            lon: intersection.lon(),
            degree: intersection.degree(),
            neighbours: intersection.neighbours().to_vec(),
            roads: network
                .road_names_at(intersection.id)
                .unwrap_or_default()
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

impl RouteResponse {
    pub fn new(network: &RoadNetwork, route: &Route) -> Result<Self, Error> {
        let legs = route
            .legs(network)?
            .into_iter()
            .map(|leg| LegResponse {
                road: leg.road_name,
                from: leg.from,
                to: leg.to,
                distance_km: leg.distance,
                segments: leg.segment_count,
            })
            .collect();
        Ok(Self {
            start: route.start,
            target: route.target,
            distance_km: route.distance,
            nodes: route.nodes.clone(),
            segments: route.segments.clone(),
            roads: route
                .road_distances
                .iter()
                .map(|(name, &distance_km)| RoadDistance {
                    name: name.clone(),
                    distance_km,
                })
                .collect(),
            legs,
            avoided_one_way: route.avoided_one_way.iter().copied().collect(),
            avoided_one_way_count: route.avoided_one_way_count(),
        })
    }
}

impl From<&ArticulationPoints> for ArticulationResponse {
    fn from(points: &ArticulationPoints) -> Self {
        Self {
            count: points.len(),
            components: points.components,
            points: points.points.iter().copied().collect(),
        }
    }
}

impl SearchResponse {
    pub fn new(query: String, matches: RoadMatches) -> Self {
        Self {
            query,
            exact: matches.exact,
            roads: matches.roads,
            names: matches.names,
        }
    }
}
