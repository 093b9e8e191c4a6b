use geo::{Coord, LineString};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use super::Route;
use crate::{Error, RoadNetwork};

impl Route {
    /// Converts the route to a `GeoJSON` `FeatureCollection`: one line per
    /// segment in travel order, followed by the start and target points.
    pub fn to_geojson(&self, network: &RoadNetwork) -> Result<FeatureCollection, Error> {
        let mut features = Vec::with_capacity(self.segments.len() + 2);

        for (step, &segment_id) in self.segments.iter().enumerate() {
            let segment = network
                .segment(segment_id)
                .ok_or_else(|| Error::GeoJsonError(format!("unknown segment {segment_id}")))?;
            let from = self.node_on_route(step)?;
            let to = self.node_on_route(step + 1)?;

            let mut coords: Vec<Coord<f64>> = if segment.geometry.0.len() >= 2 {
                segment.geometry.0.clone()
            } else {
                vec![
                    endpoint(network, segment.start)?,
                    endpoint(network, segment.end)?,
                ]
            };
            // Stored geometry runs start to end
            if segment.start != from {
                coords.reverse();
            }

            let road = network.road_of(segment);
            let value = json!({
                "type": "Feature",
                "geometry": Geometry::new(GeoJsonValue::from(&LineString::new(coords))),
                "properties": {
                    "kind": "segment",
                    "sequence": step,
                    "segment": segment_id,
                    "road_id": road.id,
                    "road_name": road.name,
                    "from": from,
                    "to": to,
                    "length_km": segment.length,
                }
            });
            features.push(to_feature(value)?);
        }

        for (kind, node) in [("start", self.start), ("target", self.target)] {
            let intersection = network.intersection(node).ok_or(Error::UnknownNode(node))?;
            let value = json!({
                "type": "Feature",
                "geometry": Geometry::new(GeoJsonValue::from(&intersection.geometry)),
                "properties": {
                    "kind": kind,
                    "node": node,
                    "distance_km": self.distance,
                    "avoided_one_way": self.avoided_one_way_count(),
                }
            });
            features.push(to_feature(value)?);
        }

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self, network: &RoadNetwork) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson(network)?)
            .map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

fn endpoint(network: &RoadNetwork, node: crate::NodeId) -> Result<Coord<f64>, Error> {
    network
        .intersection(node)
        .map(|intersection| intersection.geometry.into())
        .ok_or(Error::UnknownNode(node))
}

pub(crate) fn to_feature(value: serde_json::Value) -> Result<Feature, Error> {
    Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}
