//! Plain text reports printed by the command line front end

use itertools::Itertools;
use roadnet_core::prelude::*;

pub fn summary(summary: &NetworkSummary) -> String {
    format!(
        "{} intersections, {} roads ({} one way), {} segments, {:.2}km of road",
        summary.nodes, summary.roads, summary.one_way_roads, summary.segments, summary.total_length
    )
}

/// Distance, avoided one-way roads and the kilometres travelled on each road
pub fn route(route: &Route) -> String {
    let header = format!(
        "The shortest distance between stop: {} and stop: {} is {:.2}km.\n\
         This path avoids {} one way roads!\n\
         Roads through the path are:",
        route.start,
        route.target,
        route.distance,
        route.avoided_one_way_count()
    );
    std::iter::once(header)
        .chain(
            route
                .road_distances
                .iter()
                .map(|(name, distance)| format!("{name} : {distance:.2}km")),
        )
        .join("\n")
}

pub fn legs(legs: &[RouteLeg]) -> String {
    legs.iter()
        .enumerate()
        .map(|(step, leg)| {
            format!(
                "{}. {} from {} to {} ({:.2}km)",
                step + 1,
                leg.road_name,
                leg.from,
                leg.to,
                leg.distance
            )
        })
        .join("\n")
}

pub fn no_route(start: NodeId, target: NodeId) -> String {
    format!("There is no path from stop: {start} to stop: {target}.")
}

pub fn articulation(points: &ArticulationPoints) -> String {
    let count = format!(
        "There are {} articulation points in this map.",
        points.len()
    );
    if points.is_empty() {
        return count;
    }
    format!("{count}\n{}", points.points.iter().join(", "))
}

/// Matching road names separated by semicolons
pub fn search(query: &str, matches: &RoadMatches) -> String {
    if matches.is_empty() {
        return format!("No roads match \"{query}\".");
    }
    matches.names.iter().join("; ")
}

pub fn node(network: &RoadNetwork, id: NodeId) -> Result<String, Error> {
    let intersection = network.intersection(id).ok_or(Error::UnknownNode(id))?;
    let roads = network.road_names_at(id).unwrap_or_default();
    Ok(format!(
        "ID: {}  loc: {:.6}, {:.6}\nroads: {}",
        intersection.id,
        intersection.lat(),
        intersection.lon(),
        roads.iter().join(", ")
    ))
}

pub fn nearest(found: Option<(NodeId, Kilometres)>, max_distance: Kilometres) -> String {
    match found {
        Some((id, distance)) => format!("Nearest intersection: {id} ({distance:.3}km away)"),
        None => format!("No intersection within {max_distance:.2}km."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    #[test]
    fn route_report_lists_roads_alphabetically() {
        let route = Route {
            start: 1,
            target: 2,
            distance: 3.0,
            segments: vec![3, 2, 1],
            nodes: vec![1, 4, 3, 2],
            road_distances: BTreeMap::from([
                ("Kitchener Street".to_owned(), 1.0),
                ("Lorne Street".to_owned(), 1.0),
                ("Rutland Street".to_owned(), 1.0),
            ]),
            avoided_one_way: BTreeSet::from([12]),
        };

        assert_eq!(
            super::route(&route),
            "The shortest distance between stop: 1 and stop: 2 is 3.00km.\n\
             This path avoids 1 one way roads!\n\
             Roads through the path are:\n\
             Kitchener Street : 1.00km\n\
             Lorne Street : 1.00km\n\
             Rutland Street : 1.00km"
        );
    }

    #[test]
    fn stationary_route_report_has_no_road_lines() {
        let route = Route {
            start: 5,
            target: 5,
            distance: 0.0,
            segments: Vec::new(),
            nodes: vec![5],
            road_distances: BTreeMap::new(),
            avoided_one_way: BTreeSet::new(),
        };

        assert_eq!(
            super::route(&route),
            "The shortest distance between stop: 5 and stop: 5 is 0.00km.\n\
             This path avoids 0 one way roads!\n\
             Roads through the path are:"
        );
    }

    #[test]
    fn articulation_report_counts_and_lists() {
        let points = ArticulationPoints {
            points: BTreeSet::from([7, 3]),
            components: 1,
        };

        assert_eq!(
            articulation(&points),
            "There are 2 articulation points in this map.\n3, 7"
        );
        assert_eq!(
            articulation(&ArticulationPoints::default()),
            "There are 0 articulation points in this map."
        );
    }

    #[test]
    fn search_report_joins_names() {
        let matches = RoadMatches {
            roads: vec![1, 2, 3],
            names: vec!["Queen Street".to_owned(), "Queens Drive".to_owned()],
            exact: false,
        };

        assert_eq!(search("que", &matches), "Queen Street; Queens Drive");
        assert_eq!(
            search("zz", &RoadMatches::default()),
            "No roads match \"zz\"."
        );
    }

    #[test]
    fn legs_are_numbered() {
        let legs = vec![
            RouteLeg {
                road_name: "Queen Street".to_owned(),
                from: 1,
                to: 3,
                distance: 2.0,
                segment_count: 2,
            },
            RouteLeg {
                road_name: "Customs Street".to_owned(),
                from: 3,
                to: 4,
                distance: 0.5,
                segment_count: 1,
            },
        ];

        assert_eq!(
            super::legs(&legs),
            "1. Queen Street from 1 to 3 (2.00km)\n2. Customs Street from 3 to 4 (0.50km)"
        );
    }
}
