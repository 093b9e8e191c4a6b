use geo::Point;
use log::debug;
use roadnet_core::prelude::*;

use crate::cli::{Cli, Command};
use crate::report;

/// Loads the network named by `cli` and runs its subcommand
///
/// # Errors
///
/// Returns an error if the network cannot be loaded or the query is invalid
pub fn run(cli: &Cli) -> Result<String, Error> {
    let network = create_road_network(&NetworkConfig::from_dir(&cli.data))?;
    execute(&cli.command, &network)
}

/// Runs one subcommand against a loaded network and returns its output
pub fn execute(command: &Command, network: &RoadNetwork) -> Result<String, Error> {
    debug!("Running {command:?}");
    match *command {
        Command::Info => Ok(report::summary(&network.summary())),
        Command::Route {
            from,
            to,
            geojson,
            legs,
        } => match find_path(network, from, to)? {
            Some(route) if geojson => route.to_geojson_string(network),
            Some(route) if legs => Ok(format!(
                "{}\n\n{}",
                report::route(&route),
                report::legs(&route.legs(network)?)
            )),
            Some(route) => Ok(report::route(&route)),
            None => Ok(report::no_route(from, to)),
        },
        Command::Articulation { geojson } => {
            let points = find_articulation_points(network);
            if geojson {
                serde_json::to_string(&points.to_geojson(network)?)
                    .map_err(|e| Error::GeoJsonError(e.to_string()))
            } else {
                Ok(report::articulation(&points))
            }
        }
        Command::Search { ref query } => {
            let matches = RoadIndex::new(network).lookup(query);
            Ok(report::search(query, &matches))
        }
        Command::Nearest {
            lat,
            lon,
            max_distance,
        } => {
            let found = network.nearest_intersection(Point::new(lon, lat), max_distance);
            Ok(report::nearest(found, max_distance))
        }
        Command::Node { id } => report::node(network, id),
    }
}
