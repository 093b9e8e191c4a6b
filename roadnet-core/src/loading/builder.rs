use log::info;

use super::config::NetworkConfig;
use super::parser::{parse_nodes, parse_roads, parse_segments};
use crate::{Error, RoadNetwork};

/// Loads the three map tables and builds a road network from them
///
/// # Errors
///
/// Returns an error if a file is missing or unreadable, if a row is
/// malformed (the message names the file and line), or if the rows do not
/// form a consistent network.
pub fn create_road_network(config: &NetworkConfig) -> Result<RoadNetwork, Error> {
    validate_config(config)?;

    info!("Reading nodes: {}", config.nodes_path.display());
    let nodes = parse_nodes(&config.nodes_path)?;

    info!("Reading roads: {}", config.roads_path.display());
    let roads = parse_roads(&config.roads_path)?;

    info!("Reading segments: {}", config.segments_path.display());
    let segments = parse_segments(&config.segments_path)?;

    let network = RoadNetwork::build(nodes, roads, segments)?;

    let summary = network.summary();
    info!(
        "Road network created: {} intersections, {} roads ({} one-way), {} segments, {:.1} km",
        summary.nodes, summary.roads, summary.one_way_roads, summary.segments, summary.total_length
    );
    Ok(network)
}

fn validate_config(config: &NetworkConfig) -> Result<(), Error> {
    for (table, path) in config.paths() {
        if !path.is_file() {
            return Err(Error::InvalidData(format!(
                "{table} file not found: {}",
                path.display()
            )));
        }
    }
    Ok(())
}
