//! Command line arguments

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use roadnet_core::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "roadnet")]
#[command(about = "Route planning and connectivity analysis for road maps", long_about = None)]
pub struct Cli {
    /// Directory holding the node, road and segment tables
    #[arg(long, global = true, default_value = ".")]
    pub data: PathBuf,

    /// More log output (-v info, -vv debug, -vvv trace). RUST_LOG wins if set
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print network statistics
    Info,

    /// Shortest route between two intersections
    Route {
        /// Start intersection id
        #[arg(long)]
        from: NodeId,
        /// Target intersection id
        #[arg(long)]
        to: NodeId,
        /// Print the route as GeoJSON
        #[arg(long)]
        geojson: bool,
        /// Add turn-by-turn legs to the report
        #[arg(long, conflicts_with = "geojson")]
        legs: bool,
    },

    /// Intersections whose removal disconnects the map
    Articulation {
        /// Print the points as GeoJSON
        #[arg(long)]
        geojson: bool,
    },

    /// Roads whose name starts with a query
    Search {
        query: String,
    },

    /// Intersection closest to a coordinate
    Nearest {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Search radius in kilometres
        #[arg(long, default_value_t = 1.0)]
        max_distance: Kilometres,
    },

    /// Details of one intersection
    Node {
        id: NodeId,
    },
}

impl Cli {
    /// Log filter for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_route_with_global_data_dir() {
        let cli = Cli::try_parse_from([
            "roadnet", "route", "--from", "12", "--to", "40", "--data", "maps/small", "-vv",
        ])
        .unwrap();

        assert_eq!(cli.data, PathBuf::from("maps/small"));
        assert_eq!(cli.log_level(), "debug");
        assert!(matches!(
            cli.command,
            Command::Route {
                from: 12,
                to: 40,
                geojson: false,
                legs: false
            }
        ));
    }

    #[test]
    fn nearest_accepts_southern_latitudes() {
        let cli =
            Cli::try_parse_from(["roadnet", "nearest", "--lat", "-36.85", "--lon", "174.76"])
                .unwrap();

        match cli.command {
            Command::Nearest {
                lat,
                lon,
                max_distance,
            } => {
                assert!((lat + 36.85).abs() < 1e-12);
                assert!((lon - 174.76).abs() < 1e-12);
                assert!((max_distance - 1.0).abs() < 1e-12);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_non_numeric_node_ids() {
        assert!(Cli::try_parse_from(["roadnet", "node", "town-hall"]).is_err());
    }
}
