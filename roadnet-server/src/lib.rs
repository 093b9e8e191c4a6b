//! HTTP front end for `roadnet_core`: routing, articulation points, road
//! search and nearest intersection lookups as JSON and GeoJSON.

pub mod config;
pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ServerArgs, ServerConfig};
pub use error::{ApiError, ServerError};
pub use routes::create_router;
pub use state::AppState;
