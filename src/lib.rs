//! Command line front end for `roadnet_core`

pub mod cli;
pub mod commands;
pub mod report;

pub use commands::{execute, run};
