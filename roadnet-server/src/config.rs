//! Server configuration: a TOML file with `[server]`, `[network]` and
//! `[limits]` tables, any value of which can be overridden on the command
//! line.

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid listen address '{0}'")]
    InvalidAddress(String),
    #[error("Invalid limit: {0}")]
    InvalidLimit(&'static str),
}

#[derive(Debug, Parser)]
#[command(name = "roadnet-server")]
#[command(about = "HTTP queries over a road network", long_about = None)]
pub struct ServerArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Directory holding the node, road and segment tables
    #[arg(long)]
    pub data: Option<PathBuf>,
    #[arg(long)]
    pub host: Option<String>,
    #[arg(short, long)]
    pub port: Option<u16>,
    /// Requests processed at the same time
    #[arg(long)]
    pub max_concurrent: Option<usize>,
    /// Seconds before a request is abandoned
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub server: ListenConfig,
    pub network: NetworkSection,
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListenConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkSection {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    pub max_concurrent_requests: usize,
    pub request_timeout_secs: u64,
    /// Search radius for `/nearest` when the request gives none
    pub default_nearest_km: f64,
    /// Largest search radius a `/nearest` request may ask for
    pub max_nearest_km: f64,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        }
    }
}

impl Default for NetworkSection {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: 64,
            request_timeout_secs: 30,
            default_nearest_km: 1.0,
            max_nearest_km: 10.0,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Reads the file named in `args` (defaults otherwise) and applies the
    /// command line overrides
    pub fn resolve(args: &ServerArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply(args);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&mut self, args: &ServerArgs) {
        if let Some(data) = &args.data {
            self.network.data_dir.clone_from(data);
        }
        if let Some(host) = &args.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }
        if let Some(max_concurrent) = args.max_concurrent {
            self.limits.max_concurrent_requests = max_concurrent;
        }
        if let Some(timeout) = args.timeout_secs {
            self.limits.request_timeout_secs = timeout;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_concurrent_requests == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_concurrent_requests must be at least 1",
            ));
        }
        if self.limits.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidLimit(
                "request_timeout_secs must be at least 1",
            ));
        }
        if !(self.limits.default_nearest_km > 0.0
            && self.limits.default_nearest_km <= self.limits.max_nearest_km)
        {
            return Err(ConfigError::InvalidLimit(
                "default_nearest_km must be positive and at most max_nearest_km",
            ));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .server
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(self.server.host.clone()))?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}

impl LimitsConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tables_use_defaults() {
        let config = ServerConfig::from_toml_str("[server]\nport = 8080\n").unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.limits, LimitsConfig::default());
        assert_eq!(config.network.data_dir, PathBuf::from("."));
    }

    #[test]
    fn full_file() {
        let config = ServerConfig::from_toml_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [network]
            data_dir = "maps/auckland"

            [limits]
            max_concurrent_requests = 8
            request_timeout_secs = 5
            default_nearest_km = 0.5
            max_nearest_km = 2.0
            "#,
        )
        .unwrap();

        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:9000");
        assert_eq!(config.network.data_dir, PathBuf::from("maps/auckland"));
        assert_eq!(config.limits.request_timeout(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            ServerConfig::from_toml_str("[server]\nbind = \"x\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn command_line_overrides_file() {
        let mut config = ServerConfig::from_toml_str("[server]\nport = 8080\n").unwrap();
        let args = ServerArgs::try_parse_from([
            "roadnet-server",
            "--port",
            "4000",
            "--data",
            "maps/wellington",
            "--timeout-secs",
            "3",
        ])
        .unwrap();

        config.apply(&args);

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.network.data_dir, PathBuf::from("maps/wellington"));
        assert_eq!(config.limits.request_timeout_secs, 3);
        assert_eq!(config.limits.max_concurrent_requests, 64);
    }

    #[test]
    fn invalid_values_are_reported() {
        let mut config = ServerConfig::default();
        config.server.host = "localhost:80".to_owned();
        assert!(matches!(
            config.socket_addr(),
            Err(ConfigError::InvalidAddress(_))
        ));

        config.limits.max_concurrent_requests = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLimit(_))
        ));
    }
}
