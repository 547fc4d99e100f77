//! Configuration loading and management

use crate::core::error::{ConfigError, TreatyResult};
use crate::core::link::LinkIntegrity;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

/// Complete service configuration
///
/// Every field has a default, so an empty YAML document is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Prefix under which every API route is nested (`/api` → `/api/contracts`)
    pub api_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            api_prefix: "/api".to_string(),
        }
    }
}

/// Link store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub link_integrity: LinkIntegrity,
    pub seed_sample_data: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            link_integrity: LinkIntegrity::Permissive,
            seed_sample_data: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> TreatyResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError {
                message: format!("{}: {}", path.display(), e),
            },
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> TreatyResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot check on its own
    pub fn validate(&self) -> TreatyResult<()> {
        let prefix = &self.server.api_prefix;
        if !prefix.starts_with('/') || (prefix.len() > 1 && prefix.ends_with('/')) {
            return Err(ConfigError::InvalidValue {
                field: "server.api_prefix".to_string(),
                value: prefix.clone(),
                message: "must start with '/' and must not end with '/'".to_string(),
            }
            .into());
        }
        self.bind_address()?;
        Ok(())
    }

    /// Socket address built from `server.host` and `server.port`
    ///
    /// IPv6 hosts may be written with or without brackets.
    pub fn bind_address(&self) -> TreatyResult<SocketAddr> {
        let host = self.server.host.trim_start_matches('[').trim_end_matches(']');
        let ip: IpAddr = host.parse().map_err(|_| ConfigError::InvalidValue {
            field: "server.host".to_string(),
            value: self.server.host.clone(),
            message: "not an IP address".to_string(),
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    /// Override host and port from a `host:port` string
    pub fn set_bind_address(&mut self, bind: &str) -> TreatyResult<()> {
        let addr: SocketAddr = bind.parse().map_err(|_| ConfigError::InvalidValue {
            field: "bind".to_string(),
            value: bind.to_string(),
            message: "expected host:port".to_string(),
        })?;
        self.server.host = addr.ip().to_string();
        self.server.port = addr.port();
        Ok(())
    }

    /// Whether routes are mounted at the root instead of under a prefix
    pub fn is_unprefixed(&self) -> bool {
        self.server.api_prefix == "/"
    }
}
