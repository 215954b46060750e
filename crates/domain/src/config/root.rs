use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::{ResolverConfig, MIN_RECEIVE_BUFFER};

/// Main configuration structure for iterdns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Iterative resolution settings (root server, limits, timeouts)
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. iterdns.toml in current directory
    /// 3. /etc/iterdns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("iterdns.toml").exists() {
            Self::from_file("iterdns.toml")?
        } else if std::path::Path::new("/etc/iterdns/config.toml").exists() {
            Self::from_file("/etc/iterdns/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(root) = overrides.root_server {
            self.resolver.root_server = root;
        }
        if let Some(timeout) = overrides.query_timeout_ms {
            self.resolver.query_timeout_ms = timeout;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let resolver = &self.resolver;

        if resolver.query_timeout_ms == 0 {
            return Err(ConfigError::invalid("query_timeout_ms", "cannot be 0"));
        }
        if resolver.max_referrals == 0 {
            return Err(ConfigError::invalid("max_referrals", "cannot be 0"));
        }
        if resolver.max_cname_hops == 0 {
            return Err(ConfigError::invalid("max_cname_hops", "cannot be 0"));
        }
        if resolver.receive_buffer_size < MIN_RECEIVE_BUFFER {
            return Err(ConfigError::invalid(
                "receive_buffer_size",
                format!("must be at least {} bytes", MIN_RECEIVE_BUFFER),
            ));
        }
        if resolver.receive_buffer_size > u16::MAX as usize {
            return Err(ConfigError::invalid(
                "receive_buffer_size",
                format!("cannot exceed {} bytes", u16::MAX),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub root_server: Option<SocketAddr>,
    pub query_timeout_ms: Option<u64>,
    pub log_level: Option<String>,
}
