//! Process-wide configuration.
//!
//! Resolution order: environment variables → config file → built-in
//! defaults.
//!
//! Config file location:
//!   1. `$OPENBC_CONFIG` (explicit override)
//!   2. `<dirs::config_dir>/openbc-handshake/config.toml`

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::manifest::CapacityConfig;

/// Top-level server configuration.
///
/// Host/port are retained here even though the transport that would bind
/// them is out of this crate's scope, so the config file has one
/// authoritative shape rather than being split across this core and an
/// unspecified transport layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub manifest_path: PathBuf,
    pub capacities: CapacityConfig,
    pub log_level: String,
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            manifest_path: config_dir().join("manifest.json"),
            capacities: CapacityConfig::default(),
            log_level: "info".to_string(),
            host: "0.0.0.0".to_string(),
            port: 5190,
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("openbc-handshake")
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {0}: {1}")]
    ReadFailed(PathBuf, std::io::Error),
    #[error("failed to parse {0}: {1}")]
    ParseFailed(PathBuf, toml::de::Error),
}

impl ServerConfig {
    /// Path to the config file itself, honoring `$OPENBC_CONFIG`.
    pub fn file_path() -> PathBuf {
        std::env::var("OPENBC_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| config_dir().join("config.toml"))
    }

    /// Load: config file (if present) layered over defaults, then
    /// environment variable overrides applied on top.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::file_path();
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadFailed(path.clone(), e))?;
            toml::from_str(&text).map_err(|e| ConfigError::ParseFailed(path.clone(), e))?
        } else {
            ServerConfig::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("OPENBC_MANIFEST_PATH") {
            self.manifest_path = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("OPENBC_LOG_LEVEL") {
            self.log_level = v;
        }
        if let Ok(v) = std::env::var("OPENBC_HOST") {
            self.host = v;
        }
        if let Ok(v) = std::env::var("OPENBC_PORT") {
            if let Ok(p) = v.parse() {
                self.port = p;
            }
        }
        if let Ok(v) = std::env::var("OPENBC_MAX_FILES_PER_DIR") {
            if let Ok(n) = v.parse() {
                self.capacities.max_files_per_dir = n;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_manifest_model_caps() {
        let config = ServerConfig::default();
        assert_eq!(config.capacities, CapacityConfig::default());
    }

    #[test]
    fn env_override_applies_to_capacity_config() {
        let mut config = ServerConfig::default();
        std::env::set_var("OPENBC_MAX_FILES_PER_DIR", "42");
        config.apply_env_overrides();
        std::env::remove_var("OPENBC_MAX_FILES_PER_DIR");
        assert_eq!(config.capacities.max_files_per_dir, 42);
    }

    #[test]
    fn env_override_wins_over_config_file_value() {
        let mut config = ServerConfig { port: 1234, ..ServerConfig::default() };
        std::env::set_var("OPENBC_PORT", "9999");
        config.apply_env_overrides();
        std::env::remove_var("OPENBC_PORT");
        assert_eq!(config.port, 9999);
    }

    #[test]
    fn parse_failure_reports_typed_error() {
        let err = toml::from_str::<ServerConfig>("not = [valid").unwrap_err();
        assert!(ConfigError::ParseFailed(PathBuf::from("x"), err).to_string().contains("x"));
    }
}
