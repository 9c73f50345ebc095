//! Startup configuration parsing.
//!
//! Coordinator processes read sharding settings from a TOML file (usually a
//! `[sharding]` table extracted from the process-wide configuration) before
//! the registry is published to other threads.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or parsing a sharding configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration contents are not valid for this schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Sharding-related startup configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShardingConfig {
    /// Whether shards and configuration servers may use localhost
    /// addresses. Off by default.
    #[serde(default)]
    pub allow_local_host: bool,
}

impl ShardingConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML does not match the schema; unknown keys
    /// are rejected rather than ignored.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = ShardingConfig::from_toml("").expect("parses");
        assert!(!config.allow_local_host);
    }

    #[test]
    fn explicit_flag_is_honored() {
        let config = ShardingConfig::from_toml("allow_local_host = true").expect("parses");
        assert!(config.allow_local_host);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = ShardingConfig::from_toml("allow_localhost = true");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
