//! Node configuration.
//!
//! A subset of the server's configuration: only the sections the offline
//! tools need (metadata directory, data directory, engine selection).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Storage engine version written by the current node software.
pub const DEFAULT_ENGINE: &str = "tsm1";

/// Series index version written by the current node software.
pub const DEFAULT_INDEX: &str = "tsi1";

/// Top-level node configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Metadata section.
    pub meta: MetaConfig,

    /// Data (shard storage) section.
    pub data: DataConfig,
}

/// Where the node keeps its metadata snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaConfig {
    pub dir: PathBuf,
}

/// Where the node keeps shard data, and which engine wrote it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub dir: PathBuf,

    /// Storage engine version.
    /// Default: "tsm1"
    pub engine: String,

    /// Series index version.
    /// Default: "tsi1"
    pub index_version: String,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".tsmaint/meta"),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".tsmaint/data"),
            engine: DEFAULT_ENGINE.to_string(),
            index_version: DEFAULT_INDEX.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Config> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))
            .map_err(Error::Config)?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))
            .map_err(Error::Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.meta.dir, PathBuf::from(".tsmaint/meta"));
        assert_eq!(config.data.dir, PathBuf::from(".tsmaint/data"));
        assert_eq!(config.data.engine, "tsm1");
        assert_eq!(config.data.index_version, "tsi1");
    }

    #[test]
    fn test_config_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"data": {"dir": "/var/lib/node/data"}}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.data.dir, PathBuf::from("/var/lib/node/data"));
        assert_eq!(config.data.engine, "tsm1");
        assert_eq!(config.meta.dir, PathBuf::from(".tsmaint/meta"));
    }

    #[test]
    fn test_config_missing_file_is_config_error() {
        let err = Config::load(Path::new("/nonexistent/config.json")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_config_invalid_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
