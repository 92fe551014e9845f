//! # Node Configuration
//!
//! Unified configuration for both subsystems and the runtime itself.
//!
//! ## Load Order
//!
//! Later sources override earlier ones:
//!
//! 1. Compiled defaults
//! 2. Optional TOML file (`--config`)
//! 3. Environment (`FM_HTTP_PORT`, `FM_STORAGE_BACKEND`, `FM_DATA_DIR`, `FM_LOG`)
//! 4. Command-line flags

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use fm_01_social_graph::SocialGraphConfig;
use fm_02_api_gateway::GatewayConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the HTTP port.
pub const ENV_HTTP_PORT: &str = "FM_HTTP_PORT";
/// Environment variable overriding the storage backend.
pub const ENV_STORAGE_BACKEND: &str = "FM_STORAGE_BACKEND";
/// Environment variable overriding the data directory.
pub const ENV_DATA_DIR: &str = "FM_DATA_DIR";
/// Environment variable overriding the default log filter.
pub const ENV_LOG: &str = "FM_LOG";

/// Complete node configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Social graph (fm-01) configuration.
    pub graph: SocialGraphConfig,
    /// API Gateway (fm-02) configuration.
    pub gateway: GatewayConfig,
    /// Persistence configuration.
    pub storage: StorageConfig,
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            graph: SocialGraphConfig::default(),
            gateway: GatewayConfig::default(),
            storage: StorageConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl NodeConfig {
    /// Parse a TOML document. Missing sections keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&raw)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(ENV_HTTP_PORT) {
            self.gateway.http.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                key: ENV_HTTP_PORT,
                value: port.clone(),
            })?;
        }
        if let Some(backend) = lookup(ENV_STORAGE_BACKEND) {
            self.storage.backend = backend.parse()?;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup(ENV_LOG) {
            self.log_level = level;
        }
        Ok(())
    }

    /// Reject configurations the node cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.graph.store_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "graph.store_timeout_ms cannot be 0".into(),
            ));
        }
        self.gateway
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("gateway: {}", e)))?;

        if self.storage.backend == StorageBackend::RocksDb && !cfg!(feature = "rocksdb") {
            return Err(ConfigError::BackendUnavailable(StorageBackend::RocksDb));
        }
        if self.storage.min_disk_space_percent > 100 {
            return Err(ConfigError::Invalid(
                "storage.min_disk_space_percent must be at most 100".into(),
            ));
        }
        Ok(())
    }
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StorageBackend {
    /// Process-local maps; contents are lost on exit.
    #[default]
    #[serde(rename = "memory")]
    Memory,
    /// RocksDB under `storage.data_dir` (feature `rocksdb`).
    #[serde(rename = "rocksdb")]
    RocksDb,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "rocksdb" => Ok(Self::RocksDb),
            _ => Err(ConfigError::UnknownBackend(s.to_string())),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::RocksDb => write!(f, "rocksdb"),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Which `GraphStore` implementation to open.
    pub backend: StorageBackend,
    /// Data directory for the RocksDB backend.
    pub data_dir: PathBuf,
    /// Refuse to open the RocksDB backend below this free-space percentage.
    pub min_disk_space_percent: u8,
    /// fsync every RocksDB write.
    pub sync_writes: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            data_dir: PathBuf::from("./data"),
            min_disk_space_percent: 5,
            sync_writes: true,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("cannot read config file {path:?}: {message}")]
    Read { path: PathBuf, message: String },

    /// Config file is not valid TOML for `NodeConfig`.
    #[error("invalid config file: {0}")]
    Parse(String),

    /// An environment override does not parse.
    #[error("invalid value {value:?} for {key}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("unknown storage backend: {0} (expected \"memory\" or \"rocksdb\")")]
    UnknownBackend(String),

    /// Backend selected but not compiled in.
    #[error("storage backend {0} is not compiled in (enable the `rocksdb` feature)")]
    BackendUnavailable(StorageBackend),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
