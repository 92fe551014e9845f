//! # Subsystem Container
//!
//! Builds the subsystems in dependency order:
//!
//! ```text
//! Level 0: GraphStore (memory or RocksDB)
//! Level 1: Social Graph (fm-01), owns the store
//! Level 2: API Gateway (fm-02), calls the social graph
//! ```
//!
//! All instances are wrapped in `Arc`; the social graph service is
//! stateless apart from its store, so no extra locking is needed here.

use std::sync::Arc;

use fm_01_social_graph::{GraphStore, InMemoryGraphStore, SocialGraphService, StoreError};
use fm_02_api_gateway::{ApiGatewayService, GatewayError};
use thiserror::Error;
use tracing::info;

use crate::adapters::storage::DiskSpaceError;
use crate::container::config::{ConfigError, NodeConfig, StorageBackend};

/// Failures while assembling the node.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("storage unavailable: {0}")]
    Storage(#[from] StoreError),

    #[error(transparent)]
    DiskSpace(#[from] DiskSpaceError),

    #[error("cannot create data directory: {0}")]
    DataDir(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Central container holding every subsystem instance.
pub struct SubsystemContainer {
    /// Persistence backend (Level 0).
    pub store: Arc<dyn GraphStore>,
    /// Social Graph (fm-01).
    pub social_graph: Arc<SocialGraphService>,
    /// API Gateway (fm-02).
    pub api_gateway: Arc<ApiGatewayService>,
    /// Configuration the container was built from.
    pub config: NodeConfig,
}

impl SubsystemContainer {
    /// Validate `config`, open the configured store and wire the subsystems.
    pub fn new(config: NodeConfig) -> Result<Self, ContainerError> {
        config.validate()?;

        let store = Self::init_store(&config)?;
        Self::with_store(config, store)
    }

    /// Wire the subsystems around an already opened store.
    pub fn with_store(
        config: NodeConfig,
        store: Arc<dyn GraphStore>,
    ) -> Result<Self, ContainerError> {
        let social_graph = Arc::new(SocialGraphService::with_config(
            Arc::clone(&store),
            config.graph.clone(),
        ));
        info!(
            store_timeout_ms = config.graph.store_timeout_ms,
            "[fm-01] Social Graph initialized"
        );

        let api_gateway = Arc::new(ApiGatewayService::new(
            config.gateway.clone(),
            Arc::clone(&social_graph) as _,
        )?);
        info!(addr = %config.gateway.http_addr(), "[fm-02] API Gateway initialized");

        Ok(Self {
            store,
            social_graph,
            api_gateway,
            config,
        })
    }

    /// Container over an empty in-memory store.
    pub fn in_memory(config: NodeConfig) -> Result<Self, ContainerError> {
        Self::with_store(config, Arc::new(InMemoryGraphStore::new()))
    }

    fn init_store(config: &NodeConfig) -> Result<Arc<dyn GraphStore>, ContainerError> {
        match config.storage.backend {
            StorageBackend::Memory => {
                info!("[node] using in-memory graph store, data is not persisted");
                Ok(Arc::new(InMemoryGraphStore::new()))
            }
            StorageBackend::RocksDb => Self::init_rocksdb(config),
        }
    }

    #[cfg(feature = "rocksdb")]
    fn init_rocksdb(config: &NodeConfig) -> Result<Arc<dyn GraphStore>, ContainerError> {
        use crate::adapters::storage::{ensure_disk_space, RocksDbConfig, RocksDbGraphStore};

        let data_dir = &config.storage.data_dir;
        std::fs::create_dir_all(data_dir).map_err(|e| {
            ContainerError::DataDir(format!("{}: {}", data_dir.display(), e))
        })?;
        let free = ensure_disk_space(data_dir, config.storage.min_disk_space_percent)?;
        info!(free_percent = free, path = %data_dir.display(), "[node] disk space check passed");

        let store = RocksDbGraphStore::open(RocksDbConfig {
            path: data_dir.join("graph"),
            sync_writes: config.storage.sync_writes,
            ..RocksDbConfig::default()
        })?;
        Ok(Arc::new(store))
    }

    #[cfg(not(feature = "rocksdb"))]
    fn init_rocksdb(_config: &NodeConfig) -> Result<Arc<dyn GraphStore>, ContainerError> {
        Err(ConfigError::BackendUnavailable(StorageBackend::RocksDb).into())
    }
}
