//! # Subsystem Container
//!
//! Central container holding the subsystem instances with their storage
//! backend injected.

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, NodeConfig, StorageBackend, StorageConfig};
pub use subsystems::{ContainerError, SubsystemContainer};
