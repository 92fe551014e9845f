//! # Node Runtime Library
//!
//! Configuration, storage adapters and subsystem wiring for the friend
//! management node. The entry point is the `main.rs` binary.
//!
//! ## Architectural Patterns
//!
//! - **Hexagonal Architecture**: fm-01 declares the `GraphStore` port, this
//!   crate supplies the adapters
//! - **Plug-and-Play storage**: memory or RocksDB, chosen by configuration

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod container;

pub use container::{
    ConfigError, ContainerError, NodeConfig, StorageBackend, StorageConfig, SubsystemContainer,
};
