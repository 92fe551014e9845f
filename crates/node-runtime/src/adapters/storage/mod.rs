//! # Storage Adapters
//!
//! Persistent `GraphStore` backends.
//!
//! ## Usage
//!
//! Enable the `rocksdb` feature to use the RocksDB store:
//!
//! ```toml
//! node-runtime = { path = "...", features = ["rocksdb"] }
//! ```

#[cfg(feature = "rocksdb")]
pub mod rocksdb_adapter;

#[cfg(feature = "rocksdb")]
pub use rocksdb_adapter::{RocksDbConfig, RocksDbGraphStore, COLUMN_FAMILIES};

pub use fm_01_social_graph::InMemoryGraphStore;

use std::path::Path;
use thiserror::Error;

/// Disk space probe failures
#[derive(Debug, Error)]
pub enum DiskSpaceError {
    #[error("cannot read disk space for {path}: {message}")]
    Io { path: String, message: String },

    #[error("only {available}% disk space free under {path}, need {required}%")]
    Insufficient {
        path: String,
        available: u8,
        required: u8,
    },
}

/// Percentage of free space on the filesystem holding `path`.
pub fn available_disk_space_percent(path: &Path) -> Result<u8, DiskSpaceError> {
    let io = |e: std::io::Error| DiskSpaceError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    };
    let available = fs2::available_space(path).map_err(io)?;
    let total = fs2::total_space(path).map_err(io)?;
    if total == 0 {
        return Err(DiskSpaceError::Io {
            path: path.display().to_string(),
            message: "filesystem reports zero capacity".to_string(),
        });
    }
    Ok(((available as f64 / total as f64) * 100.0) as u8)
}

/// Fail when less than `required` percent of the disk under `path` is free.
pub fn ensure_disk_space(path: &Path, required: u8) -> Result<u8, DiskSpaceError> {
    let available = available_disk_space_percent(path)?;
    if available < required {
        return Err(DiskSpaceError::Insufficient {
            path: path.display().to_string(),
            available,
            required,
        });
    }
    Ok(available)
}
