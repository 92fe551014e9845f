//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the outbound `GraphStore` port. The durable RocksDB store lives
//! in `node-runtime` behind the `rocksdb` feature.

mod memory;

pub use memory::InMemoryGraphStore;
