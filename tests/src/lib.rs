//! # Friend Management Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # criterion benchmarks for the recipient path
//! └── src/integration/  # whole-node flows through the HTTP surface
//!     ├── flows.rs
//!     ├── concurrency.rs
//!     └── persistence.rs  (feature `rocksdb`)
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p fm-tests
//!
//! # Including the RocksDB restart flow
//! cargo test -p fm-tests --features rocksdb
//!
//! # Benchmarks
//! cargo bench -p fm-tests
//! ```

pub mod integration;
