//! # Integration Tests
//!
//! Whole-node flows: HTTP request → fm-02 → fm-01 → graph store.

pub mod concurrency;
pub mod flows;
pub mod persistence;
#[cfg(test)]
pub mod support;
