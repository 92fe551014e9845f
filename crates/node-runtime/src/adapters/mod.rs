//! # Adapter Implementations
//!
//! Concrete implementations of the outbound ports the subsystems declare.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 OUTER LAYER (Adapters)                        │
//! │   InMemoryGraphStore (fm-01)    RocksDbGraphStore (here)      │
//! │                       ↑ implements ↑                          │
//! │                 MIDDLE LAYER (Ports)                          │
//! │                  trait GraphStore (fm-01)                     │
//! │                         ↑ uses ↑                              │
//! │                 INNER LAYER (Domain)                          │
//! │               SocialGraphService (fm-01)                      │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod storage;
