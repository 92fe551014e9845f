//! # Ports Layer
//!
//! Hexagonal architecture ports (interfaces) for the Social Graph.
//!
//! - **Driving Ports (Inbound)**: APIs consumed by adapters (HTTP handlers, tests)
//! - **Driven Ports (Outbound)**: the `GraphStore` SPI implemented by storage adapters

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
