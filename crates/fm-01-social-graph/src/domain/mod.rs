//! Domain module for the Social Graph
//!
//! Contains relation entities, value objects and errors. No I/O: everything
//! that touches storage goes through `ports::outbound::GraphStore`.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use value_objects::*;
