//! # Shared Types Crate
//!
//! User identity types shared by every crate in the workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `UserId`, `Email` and `User` are defined once.
//! - **Id for relations, email for people**: every relation is keyed by
//!   [`UserId`]; the email is the externally visible key and is only used to
//!   look a user up.

pub mod entities;

pub use entities::*;
