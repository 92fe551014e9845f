//! Algorithms module for the Social Graph
//!
//! Contains:
//! - Mention extraction from message text
//! - Candidate merging (friends, subscribers, mentions)
//! - Common friend intersection

pub mod common;
pub mod mentions;
pub mod recipients;

pub use common::intersect_friends;
pub use mentions::extract_mentions;
pub use recipients::merge_candidates;
