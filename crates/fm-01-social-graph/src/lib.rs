//! # FM-01: Social Graph Subsystem
//!
//! Friend connections, subscriptions and blocks between users identified by
//! email, plus the notification recipient resolver that combines them.
//!
//! ## Architecture
//!
//! - **Domain**: relation entities (Friendship, Subscription, Block) and `GraphError`
//! - **Algorithms**: mention extraction, candidate merging, friend-list intersection
//! - **Ports**: Inbound (`FriendshipApi`, `SubscriptionApi`, `RecipientApi`, `UserApi`)
//!   and Outbound (`GraphStore`)
//! - **Application**: `SocialGraphService`, the single implementation of every inbound port
//! - **Adapters**: `InMemoryGraphStore`
//!
//! ## Recipient Resolution
//!
//! ```text
//!            ┌── list_friends(sender) ─────┐
//! sender ────┼── list_subscribers(sender) ─┼──→ union by email ──→ drop if candidate
//!            └── @-tokens of text ─────────┘                      blocks sender
//! ```
//!
//! ## Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | One friendship per unordered pair | `Friendship::new` normalises, store inserts atomically |
//! | One subscription per ordered pair | store `create_subscription` insert-if-absent |
//! | Recipients are a set | `algorithms::recipients::merge_candidates` keys by email |
//! | Blocked candidates never notified | `SocialGraphService::resolve_recipients` |

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::InMemoryGraphStore;
pub use application::service::SocialGraphService;
pub use config::SocialGraphConfig;
pub use domain::entities::*;
pub use domain::errors::GraphError;
pub use domain::value_objects::*;
pub use ports::inbound::{FriendshipApi, RecipientApi, SubscriptionApi, UserApi};
pub use ports::outbound::{GraphStore, StoreError};
