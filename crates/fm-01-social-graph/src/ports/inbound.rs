//! Inbound Ports (Driving Ports / API)

use crate::domain::errors::GraphError;
use async_trait::async_trait;
use shared_types::{Email, User};
use std::collections::BTreeSet;

/// Friendship management.
#[async_trait]
pub trait FriendshipApi: Send + Sync {
    /// Connect two users as friends.
    ///
    /// Argument order is irrelevant: `(a, b)` followed by `(b, a)` fails
    /// with `AlreadyFriends`.
    async fn create_friendship(&self, email_a: &str, email_b: &str) -> Result<(), GraphError>;

    /// Every user sharing a friendship with `email`. Order is not significant.
    async fn list_friends(&self, email: &str) -> Result<Vec<Email>, GraphError>;

    /// Intersection of both users' friend lists.
    ///
    /// Symmetric in its arguments and free of duplicates.
    async fn list_common_friends(
        &self,
        email_a: &str,
        email_b: &str,
    ) -> Result<Vec<Email>, GraphError>;
}

/// Subscriptions and blocks.
#[async_trait]
pub trait SubscriptionApi: Send + Sync {
    /// `requestor` starts receiving updates from `target`.
    async fn subscribe(&self, requestor: &str, target: &str) -> Result<(), GraphError>;

    /// Remove an existing subscription.
    async fn unsubscribe(&self, requestor: &str, target: &str) -> Result<(), GraphError>;

    /// `requestor` stops receiving updates from `target`.
    ///
    /// When the two are friends, the `{requestor, target}` subscription is
    /// removed in the same store write. The reverse direction is left alone.
    async fn block(&self, requestor: &str, target: &str) -> Result<(), GraphError>;

    /// Whether `target` has blocked updates from `sender`.
    async fn is_blocked(&self, target: &str, sender: &str) -> Result<bool, GraphError>;
}

/// Notification recipient resolution.
#[async_trait]
pub trait RecipientApi: Send + Sync {
    /// Emails eligible to receive an update posted by `sender` with body `text`.
    ///
    /// Friends, subscribers and resolvable `@` mentions are merged, then any
    /// candidate who blocks the sender is removed. Unresolvable mentions are
    /// skipped; any store failure aborts the whole resolution.
    async fn resolve_recipients(
        &self,
        sender: &str,
        text: &str,
    ) -> Result<BTreeSet<Email>, GraphError>;
}

/// User registration and lookup.
#[async_trait]
pub trait UserApi: Send + Sync {
    async fn register_user(&self, email: &str, name: Option<&str>) -> Result<User, GraphError>;

    async fn find_user(&self, email: &str) -> Result<User, GraphError>;
}
