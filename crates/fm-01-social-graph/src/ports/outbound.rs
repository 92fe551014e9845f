//! Outbound Ports (Driven Ports / SPI)
//!
//! The narrow capability set the social graph needs from persistence. The
//! service never sees queries, transactions or key layouts.

use async_trait::async_trait;
use shared_types::{User, UserId};
use thiserror::Error;

/// Relationship and user persistence.
///
/// Every `create_*` method is an atomic insert-if-absent: the existence check
/// and the insert happen under one lock or one transaction, and a duplicate
/// is reported as [`StoreError::AlreadyExists`].
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Exact, case-sensitive email lookup.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Register a new user. `AlreadyExists` if the email is taken.
    async fn create_user(&self, email: &str, name: Option<&str>) -> Result<User, StoreError>;

    /// Users sharing a friendship with `user`.
    async fn list_friends(&self, user: UserId) -> Result<Vec<User>, StoreError>;

    /// Users holding a subscription whose target is `user`.
    async fn list_subscribers(&self, user: UserId) -> Result<Vec<User>, StoreError>;

    async fn are_friends(&self, a: UserId, b: UserId) -> Result<bool, StoreError>;

    /// Whether `target` has blocked `sender`.
    async fn is_blocked(&self, target: UserId, sender: UserId) -> Result<bool, StoreError>;

    /// Insert the unordered pair `{a, b}`.
    async fn create_friendship(&self, a: UserId, b: UserId) -> Result<(), StoreError>;

    /// Insert the ordered pair `{requestor, target}`.
    async fn create_subscription(&self, requestor: UserId, target: UserId)
        -> Result<(), StoreError>;

    /// Insert the block `{requestor, target}`.
    ///
    /// If the pair are friends at the moment of the write, the
    /// `{requestor, target}` subscription is deleted in the same atomic
    /// write. The friendship check runs under that write too. Returns
    /// whether a subscription was actually removed.
    async fn create_block(&self, requestor: UserId, target: UserId) -> Result<bool, StoreError>;

    /// Returns whether a subscription existed and was removed.
    async fn delete_subscription(&self, requestor: UserId, target: UserId)
        -> Result<bool, StoreError>;
}

/// Storage operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Uniqueness constraint hit by an insert
    #[error("record already exists")]
    AlreadyExists,

    /// Referenced record is missing
    #[error("record not found")]
    NotFound,

    /// Backend I/O or engine failure
    #[error("backend failure: {0}")]
    Backend(String),

    /// Stored bytes could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(String),
}
