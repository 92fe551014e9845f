//! Error types for the Social Graph

use crate::ports::outbound::StoreError;
use shared_types::Email;
use thiserror::Error;

/// All errors that can occur in social graph operations
#[derive(Debug, Error)]
pub enum GraphError {
    /// Email does not resolve to a registered user
    #[error("user not found: {email}")]
    UserNotFound { email: Email },

    /// Friendship already exists for this unordered pair
    #[error("they are already friends")]
    AlreadyFriends,

    /// Subscription already exists for this ordered pair
    #[error("subscription already exists")]
    AlreadySubscribed,

    /// Requestor already blocks the target
    #[error("updates are already blocked")]
    AlreadyBlocked,

    /// No subscription to remove
    #[error("subscription does not exist")]
    SubscriptionNotFound,

    /// Email is already registered
    #[error("user already exists: {email}")]
    UserAlreadyExists { email: Email },

    /// Request is well-formed but semantically invalid
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A store call exceeded its deadline
    #[error("operation timed out: {operation}")]
    Timeout { operation: &'static str },

    /// Underlying persistence failure
    #[error("store error during {operation}: {source}")]
    Store {
        operation: &'static str,
        #[source]
        source: StoreError,
    },
}
