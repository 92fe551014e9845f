//! Relation entities
//!
//! Friendships are undirected; subscriptions and blocks are directed from the
//! requestor to the target.

use serde::{Deserialize, Serialize};
use shared_types::UserId;

/// Undirected friendship between two users.
///
/// Always stored with the lower id first so that `{a, b}` and `{b, a}` are
/// the same value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Friendship {
    low: UserId,
    high: UserId,
}

impl Friendship {
    pub fn new(a: UserId, b: UserId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Both members, lower id first.
    pub fn members(&self) -> (UserId, UserId) {
        (self.low, self.high)
    }

    pub fn involves(&self, user: UserId) -> bool {
        self.low == user || self.high == user
    }

    /// The member that is not `user`, if `user` is a member.
    pub fn other(&self, user: UserId) -> Option<UserId> {
        if self.low == user {
            Some(self.high)
        } else if self.high == user {
            Some(self.low)
        } else {
            None
        }
    }
}

/// `requestor` receives updates from `target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Subscription {
    pub requestor: UserId,
    pub target: UserId,
}

impl Subscription {
    pub fn new(requestor: UserId, target: UserId) -> Self {
        Self { requestor, target }
    }
}

/// `requestor` refuses updates from `target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Block {
    pub requestor: UserId,
    pub target: UserId,
}

impl Block {
    pub fn new(requestor: UserId, target: UserId) -> Self {
        Self { requestor, target }
    }
}
