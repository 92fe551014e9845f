//! In-memory Graph Store
//!
//! Implements `GraphStore` over hash sets behind a single `RwLock`. Every
//! insert-if-absent runs under one write guard, which gives the same
//! check-and-insert atomicity a database transaction with a unique
//! constraint would.

use crate::domain::entities::{Block, Friendship, Subscription};
use crate::ports::outbound::{GraphStore, StoreError};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{Email, User, UserId};
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Default)]
struct GraphState {
    users: HashMap<UserId, User>,
    by_email: HashMap<Email, UserId>,
    friendships: HashSet<Friendship>,
    subscriptions: HashSet<Subscription>,
    blocks: HashSet<Block>,
    next_id: u64,
}

impl GraphState {
    fn users_sorted(&self, ids: impl Iterator<Item = UserId>) -> Vec<User> {
        let mut users: Vec<User> = ids.filter_map(|id| self.users.get(&id).cloned()).collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        users
    }
}

/// Process-local `GraphStore`.
#[derive(Default)]
pub struct InMemoryGraphStore {
    state: RwLock<GraphState>,
}

impl InMemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every email that is not yet known. Used for seeding.
    pub fn with_users<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let store = Self::new();
        {
            let mut state = store.state.write();
            for email in emails {
                let email = email.as_ref();
                if !state.by_email.contains_key(email) {
                    Self::insert_user(&mut state, email, None);
                }
            }
        }
        store
    }

    pub fn user_count(&self) -> usize {
        self.state.read().users.len()
    }

    /// Whether the ordered subscription `{requestor, target}` exists.
    pub fn has_subscription(&self, requestor: UserId, target: UserId) -> bool {
        self.state
            .read()
            .subscriptions
            .contains(&Subscription::new(requestor, target))
    }

    fn insert_user(state: &mut GraphState, email: &str, name: Option<&str>) -> User {
        state.next_id += 1;
        let user = User {
            id: UserId(state.next_id),
            email: email.to_string(),
            name: name.map(str::to_string),
        };
        state.by_email.insert(user.email.clone(), user.id);
        state.users.insert(user.id, user.clone());
        user
    }

    fn ensure_known(state: &GraphState, ids: &[UserId]) -> Result<(), StoreError> {
        if ids.iter().all(|id| state.users.contains_key(id)) {
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }
}

#[async_trait]
impl GraphStore for InMemoryGraphStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let state = self.state.read();
        Ok(state
            .by_email
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn create_user(&self, email: &str, name: Option<&str>) -> Result<User, StoreError> {
        let mut state = self.state.write();
        if state.by_email.contains_key(email) {
            return Err(StoreError::AlreadyExists);
        }
        let user = Self::insert_user(&mut state, email, name);
        debug!(user_id = %user.id, "[fm-01] user created");
        Ok(user)
    }

    async fn list_friends(&self, user: UserId) -> Result<Vec<User>, StoreError> {
        let state = self.state.read();
        let ids = state.friendships.iter().filter_map(|f| f.other(user));
        Ok(state.users_sorted(ids))
    }

    async fn list_subscribers(&self, user: UserId) -> Result<Vec<User>, StoreError> {
        let state = self.state.read();
        let ids = state
            .subscriptions
            .iter()
            .filter(|s| s.target == user)
            .map(|s| s.requestor);
        Ok(state.users_sorted(ids))
    }

    async fn are_friends(&self, a: UserId, b: UserId) -> Result<bool, StoreError> {
        Ok(self.state.read().friendships.contains(&Friendship::new(a, b)))
    }

    async fn is_blocked(&self, target: UserId, sender: UserId) -> Result<bool, StoreError> {
        Ok(self.state.read().blocks.contains(&Block::new(target, sender)))
    }

    async fn create_friendship(&self, a: UserId, b: UserId) -> Result<(), StoreError> {
        let mut state = self.state.write();
        Self::ensure_known(&state, &[a, b])?;
        if !state.friendships.insert(Friendship::new(a, b)) {
            return Err(StoreError::AlreadyExists);
        }
        Ok(())
    }

    async fn create_subscription(
        &self,
        requestor: UserId,
        target: UserId,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write();
        Self::ensure_known(&state, &[requestor, target])?;
        if !state.subscriptions.insert(Subscription::new(requestor, target)) {
            return Err(StoreError::AlreadyExists);
        }
        Ok(())
    }

    async fn create_block(&self, requestor: UserId, target: UserId) -> Result<bool, StoreError> {
        let mut state = self.state.write();
        Self::ensure_known(&state, &[requestor, target])?;
        let block = Block::new(requestor, target);
        if state.blocks.contains(&block) {
            return Err(StoreError::AlreadyExists);
        }
        let friends = state.friendships.contains(&Friendship::new(requestor, target));
        let removed =
            friends && state.subscriptions.remove(&Subscription::new(requestor, target));
        state.blocks.insert(block);
        Ok(removed)
    }

    async fn delete_subscription(
        &self,
        requestor: UserId,
        target: UserId,
    ) -> Result<bool, StoreError> {
        Ok(self
            .state
            .write()
            .subscriptions
            .remove(&Subscription::new(requestor, target)))
    }
}
