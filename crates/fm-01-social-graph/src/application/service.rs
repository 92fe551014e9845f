//! Social Graph Service
//!
//! Main service implementing FriendshipApi, SubscriptionApi, RecipientApi
//! and UserApi on top of a `GraphStore`.

use crate::algorithms::{extract_mentions, intersect_friends, merge_candidates};
use crate::config::SocialGraphConfig;
use crate::domain::errors::GraphError;
use crate::domain::value_objects::CandidateSource;
use crate::ports::inbound::{FriendshipApi, RecipientApi, SubscriptionApi, UserApi};
use crate::ports::outbound::{GraphStore, StoreError};
use async_trait::async_trait;
use shared_types::{Email, User};
use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Social Graph Service
///
/// Stateless apart from its configuration: all shared state lives in the
/// store. Every store call is bounded by `SocialGraphConfig::store_timeout`
/// and tagged with its operation name on failure.
pub struct SocialGraphService {
    store: Arc<dyn GraphStore>,
    config: SocialGraphConfig,
}

impl SocialGraphService {
    /// Create a new service with default config
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self::with_config(store, SocialGraphConfig::default())
    }

    /// Create a new service with custom config
    pub fn with_config(store: Arc<dyn GraphStore>, config: SocialGraphConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &SocialGraphConfig {
        &self.config
    }

    /// Run one store call under the configured deadline.
    async fn call<T, F>(&self, operation: &'static str, fut: F) -> Result<T, GraphError>
    where
        F: Future<Output = Result<T, StoreError>> + Send,
    {
        match tokio::time::timeout(self.config.store_timeout(), fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(source)) => Err(GraphError::Store { operation, source }),
            Err(_) => {
                warn!(
                    operation,
                    timeout_ms = self.config.store_timeout_ms,
                    "[fm-01] store call timed out"
                );
                Err(GraphError::Timeout { operation })
            }
        }
    }

    async fn resolve_user(&self, email: &str) -> Result<User, GraphError> {
        self.call("find_user_by_email", self.store.find_user_by_email(email))
            .await?
            .ok_or_else(|| GraphError::UserNotFound {
                email: email.to_string(),
            })
    }

    async fn resolve_pair(&self, a: &str, b: &str) -> Result<(User, User), GraphError> {
        Ok((self.resolve_user(a).await?, self.resolve_user(b).await?))
    }
}

/// Replace a store uniqueness violation with the domain-level conflict.
fn on_conflict(err: GraphError, conflict: GraphError) -> GraphError {
    match err {
        GraphError::Store {
            source: StoreError::AlreadyExists,
            ..
        } => conflict,
        other => other,
    }
}

#[async_trait]
impl FriendshipApi for SocialGraphService {
    async fn create_friendship(&self, email_a: &str, email_b: &str) -> Result<(), GraphError> {
        if email_a == email_b {
            return Err(GraphError::InvalidRequest(
                "cannot befriend yourself".to_string(),
            ));
        }
        let (a, b) = self.resolve_pair(email_a, email_b).await?;

        self.call("create_friendship", self.store.create_friendship(a.id, b.id))
            .await
            .map_err(|e| on_conflict(e, GraphError::AlreadyFriends))?;

        info!(user_a = %a.id, user_b = %b.id, "[fm-01] friendship created");
        Ok(())
    }

    async fn list_friends(&self, email: &str) -> Result<Vec<Email>, GraphError> {
        let user = self.resolve_user(email).await?;
        let friends = self.call("list_friends", self.store.list_friends(user.id)).await?;
        Ok(friends.into_iter().map(|u| u.email).collect())
    }

    async fn list_common_friends(
        &self,
        email_a: &str,
        email_b: &str,
    ) -> Result<Vec<Email>, GraphError> {
        let (a, b) = self.resolve_pair(email_a, email_b).await?;
        let (friends_a, friends_b) = tokio::try_join!(
            self.call("list_friends", self.store.list_friends(a.id)),
            self.call("list_friends", self.store.list_friends(b.id)),
        )?;

        let common = intersect_friends(&friends_a, &friends_b);
        debug!(count = common.len(), "[fm-01] common friends computed");
        Ok(common)
    }
}

#[async_trait]
impl SubscriptionApi for SocialGraphService {
    async fn subscribe(&self, requestor: &str, target: &str) -> Result<(), GraphError> {
        let (r, t) = self.resolve_pair(requestor, target).await?;

        self.call("create_subscription", self.store.create_subscription(r.id, t.id))
            .await
            .map_err(|e| on_conflict(e, GraphError::AlreadySubscribed))?;

        info!(requestor = %r.id, target = %t.id, "[fm-01] subscription created");
        Ok(())
    }

    async fn unsubscribe(&self, requestor: &str, target: &str) -> Result<(), GraphError> {
        let (r, t) = self.resolve_pair(requestor, target).await?;

        let removed = self
            .call("delete_subscription", self.store.delete_subscription(r.id, t.id))
            .await?;
        if !removed {
            return Err(GraphError::SubscriptionNotFound);
        }

        info!(requestor = %r.id, target = %t.id, "[fm-01] subscription removed");
        Ok(())
    }

    async fn block(&self, requestor: &str, target: &str) -> Result<(), GraphError> {
        let (r, t) = self.resolve_pair(requestor, target).await?;

        // The store drops the forward subscription if the pair are friends.
        let dropped = self
            .call("create_block", self.store.create_block(r.id, t.id))
            .await
            .map_err(|e| on_conflict(e, GraphError::AlreadyBlocked))?;

        info!(
            requestor = %r.id,
            target = %t.id,
            subscription_dropped = dropped,
            "[fm-01] block recorded"
        );
        Ok(())
    }

    async fn is_blocked(&self, target: &str, sender: &str) -> Result<bool, GraphError> {
        let (t, s) = self.resolve_pair(target, sender).await?;
        self.call("is_blocked", self.store.is_blocked(t.id, s.id)).await
    }
}

#[async_trait]
impl RecipientApi for SocialGraphService {
    async fn resolve_recipients(
        &self,
        sender: &str,
        text: &str,
    ) -> Result<BTreeSet<Email>, GraphError> {
        let sender = self.resolve_user(sender).await?;

        let tokens = extract_mentions(text);

        let (friends, subscribers) = tokio::try_join!(
            self.call("list_friends", self.store.list_friends(sender.id)),
            self.call("list_subscribers", self.store.list_subscribers(sender.id)),
        )?;

        let mut mentioned = Vec::with_capacity(tokens.len());
        for token in tokens {
            match self
                .call("find_user_by_email", self.store.find_user_by_email(token))
                .await?
            {
                Some(user) => mentioned.push(user),
                None => debug!(token, "[fm-01] unresolved mention skipped"),
            }
        }

        let candidates = merge_candidates(&friends, &subscribers, &mentioned);

        let mut recipients = BTreeSet::new();
        let mut suppressed = 0usize;
        let mut via = [0usize; 3];
        for candidate in candidates.iter() {
            let blocked = self
                .call("is_blocked", self.store.is_blocked(candidate.user.id, sender.id))
                .await?;
            if blocked {
                suppressed += 1;
                continue;
            }
            for (slot, source) in via.iter_mut().zip([
                CandidateSource::Friend,
                CandidateSource::Subscriber,
                CandidateSource::Mention,
            ]) {
                if candidate.has_source(source) {
                    *slot += 1;
                }
            }
            recipients.insert(candidate.user.email.clone());
        }

        let [via_friend, via_subscription, via_mention] = via;
        info!(
            sender = %sender.id,
            friends = friends.len(),
            subscribers = subscribers.len(),
            mentions = mentioned.len(),
            suppressed,
            via_friend,
            via_subscription,
            via_mention,
            recipients = recipients.len(),
            "[fm-01] recipients resolved"
        );
        Ok(recipients)
    }
}

#[async_trait]
impl UserApi for SocialGraphService {
    async fn register_user(&self, email: &str, name: Option<&str>) -> Result<User, GraphError> {
        let user = self
            .call("create_user", self.store.create_user(email, name))
            .await
            .map_err(|e| {
                on_conflict(
                    e,
                    GraphError::UserAlreadyExists {
                        email: email.to_string(),
                    },
                )
            })?;

        info!(user_id = %user.id, "[fm-01] user registered");
        Ok(user)
    }

    async fn find_user(&self, email: &str) -> Result<User, GraphError> {
        self.resolve_user(email).await
    }
}
