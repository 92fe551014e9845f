//! REST endpoints.
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | GET | `/`, `/health` | - |
//! | GET | `/metrics` | - |
//! | POST | `/user/create` | `{email, name?}` |
//! | POST | `/friend/create` | `{friends: [a, b]}` |
//! | POST | `/friend/list` | `{email}` |
//! | POST | `/friend/common` | `{friends: [a, b]}` |
//! | POST | `/friend/subscribe` | `{requestor, target}` |
//! | POST | `/friend/unsubscribe` | `{requestor, target}` |
//! | POST | `/friend/block` | `{requestor, target}` |
//! | POST | `/friend/recipients` | `{sender, text}` |

pub mod handlers;

use crate::middleware::{GatewayMetrics, RequestValidator};
use axum::{
    routing::{get, post},
    Router,
};
use fm_01_social_graph::{FriendshipApi, RecipientApi, SubscriptionApi, UserApi};
use std::sync::Arc;

/// Every inbound port of the social graph behind one object.
pub trait SocialGraph: FriendshipApi + SubscriptionApi + RecipientApi + UserApi {}

impl<T> SocialGraph for T where T: FriendshipApi + SubscriptionApi + RecipientApi + UserApi {}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub graph: Arc<dyn SocialGraph>,
    pub validator: RequestValidator,
    pub metrics: Arc<GatewayMetrics>,
}

/// Route table without middleware or state
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::health))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .route("/user/create", post(handlers::create_user))
        .route("/friend/create", post(handlers::create_friendship))
        .route("/friend/list", post(handlers::list_friends))
        .route("/friend/common", post(handlers::common_friends))
        .route("/friend/subscribe", post(handlers::subscribe))
        .route("/friend/unsubscribe", post(handlers::unsubscribe))
        .route("/friend/block", post(handlers::block))
        .route("/friend/recipients", post(handlers::recipients))
}
