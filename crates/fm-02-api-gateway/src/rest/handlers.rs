//! Request handlers.
//!
//! Each handler decodes its JSON body, runs the `RequestValidator` from
//! state, calls one social graph operation and wraps the result in the
//! envelope.

use super::AppState;
use crate::domain::error::{ApiError, ApiResult};
use crate::domain::types::{
    CreateUserRequest, EmailRequest, Envelope, FriendListResponse, FriendsRequest,
    RecipientsRequest, RecipientsResponse, RelationRequest, UserResponse,
};
use axum::{extract::State, Json};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::debug;

type Reply<T> = ApiResult<Json<Envelope<T>>>;

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "[fm-02] undecodable body");
        ApiError::bad_request(format!("invalid request body: {}", e))
    })
}

pub async fn health() -> Json<Envelope<&'static str>> {
    Json(Envelope::ok("OK"))
}

pub async fn metrics(State(state): State<AppState>) -> Json<Envelope<serde_json::Value>> {
    Json(Envelope::ok(state.metrics.to_json()))
}

pub async fn create_user(State(state): State<AppState>, body: Bytes) -> Reply<UserResponse> {
    let req: CreateUserRequest = decode(&body)?;
    state.validator.email("email", &req.email)?;

    let user = state
        .graph
        .register_user(&req.email, req.name.as_deref())
        .await?;
    state.metrics.record_relation_created();
    Ok(Json(Envelope::ok(user.into())))
}

pub async fn create_friendship(State(state): State<AppState>, body: Bytes) -> Reply<()> {
    let req: FriendsRequest = decode(&body)?;
    let (a, b) = state.validator.friend_pair(&req.friends)?;

    state.graph.create_friendship(a, b).await?;
    state.metrics.record_relation_created();
    Ok(Json(Envelope::done()))
}

pub async fn list_friends(
    State(state): State<AppState>,
    body: Bytes,
) -> Reply<FriendListResponse> {
    let req: EmailRequest = decode(&body)?;
    state.validator.email("email", &req.email)?;

    let mut friends = state.graph.list_friends(&req.email).await?;
    friends.sort();
    Ok(Json(Envelope::ok(FriendListResponse::new(friends))))
}

pub async fn common_friends(
    State(state): State<AppState>,
    body: Bytes,
) -> Reply<FriendListResponse> {
    let req: FriendsRequest = decode(&body)?;
    let (a, b) = state.validator.friend_pair(&req.friends)?;

    let common = state.graph.list_common_friends(a, b).await?;
    Ok(Json(Envelope::ok(FriendListResponse::new(common))))
}

pub async fn subscribe(State(state): State<AppState>, body: Bytes) -> Reply<()> {
    let req: RelationRequest = decode(&body)?;
    state.validator.relation(&req)?;

    state.graph.subscribe(&req.requestor, &req.target).await?;
    state.metrics.record_relation_created();
    Ok(Json(Envelope::done()))
}

pub async fn unsubscribe(State(state): State<AppState>, body: Bytes) -> Reply<()> {
    let req: RelationRequest = decode(&body)?;
    state.validator.relation(&req)?;

    state.graph.unsubscribe(&req.requestor, &req.target).await?;
    Ok(Json(Envelope::done()))
}

pub async fn block(State(state): State<AppState>, body: Bytes) -> Reply<()> {
    let req: RelationRequest = decode(&body)?;
    state.validator.relation(&req)?;

    state.graph.block(&req.requestor, &req.target).await?;
    state.metrics.record_relation_created();
    Ok(Json(Envelope::done()))
}

pub async fn recipients(State(state): State<AppState>, body: Bytes) -> Reply<RecipientsResponse> {
    let req: RecipientsRequest = decode(&body)?;
    state.validator.email("sender", &req.sender)?;
    state.validator.text(&req.text)?;

    let recipients = state.graph.resolve_recipients(&req.sender, &req.text).await?;
    Ok(Json(Envelope::ok(RecipientsResponse {
        recipients: recipients.into_iter().collect(),
    })))
}
