//! Shared fixtures for the integration flows.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use node_runtime::{NodeConfig, SubsystemContainer};
use serde_json::Value;
use tower::ServiceExt;

/// In-memory node with default configuration.
pub fn memory_node() -> SubsystemContainer {
    SubsystemContainer::in_memory(NodeConfig::default()).expect("default config is valid")
}

/// POST a JSON body and decode the envelope.
pub async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(router, uri, Body::from(body.to_string())).await
}

/// POST raw bytes and decode the envelope.
pub async fn send(router: &Router, uri: &str, body: Body) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(body)
                .expect("valid request"),
        )
        .await
        .expect("router is infallible");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let envelope = serde_json::from_slice(&bytes).expect("envelope is JSON");
    (status, envelope)
}

/// Register each email through `/user/create`.
pub async fn register(router: &Router, emails: &[&str]) {
    for email in emails {
        let (status, _) = post(router, "/user/create", serde_json::json!({ "email": email })).await;
        assert_eq!(status, StatusCode::OK, "registering {}", email);
    }
}
