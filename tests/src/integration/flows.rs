//! # Integration Test Flows
//!
//! Drives the full node through its HTTP surface:
//!
//! 1. **Friends**: create, list, common friends
//! 2. **Subscriptions and blocks**: subscribe, block, unsubscribe
//! 3. **Recipients**: friends ∪ subscribers ∪ mentions, minus blockers
//! 4. **Errors**: every failure is an envelope with the mapped status

#[cfg(test)]
mod tests {
    use crate::integration::support::{memory_node, post, register, send};
    use axum::body::Body;
    use axum::http::StatusCode;
    use node_runtime::{NodeConfig, SubsystemContainer};
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    // =========================================================================
    // FRIENDS
    // =========================================================================

    #[tokio::test]
    async fn test_friend_lifecycle() {
        let node = memory_node();
        let router = node.api_gateway.router();
        register(
            &router,
            &["andy@example.com", "john@example.com", "common@example.com"],
        )
        .await;

        let (status, envelope) = post(
            &router,
            "/friend/create",
            json!({"friends": ["andy@example.com", "john@example.com"]}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(envelope, json!({"success": true}));

        for friend in ["andy@example.com", "john@example.com"] {
            post(
                &router,
                "/friend/create",
                json!({"friends": [friend, "common@example.com"]}),
            )
            .await;
        }

        let (_, envelope) = post(&router, "/friend/list", json!({"email": "andy@example.com"})).await;
        assert_eq!(
            envelope,
            json!({
                "success": true,
                "data": {"friends": ["common@example.com", "john@example.com"], "count": 2}
            })
        );

        let (_, envelope) = post(
            &router,
            "/friend/common",
            json!({"friends": ["andy@example.com", "john@example.com"]}),
        )
        .await;
        assert_eq!(envelope["data"]["friends"], json!(["common@example.com"]));
        assert_eq!(envelope["data"]["count"], 1);
    }

    #[tokio::test]
    async fn test_common_friends_is_symmetric_and_empty_without_overlap() {
        let node = memory_node();
        let router = node.api_gateway.router();
        register(&router, &["a@example.com", "b@example.com", "c@example.com"]).await;
        post(
            &router,
            "/friend/create",
            json!({"friends": ["a@example.com", "c@example.com"]}),
        )
        .await;

        for pair in [
            ["a@example.com", "b@example.com"],
            ["b@example.com", "a@example.com"],
        ] {
            let (status, envelope) =
                post(&router, "/friend/common", json!({ "friends": pair })).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(envelope["data"]["friends"], json!([]));
            assert_eq!(envelope["data"]["count"], 0);
        }
    }

    // =========================================================================
    // SUBSCRIPTIONS AND BLOCKS
    // =========================================================================

    #[tokio::test]
    async fn test_block_between_friends_drops_subscription() {
        let node = memory_node();
        let router = node.api_gateway.router();
        register(&router, &["lisa@example.com", "john@example.com"]).await;

        let relation = json!({"requestor": "lisa@example.com", "target": "john@example.com"});
        post(
            &router,
            "/friend/create",
            json!({"friends": ["lisa@example.com", "john@example.com"]}),
        )
        .await;
        post(&router, "/friend/subscribe", relation.clone()).await;

        let (status, _) = post(&router, "/friend/block", relation.clone()).await;
        assert_eq!(status, StatusCode::OK);

        let (status, envelope) = post(&router, "/friend/unsubscribe", relation).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(envelope["success"], false);
    }

    #[tokio::test]
    async fn test_block_between_strangers_keeps_subscription() {
        let node = memory_node();
        let router = node.api_gateway.router();
        register(&router, &["lisa@example.com", "john@example.com"]).await;

        let relation = json!({"requestor": "lisa@example.com", "target": "john@example.com"});
        post(&router, "/friend/subscribe", relation.clone()).await;
        let (status, _) = post(&router, "/friend/block", relation.clone()).await;
        assert_eq!(status, StatusCode::OK);

        // still blocked out of john's recipients
        let (_, envelope) = post(
            &router,
            "/friend/recipients",
            json!({"sender": "john@example.com", "text": "hi"}),
        )
        .await;
        assert_eq!(envelope["data"]["recipients"], json!([]));

        let (status, _) = post(&router, "/friend/unsubscribe", relation).await;
        assert_eq!(status, StatusCode::OK);
    }

    // =========================================================================
    // RECIPIENTS
    // =========================================================================

    #[tokio::test]
    async fn test_recipients_union_minus_blockers() {
        let node = memory_node();
        let router = node.api_gateway.router();
        register(
            &router,
            &[
                "john@example.com",
                "jane@example.com",
                "lisa@example.com",
                "kate@example.com",
                "bob@example.com",
            ],
        )
        .await;

        post(
            &router,
            "/friend/create",
            json!({"friends": ["john@example.com", "jane@example.com"]}),
        )
        .await;
        post(
            &router,
            "/friend/create",
            json!({"friends": ["john@example.com", "bob@example.com"]}),
        )
        .await;
        post(
            &router,
            "/friend/subscribe",
            json!({"requestor": "lisa@example.com", "target": "john@example.com"}),
        )
        .await;
        // jane is both a friend and a subscriber
        post(
            &router,
            "/friend/subscribe",
            json!({"requestor": "jane@example.com", "target": "john@example.com"}),
        )
        .await;
        post(
            &router,
            "/friend/block",
            json!({"requestor": "bob@example.com", "target": "john@example.com"}),
        )
        .await;

        let (status, envelope) = post(
            &router,
            "/friend/recipients",
            json!({
                "sender": "john@example.com",
                "text": "Hello World! kate@example.com ghost@example.com"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            envelope,
            json!({
                "success": true,
                "data": {"recipients": ["jane@example.com", "kate@example.com", "lisa@example.com"]}
            })
        );
    }

    #[tokio::test]
    async fn test_recipients_for_unknown_sender_is_not_found() {
        let node = memory_node();
        let router = node.api_gateway.router();
        let (status, envelope) = post(
            &router,
            "/friend/recipients",
            json!({"sender": "nobody@example.com", "text": "hi"}),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(envelope["error_message"], "user not found: nobody@example.com");
    }

    // =========================================================================
    // ERRORS
    // =========================================================================

    #[tokio::test]
    async fn test_error_statuses() {
        let node = memory_node();
        let router = node.api_gateway.router();
        register(&router, &["john@example.com", "jane@example.com"]).await;
        let pair = json!({"friends": ["john@example.com", "jane@example.com"]});

        let cases = [
            ("/friend/create", json!({"friends": ["john@example.com"]}), StatusCode::BAD_REQUEST),
            ("/friend/create", json!({"friends": []}), StatusCode::BAD_REQUEST),
            ("/friend/list", json!({"email": ""}), StatusCode::BAD_REQUEST),
            ("/friend/list", json!({"mail": "john@example.com"}), StatusCode::BAD_REQUEST),
            ("/friend/list", json!({"email": "ghost@example.com"}), StatusCode::NOT_FOUND),
            ("/friend/create", pair.clone(), StatusCode::OK),
            ("/friend/create", pair, StatusCode::CONFLICT),
            ("/user/create", json!({"email": "john@example.com"}), StatusCode::CONFLICT),
        ];

        for (uri, body, expected) in cases {
            let (status, envelope) = post(&router, uri, body.clone()).await;
            assert_eq!(status, expected, "{} {}", uri, body);
            assert_eq!(envelope["success"], expected == StatusCode::OK);
            if expected != StatusCode::OK {
                assert!(envelope["error_message"].is_string());
                assert!(envelope.get("data").is_none());
            }
        }
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let mut config = NodeConfig::default();
        config.gateway.limits.max_request_size = 128;
        let node = SubsystemContainer::in_memory(config).unwrap();
        let router = node.api_gateway.router();

        let text = "x".repeat(512);
        let body = json!({"sender": "john@example.com", "text": text}).to_string();
        let (status, envelope) = send(&router, "/friend/recipients", Body::from(body)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(envelope["success"], false);
    }

    // =========================================================================
    // LIVE SERVER
    // =========================================================================

    #[tokio::test]
    async fn test_root_over_tcp() {
        let node = memory_node();
        let gateway = std::sync::Arc::clone(&node.api_gateway);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();

        let server = tokio::spawn(async move {
            gateway
                .serve(listener, async move {
                    let _ = stop_rx.await;
                })
                .await
        });

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut raw = String::new();
        stream.read_to_string(&mut raw).await.unwrap();

        assert!(raw.starts_with("HTTP/1.1 200 OK"), "{}", raw);
        assert!(raw.contains(r#"{"success":true,"data":"OK"}"#), "{}", raw);

        stop_tx.send(()).unwrap();
        assert!(server.await.unwrap().is_ok());
    }
}
