//! # Concurrency Flows
//!
//! Racing requests against one node must never produce duplicate relations.

#[cfg(test)]
mod tests {
    use crate::integration::support::{memory_node, post, register};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_friend_requests_create_one_friendship() {
        let node = memory_node();
        let router = node.api_gateway.router();
        register(&router, &["a@example.com", "b@example.com"]).await;

        let mut handles = Vec::new();
        for i in 0..32 {
            let router = router.clone();
            let pair = if i % 2 == 0 {
                ["a@example.com", "b@example.com"]
            } else {
                ["b@example.com", "a@example.com"]
            };
            handles.push(tokio::spawn(async move {
                post(&router, "/friend/create", json!({ "friends": pair })).await.0
            }));
        }

        let mut created = 0;
        let mut conflicts = 0;
        for handle in handles {
            let status = handle.await.unwrap();
            if status == StatusCode::OK {
                created += 1;
            } else if status == StatusCode::CONFLICT {
                conflicts += 1;
            } else {
                panic!("unexpected status {}", status);
            }
        }
        assert_eq!(created, 1);
        assert_eq!(conflicts, 31);

        let (_, envelope) = post(&router, "/friend/list", json!({"email": "a@example.com"})).await;
        assert_eq!(envelope["data"]["count"], 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_subscriptions_and_blocks() {
        let node = memory_node();
        let router = node.api_gateway.router();
        register(&router, &["lisa@example.com", "john@example.com"]).await;
        let relation = json!({"requestor": "lisa@example.com", "target": "john@example.com"});

        let mut handles = Vec::new();
        for uri in ["/friend/subscribe", "/friend/block"] {
            for _ in 0..8 {
                let router = router.clone();
                let relation = relation.clone();
                handles.push(tokio::spawn(async move {
                    (uri, post(&router, uri, relation).await.0)
                }));
            }
        }

        let mut successes = std::collections::HashMap::new();
        for handle in handles {
            let (uri, status) = handle.await.unwrap();
            assert!(
                status == StatusCode::OK || status == StatusCode::CONFLICT,
                "{} returned {}",
                uri,
                status
            );
            if status == StatusCode::OK {
                *successes.entry(uri).or_insert(0) += 1;
            }
        }
        assert_eq!(successes.get("/friend/subscribe"), Some(&1));
        assert_eq!(successes.get("/friend/block"), Some(&1));
    }
}
