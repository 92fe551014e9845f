//! # Persistence Flows
//!
//! Relations written through the HTTP surface survive a node restart on
//! the RocksDB backend.

#[cfg(all(test, feature = "rocksdb"))]
mod tests {
    use crate::integration::support::{post, register};
    use node_runtime::{NodeConfig, StorageBackend, SubsystemContainer};
    use serde_json::json;
    use tempfile::TempDir;

    fn rocksdb_config(dir: &TempDir) -> NodeConfig {
        let mut config = NodeConfig::default();
        config.storage.backend = StorageBackend::RocksDb;
        config.storage.data_dir = dir.path().to_path_buf();
        config.storage.sync_writes = false;
        config.storage.min_disk_space_percent = 0;
        config
    }

    #[tokio::test]
    async fn test_relations_survive_restart() {
        let dir = TempDir::new().unwrap();

        {
            let node = SubsystemContainer::new(rocksdb_config(&dir)).unwrap();
            let router = node.api_gateway.router();
            register(&router, &["john@example.com", "jane@example.com", "lisa@example.com"]).await;
            post(
                &router,
                "/friend/create",
                json!({"friends": ["john@example.com", "jane@example.com"]}),
            )
            .await;
            post(
                &router,
                "/friend/subscribe",
                json!({"requestor": "lisa@example.com", "target": "john@example.com"}),
            )
            .await;
            post(
                &router,
                "/friend/block",
                json!({"requestor": "jane@example.com", "target": "john@example.com"}),
            )
            .await;
        }

        let node = SubsystemContainer::new(rocksdb_config(&dir)).unwrap();
        let router = node.api_gateway.router();

        let (_, envelope) = post(&router, "/friend/list", json!({"email": "jane@example.com"})).await;
        assert_eq!(envelope["data"]["friends"], json!(["john@example.com"]));

        let (_, envelope) = post(
            &router,
            "/friend/recipients",
            json!({"sender": "john@example.com", "text": ""}),
        )
        .await;
        assert_eq!(envelope["data"]["recipients"], json!(["lisa@example.com"]));
    }
}
