//! # RocksDB Graph Store
//!
//! Persistent implementation of the fm-01 `GraphStore` port.
//!
//! ## Column Families
//!
//! | Family | Key | Value |
//! |--------|-----|-------|
//! | `users` | id (u64 BE) | bincode `StoredUser` |
//! | `emails` | email bytes | id (u64 BE) |
//! | `friends` | id ‖ id, written in both directions | empty |
//! | `subscribers` | target ‖ requestor | empty |
//! | `blocks` | requestor ‖ target | empty |
//! | `metadata` | `next_user_id` | u64 BE |
//!
//! Ids are big-endian so a prefix scan over one id yields that user's
//! relations in id order.
//!
//! ## Atomicity
//!
//! Every insert-if-absent takes the write half of the handle lock, checks
//! the key, then commits its rows in one `WriteBatch`.

use async_trait::async_trait;
use fm_01_social_graph::{GraphStore, StoreError};
use parking_lot::RwLock;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, Direction, IteratorMode, Options, WriteBatch, DB};
use serde::{Deserialize, Serialize};
use shared_types::{User, UserId};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

pub const CF_USERS: &str = "users";
pub const CF_EMAILS: &str = "emails";
pub const CF_FRIENDS: &str = "friends";
pub const CF_SUBSCRIBERS: &str = "subscribers";
pub const CF_BLOCKS: &str = "blocks";
pub const CF_METADATA: &str = "metadata";

/// All column families opened by the store
pub const COLUMN_FAMILIES: &[&str] = &[
    CF_USERS,
    CF_EMAILS,
    CF_FRIENDS,
    CF_SUBSCRIBERS,
    CF_BLOCKS,
    CF_METADATA,
];

const NEXT_USER_ID: &[u8] = b"next_user_id";

/// RocksDB tuning
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the database directory
    pub path: PathBuf,
    /// Block cache size in bytes (default: 64MB)
    pub block_cache_size: usize,
    /// Write buffer size in bytes (default: 16MB)
    pub write_buffer_size: usize,
    /// Enable fsync after each write (default: true)
    pub sync_writes: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/graph"),
            block_cache_size: 64 * 1024 * 1024,
            write_buffer_size: 16 * 1024 * 1024,
            sync_writes: true,
        }
    }
}

impl RocksDbConfig {
    /// Smaller buffers and no fsync
    pub fn for_testing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 8 * 1024 * 1024,
            write_buffer_size: 4 * 1024 * 1024,
            sync_writes: false,
        }
    }
}

/// On-disk user record. The id lives in the key.
#[derive(Serialize, Deserialize)]
struct StoredUser {
    email: String,
    name: Option<String>,
}

fn backend(context: &str, e: rocksdb::Error) -> StoreError {
    StoreError::Backend(format!("RocksDB {} failed: {}", context, e))
}

fn pair_key(first: UserId, second: UserId) -> [u8; 16] {
    let mut key = [0u8; 16];
    key[..8].copy_from_slice(&first.to_be_bytes());
    key[8..].copy_from_slice(&second.to_be_bytes());
    key
}

fn decode_id(bytes: &[u8]) -> Result<UserId, StoreError> {
    let raw: [u8; 8] = bytes
        .try_into()
        .map_err(|_| StoreError::Serialization(format!("id of {} bytes", bytes.len())))?;
    Ok(UserId::from_be_bytes(raw))
}

/// RocksDB-backed `GraphStore`
pub struct RocksDbGraphStore {
    db: Arc<RwLock<DB>>,
    config: RocksDbConfig,
}

impl RocksDbGraphStore {
    /// Open or create the database
    pub fn open(config: RocksDbConfig) -> Result<Self, StoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_compression_type(rocksdb::DBCompressionType::Snappy);

        let mut block_opts = rocksdb::BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&rocksdb::Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let cf_descriptors: Vec<ColumnFamilyDescriptor> = COLUMN_FAMILIES
            .iter()
            .map(|name| {
                let mut cf_opts = Options::default();
                cf_opts.set_compression_type(rocksdb::DBCompressionType::Snappy);
                ColumnFamilyDescriptor::new(*name, cf_opts)
            })
            .collect();

        let db = DB::open_cf_descriptors(&opts, &config.path, cf_descriptors)
            .map_err(|e| backend("open", e))?;
        info!(path = %config.path.display(), "[fm-01] RocksDB graph store opened");

        Ok(Self {
            db: Arc::new(RwLock::new(db)),
            config,
        })
    }

    fn cf<'a>(db: &'a DB, name: &str) -> Result<&'a ColumnFamily, StoreError> {
        db.cf_handle(name)
            .ok_or_else(|| StoreError::Backend(format!("missing column family {}", name)))
    }

    fn write(&self, db: &DB, batch: WriteBatch) -> Result<(), StoreError> {
        let mut write_opts = rocksdb::WriteOptions::default();
        write_opts.set_sync(self.config.sync_writes);
        db.write_opt(batch, &write_opts)
            .map_err(|e| backend("batch write", e))
    }

    fn exists(db: &DB, cf: &str, key: &[u8]) -> Result<bool, StoreError> {
        db.get_pinned_cf(Self::cf(db, cf)?, key)
            .map(|v| v.is_some())
            .map_err(|e| backend("get", e))
    }

    fn get_user(db: &DB, id: UserId) -> Result<Option<User>, StoreError> {
        let Some(bytes) = db
            .get_pinned_cf(Self::cf(db, CF_USERS)?, id.to_be_bytes())
            .map_err(|e| backend("get", e))?
        else {
            return Ok(None);
        };
        let stored: StoredUser =
            bincode::deserialize(&bytes).map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(Some(User {
            id,
            email: stored.email,
            name: stored.name,
        }))
    }

    fn ensure_known(db: &DB, ids: &[UserId]) -> Result<(), StoreError> {
        for id in ids {
            if !Self::exists(db, CF_USERS, &id.to_be_bytes())? {
                return Err(StoreError::NotFound);
            }
        }
        Ok(())
    }

    /// Second halves of every `owner ‖ other` key in `cf`, resolved to users
    /// and sorted by email.
    fn related_users(db: &DB, cf: &str, owner: UserId) -> Result<Vec<User>, StoreError> {
        let prefix = owner.to_be_bytes();
        let iter = db.iterator_cf(
            Self::cf(db, cf)?,
            IteratorMode::From(&prefix, Direction::Forward),
        );

        let mut users = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| backend("scan", e))?;
            if !key.starts_with(&prefix) {
                break;
            }
            let other = decode_id(&key[8..])?;
            if let Some(user) = Self::get_user(db, other)? {
                users.push(user);
            }
        }
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }
}

#[async_trait]
impl GraphStore for RocksDbGraphStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let db = self.db.read();
        let Some(id) = db
            .get_pinned_cf(Self::cf(&db, CF_EMAILS)?, email.as_bytes())
            .map_err(|e| backend("get", e))?
        else {
            return Ok(None);
        };
        let id = decode_id(&id)?;
        Self::get_user(&db, id)
    }

    async fn create_user(&self, email: &str, name: Option<&str>) -> Result<User, StoreError> {
        let db = self.db.write();
        if Self::exists(&db, CF_EMAILS, email.as_bytes())? {
            return Err(StoreError::AlreadyExists);
        }

        let meta = Self::cf(&db, CF_METADATA)?;
        let last = match db.get_pinned_cf(meta, NEXT_USER_ID).map_err(|e| backend("get", e))? {
            Some(bytes) => decode_id(&bytes)?.0,
            None => 0,
        };
        let id = UserId(last + 1);

        let stored = StoredUser {
            email: email.to_string(),
            name: name.map(str::to_string),
        };
        let value =
            bincode::serialize(&stored).map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut batch = WriteBatch::default();
        batch.put_cf(Self::cf(&db, CF_USERS)?, id.to_be_bytes(), value);
        batch.put_cf(Self::cf(&db, CF_EMAILS)?, email.as_bytes(), id.to_be_bytes());
        batch.put_cf(meta, NEXT_USER_ID, id.to_be_bytes());
        self.write(&db, batch)?;

        debug!(user_id = %id, "[fm-01] user persisted");
        Ok(User {
            id,
            email: stored.email,
            name: stored.name,
        })
    }

    async fn list_friends(&self, user: UserId) -> Result<Vec<User>, StoreError> {
        let db = self.db.read();
        Self::related_users(&db, CF_FRIENDS, user)
    }

    async fn list_subscribers(&self, user: UserId) -> Result<Vec<User>, StoreError> {
        let db = self.db.read();
        Self::related_users(&db, CF_SUBSCRIBERS, user)
    }

    async fn are_friends(&self, a: UserId, b: UserId) -> Result<bool, StoreError> {
        let db = self.db.read();
        Self::exists(&db, CF_FRIENDS, &pair_key(a, b))
    }

    async fn is_blocked(&self, target: UserId, sender: UserId) -> Result<bool, StoreError> {
        let db = self.db.read();
        Self::exists(&db, CF_BLOCKS, &pair_key(target, sender))
    }

    async fn create_friendship(&self, a: UserId, b: UserId) -> Result<(), StoreError> {
        let db = self.db.write();
        Self::ensure_known(&db, &[a, b])?;
        if Self::exists(&db, CF_FRIENDS, &pair_key(a, b))? {
            return Err(StoreError::AlreadyExists);
        }

        let friends = Self::cf(&db, CF_FRIENDS)?;
        let mut batch = WriteBatch::default();
        batch.put_cf(friends, pair_key(a, b), b"");
        batch.put_cf(friends, pair_key(b, a), b"");
        self.write(&db, batch)
    }

    async fn create_subscription(
        &self,
        requestor: UserId,
        target: UserId,
    ) -> Result<(), StoreError> {
        let db = self.db.write();
        Self::ensure_known(&db, &[requestor, target])?;
        let key = pair_key(target, requestor);
        if Self::exists(&db, CF_SUBSCRIBERS, &key)? {
            return Err(StoreError::AlreadyExists);
        }

        let mut batch = WriteBatch::default();
        batch.put_cf(Self::cf(&db, CF_SUBSCRIBERS)?, key, b"");
        self.write(&db, batch)
    }

    async fn create_block(&self, requestor: UserId, target: UserId) -> Result<bool, StoreError> {
        let db = self.db.write();
        Self::ensure_known(&db, &[requestor, target])?;
        let block_key = pair_key(requestor, target);
        if Self::exists(&db, CF_BLOCKS, &block_key)? {
            return Err(StoreError::AlreadyExists);
        }

        // friendship is read under the same write lock as the batch below
        let friends = Self::exists(&db, CF_FRIENDS, &pair_key(requestor, target))?;
        let subscription_key = pair_key(target, requestor);
        let removed = friends && Self::exists(&db, CF_SUBSCRIBERS, &subscription_key)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(Self::cf(&db, CF_BLOCKS)?, block_key, b"");
        if removed {
            batch.delete_cf(Self::cf(&db, CF_SUBSCRIBERS)?, subscription_key);
        }
        self.write(&db, batch)?;
        Ok(removed)
    }

    async fn delete_subscription(
        &self,
        requestor: UserId,
        target: UserId,
    ) -> Result<bool, StoreError> {
        let db = self.db.write();
        let key = pair_key(target, requestor);
        if !Self::exists(&db, CF_SUBSCRIBERS, &key)? {
            return Ok(false);
        }

        let mut batch = WriteBatch::default();
        batch.delete_cf(Self::cf(&db, CF_SUBSCRIBERS)?, key);
        self.write(&db, batch)?;
        Ok(true)
    }
}
