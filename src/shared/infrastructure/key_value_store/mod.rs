// Port for durable key-value storage of text values.
//
// Purpose
// - Describe the storage capability the persistence store needs, without implementing it.
//
// Boundaries
// - Values are opaque strings here. Serialization lives in the persistence store.
// - Writes are assumed atomic per key; there is no multi-key transaction.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set_item(&self, key: &str, value: String) -> Result<(), StoreError>;
    async fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

pub mod file;
pub mod in_memory;
