// JSON persistence over a KeyValueStore.
//
// Purpose
// - Serialize arbitrary values to text under a key, and read them back.
//
// Responsibilities
// - `save` overwrites whatever was stored under the key.
// - `load` degrades absent or unparsable data to an empty sequence.
// - `load_checked` reports the same cases explicitly for callers that care.
//
// Boundaries
// - No caching. Every load reads the backend.

use crate::shared::infrastructure::key_value_store::{KeyValueStore, StoreError};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum Loaded {
    Missing,
    Malformed { reason: String },
    Found(Value),
}

impl Loaded {
    /// The stored value, or an empty array when nothing usable was stored.
    pub fn into_value_or_empty(self) -> Value {
        match self {
            Loaded::Found(value) => value,
            Loaded::Missing | Loaded::Malformed { .. } => Value::Array(Vec::new()),
        }
    }
}

pub struct PersistenceStore<TStore>
where
    TStore: KeyValueStore + ?Sized + 'static,
{
    backend: Arc<TStore>,
}

impl<TStore> Clone for PersistenceStore<TStore>
where
    TStore: KeyValueStore + ?Sized + 'static,
{
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
        }
    }
}

impl<TStore> PersistenceStore<TStore>
where
    TStore: KeyValueStore + ?Sized + 'static,
{
    pub fn new(backend: Arc<TStore>) -> Self {
        Self { backend }
    }

    pub async fn save<T>(&self, key: &str, value: &T) -> Result<(), StoreError>
    where
        T: Serialize + ?Sized + Sync,
    {
        let text = serde_json::to_string(value)?;
        self.backend.set_item(key, text).await
    }

    pub async fn load_checked(&self, key: &str) -> Result<Loaded, StoreError> {
        let Some(text) = self.backend.get_item(key).await? else {
            return Ok(Loaded::Missing);
        };
        if text.is_empty() {
            return Ok(Loaded::Missing);
        }
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Ok(Loaded::Found(value)),
            Err(err) => Ok(Loaded::Malformed {
                reason: err.to_string(),
            }),
        }
    }

    pub async fn load(&self, key: &str) -> Result<Value, StoreError> {
        let loaded = self.load_checked(key).await?;
        if let Loaded::Malformed { reason } = &loaded {
            tracing::warn!(key, %reason, "stored value is not valid JSON, treating as empty");
        }
        Ok(loaded.into_value_or_empty())
    }
}
