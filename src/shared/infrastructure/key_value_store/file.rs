// File backed implementation of the KeyValueStore port.
//
// Purpose
// - Durable device-local storage: one `<key>.json` file per key under a data directory.
//
// Responsibilities
// - Create the data directory on first write.
// - Replace values atomically: write a sibling temp file, then rename over the target.
// - Reject keys that could escape the data directory.

use crate::shared::infrastructure::key_value_store::{KeyValueStore, StoreError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn backend(context: &str, path: &Path, err: std::io::Error) -> StoreError {
    StoreError::Backend(format!("{context} {}: {err}", path.display()))
}

#[async_trait::async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(backend("failed to read", &path, err)),
        }
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|err| backend("failed to create", &self.dir, err))?;

        let tmp = self.dir.join(format!(".{key}.{}.tmp", Uuid::now_v7()));
        fs::write(&tmp, value.as_bytes())
            .await
            .map_err(|err| backend("failed to write", &tmp, err))?;
        if let Err(err) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(backend("failed to replace", &path, err));
        }
        tracing::debug!(key, path = %path.display(), "stored item");
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(backend("failed to remove", &path, err)),
        }
    }
}
