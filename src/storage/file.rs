//! File-backed store.
//!
//! The whole key space is kept in memory and flushed to a single JSON file on
//! every mutation. Flushes write a sibling temp file and rename it over the
//! target.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use super::KeyValueStore;
use crate::error::{CacheError, Result};

// == File Store ==
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    items: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    // == Open ==
    /// Opens the store at `path`, creating it lazily on first write.
    ///
    /// A missing file yields an empty store. An unreadable or malformed file
    /// is reported as [`CacheError::StorageRead`].
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let items = match fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                CacheError::StorageRead(format!("{} is corrupt: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(CacheError::StorageRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        };

        debug!("Opened file store at {} with {} keys", path.display(), items.len());

        Ok(Self {
            path,
            items: Mutex::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn flush(&self, items: &BTreeMap<String, String>) -> Result<()> {
        let bytes = serde_json::to_vec(items)?;
        let tmp = self.path.with_extension("tmp");

        fs::write(&tmp, &bytes)
            .await
            .map_err(|e| CacheError::StorageWrite(format!("{}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| CacheError::StorageWrite(format!("{}: {}", self.path.display(), e)))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get_string(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.lock().await.get(key).cloned())
    }

    async fn set_string(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.lock().await;
        let previous = items.insert(key.to_string(), value.to_string());

        if let Err(e) = self.flush(&items).await {
            // Keep memory in step with what is on disk.
            match previous {
                Some(old) => items.insert(key.to_string(), old),
                None => items.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.items.lock().await;
        let Some(previous) = items.remove(key) else {
            return Ok(());
        };

        if let Err(e) = self.flush(&items).await {
            items.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(())
    }

    async fn has_key(&self, key: &str) -> Result<bool> {
        Ok(self.items.lock().await.contains_key(key))
    }

    async fn enumerate_keys(&self) -> Result<Vec<String>> {
        Ok(self.items.lock().await.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let store = FileStore::open(&path).await.unwrap();

        assert_eq!(store.path(), path.as_path());
        assert!(store.enumerate_keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        {
            let store = FileStore::open(&path).await.unwrap();
            store.set_string("k1", "v1").await.unwrap();
            store.set_string("k2", "v2").await.unwrap();
            store.remove_item("k2").await.unwrap();
        }

        let reopened = FileStore::open(&path).await.unwrap();
        assert_eq!(reopened.get_string("k1").await.unwrap(), Some("v1".to_string()));
        assert!(!reopened.has_key("k2").await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, b"{not json").unwrap();

        let result = FileStore::open(&path).await;
        assert!(matches!(result, Err(CacheError::StorageRead(_))));
    }

    #[tokio::test]
    async fn test_failed_flush_rolls_back_memory() {
        let dir = tempfile::tempdir().unwrap();
        // Parent directory does not exist, so every flush fails.
        let path = dir.path().join("missing").join("store.json");
        let store = FileStore::open(&path).await.unwrap();

        let result = store.set_string("k", "v").await;
        assert!(matches!(result, Err(CacheError::StorageWrite(_))));
        assert!(!store.has_key("k").await.unwrap());
    }
}
