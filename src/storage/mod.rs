//! Storage Module
//!
//! Abstraction over the persistent string key/value store the cache sits on,
//! plus an in-memory and a file-backed implementation.

mod file;
mod memory;

use async_trait::async_trait;

use crate::error::Result;

pub use file::FileStore;
pub use memory::MemoryStore;

// == Key Value Store ==
/// Persistent string key/value store consumed by the cache engine.
///
/// Implementations must be safe to share across tasks. Every call may fail;
/// the engine treats failures as a degraded cache, never as fatal.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    async fn get_string(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set_string(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn remove_item(&self, key: &str) -> Result<()>;

    /// Returns whether `key` is present.
    async fn has_key(&self, key: &str) -> Result<bool>;

    /// Returns every key currently in the store, in no particular order.
    async fn enumerate_keys(&self) -> Result<Vec<String>>;
}
