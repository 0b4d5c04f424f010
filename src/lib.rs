//! Ledger Cache - A persistent TTL cache for a subscription tracker
//!
//! Caches API responses, images, exchange rates and computed statistics over
//! a pluggable key-value store, with size-bounded eviction, hit/miss
//! accounting and an HTTP admin surface.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod presets;
pub mod storage;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheEngine, SetOptions};
pub use config::{CacheConfig, Config};
pub use error::{CacheError, Result};
pub use presets::CachePresets;
pub use tasks::spawn_cleanup_task;
