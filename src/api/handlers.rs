//! API Handlers
//!
//! HTTP request handlers for each admin endpoint. The engine never fails
//! loudly, so handlers turn its `false`/`None` results into `CacheError`s.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, warn};

use crate::cache::{CacheEngine, CacheExport, CacheInfo, SetOptions};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    validate_key, ConfigRequest, CountResponse, EntryResponse, HealthResponse, MessageResponse,
    SetEntryRequest, SettingsResponse,
};
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache engine; it serializes its own bookkeeping
    pub cache: Arc<CacheEngine>,
}

impl AppState {
    /// Creates a new AppState around an opened engine.
    pub fn new(cache: Arc<CacheEngine>) -> Self {
        Self { cache }
    }

    /// Opens the engine described by `config`.
    ///
    /// Uses the file store at `config.storage_path`; if that file cannot be
    /// loaded the cache runs on an in-memory store instead.
    pub async fn from_config(config: &Config) -> Self {
        let store: Arc<dyn KeyValueStore> = match FileStore::open(&config.storage_path).await {
            Ok(store) => {
                info!("Using file store at {}", store.path().display());
                Arc::new(store)
            }
            Err(e) => {
                warn!(
                    "Cannot open {} ({}), falling back to in-memory store",
                    config.storage_path.display(),
                    e
                );
                Arc::new(MemoryStore::new())
            }
        };

        let engine = CacheEngine::open(store, config.cache.clone()).await;
        Self::new(Arc::new(engine))
    }
}

fn check_key(key: &str) -> Result<()> {
    match validate_key(key) {
        Some(msg) => Err(CacheError::InvalidRequest(msg)),
        None => Ok(()),
    }
}

/// Handler for GET /entries/:key
pub async fn get_entry_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<EntryResponse>> {
    check_key(&key)?;

    match state.cache.get::<serde_json::Value>(&key).await {
        Some(value) => Ok(Json(EntryResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for PUT /entries/:key
///
/// Stores the JSON value with an optional TTL in milliseconds.
pub async fn set_entry_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<SetEntryRequest>,
) -> Result<Json<MessageResponse>> {
    check_key(&key)?;
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let options = SetOptions {
        ttl: req.ttl_ms.map(Duration::from_millis),
    };
    if state.cache.set(&key, &req.value, options).await {
        return Ok(Json(MessageResponse::stored(key)));
    }

    if state.cache.settings().await.enabled {
        Err(CacheError::StorageWrite(format!("Failed to store '{}'", key)))
    } else {
        Err(CacheError::InvalidRequest("Cache is disabled".to_string()))
    }
}

/// Handler for DELETE /entries/:key
pub async fn remove_entry_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<MessageResponse>> {
    check_key(&key)?;

    if state.cache.remove(&key).await {
        Ok(Json(MessageResponse::removed(key)))
    } else {
        Err(CacheError::NotFound(key))
    }
}

/// Handler for DELETE /entries
///
/// Removes every entry and resets the counters.
pub async fn clear_all_handler(State(state): State<AppState>) -> Result<Json<CountResponse>> {
    let before = state.cache.metadata().await.total_entries;
    if state.cache.clear_all().await {
        Ok(Json(CountResponse::new("Cache cleared", before)))
    } else {
        Err(CacheError::StorageWrite("Failed to clear cache".to_string()))
    }
}

/// Handler for DELETE /prefixes/:prefix
pub async fn clear_prefix_handler(
    State(state): State<AppState>,
    Path(prefix): Path<String>,
) -> Result<Json<CountResponse>> {
    if prefix.is_empty() {
        return Err(CacheError::InvalidRequest("Prefix cannot be empty".to_string()));
    }

    let removed = state.cache.clear_by_prefix(&prefix).await;
    Ok(Json(CountResponse::new(
        format!("Removed entries matching '{}'", prefix),
        removed,
    )))
}

/// Handler for POST /cleanup
///
/// Runs an expiry sweep immediately instead of waiting for the background task.
pub async fn cleanup_handler(State(state): State<AppState>) -> Json<CountResponse> {
    let removed = state.cache.cleanup_expired().await;
    Json(CountResponse::new("Expired entries removed", removed))
}

/// Handler for PUT /config
///
/// Applies the settings present in the body and returns the resulting ones.
pub async fn config_handler(
    State(state): State<AppState>,
    Json(req): Json<ConfigRequest>,
) -> Result<Json<SettingsResponse>> {
    if req.is_empty() {
        return Err(CacheError::InvalidRequest("No settings provided".to_string()));
    }
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    if let Some(enabled) = req.enabled {
        state.cache.set_enabled(enabled).await;
    }
    if let Some(ttl_ms) = req.ttl_ms {
        state.cache.set_ttl(Duration::from_millis(ttl_ms)).await;
    }
    if let Some(max_size) = req.max_size {
        state.cache.set_max_size(max_size).await;
    }
    if let Some(single_flight) = req.single_flight {
        state.cache.set_single_flight(single_flight).await;
    }

    Ok(Json(state.cache.settings().await.into()))
}

/// Handler for GET /info
pub async fn info_handler(State(state): State<AppState>) -> Json<CacheInfo> {
    Json(state.cache.get_cache_info().await)
}

/// Handler for GET /export
pub async fn export_handler(State(state): State<AppState>) -> Json<CacheExport> {
    Json(state.cache.export_cache().await)
}

/// Handler for POST /import
pub async fn import_handler(
    State(state): State<AppState>,
    Json(export): Json<CacheExport>,
) -> Json<CountResponse> {
    let imported = state.cache.import_cache(&export).await;
    Json(CountResponse::new("Entries imported", imported))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
