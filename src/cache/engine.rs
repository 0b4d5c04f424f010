//! Cache Engine Module
//!
//! Main cache engine combining a persistent value store with an expiry index,
//! persisted counters and soonest-expiry eviction.
//!
//! Every public operation is infallible from the caller's point of view:
//! storage and encoding failures are logged and turned into `false`, `None`
//! or `0`.

use std::collections::HashSet;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::cache::clock::duration_ms;
use crate::cache::{
    CacheExport, CacheInfo, Clock, ExpiryIndex, JsonSerializer, Metadata, Serializer,
    SingleFlight, SystemClock, TextSerializer,
};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::storage::KeyValueStore;

// == Set Options ==
/// Per-write options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Overrides the engine's default TTL
    pub ttl: Option<Duration>,
}

impl SetOptions {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl: Some(ttl) }
    }
}

// == Settings ==
/// Runtime-adjustable knobs. Preserved across `clear_all`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub enabled: bool,
    pub default_ttl: Duration,
    pub max_size: usize,
    pub single_flight: bool,
}

impl From<&CacheConfig> for Settings {
    fn from(config: &CacheConfig) -> Self {
        Self {
            enabled: config.enabled,
            default_ttl: config.default_ttl,
            max_size: config.max_size,
            single_flight: config.single_flight,
        }
    }
}

#[derive(Debug)]
struct EngineState {
    settings: Settings,
    index: ExpiryIndex,
    metadata: Metadata,
}

// == Cache Engine ==
/// TTL cache over a [`KeyValueStore`].
///
/// Values live under `<prefix><key>`; the expiry index and the metadata blob
/// live under two reserved keys outside that prefix. Index and metadata are
/// mirrored in memory behind one async mutex, so bookkeeping updates are
/// serialized even when callers run concurrently.
///
/// Reads only bump the in-memory counters. They reach the store with the
/// next mutation, the next `cleanup_expired`, or an explicit [`flush`].
///
/// [`flush`]: CacheEngine::flush
pub struct CacheEngine {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    prefix: String,
    expiry_key: String,
    metadata_key: String,
    state: Mutex<EngineState>,
    counters_dirty: AtomicBool,
    flights: SingleFlight,
}

impl CacheEngine {
    // == Constructor ==
    /// Opens the engine on `store` using the wall clock.
    pub async fn open(store: Arc<dyn KeyValueStore>, config: CacheConfig) -> Self {
        Self::open_with_clock(store, config, Arc::new(SystemClock)).await
    }

    /// Opens the engine with an explicit time source.
    ///
    /// Loads the persisted expiry index and metadata (a missing or corrupt
    /// blob starts empty) and reconciles them against the stored values:
    /// records without a value and values without a record are dropped.
    pub async fn open_with_clock(
        store: Arc<dyn KeyValueStore>,
        config: CacheConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let engine = Self {
            store,
            clock,
            prefix: config.value_prefix(),
            expiry_key: config.expiry_key(),
            metadata_key: config.metadata_key(),
            state: Mutex::new(EngineState {
                settings: Settings::from(&config),
                index: ExpiryIndex::new(),
                metadata: Metadata::new(),
            }),
            counters_dirty: AtomicBool::new(false),
            flights: SingleFlight::new(),
        };

        {
            let mut state = engine.state.lock().await;
            state.index = engine.load_blob(&engine.expiry_key).await;
            state.metadata = engine.load_blob(&engine.metadata_key).await;
            if let Err(e) = engine.reconcile(&mut state).await {
                warn!("Cache reconciliation incomplete: {}", e);
            }
            info!(
                "Cache opened: {} live entries, max_size={}",
                state.index.len(),
                state.settings.max_size
            );
        }

        engine
    }

    // == Set ==
    /// Stores `value` as JSON under `key`.
    ///
    /// Returns `false` if the cache is disabled or the write failed.
    pub async fn set<T>(&self, key: &str, value: &T, options: SetOptions) -> bool
    where
        T: Serialize + DeserializeOwned,
    {
        self.set_with(&JsonSerializer, key, value, options).await
    }

    /// Stores `value` under `key` using `serializer`.
    pub async fn set_with<T, S>(
        &self,
        serializer: &S,
        key: &str,
        value: &T,
        options: SetOptions,
    ) -> bool
    where
        S: Serializer<T>,
    {
        match serializer.serialize(value) {
            Ok(raw) => self.set_raw(key, &raw, options).await,
            Err(e) => {
                warn!("Failed to encode value for '{}': {}", key, e);
                false
            }
        }
    }

    /// Stores an already-encoded value under `key`.
    ///
    /// The expiry is fixed now as `now + ttl`. The size bound is enforced
    /// after the write, which may evict other keys.
    pub async fn set_raw(&self, key: &str, raw: &str, options: SetOptions) -> bool {
        let mut state = self.state.lock().await;
        if !state.settings.enabled {
            debug!("Cache disabled, skipping set of '{}'", key);
            return false;
        }

        let expires_at = self.expiry_for(&state, options.ttl);
        if let Err(e) = self.store_entry(&mut state, key, raw, expires_at).await {
            warn!("Failed to cache '{}': {}", key, e);
            return false;
        }
        debug!("Cached '{}' until {}", key, expires_at);

        if let Err(e) = self.evict_overflow(&mut state).await {
            warn!("Size enforcement after set of '{}' failed: {}", key, e);
        }
        true
    }

    // == Get ==
    /// Returns the live value under `key`, decoding it as JSON.
    ///
    /// Absent and expired keys count as misses; expired ones are removed.
    pub async fn get<T>(&self, key: &str) -> Option<T>
    where
        T: Serialize + DeserializeOwned,
    {
        self.get_with(&JsonSerializer, key).await
    }

    /// Returns the live value under `key`, decoding it with `serializer`.
    ///
    /// A payload that fails to decode is removed and counted as a miss.
    pub async fn get_with<T, S>(&self, serializer: &S, key: &str) -> Option<T>
    where
        S: Serializer<T>,
    {
        self.lookup(serializer, key, |_| true).await
    }

    /// Like [`get_with`](Self::get_with), but a decoded value `accept` turns
    /// down is returned as `None` and counted as a miss. The entry is kept.
    pub async fn get_if<T, S, P>(&self, serializer: &S, key: &str, accept: P) -> Option<T>
    where
        S: Serializer<T>,
        P: FnOnce(&T) -> bool,
    {
        self.lookup(serializer, key, accept).await
    }

    /// Returns the live encoded value under `key`.
    pub async fn get_raw(&self, key: &str) -> Option<String> {
        self.lookup(&TextSerializer, key, |_| true).await
    }

    // == Has ==
    /// Whether `key` is live. Does not touch the hit/miss counters.
    pub async fn has(&self, key: &str) -> bool {
        let state = self.state.lock().await;
        if !state.settings.enabled || state.index.is_expired(key, self.clock.now_ms()) {
            return false;
        }

        match self.store.has_key(&self.storage_key(key)).await {
            Ok(present) => present,
            Err(e) => {
                warn!("Failed to probe '{}': {}", key, e);
                false
            }
        }
    }

    // == Remove ==
    /// Removes `key`. Returns whether a live record existed. Idempotent.
    pub async fn remove(&self, key: &str) -> bool {
        let mut state = self.state.lock().await;
        match self.remove_entries(&mut state, &[key.to_string()]).await {
            Ok(removed) => removed > 0,
            Err(e) => {
                warn!("Failed to remove '{}': {}", key, e);
                false
            }
        }
    }

    // == Clear All ==
    /// Removes every cached value and resets the counters.
    ///
    /// Settings (enabled, TTL, max size) are kept.
    pub async fn clear_all(&self) -> bool {
        let mut state = self.state.lock().await;
        let now = self.clock.now_ms();

        let mut targets: HashSet<String> = state.index.keys().map(str::to_string).collect();
        match self.stored_keys().await {
            Ok(stored) => targets.extend(stored),
            Err(e) => warn!("Failed to enumerate cache keys, clearing indexed keys only: {}", e),
        }

        state.index.clear();
        state.metadata.reset(now);
        let mut outcome = self.persist(&state).await;

        for key in &targets {
            if let Err(e) = self.store.remove_item(&self.storage_key(key)).await {
                outcome = outcome.and(Err(e));
            }
        }

        match outcome {
            Ok(()) => {
                info!("Cache cleared ({} keys)", targets.len());
                true
            }
            Err(e) => {
                warn!("Cache clear incomplete: {}", e);
                false
            }
        }
    }

    // == Clear By Prefix ==
    /// Removes every value whose storage key contains `prefix`.
    ///
    /// Returns the number of values removed. The entry count is recomputed
    /// from what remains in the store.
    pub async fn clear_by_prefix(&self, prefix: &str) -> usize {
        let mut state = self.state.lock().await;

        let stored = match self.stored_keys().await {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Failed to enumerate cache keys for prefix '{}': {}", prefix, e);
                return 0;
            }
        };

        let (targets, remaining): (Vec<String>, Vec<String>) = stored
            .into_iter()
            .partition(|key| self.storage_key(key).contains(prefix));

        let remaining: HashSet<String> = remaining.into_iter().collect();
        state.index.retain(|key| remaining.contains(key));
        self.sync_entry_count(&mut state);
        state.metadata.touch(self.clock.now_ms());

        let mut outcome = self.persist(&state).await;
        let mut removed = 0;
        for key in &targets {
            match self.store.remove_item(&self.storage_key(key)).await {
                Ok(()) => removed += 1,
                Err(e) => outcome = outcome.and(Err(e)),
            }
        }

        if let Err(e) = outcome {
            warn!("Clearing prefix '{}' incomplete: {}", prefix, e);
        }
        info!("Cleared {} entries matching '{}'", removed, prefix);
        removed
    }

    // == Cleanup Expired ==
    /// Removes every entry whose expiry has passed and stamps `lastCleanup`.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let mut state = self.state.lock().await;
        let now = self.clock.now_ms();
        let expired = state.index.expired_keys(now);

        state.metadata.last_cleanup = Some(now);
        let result = if expired.is_empty() {
            self.persist_metadata(&state).await.map(|_| 0)
        } else {
            self.remove_entries(&mut state, &expired).await
        };

        match result {
            Ok(removed) => {
                if removed > 0 {
                    info!("Removed {} expired entries", removed);
                } else {
                    debug!("No expired entries found");
                }
                removed
            }
            Err(e) => {
                warn!("Expired entry cleanup failed: {}", e);
                0
            }
        }
    }

    // == Enforce Max Size ==
    /// Evicts the soonest-expiring entries until the entry count fits the
    /// size bound. Returns the number evicted.
    pub async fn enforce_max_size(&self) -> usize {
        let mut state = self.state.lock().await;
        match self.evict_overflow(&mut state).await {
            Ok(evicted) => evicted,
            Err(e) => {
                warn!("Size enforcement failed: {}", e);
                0
            }
        }
    }

    // == Get Or Fetch ==
    /// Returns the cached value for `key`, or runs `fetch` and caches a
    /// `Some` result with `options`.
    ///
    /// The fetched value is returned even if caching it failed. With
    /// single-flight enabled, concurrent misses on one key share a single
    /// `fetch`; otherwise each miss runs its own.
    pub async fn get_or_fetch<T, F, Fut>(
        &self,
        key: &str,
        fetch: F,
        options: SetOptions,
    ) -> Option<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<T>>,
    {
        if let Some(cached) = self.get::<T>(key).await {
            return Some(cached);
        }

        let single_flight = self.state.lock().await.settings.single_flight;
        if !single_flight {
            let fetched = fetch().await?;
            self.set(key, &fetched, options).await;
            return Some(fetched);
        }

        let mut own: Option<T> = None;
        let slot = &mut own;
        let shared = self
            .flights
            .run(key, move || async move {
                // A flight that finished just before this one started may
                // already have populated the key.
                if let Some(raw) = self.peek_raw(key).await {
                    return Some(raw);
                }

                let fetched = fetch().await?;
                let encoded = match JsonSerializer.serialize(&fetched) {
                    Ok(raw) => {
                        self.set_raw(key, &raw, options).await;
                        Some(raw)
                    }
                    Err(e) => {
                        warn!("Failed to encode fetched value for '{}': {}", key, e);
                        None
                    }
                };
                *slot = Some(fetched);
                encoded
            })
            .await;

        if own.is_some() {
            return own;
        }

        let raw = shared?;
        match JsonSerializer.deserialize(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Failed to decode shared value for '{}': {}", key, e);
                None
            }
        }
    }

    // == Configuration ==
    pub async fn set_enabled(&self, enabled: bool) {
        self.state.lock().await.settings.enabled = enabled;
        info!("Cache {}", if enabled { "enabled" } else { "disabled" });
    }

    /// Changes the default TTL for subsequent writes. Existing expiries stay.
    pub async fn set_ttl(&self, ttl: Duration) {
        self.state.lock().await.settings.default_ttl = ttl;
    }

    /// Changes the size bound and evicts immediately if it shrank below the
    /// current entry count.
    pub async fn set_max_size(&self, max_size: usize) {
        let mut state = self.state.lock().await;
        state.settings.max_size = max_size;
        if let Err(e) = self.evict_overflow(&mut state).await {
            warn!("Size enforcement after resize failed: {}", e);
        }
    }

    pub async fn set_single_flight(&self, enabled: bool) {
        self.state.lock().await.settings.single_flight = enabled;
    }

    pub async fn settings(&self) -> Settings {
        self.state.lock().await.settings.clone()
    }

    // == Flush ==
    /// Persists counters recorded by reads since the last metadata write.
    ///
    /// Returns `false` if the write failed.
    pub async fn flush(&self) -> bool {
        let state = self.state.lock().await;
        if !self.counters_dirty.load(Ordering::Acquire) {
            return true;
        }
        match self.persist_metadata(&state).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to flush cache counters: {}", e);
                false
            }
        }
    }

    // == Introspection ==
    /// Prefix prepended to every logical key in the store.
    pub fn value_prefix(&self) -> &str {
        &self.prefix
    }

    /// Hit percentage since the last `clear_all`.
    pub async fn get_hit_rate(&self) -> f64 {
        self.state.lock().await.metadata.hit_rate()
    }

    pub async fn metadata(&self) -> Metadata {
        self.state.lock().await.metadata.clone()
    }

    pub async fn get_cache_info(&self) -> CacheInfo {
        let state = self.state.lock().await;

        let mut cache_keys = match self.stored_keys().await {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Failed to enumerate cache keys, reporting indexed keys: {}", e);
                state.index.keys().map(str::to_string).collect()
            }
        };
        cache_keys.sort();

        let meta = &state.metadata;
        CacheInfo {
            total_entries: meta.total_entries,
            hit_rate: meta.hit_rate(),
            total_hits: meta.total_hits,
            total_misses: meta.total_misses,
            total_evictions: meta.total_evictions,
            last_cleanup: meta.last_cleanup,
            last_updated: meta.last_updated,
            enabled: state.settings.enabled,
            max_size: state.settings.max_size,
            default_ttl_ms: u64::try_from(state.settings.default_ttl.as_millis())
                .unwrap_or(u64::MAX),
            cache_keys,
        }
    }

    // == Export / Import ==
    /// Dumps every live entry with its expiry and the current counters.
    pub async fn export_cache(&self) -> CacheExport {
        let state = self.state.lock().await;
        let now = self.clock.now_ms();
        let mut export = CacheExport {
            metadata: state.metadata.clone(),
            exported_at: now,
            ..CacheExport::default()
        };

        for (key, expires_at) in state.index.entries() {
            if expires_at < now {
                continue;
            }
            match self.store.get_string(&self.storage_key(key)).await {
                Ok(Some(raw)) => {
                    export.entries.insert(key.to_string(), raw);
                    export.expiry.set_expiry(key, expires_at);
                }
                Ok(None) => {}
                Err(e) => warn!("Skipping '{}' in export: {}", key, e),
            }
        }

        debug!("Exported {} entries", export.len());
        export
    }

    /// Replays the entries of `export` as writes.
    ///
    /// Entries carrying an expiry in the export keep it; the rest get the
    /// default TTL. Returns the number of entries imported.
    pub async fn import_cache(&self, export: &CacheExport) -> usize {
        let mut state = self.state.lock().await;
        if !state.settings.enabled {
            debug!("Cache disabled, skipping import");
            return 0;
        }

        let default_expiry = self.expiry_for(&state, None);
        let mut imported = 0;
        for (key, raw) in &export.entries {
            let expires_at = export.expiry.expiry_of(key).unwrap_or(default_expiry);
            match self.store_entry(&mut state, key, raw, expires_at).await {
                Ok(()) => imported += 1,
                Err(e) => warn!("Failed to import '{}': {}", key, e),
            }
        }

        if let Err(e) = self.evict_overflow(&mut state).await {
            warn!("Size enforcement after import failed: {}", e);
        }
        info!("Imported {} of {} entries", imported, export.len());
        imported
    }

    // == Internals ==
    fn storage_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    fn expiry_for(&self, state: &EngineState, ttl: Option<Duration>) -> i64 {
        let ttl = ttl.unwrap_or(state.settings.default_ttl);
        self.clock.now_ms().saturating_add(duration_ms(ttl))
    }

    fn sync_entry_count(&self, state: &mut EngineState) {
        state.metadata.total_entries = state.index.len();
    }

    /// Logical keys of every value currently in the store.
    async fn stored_keys(&self) -> Result<Vec<String>> {
        Ok(self
            .store
            .enumerate_keys()
            .await?
            .into_iter()
            .filter_map(|k| k.strip_prefix(self.prefix.as_str()).map(str::to_string))
            .collect())
    }

    async fn load_blob<B: DeserializeOwned + Default>(&self, storage_key: &str) -> B {
        match self.store.get_string(storage_key).await {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Discarding corrupt blob '{}': {}", storage_key, e);
                B::default()
            }),
            Ok(None) => B::default(),
            Err(e) => {
                warn!("Failed to load '{}': {}", storage_key, e);
                B::default()
            }
        }
    }

    async fn persist(&self, state: &EngineState) -> Result<()> {
        let index = serde_json::to_string(&state.index)?;
        self.store.set_string(&self.expiry_key, &index).await?;
        self.persist_metadata(state).await
    }

    async fn persist_metadata(&self, state: &EngineState) -> Result<()> {
        let metadata = serde_json::to_string(&state.metadata)?;
        self.store.set_string(&self.metadata_key, &metadata).await?;
        self.counters_dirty.store(false, Ordering::Release);
        Ok(())
    }

    async fn reconcile(&self, state: &mut EngineState) -> Result<()> {
        let stored: HashSet<String> = self.stored_keys().await?.into_iter().collect();

        let indexed = state.index.len();
        state.index.retain(|key| stored.contains(key));
        let dangling = indexed - state.index.len();

        let orphans: Vec<&String> = stored
            .iter()
            .filter(|key| !state.index.contains(key))
            .collect();
        for key in &orphans {
            self.store.remove_item(&self.storage_key(key)).await?;
        }

        let drifted = state.metadata.total_entries != state.index.len();
        self.sync_entry_count(state);
        if dangling > 0 || !orphans.is_empty() || drifted {
            info!(
                "Reconciled cache: dropped {} dangling records and {} orphaned values",
                dangling,
                orphans.len()
            );
            self.persist(state).await?;
        }
        Ok(())
    }

    /// Writes the value, then the index and metadata. If bookkeeping cannot
    /// be persisted the key is dropped entirely.
    async fn store_entry(
        &self,
        state: &mut EngineState,
        key: &str,
        raw: &str,
        expires_at: i64,
    ) -> Result<()> {
        let storage_key = self.storage_key(key);
        self.store.set_string(&storage_key, raw).await?;

        state.index.set_expiry(key, expires_at);
        self.sync_entry_count(state);
        state.metadata.touch(self.clock.now_ms());

        if let Err(e) = self.persist(state).await {
            state.index.remove_expiry(key);
            self.sync_entry_count(state);
            if let Err(cleanup) = self.store.remove_item(&storage_key).await {
                debug!("Could not drop value of '{}' after failed write: {}", key, cleanup);
            }
            return Err(e);
        }
        Ok(())
    }

    /// Drops the records first, persists the index, then deletes the values.
    /// Values are deleted even if persisting failed; a record left without a
    /// value is discarded on the next open. Returns how many records existed.
    async fn remove_entries(&self, state: &mut EngineState, keys: &[String]) -> Result<usize> {
        let removed = keys
            .iter()
            .filter(|key| state.index.remove_expiry(key))
            .count();
        self.sync_entry_count(state);
        state.metadata.touch(self.clock.now_ms());

        let mut outcome = self.persist(state).await;
        for key in keys {
            if let Err(e) = self.store.remove_item(&self.storage_key(key)).await {
                outcome = outcome.and(Err(e));
            }
        }
        outcome.map(|_| removed)
    }

    async fn evict_overflow(&self, state: &mut EngineState) -> Result<usize> {
        let max_size = state.settings.max_size;
        if state.metadata.total_entries <= max_size {
            return Ok(0);
        }

        let excess = state.metadata.total_entries - max_size;
        let victims: Vec<String> = state.index.soonest_first().into_iter().take(excess).collect();
        let evicted = self.remove_entries(state, &victims).await?;

        state.metadata.record_evictions(evicted);
        self.persist_metadata(state).await?;
        info!("Evicted {} entries to stay within max_size={}", evicted, max_size);
        Ok(evicted)
    }

    async fn lookup<T, S, P>(&self, serializer: &S, key: &str, accept: P) -> Option<T>
    where
        S: Serializer<T>,
        P: FnOnce(&T) -> bool,
    {
        let mut state = self.state.lock().await;
        if !state.settings.enabled {
            return None;
        }

        let value = match self.store.get_string(&self.storage_key(key)).await {
            Err(e) => {
                warn!("Failed to read '{}': {}", key, e);
                None
            }
            Ok(None) => {
                debug!("Cache miss for '{}'", key);
                if state.index.contains(key) {
                    // Value vanished underneath the index.
                    if let Err(e) = self.remove_entries(&mut state, &[key.to_string()]).await {
                        warn!("Failed to drop dangling record '{}': {}", key, e);
                    }
                }
                None
            }
            Ok(Some(_)) if state.index.is_expired(key, self.clock.now_ms()) => {
                debug!("Cache entry '{}' expired", key);
                if let Err(e) = self.remove_entries(&mut state, &[key.to_string()]).await {
                    warn!("Failed to drop expired '{}': {}", key, e);
                }
                None
            }
            Ok(Some(raw)) => match serializer.deserialize(&raw) {
                Ok(value) => {
                    if accept(&value) {
                        Some(value)
                    } else {
                        debug!("Cache entry '{}' rejected by caller", key);
                        None
                    }
                }
                Err(e) => {
                    warn!("Dropping undecodable entry '{}': {}", key, e);
                    if let Err(e) = self.remove_entries(&mut state, &[key.to_string()]).await {
                        warn!("Failed to drop undecodable '{}': {}", key, e);
                    }
                    None
                }
            },
        };

        if value.is_some() {
            state.metadata.record_hit();
        } else {
            state.metadata.record_miss();
        }
        self.counters_dirty.store(true, Ordering::Release);
        value
    }

    /// Live encoded value without touching the counters.
    async fn peek_raw(&self, key: &str) -> Option<String> {
        let state = self.state.lock().await;
        if !state.settings.enabled || state.index.is_expired(key, self.clock.now_ms()) {
            return None;
        }
        self.store
            .get_string(&self.storage_key(key))
            .await
            .ok()
            .flatten()
    }
}

impl std::fmt::Debug for CacheEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheEngine")
            .field("prefix", &self.prefix)
            .field("expiry_key", &self.expiry_key)
            .field("metadata_key", &self.metadata_key)
            .finish_non_exhaustive()
    }
}
