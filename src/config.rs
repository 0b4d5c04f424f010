//! Configuration Module
//!
//! Handles loading cache and server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default TTL applied when `set` is called without one (1 hour).
pub const DEFAULT_TTL_MS: u64 = 60 * 60 * 1000;

/// Default maximum number of live entries.
pub const DEFAULT_MAX_SIZE: usize = 100;

/// Default storage namespace.
pub const DEFAULT_NAMESPACE: &str = "ledger_cache";

// == Cache Config ==
/// Engine configuration injected into [`crate::cache::CacheEngine::open`].
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Whether the cache serves and stores values at all
    pub enabled: bool,
    /// TTL used when a write carries none
    pub default_ttl: Duration,
    /// Maximum number of live entries before eviction kicks in
    pub max_size: usize,
    /// Namespace used to build the reserved storage keys
    pub namespace: String,
    /// Coalesce concurrent `get_or_fetch` misses for the same key
    pub single_flight: bool,
}

impl CacheConfig {
    /// Prefix under which every value is persisted.
    pub fn value_prefix(&self) -> String {
        format!("@{}/", self.namespace)
    }

    /// Storage key of the persisted expiry index.
    pub fn expiry_key(&self) -> String {
        format!("@{}.expiry", self.namespace)
    }

    /// Storage key of the persisted metadata blob.
    pub fn metadata_key(&self) -> String {
        format!("@{}.metadata", self.namespace)
    }

    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_single_flight(mut self, enabled: bool) -> Self {
        self.single_flight = enabled;
        self
    }

    /// Sets the namespace. `/` separates the namespace from logical keys, so
    /// any `/` in `namespace` is replaced with `_`.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into().replace('/', "_");
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_ttl: Duration::from_millis(DEFAULT_TTL_MS),
            max_size: DEFAULT_MAX_SIZE,
            namespace: DEFAULT_NAMESPACE.to_string(),
            single_flight: false,
        }
    }
}

/// Process configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache engine settings
    pub cache: CacheConfig,
    /// JSON file backing the persistent store
    pub storage_path: PathBuf,
    /// HTTP admin server port
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_ENABLED` - Enable the cache (default: true)
    /// - `CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 3600000)
    /// - `CACHE_MAX_SIZE` - Maximum live entries (default: 100)
    /// - `CACHE_NAMESPACE` - Storage namespace (default: ledger_cache)
    /// - `CACHE_SINGLE_FLIGHT` - Coalesce concurrent misses (default: false)
    /// - `CACHE_STORAGE_PATH` - Store file path (default: ledger_cache.json)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            cache: CacheConfig {
                enabled: parse_var("CACHE_ENABLED").unwrap_or(defaults.cache.enabled),
                default_ttl: parse_var("CACHE_DEFAULT_TTL_MS")
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.cache.default_ttl),
                max_size: parse_var("CACHE_MAX_SIZE").unwrap_or(defaults.cache.max_size),
                namespace: env::var("CACHE_NAMESPACE")
                    .ok()
                    .filter(|v| is_valid_namespace(v))
                    .unwrap_or(defaults.cache.namespace),
                single_flight: parse_var("CACHE_SINGLE_FLIGHT")
                    .unwrap_or(defaults.cache.single_flight),
            },
            storage_path: env::var("CACHE_STORAGE_PATH")
                .ok()
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }
}

/// A namespace must be non-empty and free of `/`; otherwise its value prefix
/// would cover another namespace's keys.
pub fn is_valid_namespace(namespace: &str) -> bool {
    !namespace.is_empty() && !namespace.contains('/')
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            storage_path: PathBuf::from("ledger_cache.json"),
            server_port: 3000,
            cleanup_interval: 60,
        }
    }
}
