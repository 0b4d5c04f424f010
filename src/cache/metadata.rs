//! Cache Metadata Module
//!
//! Persisted counters describing the cache: live entries, hits, misses,
//! evictions and the last cleanup/update timestamps.

use serde::{Deserialize, Serialize};

// == Metadata ==
/// Counters persisted as a single blob next to the expiry index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Current number of live entries
    pub total_entries: usize,
    /// Number of successful cache retrievals
    pub total_hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub total_misses: u64,
    /// Number of entries evicted to satisfy the size bound
    #[serde(default)]
    pub total_evictions: u64,
    /// Last `cleanup_expired` or `clear_all` run (Unix milliseconds)
    pub last_cleanup: Option<i64>,
    /// Last mutation of the cache (Unix milliseconds)
    pub last_updated: Option<i64>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Hit percentage: `hits / (hits + misses) * 100`, or 0.0 without requests.
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_hits + self.total_misses;
        if total == 0 {
            0.0
        } else {
            self.total_hits as f64 / total as f64 * 100.0
        }
    }

    pub fn record_hit(&mut self) {
        self.total_hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.total_misses += 1;
    }

    pub fn record_evictions(&mut self, count: usize) {
        self.total_evictions += count as u64;
    }

    pub fn touch(&mut self, now: i64) {
        self.last_updated = Some(now);
    }

    /// Zeroes every counter and stamps both timestamps with `now`.
    pub fn reset(&mut self, now: i64) {
        *self = Self {
            last_cleanup: Some(now),
            last_updated: Some(now),
            ..Self::default()
        };
    }
}

// == Cache Info ==
/// Snapshot returned by `CacheEngine::get_cache_info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheInfo {
    pub total_entries: usize,
    /// Percentage in `0.0..=100.0`
    pub hit_rate: f64,
    pub total_hits: u64,
    pub total_misses: u64,
    pub total_evictions: u64,
    pub last_cleanup: Option<i64>,
    pub last_updated: Option<i64>,
    pub enabled: bool,
    pub max_size: usize,
    pub default_ttl_ms: u64,
    /// Logical keys currently persisted
    pub cache_keys: Vec<String>,
}
