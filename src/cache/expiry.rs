//! Expiry Index Module
//!
//! Maps each logical key to its absolute expiry timestamp. The index is the
//! source of truth for liveness: a key without a record is absent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// == Expiry Index ==
/// Logical key → absolute expiry (Unix milliseconds).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpiryIndex {
    records: BTreeMap<String, i64>,
}

impl ExpiryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    // == Set Expiry ==
    /// Inserts or replaces the expiry of `key`.
    pub fn set_expiry(&mut self, key: &str, expires_at: i64) {
        self.records.insert(key.to_string(), expires_at);
    }

    // == Remove Expiry ==
    /// Drops the record for `key`, returning whether one existed.
    pub fn remove_expiry(&mut self, key: &str) -> bool {
        self.records.remove(key).is_some()
    }

    pub fn expiry_of(&self, key: &str) -> Option<i64> {
        self.records.get(key).copied()
    }

    // == Is Expired ==
    /// True if `key` has no record or its expiry lies strictly before `now`.
    pub fn is_expired(&self, key: &str, now: i64) -> bool {
        match self.records.get(key) {
            Some(&expires_at) => expires_at < now,
            None => true,
        }
    }

    /// All `(key, expires_at)` pairs in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, i64)> {
        self.records.iter().map(|(k, &ts)| (k.as_str(), ts))
    }

    /// Keys whose expiry lies strictly before `now`.
    pub fn expired_keys(&self, now: i64) -> Vec<String> {
        self.records
            .iter()
            .filter(|&(_, &ts)| ts < now)
            .map(|(k, _)| k.clone())
            .collect()
    }

    // == Soonest First ==
    /// Keys ordered by ascending expiry. Equal expiries fall back to key order
    /// so eviction is deterministic.
    pub fn soonest_first(&self) -> Vec<String> {
        let mut ordered: Vec<(&String, i64)> =
            self.records.iter().map(|(k, &ts)| (k, ts)).collect();
        ordered.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        ordered.into_iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.records.retain(|k, _| keep(k));
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
