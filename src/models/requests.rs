//! Request DTOs for the admin API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Longest logical key accepted over HTTP
pub const MAX_KEY_LENGTH: usize = 256;

/// Validates a logical key taken from the request path.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} characters",
            MAX_KEY_LENGTH
        ));
    }
    None
}

/// Request body for `PUT /entries/:key`
///
/// # Fields
/// - `value`: Any JSON value, stored JSON-encoded
/// - `ttl_ms`: Optional TTL in milliseconds (uses the default if not specified)
#[derive(Debug, Clone, Deserialize)]
pub struct SetEntryRequest {
    pub value: serde_json::Value,
    #[serde(default)]
    pub ttl_ms: Option<u64>,
}

impl SetEntryRequest {
    pub fn validate(&self) -> Option<String> {
        if self.ttl_ms == Some(0) {
            return Some("ttl_ms must be greater than zero".to_string());
        }
        None
    }
}

/// Request body for `PUT /config`
///
/// Every field is optional; only the ones present are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigRequest {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub ttl_ms: Option<u64>,
    #[serde(default)]
    pub max_size: Option<usize>,
    #[serde(default)]
    pub single_flight: Option<bool>,
}

impl ConfigRequest {
    pub fn validate(&self) -> Option<String> {
        if self.ttl_ms == Some(0) {
            return Some("ttl_ms must be greater than zero".to_string());
        }
        if self.max_size == Some(0) {
            return Some("max_size must be at least 1".to_string());
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_none()
            && self.ttl_ms.is_none()
            && self.max_size.is_none()
            && self.single_flight.is_none()
    }
}
