//! Response DTOs for the admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::Settings;

/// Response body for `GET /entries/:key`
#[derive(Debug, Clone, Serialize)]
pub struct EntryResponse {
    /// The requested key
    pub key: String,
    /// The decoded value
    pub value: serde_json::Value,
}

impl EntryResponse {
    pub fn new(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for single-key mutations (`PUT` and `DELETE /entries/:key`)
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
    pub key: String,
}

impl MessageResponse {
    pub fn stored(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' stored successfully", key),
            key,
        }
    }

    pub fn removed(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' removed successfully", key),
            key,
        }
    }
}

/// Response body for bulk operations: prefix clearing, cleanup, import
#[derive(Debug, Clone, Serialize)]
pub struct CountResponse {
    pub message: String,
    pub count: usize,
}

impl CountResponse {
    pub fn new(message: impl Into<String>, count: usize) -> Self {
        Self {
            message: message.into(),
            count,
        }
    }
}

/// Response body for `PUT /config`: the settings now in force
#[derive(Debug, Clone, Serialize)]
pub struct SettingsResponse {
    pub enabled: bool,
    pub ttl_ms: u64,
    pub max_size: usize,
    pub single_flight: bool,
}

impl From<Settings> for SettingsResponse {
    fn from(settings: Settings) -> Self {
        Self {
            enabled: settings.enabled,
            ttl_ms: u64::try_from(settings.default_ttl.as_millis()).unwrap_or(u64::MAX),
            max_size: settings.max_size,
            single_flight: settings.single_flight,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
