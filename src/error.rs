//! Error types for the cache engine
//!
//! Provides unified error handling using thiserror. Engine internals
//! propagate these with `?`; the public engine boundary logs them and
//! returns a safe default instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache engine and its admin API.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Reading from the backing store failed
    #[error("Storage read failed: {0}")]
    StorageRead(String),

    /// Writing to (or removing from) the backing store failed
    #[error("Storage write failed: {0}")]
    StorageWrite(String),

    /// A value or bookkeeping blob could not be encoded or decoded
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Key not found in cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::StorageRead(_) | CacheError::StorageWrite(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            CacheError::Serialization(_) | CacheError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache engine.
pub type Result<T> = std::result::Result<T, CacheError>;
