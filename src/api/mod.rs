//! API Module
//!
//! HTTP handlers and routing for the cache admin API.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /info` - Cache info snapshot
//! - `GET|PUT|DELETE /entries/:key` - Single-entry access
//! - `DELETE /entries` - Clear everything
//! - `DELETE /prefixes/:prefix` - Clear by prefix
//! - `POST /cleanup` - Expiry sweep
//! - `PUT /config` - Runtime settings
//! - `GET /export`, `POST /import` - Snapshot transfer

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
