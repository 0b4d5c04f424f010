//! API Routes
//!
//! Configures the Axum router with all admin endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cleanup_handler, clear_all_handler, clear_prefix_handler, config_handler, export_handler,
    get_entry_handler, health_handler, import_handler, info_handler, remove_entry_handler,
    set_entry_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health` - Health check endpoint
/// - `GET /info` - Counters, settings and stored keys
/// - `GET|PUT|DELETE /entries/:key` - Read, write or remove one entry
/// - `DELETE /entries` - Clear the whole cache
/// - `DELETE /prefixes/:prefix` - Remove entries whose storage key contains the prefix
/// - `POST /cleanup` - Sweep expired entries now
/// - `PUT /config` - Adjust runtime settings
/// - `GET /export`, `POST /import` - Dump or restore the cache contents
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/info", get(info_handler))
        .route("/entries", delete(clear_all_handler))
        .route(
            "/entries/:key",
            get(get_entry_handler)
                .put(set_entry_handler)
                .delete(remove_entry_handler),
        )
        .route("/prefixes/:prefix", delete(clear_prefix_handler))
        .route("/cleanup", post(cleanup_handler))
        .route("/config", put(config_handler))
        .route("/export", get(export_handler))
        .route("/import", post(import_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
