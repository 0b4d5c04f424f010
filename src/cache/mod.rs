//! Cache Module
//!
//! Persistent TTL caching with soonest-expiry eviction and hit/miss telemetry.

mod clock;
mod engine;
mod expiry;
mod hash;
mod metadata;
mod serializer;
mod single_flight;
mod snapshot;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use engine::{CacheEngine, SetOptions, Settings};
pub use expiry::ExpiryIndex;
pub use hash::short_hash;
pub use metadata::{CacheInfo, Metadata};
pub use serializer::{FnSerializer, JsonSerializer, Serializer, TextSerializer};
pub use single_flight::SingleFlight;
pub use snapshot::CacheExport;
