//! Single-flight coalescing of concurrent fetches.
//!
//! Callers missing the same key at the same time share one in-flight cell;
//! the first caller runs its fetch, the rest wait for its result.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::sync::OnceCell;

type Slot = Arc<OnceCell<Option<String>>>;

// == Single Flight ==
#[derive(Debug, Default)]
pub struct SingleFlight {
    in_flight: Mutex<HashMap<String, Slot>>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    // == Run ==
    /// Runs `init` unless another caller is already running one for `key`,
    /// in which case its result is awaited instead.
    ///
    /// `init` yields the encoded value, or `None` when nothing was fetched.
    /// If the running caller is cancelled, a waiting caller takes over with
    /// its own `init`.
    pub async fn run<F, Fut>(&self, key: &str, init: F) -> Option<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<String>>,
    {
        let slot = self.slot(key);
        let result = slot.get_or_init(init).await.clone();
        self.release(key, &slot);
        result
    }

    /// Number of keys with a fetch currently in flight.
    pub fn in_flight(&self) -> usize {
        self.lock().len()
    }

    fn slot(&self, key: &str) -> Slot {
        self.lock()
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }

    fn release(&self, key: &str, slot: &Slot) {
        let mut map = self.lock();
        if map.get(key).is_some_and(|current| Arc::ptr_eq(current, slot)) {
            map.remove(key);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Slot>> {
        // The map is never left half-updated, so a poisoned lock is still usable.
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
