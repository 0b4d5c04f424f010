//! Domain Presets Module
//!
//! Named wrappers over [`CacheEngine`] for the values the tracker caches:
//! API responses, images, exchange rates, currency conversions and the
//! computed subscription statistics. Each preset fixes a key convention and
//! a TTL.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::{short_hash, CacheEngine, FnSerializer, SetOptions};

// == TTLs ==
pub const IMAGE_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);
pub const EXCHANGE_RATES_TTL: Duration = Duration::from_secs(60 * 60);
pub const CURRENCY_CONVERSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);
pub const SUBSCRIPTION_STATS_TTL: Duration = Duration::from_secs(5 * 60);

pub const SUBSCRIPTION_STATS_KEY: &str = "subscription_stats";

/// Exchange rates keyed by quote currency code.
pub type Rates = BTreeMap<String, f64>;

/// Hashed keys can collide, so URL-keyed payloads carry their URL and a
/// mismatch on read is a miss.
#[derive(Serialize)]
struct SourcedRef<'a, T> {
    source: &'a str,
    data: &'a T,
}

#[derive(Deserialize)]
struct Sourced<T> {
    source: String,
    data: T,
}

// == Cache Presets ==
#[derive(Debug, Clone)]
pub struct CachePresets {
    engine: Arc<CacheEngine>,
}

impl CachePresets {
    pub fn new(engine: Arc<CacheEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Arc<CacheEngine> {
        &self.engine
    }

    // == Keys ==
    pub fn api_key(url: &str) -> String {
        format!("api_{}", short_hash(url))
    }

    pub fn image_key(url: &str) -> String {
        format!("image_{}", short_hash(url))
    }

    pub fn exchange_rates_key(base: &str) -> String {
        format!("exchange_rates_{}", base.to_uppercase())
    }

    pub fn conversion_key(amount: f64, from: &str, to: &str) -> String {
        format!(
            "conversion_{}_{}_{}",
            amount,
            from.to_uppercase(),
            to.to_uppercase()
        )
    }

    // == API Responses ==
    /// Caches a decoded API response for `url` with the default TTL.
    pub async fn cache_api_response<T: Serialize>(&self, url: &str, data: &T) -> bool {
        self.set_sourced(&Self::api_key(url), url, data, SetOptions::default())
            .await
    }

    pub async fn get_cached_api_response<T: DeserializeOwned>(&self, url: &str) -> Option<T> {
        self.get_sourced(&Self::api_key(url), url).await
    }

    pub async fn clear_api_responses(&self) -> usize {
        let prefix = format!("{}api_", self.engine.value_prefix());
        self.engine.clear_by_prefix(&prefix).await
    }

    // == Images ==
    /// Caches image bytes for `url`, stored base64-encoded.
    pub async fn cache_image(&self, url: &str, bytes: &[u8]) -> bool {
        let encoded = STANDARD.encode(bytes);
        self.set_sourced(
            &Self::image_key(url),
            url,
            &encoded,
            SetOptions::with_ttl(IMAGE_TTL),
        )
        .await
    }

    /// Returns the cached image for `url` as a base64 string.
    pub async fn get_cached_image(&self, url: &str) -> Option<String> {
        self.get_sourced(&Self::image_key(url), url).await
    }

    pub async fn get_cached_image_bytes(&self, url: &str) -> Option<Vec<u8>> {
        let encoded = self.get_cached_image(url).await?;
        match STANDARD.decode(encoded) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("Cached image for '{}' is not valid base64: {}", url, e);
                self.engine.remove(&Self::image_key(url)).await;
                None
            }
        }
    }

    pub async fn clear_images(&self) -> usize {
        let prefix = format!("{}image_", self.engine.value_prefix());
        self.engine.clear_by_prefix(&prefix).await
    }

    // == Exchange Rates ==
    pub async fn cache_exchange_rates(&self, base: &str, rates: &Rates) -> bool {
        self.engine
            .set(
                &Self::exchange_rates_key(base),
                rates,
                SetOptions::with_ttl(EXCHANGE_RATES_TTL),
            )
            .await
    }

    pub async fn get_cached_exchange_rates(&self, base: &str) -> Option<Rates> {
        self.engine.get(&Self::exchange_rates_key(base)).await
    }

    /// Cached rates for `base`, or the result of `fetch` (cached on success).
    pub async fn exchange_rates_or_fetch<F, Fut>(&self, base: &str, fetch: F) -> Option<Rates>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<Rates>>,
    {
        self.engine
            .get_or_fetch(
                &Self::exchange_rates_key(base),
                fetch,
                SetOptions::with_ttl(EXCHANGE_RATES_TTL),
            )
            .await
    }

    // == Currency Conversions ==
    /// Caches one conversion result. Every distinct amount is its own entry.
    pub async fn cache_currency_conversion(
        &self,
        amount: f64,
        from: &str,
        to: &str,
        result: f64,
    ) -> bool {
        self.engine
            .set(
                &Self::conversion_key(amount, from, to),
                &result,
                SetOptions::with_ttl(CURRENCY_CONVERSION_TTL),
            )
            .await
    }

    pub async fn get_cached_currency_conversion(
        &self,
        amount: f64,
        from: &str,
        to: &str,
    ) -> Option<f64> {
        self.engine
            .get(&Self::conversion_key(amount, from, to))
            .await
    }

    // == Subscription Stats ==
    pub async fn cache_subscription_stats<T>(&self, stats: &T) -> bool
    where
        T: Serialize + DeserializeOwned,
    {
        self.engine
            .set(
                SUBSCRIPTION_STATS_KEY,
                stats,
                SetOptions::with_ttl(SUBSCRIPTION_STATS_TTL),
            )
            .await
    }

    pub async fn get_cached_subscription_stats<T>(&self) -> Option<T>
    where
        T: Serialize + DeserializeOwned,
    {
        self.engine.get(SUBSCRIPTION_STATS_KEY).await
    }

    /// Cached stats, or the result of `compute` (cached on success).
    pub async fn subscription_stats_or_compute<T, F, Fut>(&self, compute: F) -> Option<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<T>>,
    {
        self.engine
            .get_or_fetch(
                SUBSCRIPTION_STATS_KEY,
                compute,
                SetOptions::with_ttl(SUBSCRIPTION_STATS_TTL),
            )
            .await
    }

    /// Drops the cached stats, e.g. after a subscription changed.
    pub async fn invalidate_subscription_stats(&self) -> bool {
        self.engine.remove(SUBSCRIPTION_STATS_KEY).await
    }

    // == Internals ==
    async fn set_sourced<T: Serialize>(
        &self,
        key: &str,
        source: &str,
        data: &T,
        options: SetOptions,
    ) -> bool {
        match serde_json::to_string(&SourcedRef { source, data }) {
            Ok(raw) => self.engine.set_raw(key, &raw, options).await,
            Err(e) => {
                warn!("Failed to encode payload for '{}': {}", source, e);
                false
            }
        }
    }

    async fn get_sourced<T: DeserializeOwned>(&self, key: &str, source: &str) -> Option<T> {
        let envelope = FnSerializer::new(
            |_: &Sourced<T>| None,
            |raw: &str| serde_json::from_str::<Sourced<T>>(raw).ok(),
        );

        self.engine
            .get_if(&envelope, key, |entry: &Sourced<T>| {
                if entry.source != source {
                    debug!(
                        "Key '{}' holds '{}', not '{}'; treating as miss",
                        key, entry.source, source
                    );
                    return false;
                }
                true
            })
            .await
            .map(|entry| entry.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::config::CacheConfig;
    use crate::storage::MemoryStore;
    use serde_json::{json, Value};

    async fn presets() -> (CachePresets, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        let engine = CacheEngine::open_with_clock(
            Arc::new(MemoryStore::new()),
            CacheConfig::default(),
            clock.clone(),
        )
        .await;
        (CachePresets::new(Arc::new(engine)), clock)
    }

    #[test]
    fn test_key_conventions() {
        assert!(CachePresets::api_key("https://x.test").starts_with("api_"));
        assert!(CachePresets::image_key("https://x.test/a.png").starts_with("image_"));
        assert_eq!(CachePresets::exchange_rates_key("usd"), "exchange_rates_USD");
        assert_eq!(
            CachePresets::conversion_key(12.5, "usd", "eur"),
            "conversion_12.5_USD_EUR"
        );
    }

    #[test]
    fn test_distinct_amounts_get_distinct_keys() {
        assert_ne!(
            CachePresets::conversion_key(10.0, "USD", "EUR"),
            CachePresets::conversion_key(10.5, "USD", "EUR")
        );
    }

    #[tokio::test]
    async fn test_api_response_round_trip() {
        let (cache, _) = presets().await;
        let url = "https://api.example.com/subscriptions";

        assert!(cache.cache_api_response(url, &json!({"items": [1, 2]})).await);
        let cached: Option<Value> = cache.get_cached_api_response(url).await;

        assert_eq!(cached, Some(json!({"items": [1, 2]})));
        assert!(cache
            .get_cached_api_response::<Value>("https://api.example.com/other")
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_api_response_colliding_url_is_miss() {
        let (cache, _) = presets().await;
        let url = "https://api.example.com/a";
        let key = CachePresets::api_key(url);

        // Simulate another URL hashing onto the same slot.
        let foreign = json!({"source": "https://elsewhere.test", "data": 1}).to_string();
        cache.engine().set_raw(&key, &foreign, SetOptions::default()).await;

        assert!(cache.get_cached_api_response::<u32>(url).await.is_none());

        let meta = cache.engine().metadata().await;
        assert_eq!(meta.total_hits, 0);
        assert_eq!(meta.total_misses, 1);
        assert!(cache.engine().has(&key).await);
    }

    #[tokio::test]
    async fn test_api_response_without_envelope_is_dropped() {
        let (cache, _) = presets().await;
        let url = "https://api.example.com/b";
        let key = CachePresets::api_key(url);
        cache.engine().set_raw(&key, "[1, 2, 3]", SetOptions::default()).await;

        assert!(cache.get_cached_api_response::<Vec<u32>>(url).await.is_none());
        assert!(!cache.engine().has(&key).await);
        assert_eq!(cache.engine().metadata().await.total_misses, 1);
    }

    #[tokio::test]
    async fn test_image_round_trip() {
        let (cache, _) = presets().await;
        let url = "https://cdn.example.com/logo.png";
        let bytes = [0x89u8, b'P', b'N', b'G', 0, 255];

        assert!(cache.cache_image(url, &bytes).await);
        assert_eq!(
            cache.get_cached_image(url).await,
            Some(STANDARD.encode(bytes))
        );
        assert_eq!(cache.get_cached_image_bytes(url).await, Some(bytes.to_vec()));
    }

    #[tokio::test]
    async fn test_exchange_rates_expire_after_an_hour() {
        let (cache, clock) = presets().await;
        let rates: Rates = [("EUR".to_string(), 0.92), ("GBP".to_string(), 0.79)]
            .into_iter()
            .collect();

        cache.cache_exchange_rates("usd", &rates).await;
        assert_eq!(cache.get_cached_exchange_rates("USD").await, Some(rates));

        clock.advance(EXCHANGE_RATES_TTL + Duration::from_millis(1));
        assert!(cache.get_cached_exchange_rates("USD").await.is_none());
    }

    #[tokio::test]
    async fn test_exchange_rates_or_fetch() {
        let (cache, _) = presets().await;
        let rates: Rates = [("JPY".to_string(), 150.0)].into_iter().collect();

        let fresh = rates.clone();
        let fetched = cache
            .exchange_rates_or_fetch("USD", || async move { Some(fresh) })
            .await;
        let cached = cache
            .exchange_rates_or_fetch("USD", || async { None })
            .await;

        assert_eq!(fetched, Some(rates.clone()));
        assert_eq!(cached, Some(rates));
    }

    #[tokio::test]
    async fn test_currency_conversion_lasts_a_day() {
        let (cache, clock) = presets().await;

        cache.cache_currency_conversion(100.0, "USD", "EUR", 92.0).await;
        clock.advance(Duration::from_secs(23 * 60 * 60));
        assert_eq!(
            cache.get_cached_currency_conversion(100.0, "usd", "eur").await,
            Some(92.0)
        );
        assert!(cache
            .get_cached_currency_conversion(50.0, "USD", "EUR")
            .await
            .is_none());

        clock.advance(Duration::from_secs(60 * 60 + 1));
        assert!(cache
            .get_cached_currency_conversion(100.0, "USD", "EUR")
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_subscription_stats_ttl_and_invalidation() {
        let (cache, clock) = presets().await;
        let stats = json!({"monthly_total": 42.5, "active": 3});

        cache.cache_subscription_stats(&stats).await;
        assert_eq!(
            cache.get_cached_subscription_stats::<Value>().await,
            Some(stats.clone())
        );

        assert!(cache.invalidate_subscription_stats().await);
        assert!(cache.get_cached_subscription_stats::<Value>().await.is_none());

        cache.cache_subscription_stats(&stats).await;
        clock.advance(SUBSCRIPTION_STATS_TTL + Duration::from_millis(1));
        assert!(cache.get_cached_subscription_stats::<Value>().await.is_none());
    }

    #[tokio::test]
    async fn test_subscription_stats_or_compute() {
        let (cache, _) = presets().await;

        let first = cache
            .subscription_stats_or_compute(|| async { Some(json!({"active": 1})) })
            .await;
        let second = cache
            .subscription_stats_or_compute(|| async { Some(json!({"active": 99})) })
            .await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_clear_families() {
        let (cache, _) = presets().await;
        cache.cache_api_response("https://a.test", &1u32).await;
        cache.cache_api_response("https://b.test", &2u32).await;
        cache.cache_image("https://a.test/i.png", b"img").await;
        cache.cache_subscription_stats(&json!({})).await;

        assert_eq!(cache.clear_api_responses().await, 2);
        assert_eq!(cache.clear_images().await, 1);
        assert!(cache.get_cached_subscription_stats::<Value>().await.is_some());
    }
}
