//! Recommendation memoization
//!
//! Decorates the engine with a memo keyed by `(event, version)`, where the
//! version is the number of submissions the result was computed from. A new
//! submission bumps the version, so a stale entry can never be served for
//! the new snapshot; [`RecommendationCache::invalidate`] additionally frees
//! the old entries. Concurrent requests for one key share a single
//! computation through a per-key `OnceCell`.
//!
//! The optional shared tier is keyed by the event uid, since numeric event
//! ids are only unique within one store.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, OnceCell};
use tracing::debug;
use uuid::Uuid;

use crate::config::{CacheBackend, CacheConfig};
use crate::models::{Event, Recommendation};
use crate::services::redis::RedisService;
use crate::utils::errors::{MeetSmartError, Result};
use crate::utils::logging;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub event_id: i64,
    pub event_uid: Uuid,
    pub version: usize,
}

impl CacheKey {
    pub fn new(event_id: i64, event_uid: Uuid, version: usize) -> Self {
        Self { event_id, event_uid, version }
    }

    pub fn for_event(event: &Event, version: usize) -> Self {
        Self::new(event.id, event.uid, version)
    }
}

type Slot = Arc<OnceCell<Arc<Recommendation>>>;

/// Second tier shared between cache instances
#[derive(Debug, Clone)]
enum SharedTier {
    Redis(RedisService),
    #[cfg(test)]
    Local(Arc<Mutex<HashMap<String, Recommendation>>>),
}

impl SharedTier {
    async fn load(&self, key: CacheKey) -> Result<Option<Recommendation>> {
        match self {
            SharedTier::Redis(redis) => redis.get_recommendation(key.event_uid, key.version).await,
            #[cfg(test)]
            SharedTier::Local(store) => {
                let entry_key = crate::services::redis::recommendation_key(key.event_uid, key.version);
                Ok(store.lock().await.get(&entry_key).cloned())
            }
        }
    }

    async fn store(&self, key: CacheKey, recommendation: &Recommendation) -> Result<()> {
        match self {
            SharedTier::Redis(redis) => redis.cache_recommendation(key.event_uid, key.version, recommendation).await,
            #[cfg(test)]
            SharedTier::Local(store) => {
                let entry_key = crate::services::redis::recommendation_key(key.event_uid, key.version);
                store.lock().await.insert(entry_key, recommendation.clone());
                Ok(())
            }
        }
    }

    async fn invalidate(&self, event_uid: Uuid) -> Result<()> {
        match self {
            SharedTier::Redis(redis) => redis.invalidate_recommendations(event_uid).await.map(|_| ()),
            #[cfg(test)]
            SharedTier::Local(store) => {
                let prefix = format!("recommendation:{}:", event_uid);
                store.lock().await.retain(|entry_key, _| !entry_key.starts_with(&prefix));
                Ok(())
            }
        }
    }
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    computations: AtomicU64,
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub computations: u64,
    pub entries: usize,
}

#[derive(Debug, Clone)]
pub struct RecommendationCache {
    enabled: bool,
    slots: Arc<Mutex<HashMap<CacheKey, Slot>>>,
    shared: Option<SharedTier>,
    counters: Arc<Counters>,
}

impl RecommendationCache {
    /// Build from configuration; `redis` is only consulted for the Redis backend
    pub fn new(config: &CacheConfig, redis: Option<RedisService>) -> Self {
        let shared = match config.backend {
            CacheBackend::Redis => redis.map(SharedTier::Redis),
            CacheBackend::Memory => None,
        };

        Self {
            enabled: config.enabled,
            slots: Arc::new(Mutex::new(HashMap::new())),
            shared,
            counters: Arc::new(Counters::default()),
        }
    }

    /// In-process memo only
    pub fn in_memory() -> Self {
        Self::new(&CacheConfig { enabled: true, backend: CacheBackend::Memory }, None)
    }

    /// Pass-through that always computes
    pub fn disabled() -> Self {
        Self::new(&CacheConfig { enabled: false, backend: CacheBackend::Memory }, None)
    }

    #[cfg(test)]
    fn with_local_tier(store: Arc<Mutex<HashMap<String, Recommendation>>>) -> Self {
        Self { shared: Some(SharedTier::Local(store)), ..Self::in_memory() }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Return the memoized recommendation for `key`, running `compute` at
    /// most once per key even under concurrent callers. A failed computation
    /// leaves the key empty so the next caller retries.
    pub async fn get_or_compute<F, Fut>(&self, key: CacheKey, compute: F) -> Result<Arc<Recommendation>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Recommendation>>,
    {
        if !self.enabled {
            self.counters.computations.fetch_add(1, Ordering::Relaxed);
            return compute().await.map(Arc::new);
        }

        let slot = self.slot_for(key).await;
        if let Some(hit) = slot.get() {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            logging::log_cache_event(key.event_id, key.version, "hit");
            return Ok(Arc::clone(hit));
        }

        let value = slot
            .get_or_try_init(|| async {
                self.counters.misses.fetch_add(1, Ordering::Relaxed);
                logging::log_cache_event(key.event_id, key.version, "miss");

                if let Some(shared) = self.load_shared(key).await {
                    logging::log_cache_event(key.event_id, key.version, "shared_hit");
                    return Ok::<_, MeetSmartError>(Arc::new(shared));
                }

                self.counters.computations.fetch_add(1, Ordering::Relaxed);
                let recommendation = compute().await?;
                self.store_shared(key, &recommendation).await;
                Ok(Arc::new(recommendation))
            })
            .await?;

        Ok(Arc::clone(value))
    }

    /// Forget every memoized version for an event
    pub async fn invalidate(&self, event_uid: Uuid) {
        let removed = {
            let mut slots = self.slots.lock().await;
            let before = slots.len();
            slots.retain(|key, _| key.event_uid != event_uid);
            before - slots.len()
        };
        debug!(event_uid = %event_uid, removed = removed, "Recommendation cache invalidated");

        if let Some(shared) = &self.shared {
            if let Err(e) = shared.invalidate(event_uid).await {
                logging::log_error(&e, "shared recommendation invalidation");
            }
        }
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            computations: self.counters.computations.load(Ordering::Relaxed),
            entries: self.slots.lock().await.len(),
        }
    }

    /// Fetch or create the slot for `key`, dropping older versions of the same event
    async fn slot_for(&self, key: CacheKey) -> Slot {
        let mut slots = self.slots.lock().await;
        if !slots.contains_key(&key) {
            slots.retain(|existing, _| existing.event_uid != key.event_uid || existing.version > key.version);
        }
        Arc::clone(slots.entry(key).or_default())
    }

    async fn load_shared(&self, key: CacheKey) -> Option<Recommendation> {
        let shared = self.shared.as_ref()?;
        match shared.load(key).await {
            Ok(found) => found,
            Err(e) => {
                logging::log_error(&e, "shared recommendation lookup");
                None
            }
        }
    }

    async fn store_shared(&self, key: CacheKey, recommendation: &Recommendation) {
        if let Some(shared) = &self.shared {
            if let Err(e) = shared.store(key, recommendation).await {
                logging::log_error(&e, "shared recommendation store");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recommendation(event_id: i64, response_count: usize) -> Recommendation {
        Recommendation {
            event_id,
            candidates: vec![],
            rejected_slots: vec![],
            response_count,
            participation_rate: 0.0,
        }
    }

    fn key(event_id: i64, version: usize) -> CacheKey {
        // Stable uid per numeric id so keys built separately still match
        CacheKey::new(event_id, Uuid::from_u128(event_id as u128), version)
    }

    #[tokio::test]
    async fn test_second_call_hits() {
        let cache = RecommendationCache::in_memory();
        let key = key(1, 2);

        let first = cache.get_or_compute(key, || async { Ok(recommendation(1, 2)) }).await.unwrap();
        let second = cache
            .get_or_compute(key, || async { Err(MeetSmartError::Config("recomputed".to_string())) })
            .await
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        let stats = cache.stats().await;
        assert_eq!((stats.hits, stats.misses, stats.computations), (1, 1, 1));
    }

    #[tokio::test]
    async fn test_new_version_replaces_old() {
        let cache = RecommendationCache::in_memory();
        cache.get_or_compute(key(1, 1), || async { Ok(recommendation(1, 1)) }).await.unwrap();
        cache.get_or_compute(key(2, 1), || async { Ok(recommendation(2, 1)) }).await.unwrap();
        let fresh = cache
            .get_or_compute(key(1, 2), || async { Ok(recommendation(1, 2)) })
            .await
            .unwrap();

        assert_eq!(fresh.response_count, 2);
        assert_eq!(cache.stats().await.entries, 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_recompute() {
        let cache = RecommendationCache::in_memory();
        let key = key(5, 0);
        cache.get_or_compute(key, || async { Ok(recommendation(5, 0)) }).await.unwrap();

        cache.invalidate(key.event_uid).await;
        assert_eq!(cache.stats().await.entries, 0);

        cache.get_or_compute(key, || async { Ok(recommendation(5, 0)) }).await.unwrap();
        assert_eq!(cache.stats().await.computations, 2);
    }

    #[tokio::test]
    async fn test_failure_is_not_memoized() {
        let cache = RecommendationCache::in_memory();
        let key = key(3, 0);

        let failed = cache
            .get_or_compute(key, || async { Err(MeetSmartError::EventNotFound { event_id: 3 }) })
            .await;
        assert!(failed.is_err());

        let ok = cache.get_or_compute(key, || async { Ok(recommendation(3, 0)) }).await;
        assert!(ok.is_ok());
    }

    #[tokio::test]
    async fn test_disabled_always_computes() {
        let cache = RecommendationCache::disabled();
        let key = key(1, 0);
        for _ in 0..3 {
            cache.get_or_compute(key, || async { Ok(recommendation(1, 0)) }).await.unwrap();
        }
        let stats = cache.stats().await;
        assert_eq!(stats.computations, 3);
        assert_eq!(stats.entries, 0);
        assert!(!cache.is_enabled());
    }

    #[tokio::test]
    async fn test_shared_tier_serves_other_instance() {
        let store = Arc::new(Mutex::new(HashMap::new()));
        let writer = RecommendationCache::with_local_tier(Arc::clone(&store));
        let reader = RecommendationCache::with_local_tier(Arc::clone(&store));
        let key = key(4, 2);

        writer.get_or_compute(key, || async { Ok(recommendation(4, 2)) }).await.unwrap();
        let loaded = reader
            .get_or_compute(key, || async { Err(MeetSmartError::Config("recomputed".to_string())) })
            .await
            .unwrap();

        assert_eq!(*loaded, recommendation(4, 2));
        let stats = reader.stats().await;
        assert_eq!((stats.misses, stats.computations, stats.entries), (1, 0, 1));
    }

    #[tokio::test]
    async fn test_shared_tier_separates_events_with_same_id() {
        let store = Arc::new(Mutex::new(HashMap::new()));
        let first_process = RecommendationCache::with_local_tier(Arc::clone(&store));
        let second_process = RecommendationCache::with_local_tier(Arc::clone(&store));
        let ours = CacheKey::new(1, Uuid::new_v4(), 1);
        let theirs = CacheKey::new(1, Uuid::new_v4(), 1);

        first_process.get_or_compute(ours, || async { Ok(recommendation(1, 1)) }).await.unwrap();
        let computed = second_process
            .get_or_compute(theirs, || async { Ok(recommendation(1, 7)) })
            .await
            .unwrap();
        assert_eq!(computed.response_count, 7);
        assert_eq!(second_process.stats().await.computations, 1);

        first_process.invalidate(ours.event_uid).await;
        let remaining = store.lock().await;
        assert_eq!(remaining.len(), 1);
        assert!(remaining.contains_key(&crate::services::redis::recommendation_key(theirs.event_uid, 1)));
    }
}
