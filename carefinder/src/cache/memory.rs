//! In-memory TTL cache of ranked search results.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::{debug, trace};

use crate::cache::stats::StatsCounters;
use crate::cache::types::{CacheEntry, CacheKey, CachedSearch};
use crate::cache::CacheStats;
use crate::config::DEFAULT_CACHE_SWEEP_INTERVAL_SECS;
use crate::facility::RankedFacility;

/// Concurrent search-result cache with lazy expiry.
///
/// Entries live for their TTL from insertion. Expired entries are treated as
/// absent and removed when next read. Stores also sweep every expired entry
/// once per sweep interval, so cells that are never read again do not
/// accumulate. Reads and writes of a single key are atomic with respect to
/// each other.
pub struct SearchCache {
    entries: DashMap<CacheKey, CacheEntry>,
    default_ttl: Duration,
    sweep_interval: Duration,
    created_at: Instant,
    /// Milliseconds after `created_at` of the last sweep
    last_sweep_ms: AtomicU64,
    stats: StatsCounters,
}

impl SearchCache {
    /// Create an empty cache whose [`insert`](Self::insert) uses `default_ttl`.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            default_ttl,
            sweep_interval: Duration::from_secs(DEFAULT_CACHE_SWEEP_INTERVAL_SECS),
            created_at: Instant::now(),
            last_sweep_ms: AtomicU64::new(0),
            stats: StatsCounters::new(),
        }
    }

    /// Set how often stores sweep expired entries. Default: 10 minutes.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Get cached results for `key`, if present and unexpired.
    pub fn get(&self, key: &CacheKey) -> Option<Vec<RankedFacility>> {
        self.lookup(key).map(|hit| hit.results)
    }

    /// Like [`get`](Self::get) but also reports the radius and age of the
    /// cached entry.
    pub fn lookup(&self, key: &CacheKey) -> Option<CachedSearch> {
        self.lookup_at(key, Instant::now())
    }

    pub(crate) fn lookup_at(&self, key: &CacheKey, now: Instant) -> Option<CachedSearch> {
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                self.stats.record_hit();
                return Some(CachedSearch {
                    results: entry.results.clone(),
                    radius_km: entry.radius_km,
                    age: now.saturating_duration_since(entry.inserted_at),
                });
            }
            Some(_) => true,
            None => false,
        };

        // The read guard is released above; re-check under the write lock so a
        // concurrent fresh insert is not discarded.
        if expired && self.entries.remove_if(key, |_, e| e.is_expired(now)).is_some() {
            trace!(key = %key, "Cache entry expired");
            self.stats.record_expirations(1);
        }

        self.stats.record_miss();
        None
    }

    /// Store `results` for `key` with an explicit TTL, replacing any entry.
    pub fn set(&self, key: CacheKey, results: Vec<RankedFacility>, radius_km: f64, ttl: Duration) {
        self.set_at(key, results, radius_km, ttl, Instant::now());
    }

    pub(crate) fn set_at(
        &self,
        key: CacheKey,
        results: Vec<RankedFacility>,
        radius_km: f64,
        ttl: Duration,
        now: Instant,
    ) {
        self.sweep_if_due(now);

        trace!(key = %key, count = results.len(), ttl_secs = ttl.as_secs(), "Cache store");
        self.entries
            .insert(key, CacheEntry::new(results, radius_km, ttl, now));
        self.stats.record_insertion();
    }

    /// Purge expired entries if a sweep interval has passed since the last
    /// sweep. Only one of several concurrent stores performs the sweep.
    fn sweep_if_due(&self, now: Instant) {
        let now_ms = now.saturating_duration_since(self.created_at).as_millis() as u64;
        let last_ms = self.last_sweep_ms.load(Ordering::Acquire);
        if now_ms.saturating_sub(last_ms) < self.sweep_interval.as_millis() as u64 {
            return;
        }
        if self
            .last_sweep_ms
            .compare_exchange(last_ms, now_ms, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        let removed = self.purge_expired_at(now);
        if removed > 0 {
            debug!(removed, remaining = self.entries.len(), "Swept expired cache entries");
        }
    }

    /// Store `results` for `key` with the default TTL.
    pub fn insert(&self, key: CacheKey, results: Vec<RankedFacility>, radius_km: f64) {
        self.set(key, results, radius_km, self.default_ttl);
    }

    /// Remove every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    pub(crate) fn purge_expired_at(&self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            self.stats.record_expirations(removed as u64);
        }
        removed
    }

    /// Number of stored entries, including expired ones not yet removed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all entries from the cache.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::GeoPoint;
    use crate::facility::{FacilityRecord, FacilityType, ADDRESS_UNAVAILABLE};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    const TTL: Duration = Duration::from_secs(1200);

    fn result(id: &str) -> RankedFacility {
        RankedFacility {
            facility: FacilityRecord {
                id: id.to_string(),
                name: id.to_string(),
                lat: 0.0,
                lng: 0.0,
                facility_type: FacilityType::Clinic,
                tags: BTreeMap::new(),
                address: ADDRESS_UNAVAILABLE.to_string(),
                rating: None,
            },
            distance_km: 1.0,
            rating: 4.0,
            is_pediatric: false,
            score: 0.64,
        }
    }

    fn key(lat: f64, lng: f64) -> CacheKey {
        CacheKey::from_point(GeoPoint::new(lat, lng).unwrap(), 2)
    }

    // =========================================================================
    // Key derivation
    // =========================================================================

    #[test]
    fn test_key_format() {
        assert_eq!(key(40.7128, -74.0060).as_str(), "40.71_-74.01");
        assert_eq!(key(40.0, -74.0).as_str(), "40.00_-74.00");
    }

    #[test]
    fn test_key_same_cell() {
        assert_eq!(key(40.7128, -74.0012), key(40.7149, -73.9951));
    }

    #[test]
    fn test_key_negative_zero_normalised() {
        assert_eq!(key(-0.001, -0.004).as_str(), "0.00_0.00");
        assert_eq!(key(-0.001, 0.0), key(0.001, 0.0));
    }

    #[test]
    fn test_key_precision() {
        assert_eq!(CacheKey::from_coords(40.7128, -74.006, 3).as_str(), "40.713_-74.006");
        assert_eq!(CacheKey::from_coords(40.7128, -74.006, 0).as_str(), "41_-74");
    }

    // =========================================================================
    // Get / set
    // =========================================================================

    #[test]
    fn test_get_miss() {
        let cache = SearchCache::new(TTL);
        assert!(cache.get(&key(1.0, 1.0)).is_none());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_insert_then_get() {
        let cache = SearchCache::new(TTL);
        cache.insert(key(1.0, 1.0), vec![result("a"), result("b")], 20.0);

        let hit = cache.get(&key(1.0, 1.0)).unwrap();
        assert_eq!(hit.len(), 2);
        assert_eq!(hit[0].id(), "a");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.insertions, 1);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn test_lookup_reports_radius() {
        let cache = SearchCache::new(TTL);
        cache.insert(key(1.0, 1.0), vec![result("a")], 5.0);

        let hit = cache.lookup(&key(1.0, 1.0)).unwrap();
        assert_eq!(hit.radius_km, 5.0);
    }

    #[test]
    fn test_set_replaces_entry() {
        let cache = SearchCache::new(TTL);
        cache.insert(key(1.0, 1.0), vec![result("old")], 20.0);
        cache.insert(key(1.0, 1.0), vec![result("new")], 20.0);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key(1.0, 1.0)).unwrap()[0].id(), "new");
    }

    #[test]
    fn test_empty_result_list_is_cached() {
        let cache = SearchCache::new(TTL);
        cache.insert(key(1.0, 1.0), Vec::new(), 20.0);
        assert_eq!(cache.get(&key(1.0, 1.0)), Some(Vec::new()));
    }

    // =========================================================================
    // Expiry
    // =========================================================================

    #[test]
    fn test_entry_live_until_ttl() {
        let cache = SearchCache::new(TTL);
        let t0 = Instant::now();
        cache.set_at(key(1.0, 1.0), vec![result("a")], 20.0, TTL, t0);

        let almost = t0 + TTL - Duration::from_millis(1);
        assert!(cache.lookup_at(&key(1.0, 1.0), almost).is_some());
    }

    #[test]
    fn test_expired_entry_is_miss_and_removed() {
        let cache = SearchCache::new(TTL);
        let t0 = Instant::now();
        cache.set_at(key(1.0, 1.0), vec![result("a")], 20.0, TTL, t0);

        assert!(cache.lookup_at(&key(1.0, 1.0), t0 + TTL).is_none());
        assert!(cache.is_empty());

        let stats = cache.stats();
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_purge_expired() {
        let cache = SearchCache::new(TTL);
        let t0 = Instant::now();
        cache.set_at(key(1.0, 1.0), vec![result("a")], 20.0, Duration::from_secs(10), t0);
        cache.set_at(key(2.0, 2.0), vec![result("b")], 20.0, TTL, t0);

        let removed = cache.purge_expired_at(t0 + Duration::from_secs(60));
        assert_eq!(removed, 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.lookup_at(&key(2.0, 2.0), t0 + Duration::from_secs(60)).is_some());
    }

    #[test]
    fn test_store_sweeps_unread_expired_entries() {
        let ttl = Duration::from_secs(10);
        let cache = SearchCache::new(ttl).with_sweep_interval(Duration::from_secs(60));
        let t0 = Instant::now();
        for i in 0..50 {
            cache.set_at(key(i as f64, 0.0), vec![result("a")], 20.0, ttl, t0);
        }
        assert_eq!(cache.len(), 50);

        // Expired, but the interval has not passed: nothing is swept yet
        cache.set_at(key(80.0, 1.0), vec![result("b")], 20.0, ttl, t0 + Duration::from_secs(30));
        assert_eq!(cache.len(), 51);

        cache.set_at(key(80.0, 2.0), vec![result("c")], 20.0, ttl, t0 + Duration::from_secs(61));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().expirations, 51);
    }

    #[test]
    fn test_zero_sweep_interval_sweeps_every_store() {
        let ttl = Duration::from_secs(1);
        let cache = SearchCache::new(ttl).with_sweep_interval(Duration::ZERO);
        let t0 = Instant::now();
        cache.set_at(key(1.0, 1.0), vec![result("a")], 20.0, ttl, t0);
        cache.set_at(key(2.0, 2.0), vec![result("b")], 20.0, ttl, t0 + Duration::from_secs(2));

        assert_eq!(cache.len(), 1);
        assert!(cache.lookup_at(&key(2.0, 2.0), t0 + Duration::from_secs(2)).is_some());
    }

    #[test]
    fn test_clear() {
        let cache = SearchCache::new(TTL);
        cache.insert(key(1.0, 1.0), vec![result("a")], 20.0);
        cache.insert(key(2.0, 2.0), vec![result("b")], 20.0);
        cache.clear();
        assert!(cache.is_empty());
    }

    // =========================================================================
    // Concurrency
    // =========================================================================

    #[test]
    fn test_concurrent_insert_and_get() {
        let cache = Arc::new(SearchCache::new(TTL));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    let k = key(i as f64, i as f64);
                    cache.insert(k.clone(), vec![result(&i.to_string())], 20.0);
                    cache.get(&k)
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let hit = handle.join().unwrap().unwrap();
            assert_eq!(hit[0].id(), i.to_string());
        }
        assert_eq!(cache.len(), 8);
    }
}
