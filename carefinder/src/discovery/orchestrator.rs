//! The facility discovery pipeline.

use tracing::{debug, info};

use crate::cache::{CacheKey, CacheStats, SearchCache};
use crate::config::DiscoveryConfig;
use crate::coord::{BoundingBox, GeoPoint};
use crate::facility::RankedFacility;
use crate::geo_index::SpatialIndex;
use crate::provider::{FacilitySource, FallbackProvider};
use crate::ranking::{RandomRating, RankingEngine, RatingSource};

use super::DiscoveryError;

/// Finds and ranks healthcare facilities near a point.
///
/// Each search runs: validate → cache lookup → upstream fetch (with
/// fallback) → request-scoped spatial index → bounding-box filter → rank
/// → cache store.
///
/// The orchestrator is `Send + Sync` when its source and rating source are,
/// and is meant to be shared behind an `Arc`. Concurrent searches share only
/// the cache.
pub struct DiscoveryOrchestrator<S: FacilitySource, R: RatingSource = RandomRating> {
    provider: FallbackProvider<S>,
    ranking: RankingEngine<R>,
    cache: SearchCache,
    config: DiscoveryConfig,
}

impl<S: FacilitySource> DiscoveryOrchestrator<S, RandomRating> {
    /// Create an orchestrator over `source`.
    ///
    /// Missing ratings are synthesized at random.
    pub fn new(source: S, config: DiscoveryConfig) -> Self {
        Self {
            provider: FallbackProvider::new(source, config.provider_timeout()),
            ranking: RankingEngine::new(),
            cache: SearchCache::new(config.cache_ttl())
                .with_sweep_interval(config.cache_sweep_interval()),
            config,
        }
    }
}

impl<S: FacilitySource, R: RatingSource> DiscoveryOrchestrator<S, R> {
    /// Replace the rating source used for facilities without a rating.
    pub fn with_rating_source<R2: RatingSource>(self, ratings: R2) -> DiscoveryOrchestrator<S, R2> {
        DiscoveryOrchestrator {
            provider: self.provider,
            ranking: RankingEngine::with_rating_source(ratings),
            cache: self.cache,
            config: self.config,
        }
    }

    /// Ranked facilities within `radius_km` of (`lat`, `lng`).
    ///
    /// Returns at most `max_results` facilities in non-increasing score
    /// order. Upstream failures never fail the search; they produce fallback
    /// results instead.
    ///
    /// # Errors
    ///
    /// [`DiscoveryError::InvalidInput`] for out-of-range or non-finite
    /// coordinates and [`DiscoveryError::InvalidRadius`] for a negative or
    /// non-finite radius. Neither touches the cache or the network.
    pub async fn find_facilities(
        &self,
        lat: f64,
        lng: f64,
        radius_km: f64,
    ) -> Result<Vec<RankedFacility>, DiscoveryError> {
        let center = GeoPoint::new(lat, lng).map_err(|e| DiscoveryError::InvalidInput {
            lat,
            lng,
            reason: e.to_string(),
        })?;
        validate_radius(radius_km)?;

        let key = CacheKey::from_point(center, self.config.coordinate_precision());
        if let Some(hit) = self.cache.lookup(&key) {
            if hit.radius_km != radius_km {
                debug!(
                    key = %key,
                    cached_radius_km = hit.radius_km,
                    requested_radius_km = radius_km,
                    "Serving cached results computed for a different radius"
                );
            }
            debug!(key = %key, count = hit.results.len(), age_secs = hit.age.as_secs(), "Cache hit");
            return Ok(hit.results);
        }
        debug!(key = %key, "Cache miss");

        let outcome = self
            .provider
            .fetch(center, self.config.fetch_radius_m(radius_km))
            .await;
        let fallback = outcome.is_fallback();
        let records = outcome.into_records();
        let fetched = records.len();

        // Fallback records bypass the radius filter: an upstream outage
        // yields the full synthetic set at any radius.
        let candidates = if fallback {
            records
        } else {
            let index = SpatialIndex::from_records(records);
            let bbox = BoundingBox::around(center, radius_km, self.config.km_per_degree());
            index.query(&bbox)
        };
        let candidate_count = candidates.len();

        let results = self
            .ranking
            .rank(center, candidates, self.config.max_results());

        self.cache.set(
            key,
            results.clone(),
            radius_km,
            self.config.cache_ttl(),
        );

        info!(
            lat = lat,
            lng = lng,
            radius_km = radius_km,
            fetched = fetched,
            candidates = candidate_count,
            results = results.len(),
            fallback = fallback,
            "Facility search complete"
        );

        Ok(results)
    }

    /// [`find_facilities`](Self::find_facilities) with the configured
    /// default radius.
    pub async fn find_nearby(
        &self,
        lat: f64,
        lng: f64,
    ) -> Result<Vec<RankedFacility>, DiscoveryError> {
        self.find_facilities(lat, lng, self.config.default_radius_km())
            .await
    }

    /// Snapshot of search cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn cache(&self) -> &SearchCache {
        &self.cache
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Returns the fallback-wrapped upstream provider.
    pub fn provider(&self) -> &FallbackProvider<S> {
        &self.provider
    }
}

fn validate_radius(radius_km: f64) -> Result<(), DiscoveryError> {
    let reason = if !radius_km.is_finite() {
        "must be a finite number"
    } else if radius_km < 0.0 {
        "must not be negative"
    } else {
        return Ok(());
    };

    Err(DiscoveryError::InvalidRadius {
        radius_km,
        reason: reason.to_string(),
    })
}
