//! Core types for the search cache.

use std::fmt;
use std::time::{Duration, Instant};

use crate::coord::GeoPoint;
use crate::facility::RankedFacility;

/// Cache key identifying a rounded-coordinate cell.
///
/// Formatted as `"{lat}_{lng}"` with both values rounded to the configured
/// number of decimals, e.g. `"40.71_-74.00"`. Queries landing in the same
/// cell share one entry regardless of their exact coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derives the key for `point` at `precision` decimal places.
    pub fn from_point(point: GeoPoint, precision: usize) -> Self {
        Self::from_coords(point.lat, point.lng, precision)
    }

    /// Derives the key for a raw coordinate pair.
    pub fn from_coords(lat: f64, lng: f64, precision: usize) -> Self {
        let lat = round_for_key(lat, precision);
        let lng = round_for_key(lng, precision);
        Self(format!("{:.p$}_{:.p$}", lat, lng, p = precision))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rounds half away from zero and folds `-0.0` into `0.0`.
fn round_for_key(value: f64, precision: usize) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Stored search result.
#[derive(Debug, Clone)]
pub(crate) struct CacheEntry {
    pub results: Vec<RankedFacility>,
    /// Radius the results were computed for
    pub radius_km: f64,
    pub inserted_at: Instant,
    pub ttl: Duration,
}

impl CacheEntry {
    pub fn new(results: Vec<RankedFacility>, radius_km: f64, ttl: Duration, now: Instant) -> Self {
        Self {
            results,
            radius_km,
            inserted_at: now,
            ttl,
        }
    }

    /// An entry is live for exactly `ttl` after insertion.
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.inserted_at) >= self.ttl
    }
}

/// A cache hit.
#[derive(Debug, Clone)]
pub struct CachedSearch {
    pub results: Vec<RankedFacility>,
    /// Radius the cached results were computed for, which may differ from
    /// the radius of the request that hit them
    pub radius_km: f64,
    /// Time since the entry was stored
    pub age: Duration,
}
