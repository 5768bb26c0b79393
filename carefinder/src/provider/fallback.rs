//! Availability wrapper around a [`FacilitySource`].
//!
//! The discovery engine must never report "no results" just because the
//! upstream geodata service is down. [`FallbackProvider`] enforces a timeout
//! on the source and, on error, timeout or an empty result, substitutes a
//! small synthetic dataset anchored to the query point.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::{debug, warn};

use crate::coord::{GeoPoint, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};
use crate::facility::{FacilityRecord, FacilityType, SPECIALITY_TAG};
use crate::provider::{FacilitySource, ProviderError};

/// Number of records in the synthetic fallback set.
pub const FALLBACK_COUNT: usize = 4;

/// (id, name, lat offset, lng offset, type, pediatric, address, rating)
type FallbackTemplate = (
    &'static str,
    &'static str,
    f64,
    f64,
    FacilityType,
    bool,
    &'static str,
    f64,
);

const FALLBACK_TEMPLATES: [FallbackTemplate; FALLBACK_COUNT] = [
    (
        "fallback-1",
        "Rainbow Children's Hospital (Demo)",
        0.01,
        0.01,
        FacilityType::Hospital,
        true,
        "123 Health Valley, Near City Center",
        4.8,
    ),
    (
        "fallback-2",
        "Sunrise Pediatric Clinic (Demo)",
        -0.005,
        0.005,
        FacilityType::Clinic,
        true,
        "45 Green Park Avenue",
        4.5,
    ),
    (
        "fallback-3",
        "City General Hospital (Demo)",
        0.015,
        -0.01,
        FacilityType::Hospital,
        false,
        "789 Main Road, Downtown",
        4.2,
    ),
    (
        "fallback-4",
        "Little Care Polyclinic (Demo)",
        -0.01,
        -0.015,
        FacilityType::Clinic,
        true,
        "12 Sunshine Lane",
        4.7,
    ),
];

/// Builds the deterministic fallback dataset around `center`.
///
/// Every record lies within 0.015° of `center` on each axis (less near the
/// poles, where latitude is clamped).
pub fn fallback_facilities(center: GeoPoint) -> Vec<FacilityRecord> {
    FALLBACK_TEMPLATES
        .iter()
        .map(
            |&(id, name, d_lat, d_lng, facility_type, pediatric, address, rating)| {
                let mut tags = BTreeMap::new();
                if pediatric {
                    tags.insert(SPECIALITY_TAG.to_string(), "pediatrics".to_string());
                }
                FacilityRecord {
                    id: id.to_string(),
                    name: name.to_string(),
                    lat: (center.lat + d_lat).clamp(MIN_LAT, MAX_LAT),
                    lng: wrap_longitude(center.lng + d_lng),
                    facility_type,
                    tags,
                    address: address.to_string(),
                    rating: Some(rating),
                }
            },
        )
        .collect()
}

fn wrap_longitude(lng: f64) -> f64 {
    if lng > MAX_LON {
        lng - 360.0
    } else if lng < MIN_LON {
        lng + 360.0
    } else {
        lng
    }
}

/// Result of a fallback-protected fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Records returned by the upstream source
    Upstream(Vec<FacilityRecord>),
    /// Synthetic records substituted for a failed or empty fetch
    Fallback {
        records: Vec<FacilityRecord>,
        reason: String,
    },
}

impl FetchOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, FetchOutcome::Fallback { .. })
    }

    pub fn into_records(self) -> Vec<FacilityRecord> {
        match self {
            FetchOutcome::Upstream(records) => records,
            FetchOutcome::Fallback { records, .. } => records,
        }
    }
}

/// Facility provider that never fails.
///
/// Wraps a [`FacilitySource`] with an explicit timeout. Any error, timeout
/// or empty result is logged and replaced by [`fallback_facilities`].
pub struct FallbackProvider<S: FacilitySource> {
    source: S,
    timeout: Duration,
}

impl<S: FacilitySource> FallbackProvider<S> {
    pub fn new(source: S, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    /// Returns the wrapped source.
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetches facilities within `radius_m` metres of `center`.
    pub async fn fetch(&self, center: GeoPoint, radius_m: f64) -> FetchOutcome {
        let result = match tokio::time::timeout(self.timeout, self.source.fetch(center, radius_m))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(self.timeout)),
        };

        let reason = match result {
            Ok(records) if !records.is_empty() => {
                debug!(
                    source = self.source.name(),
                    count = records.len(),
                    "Facility fetch succeeded"
                );
                return FetchOutcome::Upstream(records);
            }
            Ok(_) => ProviderError::Empty.to_string(),
            Err(e) => e.to_string(),
        };

        warn!(
            source = self.source.name(),
            lat = center.lat,
            lng = center.lng,
            reason = %reason,
            "Facility fetch failed, serving fallback data"
        );

        FetchOutcome::Fallback {
            records: fallback_facilities(center),
            reason,
        }
    }
}
