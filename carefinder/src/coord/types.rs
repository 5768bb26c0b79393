//! Coordinate type definitions

use std::fmt;

/// WGS84 valid latitude range
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// WGS84 valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Mean Earth radius used by the Haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Approximate length of one degree of latitude.
pub const KM_PER_DEGREE: f64 = 111.0;

/// A validated WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude (-90.0 to 90.0)
    pub lat: f64,
    /// Longitude (-180.0 to 180.0)
    pub lng: f64,
}

impl GeoPoint {
    /// Creates a point, rejecting non-finite or out-of-range values.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordError> {
        if !lat.is_finite() || !(MIN_LAT..=MAX_LAT).contains(&lat) {
            return Err(CoordError::InvalidLatitude(lat));
        }
        if !lng.is_finite() || !(MIN_LON..=MAX_LON).contains(&lng) {
            return Err(CoordError::InvalidLongitude(lng));
        }
        Ok(Self { lat, lng })
    }

    /// Great-circle distance to another point in kilometres (1 decimal).
    #[inline]
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        super::distance_km(self.lat, self.lng, other.lat, other.lng)
    }
}

/// Axis-aligned rectangle in (lat, lng) space.
///
/// A box built with [`BoundingBox::around`] may extend past ±180° longitude
/// near the antimeridian; [`BoundingBox::segments`] splits it back into
/// in-range pieces for index queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, min_lng: f64, max_lat: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            min_lng,
            max_lat,
            max_lng,
        }
    }

    /// Square box of `radius_km / km_per_degree` degrees on each side of `center`.
    ///
    /// Latitude is clamped to the valid range; longitude is left unwrapped.
    pub fn around(center: GeoPoint, radius_km: f64, km_per_degree: f64) -> Self {
        let buffer = radius_km / km_per_degree;
        Self {
            min_lat: (center.lat - buffer).max(MIN_LAT),
            min_lng: center.lng - buffer,
            max_lat: (center.lat + buffer).min(MAX_LAT),
            max_lng: center.lng + buffer,
        }
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        self.segments().iter().any(|segment| {
            (segment.min_lat..=segment.max_lat).contains(&point.lat)
                && (segment.min_lng..=segment.max_lng).contains(&point.lng)
        })
    }

    /// Splits the box into at most two boxes that lie within ±180° longitude.
    pub fn segments(&self) -> Vec<BoundingBox> {
        if self.max_lng - self.min_lng >= MAX_LON - MIN_LON {
            return vec![Self::new(self.min_lat, MIN_LON, self.max_lat, MAX_LON)];
        }

        let mut segments = Vec::with_capacity(2);
        if self.min_lng < MIN_LON {
            segments.push(Self::new(
                self.min_lat,
                self.min_lng + 360.0,
                self.max_lat,
                MAX_LON,
            ));
            segments.push(Self::new(self.min_lat, MIN_LON, self.max_lat, self.max_lng));
        } else if self.max_lng > MAX_LON {
            segments.push(Self::new(self.min_lat, self.min_lng, self.max_lat, MAX_LON));
            segments.push(Self::new(
                self.min_lat,
                MIN_LON,
                self.max_lat,
                self.max_lng - 360.0,
            ));
        } else {
            segments.push(*self);
        }
        segments
    }
}

/// Errors that can occur during coordinate validation.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordError {
    /// Latitude is non-finite or outside -90.0 to 90.0
    InvalidLatitude(f64),
    /// Longitude is non-finite or outside -180.0 to 180.0
    InvalidLongitude(f64),
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::InvalidLatitude(lat) => {
                write!(
                    f,
                    "Invalid latitude: {} (must be between {} and {})",
                    lat, MIN_LAT, MAX_LAT
                )
            }
            CoordError::InvalidLongitude(lng) => {
                write!(
                    f,
                    "Invalid longitude: {} (must be between {} and {})",
                    lng, MIN_LON, MAX_LON
                )
            }
        }
    }
}

impl std::error::Error for CoordError {}
