//! Geographic math module
//!
//! Great-circle distance, coordinate validation, and the bounding boxes used
//! for spatial range queries.

mod types;


pub use types::{
    BoundingBox, CoordError, GeoPoint, EARTH_RADIUS_KM, KM_PER_DEGREE, MAX_LAT, MAX_LON, MIN_LAT,
    MIN_LON,
};

/// Great-circle distance between two positions using the Haversine formula.
///
/// # Arguments
///
/// * `lat1`, `lon1` - First position in decimal degrees
/// * `lat2`, `lon2` - Second position in decimal degrees
///
/// # Returns
///
/// Distance in kilometres rounded to one decimal place. NaN inputs yield NaN.
#[inline]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 for near-antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    round_to(EARTH_RADIUS_KM * c, 1)
}

/// Returns true if both values are finite and within WGS84 ranges.
#[inline]
pub fn is_valid_coordinate(lat: f64, lng: f64) -> bool {
    GeoPoint::new(lat, lng).is_ok()
}

/// Rounds `value` to `decimals` decimal places.
#[inline]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
