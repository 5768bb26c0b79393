//! Discovery error types.

use thiserror::Error;

/// Errors surfaced to callers of the discovery pipeline.
///
/// Only input validation fails a search. Upstream problems are absorbed and
/// answered with fallback data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiscoveryError {
    /// Query coordinates are missing, non-finite or out of range
    #[error("Invalid coordinates ({lat}, {lng}): {reason}")]
    InvalidInput { lat: f64, lng: f64, reason: String },

    /// Search radius is negative or non-finite
    #[error("Invalid search radius {radius_km} km: {reason}")]
    InvalidRadius { radius_km: f64, reason: String },
}

impl DiscoveryError {
    /// Whether the error was caused by the caller's input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            DiscoveryError::InvalidInput { .. } | DiscoveryError::InvalidRadius { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = DiscoveryError::InvalidInput {
            lat: 91.0,
            lng: 200.0,
            reason: "Invalid latitude: 91".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid coordinates (91, 200): Invalid latitude: 91"
        );

        let err = DiscoveryError::InvalidRadius {
            radius_km: -1.0,
            reason: "must not be negative".to_string(),
        };
        assert!(err.to_string().contains("-1 km"));
        assert!(err.is_invalid_input());
    }
}
