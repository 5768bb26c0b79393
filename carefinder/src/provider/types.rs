//! Provider types and traits

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::coord::GeoPoint;
use crate::facility::FacilityRecord;

/// Errors that can occur while fetching facilities upstream.
///
/// These never reach callers of the discovery engine; the
/// [`FallbackProvider`](super::FallbackProvider) absorbs them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// HTTP request failed or returned a non-success status
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Response body could not be parsed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request did not complete within the configured timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Upstream answered but had no usable facilities
    #[error("No facilities returned")]
    Empty,
}

/// Upstream source of facility records.
///
/// Implementors query an external geodata service for hospitals and clinics
/// around a point. Errors are returned as-is; fallback handling lives in
/// [`FallbackProvider`](super::FallbackProvider).
pub trait FacilitySource: Send + Sync {
    /// Fetches facilities within `radius_m` metres of `center`.
    ///
    /// Records without valid coordinates must already be dropped.
    fn fetch(
        &self,
        center: GeoPoint,
        radius_m: f64,
    ) -> impl Future<Output = Result<Vec<FacilityRecord>, ProviderError>> + Send;

    /// Returns the source's name for logging and identification.
    fn name(&self) -> &str;
}
