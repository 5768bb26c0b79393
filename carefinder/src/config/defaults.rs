//! Default values and constants for all configuration settings.
//!
//! Contains all `DEFAULT_*` constants and the `ConfigFile::default()`
//! implementation.

use std::path::PathBuf;

use super::settings::*;
use crate::coord::KM_PER_DEGREE;
use crate::provider::{DEFAULT_OVERPASS_ENDPOINT, DEFAULT_USER_AGENT};

// =============================================================================
// Provider
// =============================================================================

/// Default facility provider endpoint.
pub const DEFAULT_PROVIDER_ENDPOINT: &str = DEFAULT_OVERPASS_ENDPOINT;

/// Default upstream request timeout in seconds.
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

/// Default `User-Agent` sent upstream.
pub const DEFAULT_PROVIDER_USER_AGENT: &str = DEFAULT_USER_AGENT;

// =============================================================================
// Search
// =============================================================================

/// Default search radius in kilometres.
pub const DEFAULT_RADIUS_KM: f64 = 20.0;

/// Default number of results returned per search.
pub const DEFAULT_MAX_RESULTS: usize = 30;

/// Upstream fetch radius as a multiple of the search radius.
pub const DEFAULT_FETCH_BUFFER_FACTOR: f64 = 2.0;

/// Kilometres per degree used for bounding boxes.
pub const DEFAULT_KM_PER_DEGREE: f64 = KM_PER_DEGREE;

// =============================================================================
// Cache
// =============================================================================

/// Default search cache TTL in seconds (20 minutes).
pub const DEFAULT_CACHE_TTL_SECS: u64 = 1200;

/// Default number of decimals in cache keys (~1.1 km cells).
pub const DEFAULT_COORDINATE_PRECISION: usize = 2;

/// Default interval between expired-entry sweeps in seconds.
pub const DEFAULT_CACHE_SWEEP_INTERVAL_SECS: u64 = 600;

/// Largest accepted cache key precision.
pub const MAX_COORDINATE_PRECISION: usize = 6;

// =============================================================================
// Logging
// =============================================================================

/// Default log directory, relative to the working directory.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "carefinder.log";

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            provider: ProviderSettings {
                endpoint: DEFAULT_PROVIDER_ENDPOINT.to_string(),
                timeout: DEFAULT_PROVIDER_TIMEOUT_SECS,
                user_agent: DEFAULT_PROVIDER_USER_AGENT.to_string(),
            },
            search: SearchSettings {
                default_radius_km: DEFAULT_RADIUS_KM,
                max_results: DEFAULT_MAX_RESULTS,
                fetch_buffer_factor: DEFAULT_FETCH_BUFFER_FACTOR,
                km_per_degree: DEFAULT_KM_PER_DEGREE,
            },
            cache: CacheSettings {
                ttl: DEFAULT_CACHE_TTL_SECS,
                coordinate_precision: DEFAULT_COORDINATE_PRECISION,
                sweep_interval: DEFAULT_CACHE_SWEEP_INTERVAL_SECS,
            },
            logging: LoggingSettings {
                directory: PathBuf::from(DEFAULT_LOG_DIR),
                file: DEFAULT_LOG_FILE.to_string(),
            },
        }
    }
}
