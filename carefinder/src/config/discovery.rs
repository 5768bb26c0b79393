//! Runtime configuration for the discovery pipeline.

use std::time::Duration;

use super::defaults::*;
use super::settings::ConfigFile;

/// Configuration for facility discovery.
///
/// Groups the search, cache and provider parameters the orchestrator needs,
/// providing sensible defaults while allowing customization.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use carefinder::config::DiscoveryConfig;
///
/// // Using defaults
/// let config = DiscoveryConfig::default();
/// assert_eq!(config.default_radius_km(), 20.0);
/// assert_eq!(config.max_results(), 30);
/// assert_eq!(config.cache_ttl(), Duration::from_secs(1200));
///
/// // Custom configuration
/// let config = DiscoveryConfig::new()
///     .with_max_results(10)
///     .with_cache_ttl(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscoveryConfig {
    default_radius_km: f64,
    max_results: usize,
    fetch_buffer_factor: f64,
    km_per_degree: f64,
    cache_ttl: Duration,
    coordinate_precision: usize,
    cache_sweep_interval: Duration,
    provider_timeout: Duration,
}

impl DiscoveryConfig {
    /// Create a new discovery configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the radius used by `find_nearby`. Default: 20 km.
    pub fn with_default_radius_km(mut self, radius_km: f64) -> Self {
        self.default_radius_km = radius_km;
        self
    }

    /// Set the maximum number of results per search. Default: 30.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Set the upstream fetch radius multiplier. Default: 2.
    ///
    /// Fetching a wider area than is queried keeps facilities near the
    /// bounding-box corners in the candidate set.
    pub fn with_fetch_buffer_factor(mut self, factor: f64) -> Self {
        self.fetch_buffer_factor = factor;
        self
    }

    pub fn with_km_per_degree(mut self, km_per_degree: f64) -> Self {
        self.km_per_degree = km_per_degree;
        self
    }

    /// Set the cache entry lifetime. Default: 20 minutes.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Set the number of decimals in cache keys. Default: 2.
    pub fn with_coordinate_precision(mut self, precision: usize) -> Self {
        self.coordinate_precision = precision.min(MAX_COORDINATE_PRECISION);
        self
    }

    /// Set how often expired cache entries are swept. Default: 10 minutes.
    pub fn with_cache_sweep_interval(mut self, interval: Duration) -> Self {
        self.cache_sweep_interval = interval;
        self
    }

    /// Set the upstream timeout. Default: 30 seconds.
    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    pub fn default_radius_km(&self) -> f64 {
        self.default_radius_km
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn fetch_buffer_factor(&self) -> f64 {
        self.fetch_buffer_factor
    }

    pub fn km_per_degree(&self) -> f64 {
        self.km_per_degree
    }

    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    pub fn coordinate_precision(&self) -> usize {
        self.coordinate_precision
    }

    pub fn cache_sweep_interval(&self) -> Duration {
        self.cache_sweep_interval
    }

    pub fn provider_timeout(&self) -> Duration {
        self.provider_timeout
    }

    /// Upstream fetch radius in metres for a search of `radius_km`.
    pub fn fetch_radius_m(&self, radius_km: f64) -> f64 {
        radius_km * 1000.0 * self.fetch_buffer_factor
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            default_radius_km: DEFAULT_RADIUS_KM,
            max_results: DEFAULT_MAX_RESULTS,
            fetch_buffer_factor: DEFAULT_FETCH_BUFFER_FACTOR,
            km_per_degree: DEFAULT_KM_PER_DEGREE,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            coordinate_precision: DEFAULT_COORDINATE_PRECISION,
            cache_sweep_interval: Duration::from_secs(DEFAULT_CACHE_SWEEP_INTERVAL_SECS),
            provider_timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
        }
    }
}

impl From<&ConfigFile> for DiscoveryConfig {
    fn from(file: &ConfigFile) -> Self {
        Self {
            default_radius_km: file.search.default_radius_km,
            max_results: file.search.max_results,
            fetch_buffer_factor: file.search.fetch_buffer_factor,
            km_per_degree: file.search.km_per_degree,
            cache_ttl: Duration::from_secs(file.cache.ttl),
            coordinate_precision: file.cache.coordinate_precision,
            cache_sweep_interval: Duration::from_secs(file.cache.sweep_interval),
            provider_timeout: Duration::from_secs(file.provider.timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.default_radius_km(), 20.0);
        assert_eq!(config.max_results(), 30);
        assert_eq!(config.fetch_buffer_factor(), 2.0);
        assert_eq!(config.km_per_degree(), 111.0);
        assert_eq!(config.cache_ttl(), Duration::from_secs(1200));
        assert_eq!(config.coordinate_precision(), 2);
        assert_eq!(config.cache_sweep_interval(), Duration::from_secs(600));
        assert_eq!(config.provider_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_fetch_radius_is_buffered() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.fetch_radius_m(20.0), 40_000.0);
        assert_eq!(
            config.with_fetch_buffer_factor(1.5).fetch_radius_m(10.0),
            15_000.0
        );
    }

    #[test]
    fn test_builder() {
        let config = DiscoveryConfig::new()
            .with_default_radius_km(5.0)
            .with_max_results(3)
            .with_coordinate_precision(42)
            .with_provider_timeout(Duration::from_millis(250));

        assert_eq!(config.default_radius_km(), 5.0);
        assert_eq!(config.max_results(), 3);
        assert_eq!(config.coordinate_precision(), MAX_COORDINATE_PRECISION);
        assert_eq!(config.provider_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_from_config_file() {
        let mut file = ConfigFile::default();
        file.cache.ttl = 90;
        file.cache.sweep_interval = 15;
        file.provider.timeout = 5;
        file.search.max_results = 12;

        let config = DiscoveryConfig::from(&file);
        assert_eq!(config.cache_ttl(), Duration::from_secs(90));
        assert_eq!(config.cache_sweep_interval(), Duration::from_secs(15));
        assert_eq!(config.provider_timeout(), Duration::from_secs(5));
        assert_eq!(config.max_results(), 12);
    }
}
