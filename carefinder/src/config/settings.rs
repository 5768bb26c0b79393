//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Upstream facility provider settings
    pub provider: ProviderSettings,
    /// Search and ranking settings
    pub search: SearchSettings,
    /// Result cache settings
    pub cache: CacheSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Provider configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    /// Overpass API interpreter URL
    pub endpoint: String,
    /// Timeout in seconds for upstream requests.
    pub timeout: u64,
    pub user_agent: String,
}

/// Search configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    /// Radius used when the caller does not give one
    pub default_radius_km: f64,
    /// Maximum results per search
    pub max_results: usize,
    /// Upstream fetch radius as a multiple of the search radius
    pub fetch_buffer_factor: f64,
    pub km_per_degree: f64,
}

/// Cache configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSettings {
    /// Entry lifetime in seconds
    pub ttl: u64,
    /// Decimal places of the rounded coordinates in cache keys
    pub coordinate_precision: usize,
    /// Seconds between sweeps of expired entries
    pub sweep_interval: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    pub file: String,
}
