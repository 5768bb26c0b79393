//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::defaults::MAX_COORDINATE_PRECISION;
use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
/// Empty values keep the default.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [provider] section
    if let Some(section) = ini.section(Some("provider")) {
        if let Some(v) = non_empty(section.get("endpoint")) {
            if !(v.starts_with("http://") || v.starts_with("https://")) {
                return Err(invalid(
                    "provider",
                    "endpoint",
                    v,
                    "must be an http:// or https:// URL",
                ));
            }
            config.provider.endpoint = v.to_string();
        }
        if let Some(v) = non_empty(section.get("timeout")) {
            config.provider.timeout = match v.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(invalid(
                        "provider",
                        "timeout",
                        v,
                        "must be a positive integer (seconds)",
                    ))
                }
            };
        }
        if let Some(v) = non_empty(section.get("user_agent")) {
            config.provider.user_agent = v.to_string();
        }
    }

    // [search] section
    if let Some(section) = ini.section(Some("search")) {
        if let Some(v) = non_empty(section.get("default_radius_km")) {
            config.search.default_radius_km = parse_f64_above(
                "search",
                "default_radius_km",
                v,
                0.0,
                "must be a positive number (kilometres)",
            )?;
        }
        if let Some(v) = non_empty(section.get("max_results")) {
            config.search.max_results = match v.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(invalid(
                        "search",
                        "max_results",
                        v,
                        "must be a positive integer",
                    ))
                }
            };
        }
        if let Some(v) = non_empty(section.get("fetch_buffer_factor")) {
            let factor = v.parse::<f64>().ok().filter(|f| f.is_finite() && *f >= 1.0);
            config.search.fetch_buffer_factor = factor.ok_or_else(|| {
                invalid(
                    "search",
                    "fetch_buffer_factor",
                    v,
                    "must be a number of at least 1.0",
                )
            })?;
        }
        if let Some(v) = non_empty(section.get("km_per_degree")) {
            config.search.km_per_degree = parse_f64_above(
                "search",
                "km_per_degree",
                v,
                0.0,
                "must be a positive number",
            )?;
        }
    }

    // [cache] section
    if let Some(section) = ini.section(Some("cache")) {
        if let Some(v) = non_empty(section.get("ttl")) {
            config.cache.ttl = v.parse().map_err(|_| {
                invalid(
                    "cache",
                    "ttl",
                    v,
                    "must be a non-negative integer (seconds)",
                )
            })?;
        }
        if let Some(v) = non_empty(section.get("coordinate_precision")) {
            config.cache.coordinate_precision = match v.parse::<usize>() {
                Ok(p) if p <= MAX_COORDINATE_PRECISION => p,
                _ => {
                    return Err(invalid(
                        "cache",
                        "coordinate_precision",
                        v,
                        &format!("must be an integer from 0 to {}", MAX_COORDINATE_PRECISION),
                    ))
                }
            };
        }
        if let Some(v) = non_empty(section.get("sweep_interval")) {
            config.cache.sweep_interval = v.parse().map_err(|_| {
                invalid(
                    "cache",
                    "sweep_interval",
                    v,
                    "must be a non-negative integer (seconds)",
                )
            })?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = non_empty(section.get("directory")) {
            config.logging.directory = expand_tilde(v);
        }
        if let Some(v) = non_empty(section.get("file")) {
            config.logging.file = v.to_string();
        }
    }

    Ok(config)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_f64_above(
    section: &str,
    key: &str,
    value: &str,
    min_exclusive: f64,
    reason: &str,
) -> Result<f64, ConfigFileError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > min_exclusive)
        .ok_or_else(|| invalid(section, key, value, reason))
}

/// Expand a leading `~/` to the user's home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;

    fn parse(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let ini = Ini::load_from_str(content).unwrap();
        parse_ini(&ini)
    }

    fn assert_invalid(content: &str, expected_key: &str) {
        match parse(content) {
            Err(ConfigFileError::InvalidValue { key, .. }) => assert_eq!(key, expected_key),
            other => panic!("expected InvalidValue for {}, got {:?}", expected_key, other),
        }
    }

    #[test]
    fn test_empty_ini_gives_defaults() {
        assert_eq!(parse("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_parse_all_sections() {
        let config = parse(
            r#"
[provider]
endpoint = https://overpass.example.org/api/interpreter
timeout = 10
user_agent = test-agent/1.0

[search]
default_radius_km = 5.5
max_results = 10
fetch_buffer_factor = 3
km_per_degree = 111.32

[cache]
ttl = 60
coordinate_precision = 3
sweep_interval = 30

[logging]
directory = /var/log/carefinder
file = search.log
"#,
        )
        .unwrap();

        assert_eq!(
            config.provider.endpoint,
            "https://overpass.example.org/api/interpreter"
        );
        assert_eq!(config.provider.timeout, 10);
        assert_eq!(config.provider.user_agent, "test-agent/1.0");
        assert_eq!(config.search.default_radius_km, 5.5);
        assert_eq!(config.search.max_results, 10);
        assert_eq!(config.search.fetch_buffer_factor, 3.0);
        assert_eq!(config.search.km_per_degree, 111.32);
        assert_eq!(config.cache.ttl, 60);
        assert_eq!(config.cache.coordinate_precision, 3);
        assert_eq!(config.cache.sweep_interval, 30);
        assert_eq!(config.logging.directory, PathBuf::from("/var/log/carefinder"));
        assert_eq!(config.logging.file, "search.log");
    }

    #[test]
    fn test_empty_values_keep_defaults() {
        let config = parse("[provider]\nendpoint =\ntimeout = \n").unwrap();
        assert_eq!(config.provider.endpoint, DEFAULT_PROVIDER_ENDPOINT);
        assert_eq!(config.provider.timeout, DEFAULT_PROVIDER_TIMEOUT_SECS);
    }

    #[test]
    fn test_zero_ttl_allowed() {
        assert_eq!(parse("[cache]\nttl = 0\n").unwrap().cache.ttl, 0);
    }

    #[test]
    fn test_invalid_values() {
        assert_invalid("[provider]\nendpoint = ftp://example.org\n", "endpoint");
        assert_invalid("[provider]\ntimeout = 0\n", "timeout");
        assert_invalid("[provider]\ntimeout = soon\n", "timeout");
        assert_invalid("[search]\ndefault_radius_km = -1\n", "default_radius_km");
        assert_invalid("[search]\ndefault_radius_km = NaN\n", "default_radius_km");
        assert_invalid("[search]\nmax_results = 0\n", "max_results");
        assert_invalid("[search]\nfetch_buffer_factor = 0.5\n", "fetch_buffer_factor");
        assert_invalid("[search]\nkm_per_degree = 0\n", "km_per_degree");
        assert_invalid("[cache]\nttl = -5\n", "ttl");
        assert_invalid("[cache]\ncoordinate_precision = 9\n", "coordinate_precision");
        assert_invalid("[cache]\nsweep_interval = soon\n", "sweep_interval");
    }

    #[test]
    fn test_invalid_value_message() {
        let err = parse("[cache]\nttl = abc\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: cache.ttl = 'abc' - must be a non-negative integer (seconds)"
        );
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/logs"), home.join("logs"));
        }
    }
}
