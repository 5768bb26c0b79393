//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[provider]
; Overpass API interpreter endpoint used to look up hospitals and clinics
endpoint = {}
; Upstream request timeout in seconds (default: 30)
; When exceeded, built-in demo facilities are returned instead
timeout = {}
; User-Agent header sent with upstream requests
user_agent = {}

[search]
; Radius in kilometres used when none is given (default: 20)
default_radius_km = {}
; Maximum number of ranked results per search (default: 30)
max_results = {}
; Upstream fetch radius as a multiple of the search radius (default: 2)
fetch_buffer_factor = {}
; Kilometres per degree for bounding-box queries (default: 111)
km_per_degree = {}

[cache]
; Seconds a search result stays cached (default: 1200, 0 disables caching)
ttl = {}
; Decimal places used to round coordinates into cache cells (default: 2, ~1.1 km)
coordinate_precision = {}
; Seconds between sweeps that drop expired entries (default: 600)
sweep_interval = {}

[logging]
; Directory for log files (default: logs, relative to the working directory)
directory = {}
; Log file name, cleared at the start of each session
file = {}
"#,
        config.provider.endpoint,
        config.provider.timeout,
        config.provider.user_agent,
        config.search.default_radius_km,
        config.search.max_results,
        config.search.fetch_buffer_factor,
        config.search.km_per_degree,
        config.cache.ttl,
        config.cache.coordinate_precision,
        config.cache.sweep_interval,
        path_to_string(&config.logging.directory),
        config.logging.file,
    )
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ini::Ini;

    #[test]
    fn test_output_is_valid_ini() {
        let content = to_config_string(&ConfigFile::default());
        let ini = Ini::load_from_str(&content).unwrap();

        assert_eq!(ini.get_from(Some("search"), "default_radius_km"), Some("20"));
        assert_eq!(ini.get_from(Some("search"), "max_results"), Some("30"));
        assert_eq!(ini.get_from(Some("cache"), "ttl"), Some("1200"));
        assert_eq!(ini.get_from(Some("logging"), "file"), Some("carefinder.log"));
    }

    #[test]
    fn test_round_trip_through_parser() {
        let mut config = ConfigFile::default();
        config.search.km_per_degree = 111.32;
        config.cache.ttl = 0;

        let ini = Ini::load_from_str(&to_config_string(&config)).unwrap();
        let parsed = crate::config::parser::parse_ini(&ini).unwrap();
        assert_eq!(parsed, config);
    }
}
