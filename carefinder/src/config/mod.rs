//! Configuration for carefinder.
//!
//! Two layers:
//!
//! - [`ConfigFile`]: the user's `~/.carefinder/config.ini`, one settings
//!   struct per INI section, loaded over built-in defaults.
//! - [`DiscoveryConfig`]: the runtime parameters the discovery pipeline
//!   reads, built from a `ConfigFile` or directly with `with_*` methods.
//!
//! # Example
//!
//! ```
//! use carefinder::config::{ConfigFile, DiscoveryConfig};
//!
//! let file = ConfigFile::default();
//! let config = DiscoveryConfig::from(&file).with_max_results(10);
//! assert_eq!(config.max_results(), 10);
//! ```

mod defaults;
mod discovery;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use discovery::DiscoveryConfig;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{CacheSettings, ConfigFile, LoggingSettings, ProviderSettings, SearchSettings};
