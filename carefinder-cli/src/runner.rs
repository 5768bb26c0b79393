//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization and orchestrator
//! construction so command handlers stay small.

use std::path::Path;
use std::time::Duration;

use carefinder::config::{ConfigFile, DiscoveryConfig};
use carefinder::discovery::DiscoveryOrchestrator;
use carefinder::logging::{init_logging, LoggingGuard};
use carefinder::provider::{AsyncReqwestClient, OverpassProvider};
use tracing::info;

use crate::error::CliError;

/// Orchestrator type used by the CLI.
pub type CliOrchestrator = DiscoveryOrchestrator<OverpassProvider<AsyncReqwestClient>>;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// Reads `config_path` when given, otherwise `~/.carefinder/config.ini`.
    /// A missing file means defaults.
    pub fn new(config_path: Option<&Path>) -> Result<Self, CliError> {
        let config = match config_path {
            Some(path) => ConfigFile::load_from(path)?,
            None => ConfigFile::load()?,
        };

        let logging_guard = init_logging(&config.logging.directory, &config.logging.file)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("carefinder v{}", carefinder::VERSION);
        info!(
            endpoint = %self.config.provider.endpoint,
            "carefinder CLI: {} command", command
        );
    }

    /// Build a discovery orchestrator over the configured Overpass endpoint.
    pub fn create_orchestrator(&self) -> Result<CliOrchestrator, CliError> {
        let discovery = DiscoveryConfig::from(&self.config);
        let client = AsyncReqwestClient::with_user_agent(
            Duration::from_secs(self.config.provider.timeout),
            &self.config.provider.user_agent,
        )
        .map_err(CliError::HttpClient)?;
        let source = OverpassProvider::new(client, self.config.provider.endpoint.clone());

        Ok(DiscoveryOrchestrator::new(source, discovery))
    }
}
