//! carefinder - nearby healthcare facility discovery
//!
//! Given a coordinate and radius, carefinder fetches hospitals and clinics
//! from OpenStreetMap's Overpass API, indexes them spatially, ranks them by
//! proximity, rating and pediatric specialty, and caches the ranked results
//! per rounded-coordinate cell.
//!
//! # High-Level API
//!
//! ```no_run
//! use std::time::Duration;
//! use carefinder::config::DiscoveryConfig;
//! use carefinder::discovery::DiscoveryOrchestrator;
//! use carefinder::provider::{AsyncReqwestClient, OverpassProvider, DEFAULT_OVERPASS_ENDPOINT};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DiscoveryConfig::default();
//! let client = AsyncReqwestClient::new(config.provider_timeout())?;
//! let source = OverpassProvider::new(client, DEFAULT_OVERPASS_ENDPOINT);
//! let orchestrator = DiscoveryOrchestrator::new(source, config);
//!
//! let results = orchestrator.find_facilities(40.7128, -74.0060, 20.0).await?;
//! for facility in results {
//!     println!("{} ({:.1} km)", facility.name(), facility.distance_km);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod coord;
pub mod discovery;
pub mod facility;
pub mod geo_index;
pub mod logging;
pub mod provider;
pub mod ranking;

/// Version of the carefinder library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
