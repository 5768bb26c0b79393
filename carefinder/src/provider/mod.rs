//! Facility data provider abstraction
//!
//! This module provides the traits and implementations for fetching facility
//! records from an external geodata service (OpenStreetMap's Overpass API),
//! plus the fallback layer that keeps discovery available when that service
//! is not.
//!
//! # Layers
//!
//! ```text
//! FallbackProvider (timeout + synthetic fallback, never fails)
//!     └── FacilitySource trait → OverpassProvider
//!             └── AsyncHttpClient trait → AsyncReqwestClient
//! ```
//!
//! ```no_run
//! use std::time::Duration;
//! use carefinder::provider::{
//!     AsyncReqwestClient, FallbackProvider, OverpassProvider, DEFAULT_OVERPASS_ENDPOINT,
//! };
//!
//! let http_client = AsyncReqwestClient::new(Duration::from_secs(30)).unwrap();
//! let source = OverpassProvider::new(http_client, DEFAULT_OVERPASS_ENDPOINT);
//! let provider = FallbackProvider::new(source, Duration::from_secs(30));
//! ```

mod fallback;
mod http;
mod overpass;
mod types;

pub use fallback::{fallback_facilities, FallbackProvider, FetchOutcome, FALLBACK_COUNT};
pub use http::{AsyncHttpClient, AsyncReqwestClient, DEFAULT_USER_AGENT};
pub use overpass::{
    build_address, build_query, parse_response, OverpassProvider, DEFAULT_OVERPASS_ENDPOINT,
};
pub use types::{FacilitySource, ProviderError};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
