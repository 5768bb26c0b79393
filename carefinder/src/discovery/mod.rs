//! Facility discovery.
//!
//! [`DiscoveryOrchestrator`] is the single query entry point of the library:
//!
//! ```text
//! find_facilities(lat, lng, radius_km)
//!     │
//!     ├─ validate ───────────────▶ DiscoveryError::InvalidInput
//!     ├─ SearchCache hit ────────▶ cached results
//!     ▼
//! FallbackProvider::fetch(center, radius × 1000 × buffer)
//!     ▼
//! SpatialIndex (fresh per request) ─▶ query(bounding box)
//!     │   (fallback records skip the index)
//!     ▼
//! RankingEngine::rank ─▶ top N ─▶ SearchCache::set ─▶ results
//! ```

mod error;
mod orchestrator;

pub use error::DiscoveryError;
pub use orchestrator::DiscoveryOrchestrator;
