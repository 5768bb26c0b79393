//! Search-result cache.
//!
//! Ranked results are cached per rounded-coordinate cell so repeated
//! lookups near the same point skip the upstream fetch for the TTL window
//! (20 minutes by default).

mod memory;
mod stats;
mod types;

pub use memory::SearchCache;
pub use stats::CacheStats;
pub use types::{CacheKey, CachedSearch};
