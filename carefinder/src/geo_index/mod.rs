//! Spatial index over fetched facilities.
//!
//! The [`SpatialIndex`] is an in-memory R-tree (via `rstar`) of facility
//! positions keyed by `[lng, lat]`. It is rebuilt wholesale from each fetch
//! and answers bounding-box range queries.
//!
//! # Ownership
//!
//! An index is a plain value owned by one request. The discovery pipeline
//! builds a fresh index per cache miss, so a concurrent request for another
//! region can never rebuild it between this request's rebuild and query.
//!
//! # Usage
//!
//! ```
//! use carefinder::coord::BoundingBox;
//! use carefinder::geo_index::SpatialIndex;
//!
//! let mut index = SpatialIndex::new();
//! assert!(index.query(&BoundingBox::new(0.0, 0.0, 1.0, 1.0)).is_empty());
//!
//! index.rebuild(Vec::new());
//! assert!(index.is_built());
//! ```

mod index;

pub use index::SpatialIndex;
