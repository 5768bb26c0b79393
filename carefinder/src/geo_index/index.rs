//! R-tree index over facility points.

use rstar::{RTree, RTreeObject, AABB};
use tracing::{debug, trace};

use crate::coord::BoundingBox;
use crate::facility::FacilityRecord;

/// A facility stored as a degenerate (point) box.
#[derive(Debug, Clone)]
struct IndexedFacility {
    /// `[lng, lat]`
    point: [f64; 2],
    /// Position in the rebuild input, used to keep query output stable
    seq: usize,
    record: FacilityRecord,
}

impl RTreeObject for IndexedFacility {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

/// Bounding-box index over the most recently loaded facility set.
pub struct SpatialIndex {
    tree: RTree<IndexedFacility>,
    built: bool,
}

impl std::fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("len", &self.tree.size())
            .field("built", &self.built)
            .finish_non_exhaustive()
    }
}

impl SpatialIndex {
    /// Create an empty, unbuilt index.
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            built: false,
        }
    }

    /// Create an index already loaded with `records`.
    pub fn from_records(records: Vec<FacilityRecord>) -> Self {
        let mut index = Self::new();
        index.rebuild(records);
        index
    }

    /// Discard the current contents and bulk-load `records`.
    ///
    /// Records with out-of-range coordinates are skipped.
    pub fn rebuild(&mut self, records: Vec<FacilityRecord>) {
        let total = records.len();
        let entries: Vec<IndexedFacility> = records
            .into_iter()
            .enumerate()
            .filter_map(|(seq, record)| {
                let position = record.position();
                if position.is_none() {
                    trace!(id = %record.id, "Skipping facility with invalid coordinates");
                }
                position.map(|p| IndexedFacility {
                    point: [p.lng, p.lat],
                    seq,
                    record,
                })
            })
            .collect();

        let indexed = entries.len();
        self.tree = RTree::bulk_load(entries);
        self.built = true;

        debug!(total = total, indexed = indexed, "Spatial index rebuilt");
    }

    /// All records whose point lies inside `bbox` (edges inclusive).
    ///
    /// Results keep the order in which records were loaded. Returns an empty
    /// list if the index has never been built.
    pub fn query(&self, bbox: &BoundingBox) -> Vec<FacilityRecord> {
        if !self.built {
            return Vec::new();
        }

        let mut hits: Vec<&IndexedFacility> = bbox
            .segments()
            .iter()
            .flat_map(|segment| {
                let envelope = AABB::from_corners(
                    [segment.min_lng, segment.min_lat],
                    [segment.max_lng, segment.max_lat],
                );
                self.tree.locate_in_envelope(&envelope).collect::<Vec<_>>()
            })
            .collect();

        hits.sort_by_key(|entry| entry.seq);
        hits.dedup_by_key(|entry| entry.seq);

        hits.into_iter().map(|entry| entry.record.clone()).collect()
    }

    /// Range query by explicit corner values.
    pub fn query_box(
        &self,
        min_lat: f64,
        min_lng: f64,
        max_lat: f64,
        max_lng: f64,
    ) -> Vec<FacilityRecord> {
        self.query(&BoundingBox::new(min_lat, min_lng, max_lat, max_lng))
    }

    /// Number of indexed facilities.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Whether [`rebuild`](Self::rebuild) has been called at least once.
    pub fn is_built(&self) -> bool {
        self.built
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
