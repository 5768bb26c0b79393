//! Facility data types

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coord::GeoPoint;

/// Display address used when no `addr:*` tags are present.
pub const ADDRESS_UNAVAILABLE: &str = "Address details not available";

/// Display name used when the upstream element has no `name` tag.
pub const UNKNOWN_NAME: &str = "Unknown Medical Center";

/// Kind of medical facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacilityType {
    Hospital,
    Clinic,
    Unknown,
}

impl FacilityType {
    /// Maps an OSM `healthcare`/`amenity` tag value to a facility type.
    pub fn from_tag(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "hospital" => FacilityType::Hospital,
            "clinic" => FacilityType::Clinic,
            _ => FacilityType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FacilityType::Hospital => "hospital",
            FacilityType::Clinic => "clinic",
            FacilityType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FacilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A facility as ingested from the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityRecord {
    /// Opaque identifier (`node/123`, `way/456`, or a fallback id)
    pub id: String,
    pub name: String,
    /// Latitude in WGS84 degrees
    pub lat: f64,
    /// Longitude in WGS84 degrees
    pub lng: f64,
    #[serde(rename = "type")]
    pub facility_type: FacilityType,
    /// Free-form OSM tags
    pub tags: BTreeMap<String, String>,
    pub address: String,
    /// Upstream rating in (0, 5], when the source supplies one.
    ///
    /// Moved into [`RankedFacility::rating`] when the record is ranked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl FacilityRecord {
    /// Position of the facility.
    ///
    /// Returns `None` if the stored coordinates are out of range.
    pub fn position(&self) -> Option<GeoPoint> {
        GeoPoint::new(self.lat, self.lng).ok()
    }
}

/// A facility scored against a query origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedFacility {
    #[serde(flatten)]
    pub facility: FacilityRecord,
    /// Great-circle distance from the query origin (1 decimal)
    pub distance_km: f64,
    /// Rating used for scoring; synthesized once if the record had none
    pub rating: f64,
    pub is_pediatric: bool,
    pub score: f64,
}

impl RankedFacility {
    pub fn id(&self) -> &str {
        &self.facility.id
    }

    pub fn name(&self) -> &str {
        &self.facility.name
    }
}
