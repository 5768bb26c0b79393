//! Facility records and ranked search results.
//!
//! A [`FacilityRecord`] is what the provider hands us: one hospital or clinic
//! with its position, OpenStreetMap tags and a display address. The ranking
//! stage turns records into [`RankedFacility`] values carrying distance,
//! rating and score for the calling layer.

mod types;

pub use types::{FacilityRecord, FacilityType, RankedFacility, ADDRESS_UNAVAILABLE, UNKNOWN_NAME};

/// Tag holding the OpenStreetMap healthcare speciality list.
pub const SPECIALITY_TAG: &str = "healthcare:speciality";

/// Speciality values that mark a pediatric facility.
const PEDIATRIC_SPECIALITIES: [&str; 2] = ["pediatrics", "paediatrics"];

/// Name fragments that mark a pediatric facility.
const PEDIATRIC_NAME_HINTS: [&str; 2] = ["children", "pediatric"];

/// Returns true if the record is tagged or named as a pediatric facility.
///
/// The speciality tag may hold a `;`-separated list, as OSM allows.
pub fn is_pediatric(record: &FacilityRecord) -> bool {
    let tagged = record.tags.get(SPECIALITY_TAG).is_some_and(|value| {
        value
            .split(';')
            .map(|s| s.trim().to_lowercase())
            .any(|s| PEDIATRIC_SPECIALITIES.contains(&s.as_str()))
    });

    if tagged {
        return true;
    }

    let name = record.name.to_lowercase();
    PEDIATRIC_NAME_HINTS.iter().any(|hint| name.contains(hint))
}
