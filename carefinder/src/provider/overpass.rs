//! OpenStreetMap Overpass API facility source.
//!
//! Queries the Overpass interpreter for hospitals, clinics and
//! pediatric-tagged features around a point.
//!
//! # API Endpoint
//!
//! - Interpreter: `POST https://overpass-api.de/api/interpreter` with a
//!   form-encoded `data` field holding the Overpass QL query
//!
//! # Response
//!
//! JSON with an `elements` array. Nodes carry `lat`/`lon` directly; ways
//! carry a `center` object because the query ends with `out center;`.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::{debug, trace};

use crate::coord::GeoPoint;
use crate::facility::{FacilityRecord, FacilityType, ADDRESS_UNAVAILABLE, UNKNOWN_NAME};
use crate::provider::{AsyncHttpClient, FacilitySource, ProviderError};

/// Public Overpass interpreter endpoint.
pub const DEFAULT_OVERPASS_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Server-side query timeout passed in the QL header (seconds).
const QUERY_TIMEOUT_SECS: u32 = 45;

/// Tags joined, in order, to form the display address.
/// Each inner slice lists alternatives; the first present one wins.
const ADDRESS_TAGS: [&[&str]; 6] = [
    &["addr:housenumber"],
    &["addr:street"],
    &["addr:suburb", "addr:district"],
    &["addr:city"],
    &["addr:state"],
    &["addr:postcode"],
];

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(rename = "type", default)]
    kind: String,
    id: u64,
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<OverpassCenter>,
    #[serde(default)]
    tags: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct OverpassCenter {
    lat: f64,
    lon: f64,
}

/// Facility source backed by the Overpass API.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use carefinder::provider::{AsyncReqwestClient, OverpassProvider, DEFAULT_OVERPASS_ENDPOINT};
///
/// let client = AsyncReqwestClient::new(Duration::from_secs(30)).unwrap();
/// let provider = OverpassProvider::new(client, DEFAULT_OVERPASS_ENDPOINT);
/// ```
pub struct OverpassProvider<C: AsyncHttpClient> {
    http_client: C,
    endpoint: String,
}

impl<C: AsyncHttpClient> OverpassProvider<C> {
    /// Creates a new Overpass provider posting to `endpoint`.
    pub fn new(http_client: C, endpoint: impl Into<String>) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
        }
    }

    /// Returns the interpreter endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Builds the Overpass QL query for facilities within `radius_m` of `center`.
pub fn build_query(center: GeoPoint, radius_m: f64) -> String {
    let around = format!("(around:{},{},{})", radius_m, center.lat, center.lng);
    format!(
        "[out:json][timeout:{timeout}];\n\
         (\n\
         \x20 node[\"amenity\"=\"hospital\"]{around};\n\
         \x20 node[\"healthcare\"=\"clinic\"]{around};\n\
         \x20 node[\"healthcare:speciality\"=\"pediatrics\"]{around};\n\
         \x20 way[\"amenity\"=\"hospital\"]{around};\n\
         \x20 way[\"healthcare\"=\"clinic\"]{around};\n\
         );\n\
         out center;\n",
        timeout = QUERY_TIMEOUT_SECS,
        around = around,
    )
}

/// Parses an Overpass JSON response into facility records.
///
/// Elements without resolvable, in-range coordinates are dropped. A body
/// without an `elements` array parses to an empty list.
pub fn parse_response(body: &[u8]) -> Result<Vec<FacilityRecord>, ProviderError> {
    let response: OverpassResponse = serde_json::from_slice(body)
        .map_err(|e| ProviderError::InvalidResponse(format!("Invalid Overpass JSON: {}", e)))?;

    let total = response.elements.len();
    let records: Vec<FacilityRecord> = response
        .elements
        .into_iter()
        .filter_map(element_to_record)
        .collect();

    if records.len() < total {
        debug!(
            total = total,
            kept = records.len(),
            "Dropped Overpass elements without valid coordinates"
        );
    }

    Ok(records)
}

fn element_to_record(element: OverpassElement) -> Option<FacilityRecord> {
    let lat = element.lat.or(element.center.as_ref().map(|c| c.lat))?;
    let lng = element.lon.or(element.center.as_ref().map(|c| c.lon))?;

    if GeoPoint::new(lat, lng).is_err() {
        trace!(id = element.id, lat = lat, lng = lng, "Out-of-range element");
        return None;
    }

    let id = if element.kind.is_empty() {
        element.id.to_string()
    } else {
        format!("{}/{}", element.kind, element.id)
    };

    let tags = element.tags;
    let name = tags
        .get("name")
        .filter(|n| !n.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| UNKNOWN_NAME.to_string());

    let facility_type = tags
        .get("healthcare")
        .or_else(|| tags.get("amenity"))
        .map(|v| FacilityType::from_tag(v))
        .unwrap_or(FacilityType::Hospital);

    let address = build_address(&tags);

    Some(FacilityRecord {
        id,
        name,
        lat,
        lng,
        facility_type,
        tags,
        address,
        rating: None,
    })
}

/// Joins the present address components with commas.
pub fn build_address(tags: &BTreeMap<String, String>) -> String {
    let parts: Vec<&str> = ADDRESS_TAGS
        .iter()
        .filter_map(|alternatives| {
            alternatives
                .iter()
                .filter_map(|key| tags.get(*key))
                .map(|v| v.trim())
                .find(|v| !v.is_empty())
        })
        .collect();

    if parts.is_empty() {
        ADDRESS_UNAVAILABLE.to_string()
    } else {
        parts.join(", ")
    }
}

impl<C: AsyncHttpClient> FacilitySource for OverpassProvider<C> {
    async fn fetch(
        &self,
        center: GeoPoint,
        radius_m: f64,
    ) -> Result<Vec<FacilityRecord>, ProviderError> {
        let query = build_query(center, radius_m);

        debug!(
            lat = center.lat,
            lng = center.lng,
            radius_m = radius_m,
            "Querying Overpass"
        );

        let body = self
            .http_client
            .post_form(&self.endpoint, &[("data", query.as_str())])
            .await?;

        let records = parse_response(&body)?;
        debug!(count = records.len(), "Overpass response parsed");
        Ok(records)
    }

    fn name(&self) -> &str {
        "Overpass"
    }
}
