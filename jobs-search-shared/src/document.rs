//! Position opening documents and the raw records they are built from.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Value of the `type` field on every indexed document.
pub const DOCUMENT_TYPE: &str = "position_opening";

/// Build the index key for a document: `{source}:{external_id}`.
///
/// The key is the document's `_id`, so re-importing a record with the same
/// source and external id overwrites the earlier copy.
pub fn document_id(source: &str, external_id: i64) -> String {
    format!("{}:{}", source, external_id)
}

/// A latitude/longitude pair in the `geo_point` object format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// One place a position is offered in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoPoint>,
}

impl Location {
    pub fn new(city: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            state: state.into(),
            geo: None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.state)
    }
}

/// A position opening as delivered by an external feed, before enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionOpeningRecord {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub source: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    pub external_id: i64,
    pub position_title: String,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub locations: Vec<Location>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub minimum: Option<f64>,
    #[serde(default)]
    pub maximum: Option<f64>,
    #[serde(default)]
    pub position_offering_type_code: Option<i64>,
    #[serde(default)]
    pub position_schedule_type_code: Option<i64>,
    #[serde(default)]
    pub rate_interval_code: Option<String>,
}

/// A position opening as stored in the search index.
///
/// `locations` is `None` when the record had no locations or when the list
/// was too broad to geocode and was suppressed at import time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionOpening {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub source: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    pub external_id: i64,
    pub position_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<Location>>,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_offering_type_code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_schedule_type_code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_interval_code: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl PositionOpening {
    /// Build a document from a raw record, deriving its id and stamping the
    /// import time. Locations are carried over untouched; enrichment is the
    /// ingest processor's job.
    pub fn from_record(record: PositionOpeningRecord, timestamp: DateTime<Utc>) -> Self {
        let locations = if record.locations.is_empty() {
            None
        } else {
            Some(record.locations)
        };

        Self {
            id: document_id(&record.source, record.external_id),
            kind: DOCUMENT_TYPE.to_string(),
            source: record.source,
            tags: record.tags,
            external_id: record.external_id,
            position_title: record.position_title,
            organization_id: record.organization_id,
            organization_name: record.organization_name,
            locations,
            start_date: record.start_date,
            end_date: record.end_date,
            minimum: record.minimum,
            maximum: record.maximum,
            position_offering_type_code: record.position_offering_type_code,
            position_schedule_type_code: record.position_schedule_type_code,
            rate_interval_code: record.rate_interval_code,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> PositionOpeningRecord {
        serde_json::from_value(json!({
            "source": "usajobs",
            "external_id": 42,
            "position_title": "Park Ranger",
            "organization_id": "IN05",
            "organization_name": "National Park Service",
            "locations": [{"city": "Moab", "state": "UT"}],
            "start_date": "2026-01-05",
            "end_date": "2026-03-01",
            "minimum": 41000.0,
            "maximum": 52000.0,
            "rate_interval_code": "PA"
        }))
        .unwrap()
    }

    #[test]
    fn test_document_id() {
        assert_eq!(document_id("usajobs", 42), "usajobs:42");
        assert_eq!(document_id("ng:springfield", 7), "ng:springfield:7");
    }

    #[test]
    fn test_from_record() {
        let doc = PositionOpening::from_record(record(), Utc::now());

        assert_eq!(doc.id, "usajobs:42");
        assert_eq!(doc.kind, DOCUMENT_TYPE);
        assert_eq!(doc.locations.as_ref().map(Vec::len), Some(1));
        assert_eq!(doc.start_date, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
    }

    #[test]
    fn test_from_record_without_locations() {
        let mut raw = record();
        raw.locations.clear();

        let doc = PositionOpening::from_record(raw, Utc::now());
        assert!(doc.locations.is_none());
    }

    #[test]
    fn test_document_serializes_dates_as_plain_dates() {
        let doc = PositionOpening::from_record(record(), Utc::now());
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["type"], "position_opening");
        assert_eq!(value["start_date"], "2026-01-05");
        assert_eq!(value["end_date"], "2026-03-01");
        assert!(value["locations"][0].get("geo").is_none());
    }

    #[test]
    fn test_location_display() {
        assert_eq!(Location::new("Moab", "UT").to_string(), "Moab, UT");
    }
}
