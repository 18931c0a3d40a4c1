//! Position opening processor implementation.
//!
//! Builds `PositionOpening` documents from raw records and attaches
//! coordinates to their locations.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, instrument, warn};

use jobs_search_repository::GeocodeLookup;
use jobs_search_shared::{Location, PositionOpening, PositionOpeningRecord};

/// Location count at which a posting is treated as available anywhere and
/// its location list is dropped.
pub const CATCHALL_THRESHOLD: usize = 20;

const METRO_AREA_SUFFIX: &str = " Metro Area";

/// Reduce a feed city name to the name the gazetteer knows.
///
/// `"Springfield, IL Metro Area"` becomes `"Springfield"`.
pub fn normalize_city(city: &str) -> String {
    let city = city.trim();
    let city = city.strip_suffix(METRO_AREA_SUFFIX).unwrap_or(city);
    let city = city.split(',').next().unwrap_or(city);
    city.trim().to_string()
}

/// Processor that turns raw records into indexable documents.
///
/// The processor is responsible for:
/// - Deriving document ids and stamping the import time
/// - Geocoding locations by their normalized city name
/// - Dropping location lists that are too broad to be useful
pub struct OpeningProcessor {
    geocoder: Arc<dyn GeocodeLookup>,
}

impl OpeningProcessor {
    pub fn new(geocoder: Arc<dyn GeocodeLookup>) -> Self {
        Self { geocoder }
    }

    /// Process a batch of records, stamping every document with `timestamp`.
    ///
    /// Locations are geocoded one at a time, in record order.
    #[instrument(skip(self, records), fields(record_count = records.len()))]
    pub async fn process_batch(
        &self,
        records: Vec<PositionOpeningRecord>,
        timestamp: DateTime<Utc>,
    ) -> Vec<PositionOpening> {
        let mut documents = Vec::with_capacity(records.len());

        for record in records {
            let mut document = PositionOpening::from_record(record, timestamp);
            document.locations = match document.locations.take() {
                Some(locations) if locations.len() >= CATCHALL_THRESHOLD => {
                    debug!(
                        id = %document.id,
                        count = locations.len(),
                        "Dropping catch-all location list"
                    );
                    None
                }
                Some(locations) => Some(self.enrich_locations(locations).await),
                None => None,
            };
            documents.push(document);
        }

        debug!(processed_count = documents.len(), "Processed record batch");
        documents
    }

    async fn enrich_locations(&self, locations: Vec<Location>) -> Vec<Location> {
        let mut enriched = Vec::with_capacity(locations.len());

        for mut location in locations {
            let city = normalize_city(&location.city);
            location.geo = match self.geocoder.geocode(&city, &location.state).await {
                Ok(point) => point,
                Err(e) => {
                    warn!(
                        city = %city,
                        state = %location.state,
                        error = %e,
                        "Geocode lookup failed"
                    );
                    None
                }
            };
            enriched.push(location);
        }

        enriched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use jobs_search_repository::SearchError;
    use jobs_search_shared::GeoPoint;
    use std::collections::BTreeSet;
    use tokio::sync::Mutex;

    /// Mock geocoder knowing a fixed set of places.
    struct MockGeocoder {
        lookups: Mutex<Vec<(String, String)>>,
        should_fail: bool,
    }

    impl MockGeocoder {
        fn new() -> Self {
            Self {
                lookups: Mutex::new(Vec::new()),
                should_fail: false,
            }
        }
    }

    #[async_trait]
    impl GeocodeLookup for MockGeocoder {
        async fn geocode(&self, place: &str, region: &str) -> Result<Option<GeoPoint>, SearchError> {
            self.lookups
                .lock()
                .await
                .push((place.to_string(), region.to_string()));
            if self.should_fail {
                return Err(SearchError::geocode("Mock failure"));
            }
            Ok(match (place, region) {
                ("Springfield", "IL") => Some(GeoPoint::new(39.8, -89.64)),
                ("Washington", "DC") => Some(GeoPoint::new(38.9, -77.03)),
                _ => None,
            })
        }
    }

    fn record(locations: Vec<Location>) -> PositionOpeningRecord {
        PositionOpeningRecord {
            kind: None,
            source: "usajobs".to_string(),
            tags: BTreeSet::from(["federal".to_string()]),
            external_id: 305972200,
            position_title: "Medical Officer".to_string(),
            organization_id: Some("AF09".to_string()),
            organization_name: Some("Air Force Personnel Center".to_string()),
            locations,
            start_date: NaiveDate::from_ymd_opt(2011, 12, 28).unwrap(),
            end_date: Some(NaiveDate::from_ymd_opt(2011, 12, 29).unwrap()),
            minimum: Some(60274.0),
            maximum: Some(155500.0),
            position_offering_type_code: Some(15317),
            position_schedule_type_code: Some(1),
            rate_interval_code: Some("PA".to_string()),
        }
    }

    fn many_locations(count: usize) -> Vec<Location> {
        (0..count)
            .map(|i| Location::new(format!("City {}", i), "TX"))
            .collect()
    }

    #[test]
    fn test_normalize_city() {
        assert_eq!(normalize_city("Springfield, IL Metro Area"), "Springfield");
        assert_eq!(normalize_city("Washington Metro Area"), "Washington");
        assert_eq!(normalize_city("Washington DC Metro Area"), "Washington DC");
        assert_eq!(normalize_city("Odessa, TX"), "Odessa");
        assert_eq!(normalize_city("  Moab "), "Moab");
    }

    #[tokio::test]
    async fn test_geocodes_locations() {
        let geocoder = Arc::new(MockGeocoder::new());
        let processor = OpeningProcessor::new(geocoder.clone());

        let locations = vec![
            Location::new("Springfield, IL Metro Area", "IL"),
            Location::new("Nowhere", "KS"),
        ];
        let documents = processor
            .process_batch(vec![record(locations)], Utc::now())
            .await;

        let locations = documents[0].locations.as_ref().unwrap();
        assert_eq!(locations[0].city, "Springfield, IL Metro Area");
        assert_eq!(locations[0].geo, Some(GeoPoint::new(39.8, -89.64)));
        assert_eq!(locations[1].city, "Nowhere");
        assert!(locations[1].geo.is_none());
        assert_eq!(
            *geocoder.lookups.lock().await,
            vec![
                ("Springfield".to_string(), "IL".to_string()),
                ("Nowhere".to_string(), "KS".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_below_catchall_threshold_kept() {
        let geocoder = Arc::new(MockGeocoder::new());
        let processor = OpeningProcessor::new(geocoder.clone());

        let documents = processor
            .process_batch(vec![record(many_locations(19))], Utc::now())
            .await;

        assert_eq!(documents[0].locations.as_ref().map(Vec::len), Some(19));
        assert_eq!(geocoder.lookups.lock().await.len(), 19);
    }

    #[tokio::test]
    async fn test_catchall_threshold_drops_locations() {
        let geocoder = Arc::new(MockGeocoder::new());
        let processor = OpeningProcessor::new(geocoder.clone());

        let documents = processor
            .process_batch(vec![record(many_locations(20))], Utc::now())
            .await;

        assert!(documents[0].locations.is_none());
        assert!(geocoder.lookups.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_geocode_error_is_a_miss() {
        let geocoder = Arc::new(MockGeocoder {
            should_fail: true,
            ..MockGeocoder::new()
        });
        let processor = OpeningProcessor::new(geocoder);

        let documents = processor
            .process_batch(vec![record(vec![Location::new("Washington", "DC")])], Utc::now())
            .await;

        let locations = documents[0].locations.as_ref().unwrap();
        assert_eq!(locations.len(), 1);
        assert!(locations[0].geo.is_none());
    }

    #[tokio::test]
    async fn test_document_fields() {
        let processor = OpeningProcessor::new(Arc::new(MockGeocoder::new()));
        let timestamp = Utc::now();

        let documents = processor
            .process_batch(vec![record(Vec::new())], timestamp)
            .await;

        let document = &documents[0];
        assert_eq!(document.id, "usajobs:305972200");
        assert_eq!(document.kind, "position_opening");
        assert_eq!(document.timestamp, timestamp);
        assert!(document.locations.is_none());
    }
}
