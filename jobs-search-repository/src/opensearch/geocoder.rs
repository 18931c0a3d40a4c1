//! Gazetteer lookups against an OpenSearch index.

use async_trait::async_trait;
use opensearch::{OpenSearch, SearchParts};
use serde_json::Value;
use tracing::{debug, error};

use crate::errors::SearchError;
use crate::interfaces::GeocodeLookup;
use crate::opensearch::queries::geocode_body;
use jobs_search_shared::GeoPoint;

/// Resolves city names to coordinates using a geonames-style index whose
/// documents carry `location`, `state` and a `geo` point.
pub struct OpenSearchGeocoder {
    client: OpenSearch,
    index: String,
}

impl OpenSearchGeocoder {
    pub fn new(client: OpenSearch, index: impl Into<String>) -> Self {
        Self {
            client,
            index: index.into(),
        }
    }
}

/// Read the `geo` point of the first hit in a gazetteer response.
pub(crate) fn first_geo_point(body: &Value) -> Option<GeoPoint> {
    let geo = body
        .get("hits")?
        .get("hits")?
        .as_array()?
        .first()?
        .get("_source")?
        .get("geo")?;

    serde_json::from_value(geo.clone()).ok()
}

#[async_trait]
impl GeocodeLookup for OpenSearchGeocoder {
    async fn geocode(&self, place: &str, region: &str) -> Result<Option<GeoPoint>, SearchError> {
        let response = self
            .client
            .search(SearchParts::Index(&[&self.index]))
            .body(geocode_body(place, region))
            .send()
            .await
            .map_err(|e| SearchError::geocode(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Geocode request failed");
            return Err(SearchError::geocode(format!(
                "Geocode failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        let point = first_geo_point(&body);
        if point.is_none() {
            debug!(place = %place, region = %region, "No gazetteer entry");
        }
        Ok(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_geo_point() {
        let body = json!({
            "hits": {
                "total": { "value": 1 },
                "hits": [
                    { "_source": { "geo": { "lat": 38.9, "lon": -77.03 } } }
                ]
            }
        });

        assert_eq!(first_geo_point(&body), Some(GeoPoint::new(38.9, -77.03)));
    }

    #[test]
    fn test_first_geo_point_miss() {
        let body = json!({ "hits": { "total": { "value": 0 }, "hits": [] } });
        assert_eq!(first_geo_point(&body), None);

        let body = json!({ "hits": { "hits": [ { "_source": { "location": "Nowhere" } } ] } });
        assert_eq!(first_geo_point(&body), None);
    }
}
