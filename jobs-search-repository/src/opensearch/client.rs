//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use chrono::NaiveDate;
use opensearch::{
    cluster::ClusterHealthParts,
    http::request::JsonBody,
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts, IndicesRefreshParts},
    BulkParts, DeleteByQueryParts, OpenSearch, SearchParts,
};
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::clause::SearchRequest;
use crate::config::IndexConfig;
use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;
use crate::opensearch::geocoder::OpenSearchGeocoder;
use crate::opensearch::index_config::get_index_settings;
use crate::opensearch::queries::{delete_by_query_body, search_body};
use crate::query_builder::expired_before;
use crate::types::{SearchHit, SearchHits};
use jobs_search_shared::PositionOpening;

/// OpenSearch client implementation.
///
/// # Example
///
/// ```ignore
/// let client = OpenSearchClient::new("http://localhost:9200", IndexConfig::default()).await?;
/// client.ensure_index_exists().await?;
/// client.bulk_index(&documents).await?;
/// client.refresh().await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
    index_config: IndexConfig,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `index_config` - Names of the position openings and gazetteer indices
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchError)` - If connection setup fails
    pub async fn new(url: &str, index_config: IndexConfig) -> Result<Self, SearchError> {
        let parsed_url = Url::parse(url).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %url,
            index = %index_config.name,
            geonames = %index_config.geonames,
            "Created OpenSearch client"
        );

        Ok(Self {
            client,
            index_config,
        })
    }

    /// A geocoder sharing this client's connection, reading the configured
    /// gazetteer index.
    pub fn geocoder(&self) -> OpenSearchGeocoder {
        OpenSearchGeocoder::new(self.client.clone(), self.index_config.geonames.clone())
    }

    fn index(&self) -> &str {
        &self.index_config.name
    }

    async fn failure_body(response: Response) -> String {
        response.text().await.unwrap_or_default()
    }
}

/// Parse the `hits` section of a search response.
///
/// Accepts both the object form of `hits.total` (`{"value": n}`) and the
/// legacy bare number.
pub(crate) fn parse_hits(body: &Value) -> Result<SearchHits, SearchError> {
    let hits = body
        .get("hits")
        .ok_or_else(|| SearchError::parse("Search response has no hits section"))?;

    let total = match hits.get("total") {
        Some(Value::Number(total)) => total.as_u64(),
        Some(total) => total.get("value").and_then(Value::as_u64),
        None => None,
    }
    .unwrap_or(0);

    let hits = hits
        .get("hits")
        .and_then(Value::as_array)
        .map(|hits| hits.iter().map(parse_hit).collect())
        .unwrap_or_default();

    Ok(SearchHits { total, hits })
}

fn parse_hit(hit: &Value) -> SearchHit {
    SearchHit {
        id: hit
            .get("_id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        source: hit.get("_source").cloned().unwrap_or(Value::Null),
        highlight: hit
            .get("highlight")
            .and_then(|highlight| serde_json::from_value(highlight.clone()).ok())
            .unwrap_or_default(),
    }
}

/// Describe the failed items of a bulk response, if any.
fn bulk_failures(body: &Value) -> Option<String> {
    if !body.get("errors").and_then(Value::as_bool).unwrap_or(false) {
        return None;
    }

    let failures: Vec<String> = body
        .get("items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("index"))
                .filter_map(|item| {
                    let error = item.get("error")?;
                    let id = item.get("_id").and_then(Value::as_str).unwrap_or("?");
                    let reason = error.get("reason").and_then(Value::as_str).unwrap_or("unknown");
                    Some(format!("{}: {}", id, reason))
                })
                .collect()
        })
        .unwrap_or_default();

    Some(format!("{} documents failed ({})", failures.len(), failures.join("; ")))
}

#[async_trait]
impl SearchEngineClient for OpenSearchClient {
    #[instrument(skip(self, request), fields(size = request.size, from = request.from))]
    async fn search(&self, request: &SearchRequest) -> Result<SearchHits, SearchError> {
        let body = search_body(request);
        debug!(body = %body, "Sending search request");

        let response = self
            .client
            .search(SearchParts::Index(&[self.index()]))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::failure_body(response).await;
            error!(status = %status, body = %error_body, "Search request failed");
            return Err(SearchError::query(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        parse_hits(&body)
    }

    #[instrument(skip(self, documents), fields(count = documents.len()))]
    async fn bulk_index(&self, documents: &[PositionOpening]) -> Result<(), SearchError> {
        if documents.is_empty() {
            return Ok(());
        }

        let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(documents.len() * 2);
        for document in documents {
            body.push(json!({"index": {"_id": document.id}}).into());
            body.push(serde_json::to_value(document)?.into());
        }

        let response = self
            .client
            .bulk(BulkParts::Index(self.index()))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::bulk_index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::failure_body(response).await;
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchError::bulk_index(format!(
                "Bulk request failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        if let Some(failures) = bulk_failures(&body) {
            error!(failures = %failures, "Bulk request had failures");
            return Err(SearchError::bulk_index(failures));
        }

        debug!(count = documents.len(), "Documents indexed");
        Ok(())
    }

    async fn refresh(&self) -> Result<(), SearchError> {
        let response = self
            .client
            .indices()
            .refresh(IndicesRefreshParts::Index(&[self.index()]))
            .send()
            .await
            .map_err(|e| SearchError::refresh(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::failure_body(response).await;
            return Err(SearchError::refresh(format!(
                "Refresh failed with status {}: {}",
                status, error_body
            )));
        }

        Ok(())
    }

    async fn delete_index(&self) -> Result<(), SearchError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[self.index()]))
            .send()
            .await
            .map_err(|e| SearchError::delete(e.to_string()))?;

        let status = response.status_code();

        // 404 is acceptable - index may not exist
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = Self::failure_body(response).await;
            error!(status = %status, body = %error_body, "Index deletion failed");
            return Err(SearchError::delete(format!(
                "Index deletion failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %self.index(), "Index deleted");
        Ok(())
    }

    async fn delete_expired(&self, today: NaiveDate) -> Result<u64, SearchError> {
        let response = self
            .client
            .delete_by_query(DeleteByQueryParts::Index(&[self.index()]))
            .body(delete_by_query_body(&expired_before(today)))
            .send()
            .await
            .map_err(|e| SearchError::delete(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::failure_body(response).await;
            error!(status = %status, body = %error_body, "Delete by query failed");
            return Err(SearchError::delete(format!(
                "Delete by query failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        Ok(body.get("deleted").and_then(Value::as_u64).unwrap_or(0))
    }

    async fn ensure_index_exists(&self) -> Result<(), SearchError> {
        let exists = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[self.index()]))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        if exists.status_code().is_success() {
            debug!(index = %self.index(), "Index already exists");
            return Ok(());
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(self.index()))
            .body(get_index_settings())
            .send()
            .await
            .map_err(|e| SearchError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::failure_body(response).await;
            error!(status = %status, body = %error_body, "Index creation failed");
            return Err(SearchError::index_creation(format!(
                "Index creation failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %self.index(), "Index created");
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let health: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;
        let status = health
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("unknown");

        debug!(status = %status, "OpenSearch cluster status");
        Ok(status == "green" || status == "yellow")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hits() {
        let body = json!({
            "hits": {
                "total": { "value": 250, "relation": "eq" },
                "hits": [
                    {
                        "_id": "usajobs:42",
                        "_source": { "external_id": 42 },
                        "highlight": { "position_title": ["<em>Nurse</em> Practitioner"] }
                    },
                    { "_id": "usajobs:43", "_source": { "external_id": 43 } }
                ]
            }
        });

        let hits = parse_hits(&body).unwrap();

        assert_eq!(hits.total, 250);
        assert_eq!(hits.hits.len(), 2);
        assert_eq!(hits.hits[0].id, "usajobs:42");
        assert_eq!(
            hits.hits[0].highlight_fragment("position_title"),
            Some("<em>Nurse</em> Practitioner")
        );
        assert!(hits.hits[1].highlight.is_empty());
    }

    #[test]
    fn test_parse_hits_legacy_total() {
        let body = json!({ "hits": { "total": 3, "hits": [] } });

        let hits = parse_hits(&body).unwrap();
        assert_eq!(hits.total, 3);
        assert!(hits.hits.is_empty());
    }

    #[test]
    fn test_parse_hits_missing_section() {
        assert!(matches!(
            parse_hits(&json!({ "error": "boom" })),
            Err(SearchError::ParseError(_))
        ));
    }

    #[test]
    fn test_bulk_failures() {
        assert!(bulk_failures(&json!({ "errors": false, "items": [] })).is_none());

        let body = json!({
            "errors": true,
            "items": [
                { "index": { "_id": "usajobs:1", "status": 201 } },
                { "index": { "_id": "usajobs:2", "status": 400, "error": { "reason": "bad date" } } }
            ]
        });
        let failures = bulk_failures(&body).unwrap();
        assert!(failures.starts_with("1 documents failed"));
        assert!(failures.contains("usajobs:2: bad date"));
    }
}
