//! Loader module for position opening ingest.
//!
//! Loads processed documents into the search index.

use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use crate::errors::IngestError;
use jobs_search_repository::SearchEngineClient;
use jobs_search_shared::PositionOpening;

/// Loader that indexes documents into the search engine.
///
/// A batch is submitted in a single bulk request and the index is refreshed
/// afterwards so the documents are immediately searchable. Failures are not
/// retried.
pub struct SearchLoader {
    client: Arc<dyn SearchEngineClient>,
}

impl SearchLoader {
    /// Create a new search loader with the given client.
    pub fn new(client: Arc<dyn SearchEngineClient>) -> Self {
        Self { client }
    }

    /// Index a batch of documents and refresh the index.
    ///
    /// Documents replace any earlier copy with the same id. An empty batch
    /// makes no requests.
    ///
    /// # Returns
    ///
    /// The number of documents indexed.
    #[instrument(skip(self, documents), fields(document_count = documents.len()))]
    pub async fn load(&self, documents: &[PositionOpening]) -> Result<usize, IngestError> {
        if documents.is_empty() {
            debug!("Nothing to load");
            return Ok(0);
        }

        if let Err(e) = self.client.bulk_index(documents).await {
            error!(error = %e, count = documents.len(), "Failed to bulk index documents");
            return Err(e.into());
        }
        self.client.refresh().await?;

        info!(count = documents.len(), "Indexed position openings");
        Ok(documents.len())
    }

    /// Ensure the search index exists.
    pub async fn ensure_index(&self) -> Result<(), IngestError> {
        self.client
            .ensure_index_exists()
            .await
            .map_err(|e| IngestError::loader(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};
    use jobs_search_repository::clause::SearchRequest;
    use jobs_search_repository::{SearchError, SearchHits};
    use jobs_search_shared::PositionOpeningRecord;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock search client for testing.
    struct MockSearchClient {
        indexed_count: AtomicUsize,
        refresh_count: AtomicUsize,
        should_fail: bool,
    }

    impl MockSearchClient {
        fn new() -> Self {
            Self {
                indexed_count: AtomicUsize::new(0),
                refresh_count: AtomicUsize::new(0),
                should_fail: false,
            }
        }
    }

    #[async_trait]
    impl SearchEngineClient for MockSearchClient {
        async fn search(&self, _request: &SearchRequest) -> Result<SearchHits, SearchError> {
            Ok(SearchHits::empty())
        }

        async fn bulk_index(&self, docs: &[PositionOpening]) -> Result<(), SearchError> {
            if self.should_fail {
                return Err(SearchError::bulk_index("Mock failure"));
            }
            self.indexed_count.fetch_add(docs.len(), Ordering::SeqCst);
            Ok(())
        }

        async fn refresh(&self) -> Result<(), SearchError> {
            self.refresh_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn delete_index(&self) -> Result<(), SearchError> {
            Ok(())
        }

        async fn delete_expired(&self, _today: NaiveDate) -> Result<u64, SearchError> {
            Ok(0)
        }

        async fn ensure_index_exists(&self) -> Result<(), SearchError> {
            if self.should_fail {
                return Err(SearchError::index_creation("Mock failure"));
            }
            Ok(())
        }

        async fn health_check(&self) -> Result<bool, SearchError> {
            Ok(true)
        }
    }

    fn opening(external_id: i64) -> PositionOpening {
        let record: PositionOpeningRecord = serde_json::from_value(json!({
            "source": "usajobs",
            "external_id": external_id,
            "position_title": "Budget Analyst",
            "start_date": "2026-09-01"
        }))
        .unwrap();
        PositionOpening::from_record(record, Utc::now())
    }

    #[tokio::test]
    async fn test_load_and_refresh() {
        let client = Arc::new(MockSearchClient::new());
        let loader = SearchLoader::new(client.clone());

        let count = loader.load(&[opening(1), opening(2)]).await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(client.indexed_count.load(Ordering::SeqCst), 2);
        assert_eq!(client.refresh_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_batch_is_noop() {
        let client = Arc::new(MockSearchClient::new());
        let loader = SearchLoader::new(client.clone());

        assert_eq!(loader.load(&[]).await.unwrap(), 0);
        assert_eq!(client.indexed_count.load(Ordering::SeqCst), 0);
        assert_eq!(client.refresh_count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_bulk_failure_propagates() {
        let client = Arc::new(MockSearchClient {
            should_fail: true,
            ..MockSearchClient::new()
        });
        let loader = SearchLoader::new(client.clone());

        let result = loader.load(&[opening(1)]).await;

        assert!(matches!(
            result,
            Err(IngestError::SearchError(SearchError::BulkIndexError(_)))
        ));
        assert_eq!(client.refresh_count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_ensure_index_failure_is_loader_error() {
        let loader = SearchLoader::new(Arc::new(MockSearchClient::new()));
        loader.ensure_index().await.unwrap();

        let loader = SearchLoader::new(Arc::new(MockSearchClient {
            should_fail: true,
            ..MockSearchClient::new()
        }));
        assert!(matches!(
            loader.ensure_index().await,
            Err(IngestError::LoaderError(_))
        ));
    }
}
