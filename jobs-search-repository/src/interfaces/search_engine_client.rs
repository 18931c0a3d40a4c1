//! Search engine client trait definition.
//!
//! This module defines the abstract interface for search engine operations,
//! allowing for different backend implementations (OpenSearch, mock, etc.).

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::clause::SearchRequest;
use crate::errors::SearchError;
use crate::types::SearchHits;
use jobs_search_shared::PositionOpening;

/// Abstract interface for the position openings index.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// Failures are returned as `SearchError` and are never retried here.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Execute a structured search request against the index.
    ///
    /// # Returns
    ///
    /// * `Ok(SearchHits)` - One page of hits and the total match count
    /// * `Err(SearchError)` - If the search fails
    async fn search(&self, request: &SearchRequest) -> Result<SearchHits, SearchError>;

    /// Index multiple documents in a single bulk operation.
    ///
    /// Each document is stored under its `id`, replacing any earlier copy.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If all documents were indexed successfully
    /// * `Err(SearchError::BulkIndexError)` - If any documents failed to index
    async fn bulk_index(&self, documents: &[PositionOpening]) -> Result<(), SearchError>;

    /// Make all previously indexed documents visible to search.
    async fn refresh(&self) -> Result<(), SearchError>;

    /// Delete the whole index. A missing index is not an error.
    async fn delete_index(&self) -> Result<(), SearchError>;

    /// Delete every document whose `end_date` is before `today`.
    ///
    /// # Returns
    ///
    /// * `Ok(u64)` - Number of deleted documents
    /// * `Err(SearchError)` - If the deletion fails
    async fn delete_expired(&self, today: NaiveDate) -> Result<u64, SearchError>;

    /// Ensure the index exists with the position opening mappings.
    ///
    /// This should be called before the first import.
    async fn ensure_index_exists(&self) -> Result<(), SearchError>;

    /// Check if the search engine is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the search engine is healthy
    /// * `Ok(false)` - If the search engine is unhealthy
    /// * `Err(SearchError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, SearchError>;
}
