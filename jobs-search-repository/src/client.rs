//! Position opening search client.
//!
//! This module provides the main entry point application code uses to
//! search position openings, page through a source's ids and manage the
//! index lifecycle.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, instrument};

use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;
use crate::pager::collect_external_ids;
use crate::projector::project_hits;
use crate::query_builder::build_search_request;
use jobs_search_shared::{PositionOpeningResult, SearchOptions};

/// The main client for searching the position openings index.
#[derive(Clone)]
pub struct PositionOpeningClient {
    engine: Arc<dyn SearchEngineClient>,
}

impl PositionOpeningClient {
    pub fn new(engine: Arc<dyn SearchEngineClient>) -> Self {
        Self { engine }
    }

    /// Search with today's date bounding the start date filter.
    pub async fn search(
        &self,
        options: &SearchOptions,
    ) -> Result<Vec<PositionOpeningResult>, SearchError> {
        self.search_on(options, Utc::now().date_naive()).await
    }

    /// Search as of `today`.
    ///
    /// Results come back in index order: relevance with keywords, nearest
    /// first with a location point, otherwise by the sort field descending.
    #[instrument(skip(self, options))]
    pub async fn search_on(
        &self,
        options: &SearchOptions,
        today: NaiveDate,
    ) -> Result<Vec<PositionOpeningResult>, SearchError> {
        let query = options.to_query();
        let request = build_search_request(options, &query, today);

        let hits = self.engine.search(&request).await?;
        info!(options = ?options, total = hits.total, "Searched position openings");

        Ok(project_hits(&hits, options.hl))
    }

    /// External ids of every posting indexed from `source`.
    pub async fn external_ids(&self, source: &str) -> Result<Vec<i64>, SearchError> {
        collect_external_ids(self.engine.as_ref(), source).await
    }

    pub async fn create_search_index(&self) -> Result<(), SearchError> {
        self.engine.ensure_index_exists().await
    }

    pub async fn delete_search_index(&self) -> Result<(), SearchError> {
        self.engine.delete_index().await
    }

    /// Remove postings that ended before `today`.
    pub async fn delete_expired_on(&self, today: NaiveDate) -> Result<u64, SearchError> {
        let deleted = self.engine.delete_expired(today).await?;
        info!(deleted, today = %today, "Deleted expired position openings");
        Ok(deleted)
    }

    pub async fn health_check(&self) -> Result<bool, SearchError> {
        self.engine.health_check().await
    }
}
