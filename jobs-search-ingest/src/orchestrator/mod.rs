//! Import orchestration.
//!
//! Runs raw records through the processor and hands the resulting
//! documents to the loader.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use crate::errors::IngestError;
use crate::loader::SearchLoader;
use crate::processor::OpeningProcessor;
use jobs_search_repository::{GeocodeLookup, SearchEngineClient};
use jobs_search_shared::PositionOpeningRecord;

/// Imports batches of position opening records into the index.
pub struct PositionOpeningImporter {
    processor: OpeningProcessor,
    loader: SearchLoader,
}

impl PositionOpeningImporter {
    pub fn new(client: Arc<dyn SearchEngineClient>, geocoder: Arc<dyn GeocodeLookup>) -> Self {
        Self {
            processor: OpeningProcessor::new(geocoder),
            loader: SearchLoader::new(client),
        }
    }

    /// Import `records`, stamping them with the current time.
    pub async fn import(&self, records: Vec<PositionOpeningRecord>) -> Result<usize, IngestError> {
        self.import_at(records, Utc::now()).await
    }

    /// Import `records` stamped with `timestamp`.
    ///
    /// # Returns
    ///
    /// The number of documents indexed. An empty batch returns 0 without
    /// touching the index.
    #[instrument(skip(self, records), fields(record_count = records.len()))]
    pub async fn import_at(
        &self,
        records: Vec<PositionOpeningRecord>,
        timestamp: DateTime<Utc>,
    ) -> Result<usize, IngestError> {
        if records.is_empty() {
            return Ok(0);
        }

        let documents = self.processor.process_batch(records, timestamp).await;
        let count = self.loader.load(&documents).await?;

        info!(count, "Imported position openings");
        Ok(count)
    }

    pub async fn ensure_index(&self) -> Result<(), IngestError> {
        self.loader.ensure_index().await
    }
}
