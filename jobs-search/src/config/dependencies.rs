//! Dependency initialization and wiring for jobs search.

use std::env;
use std::sync::Arc;
use tracing::info;

use crate::IndexingError;
use jobs_search_ingest::PositionOpeningImporter;
use jobs_search_repository::config::{DEFAULT_GEONAMES_INDEX, DEFAULT_INDEX_NAME};
use jobs_search_repository::{IndexConfig, OpenSearchClient, PositionOpeningClient, SearchEngineClient};

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Build the index names from a variable lookup, falling back to defaults
/// for unset or blank values.
pub fn index_config_from(lookup: impl Fn(&str) -> Option<String>) -> IndexConfig {
    let read = |key: &str, default: &str| {
        lookup(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    IndexConfig::new(
        read("POSITION_OPENINGS_INDEX", DEFAULT_INDEX_NAME),
        read("GEONAMES_INDEX", DEFAULT_GEONAMES_INDEX),
    )
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Search, paging and index lifecycle.
    pub client: PositionOpeningClient,
    /// Record import into the position openings index.
    pub importer: PositionOpeningImporter,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `POSITION_OPENINGS_INDEX`: Position openings index (default: position_openings)
    /// - `GEONAMES_INDEX`: Gazetteer index used for geocoding (default: geonames)
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError)` - If initialization fails
    pub async fn new() -> Result<Self, IndexingError> {
        let opensearch_url =
            env::var("OPENSEARCH_URL").unwrap_or_else(|_| DEFAULT_OPENSEARCH_URL.to_string());
        let index_config = index_config_from(|key| env::var(key).ok());

        info!(
            opensearch_url = %opensearch_url,
            index = %index_config.name,
            geonames = %index_config.geonames,
            "Initializing dependencies"
        );

        let search_client = OpenSearchClient::new(&opensearch_url, index_config)
            .await
            .map_err(|e| IndexingError::config(format!("Failed to create OpenSearch client: {}", e)))?;

        // Verify OpenSearch is reachable
        let client = Arc::new(search_client);
        let healthy = client
            .health_check()
            .await
            .map_err(|e| IndexingError::config(format!("OpenSearch health check failed: {}", e)))?;

        if !healthy {
            return Err(IndexingError::config("OpenSearch cluster is unhealthy"));
        }

        info!("OpenSearch connection verified");

        let geocoder = Arc::new(client.geocoder());
        let importer = PositionOpeningImporter::new(client.clone(), geocoder);

        Ok(Self {
            client: PositionOpeningClient::new(client),
            importer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_index_config_defaults() {
        let config = index_config_from(|_| None);

        assert_eq!(config.name, "position_openings");
        assert_eq!(config.geonames, "geonames");
    }

    #[test]
    fn test_index_config_overrides() {
        let vars = HashMap::from([
            ("POSITION_OPENINGS_INDEX", "test:position_openings".to_string()),
            ("GEONAMES_INDEX", "  ".to_string()),
        ]);

        let config = index_config_from(|key| vars.get(key).cloned());

        assert_eq!(config.name, "test:position_openings");
        assert_eq!(config.geonames, "geonames");
    }
}
