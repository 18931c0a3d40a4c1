//! Geocoder trait definition.

use async_trait::async_trait;

use crate::errors::SearchError;
use jobs_search_shared::GeoPoint;

/// Resolves a place name within a region to coordinates.
#[async_trait]
pub trait GeocodeLookup: Send + Sync {
    /// Look up `place` (a normalized city name) within `region` (a state code).
    ///
    /// # Returns
    ///
    /// * `Ok(Some(GeoPoint))` - If the place is known
    /// * `Ok(None)` - If the place is unknown
    /// * `Err(SearchError)` - If the lookup itself fails
    async fn geocode(&self, place: &str, region: &str) -> Result<Option<GeoPoint>, SearchError>;
}
