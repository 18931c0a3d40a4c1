//! Index names used by the repository.

/// Default name of the position openings index.
pub const DEFAULT_INDEX_NAME: &str = "position_openings";

/// Default name of the gazetteer index used for geocoding.
pub const DEFAULT_GEONAMES_INDEX: &str = "geonames";

/// Names of the indices the OpenSearch clients talk to.
///
/// Built once at process start and handed to each client; it is never
/// changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Index holding position opening documents.
    pub name: String,
    /// Gazetteer index for place name lookups.
    pub geonames: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_INDEX_NAME.to_string(),
            geonames: DEFAULT_GEONAMES_INDEX.to_string(),
        }
    }
}

impl IndexConfig {
    pub fn new(name: impl Into<String>, geonames: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            geonames: geonames.into(),
        }
    }
}
