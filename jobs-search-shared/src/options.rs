//! Search request options as received from callers.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::query::Query;

/// Upper bound on documents returned by a single search page.
pub const MAX_RETURNED_DOCUMENTS: usize = 100;

/// Page size used when the caller doesn't ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Field browse results are sorted by (descending) when no keywords are given.
pub const DEFAULT_SORT_FIELD: &str = "timestamp";

/// Options for one search call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Free-form query text.
    pub query: Option<String>,
    /// Organization filter.
    pub organization_id: Option<String>,
    /// Restrict results to one data source.
    pub source: Option<String>,
    /// Space-delimited tags; a document matches if it carries any of them.
    pub tags: Option<String>,
    /// `"lat,lon"` point for nearest-first ordering.
    pub lat_lon: Option<String>,
    /// Requested page size.
    pub size: usize,
    /// Offset of the first result.
    pub from: usize,
    /// Sort field used when browsing without keywords.
    pub sort_by: String,
    /// Substitute highlighted titles in the results.
    pub hl: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            query: None,
            organization_id: None,
            source: None,
            tags: None,
            lat_lon: None,
            size: DEFAULT_PAGE_SIZE,
            from: 0,
            sort_by: DEFAULT_SORT_FIELD.to_string(),
            hl: false,
        }
    }
}

impl SearchOptions {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_organization_id(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn with_lat_lon(mut self, lat_lon: impl Into<String>) -> Self {
        self.lat_lon = Some(lat_lon.into());
        self
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_from(mut self, from: usize) -> Self {
        self.from = from;
        self
    }

    pub fn with_highlight(mut self, hl: bool) -> Self {
        self.hl = hl;
        self
    }

    /// Page size actually requested from the index.
    pub fn document_limit(&self) -> usize {
        self.size.min(MAX_RETURNED_DOCUMENTS)
    }

    /// The source filter, if one was given and isn't blank.
    pub fn source_filter(&self) -> Option<&str> {
        self.source.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Tags split on whitespace; empty when none were given.
    pub fn tag_set(&self) -> BTreeSet<String> {
        self.tags
            .as_deref()
            .map(|tags| tags.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Sort field for browse mode, falling back to the default when blank.
    pub fn sort_field(&self) -> &str {
        let field = self.sort_by.trim();
        if field.is_empty() {
            DEFAULT_SORT_FIELD
        } else {
            field
        }
    }

    /// Parse the query text and organization id into a `Query`.
    pub fn to_query(&self) -> Query {
        Query::new(self.query.as_deref(), self.organization_id.as_deref())
    }
}
