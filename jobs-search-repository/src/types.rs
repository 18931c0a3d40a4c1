//! Raw search responses as returned by the search engine.

use std::collections::HashMap;

use serde_json::Value;

/// One document hit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchHit {
    /// The document `_id`.
    pub id: String,
    /// The (possibly partial) `_source` of the document.
    pub source: Value,
    /// Highlight fragments keyed by field name.
    pub highlight: HashMap<String, Vec<String>>,
}

impl SearchHit {
    /// First highlight fragment for `field`, if the engine returned one.
    pub fn highlight_fragment(&self, field: &str) -> Option<&str> {
        self.highlight
            .get(field)
            .and_then(|fragments| fragments.first())
            .map(String::as_str)
    }
}

/// One page of hits plus the total number of matching documents.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchHits {
    pub total: u64,
    pub hits: Vec<SearchHit>,
}

impl SearchHits {
    pub fn empty() -> Self {
        Self::default()
    }
}
