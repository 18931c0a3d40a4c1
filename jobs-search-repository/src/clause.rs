//! Typed query clauses and search requests.
//!
//! The query builder accumulates these values; they are only turned into
//! the engine's JSON wire format when a request is sent.

use jobs_search_shared::GeoPoint;
use serde_json::Value;

/// Bounds of a range clause. Values are passed through as-is (dates are
/// `YYYY-MM-DD`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeBounds {
    pub lte: Option<String>,
    pub lt: Option<String>,
}

/// A single query condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Exact match on a keyword or numeric field.
    Term { field: String, value: Value },
    /// Exact match on any of several values.
    Terms { field: String, values: Vec<String> },
    /// Keyword prefix match.
    Prefix { field: String, value: String },
    /// Analyzed full-text match.
    Match {
        field: String,
        query: String,
        /// Every token must match (`operator: and`).
        require_all: bool,
        analyzer: Option<String>,
    },
    /// Range condition, used as a filter.
    Range { field: String, bounds: RangeBounds },
    /// Boolean clause evaluated against a nested object path.
    Nested { path: String, query: BoolClause },
}

impl Clause {
    pub fn term(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn terms<I, S>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Terms {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn prefix(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Prefix {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Analyzed match requiring every token to be present.
    pub fn matching_all(field: impl Into<String>, query: impl Into<String>) -> Self {
        Self::Match {
            field: field.into(),
            query: query.into(),
            require_all: true,
            analyzer: None,
        }
    }

    /// Analyzed match using a named search analyzer.
    pub fn matching_with_analyzer(
        field: impl Into<String>,
        query: impl Into<String>,
        analyzer: impl Into<String>,
    ) -> Self {
        Self::Match {
            field: field.into(),
            query: query.into(),
            require_all: false,
            analyzer: Some(analyzer.into()),
        }
    }

    pub fn range(field: impl Into<String>, bounds: RangeBounds) -> Self {
        Self::Range {
            field: field.into(),
            bounds,
        }
    }

    pub fn nested(path: impl Into<String>, query: BoolClause) -> Self {
        Self::Nested {
            path: path.into(),
            query,
        }
    }
}

/// MUST / SHOULD clauses plus an optional minimum-should-match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolClause {
    pub must: Vec<Clause>,
    pub should: Vec<Clause>,
    pub minimum_should_match: Option<u32>,
}

impl BoolClause {
    pub fn new() -> Self {
        Self::default()
    }

    /// A boolean clause where at least one SHOULD entry has to match.
    pub fn at_least_one_should() -> Self {
        Self {
            minimum_should_match: Some(1),
            ..Self::default()
        }
    }

    pub fn must(&mut self, clause: Clause) -> &mut Self {
        self.must.push(clause);
        self
    }

    pub fn should(&mut self, clause: Clause) -> &mut Self {
        self.should.push(clause);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.must.is_empty() && self.should.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// How hits are ordered.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Sort {
    /// Engine relevance score.
    #[default]
    Relevance,
    /// A stored field.
    Field {
        field: String,
        direction: SortDirection,
    },
    /// Distance from a point, nearest first.
    GeoDistance {
        field: String,
        nested_path: String,
        point: GeoPoint,
    },
}

/// Highlighting of a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub field: String,
    /// `0` highlights the whole field as one fragment.
    pub number_of_fragments: u32,
}

/// A complete search request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchRequest {
    /// Scoring query; `None` means browse mode (filters only).
    pub query: Option<BoolClause>,
    /// Non-scoring filters applied to every hit.
    pub filters: Vec<Clause>,
    pub sort: Sort,
    pub size: usize,
    pub from: usize,
    pub highlight: Option<Highlight>,
    /// Restrict `_source` to these fields.
    pub source_fields: Option<Vec<String>>,
}

impl SearchRequest {
    pub fn uses_geo_distance(&self) -> bool {
        matches!(self.sort, Sort::GeoDistance { .. })
    }
}
