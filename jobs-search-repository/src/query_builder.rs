//! Search request construction.
//!
//! `build_search_request` turns caller options and a parsed `Query` into a
//! typed `SearchRequest`:
//!
//! - a boolean query (at least one SHOULD must match) when a source, tags or
//!   a valid query is present, otherwise browse mode with no scoring query
//! - a `start_date <= today` filter on every request
//! - relevance order when keywords are given, otherwise nearest-first when a
//!   valid `lat,lon` is supplied, otherwise `sort_by` descending
//! - highlighting of the whole title

use chrono::NaiveDate;

use crate::clause::{BoolClause, Clause, Highlight, RangeBounds, SearchRequest, Sort, SortDirection};
use jobs_search_shared::{GeoPoint, OrganizationFormat, Query, SearchOptions};

/// Title field, searched and highlighted.
pub const TITLE_FIELD: &str = "position_title";

/// Search analyzer for titles (whitespace, lowercase, synonyms, snowball).
pub const TITLE_ANALYZER: &str = "custom_analyzer";

const LOCATIONS_PATH: &str = "locations";
const CITY_FIELD: &str = "locations.city";
const STATE_FIELD: &str = "locations.state";
const GEO_FIELD: &str = "locations.geo";

/// Format of date values in range clauses, matching the index date format.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Build the search request for `options` and its parsed `query`.
///
/// `today` bounds the start date filter so postings that haven't opened yet
/// are never returned.
pub fn build_search_request(options: &SearchOptions, query: &Query, today: NaiveDate) -> SearchRequest {
    SearchRequest {
        query: build_query(options, query),
        filters: vec![started_on_or_before(today)],
        sort: select_sort(options, query),
        size: options.document_limit(),
        from: options.from,
        highlight: Some(Highlight {
            field: TITLE_FIELD.to_string(),
            number_of_fragments: 0,
        }),
        source_fields: None,
    }
}

/// Build the request for one page of a source's external ids, ordered by
/// document id.
pub fn build_source_ids_request(source: &str, from: usize, size: usize) -> SearchRequest {
    let mut query = BoolClause::new();
    query.must(Clause::term("source", source));

    SearchRequest {
        query: Some(query),
        filters: Vec::new(),
        sort: Sort::Field {
            field: "id".to_string(),
            direction: SortDirection::Asc,
        },
        size,
        from,
        highlight: None,
        source_fields: Some(vec!["external_id".to_string()]),
    }
}

/// Filter matching postings whose end date is before `today`.
pub fn expired_before(today: NaiveDate) -> Clause {
    Clause::range(
        "end_date",
        RangeBounds {
            lt: Some(today.format(DATE_FORMAT).to_string()),
            ..RangeBounds::default()
        },
    )
}

/// Parse a `"lat,lon"` pair.
///
/// Anything other than exactly two numbers within latitude and longitude
/// range yields `None`.
pub fn parse_lat_lon(text: &str) -> Option<GeoPoint> {
    let mut parts = text.split(',');
    let lat: f64 = parts.next()?.trim().parse().ok()?;
    let lon: f64 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    let in_range = (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon);
    in_range.then(|| GeoPoint::new(lat, lon))
}

fn build_query(options: &SearchOptions, query: &Query) -> Option<BoolClause> {
    let source = options.source_filter();
    let tags = options.tag_set();
    if source.is_none() && tags.is_empty() && !query.is_valid() {
        return None;
    }

    let mut clause = BoolClause::at_least_one_should();

    if let Some(source) = source {
        clause.must(Clause::term("source", source));
    }
    if !tags.is_empty() {
        clause.must(Clause::terms("tags", tags));
    }
    if let Some(code) = query.position_offering_type_code() {
        clause.must(Clause::term("position_offering_type_code", code));
    }
    if let Some(code) = query.position_schedule_type_code() {
        clause.must(Clause::term("position_schedule_type_code", code));
    }

    if let Some(keywords) = query.keywords() {
        clause.should(Clause::matching_with_analyzer(TITLE_FIELD, keywords, TITLE_ANALYZER));

        // With no explicit location the keywords may name a place.
        if query.location().is_none() {
            let mut city = BoolClause::new();
            city.must(Clause::matching_all(CITY_FIELD, keywords));
            clause.should(Clause::nested(LOCATIONS_PATH, city));
        }
    }

    if let Some(code) = query.rate_interval_code() {
        clause.must(Clause::term("rate_interval_code", code));
    }

    if let Some(organization_id) = query.organization_id() {
        clause.must(match query.organization_format() {
            OrganizationFormat::Term => Clause::term("organization_id", organization_id),
            OrganizationFormat::Prefix => Clause::prefix("organization_id", organization_id),
        });
    }

    if let Some(location) = query.location() {
        let mut place = BoolClause::new();
        if let Some(state) = location.state.as_deref().filter(|_| query.has_state()) {
            place.must(Clause::term(STATE_FIELD, state));
        }
        if let Some(city) = location.city.as_deref().filter(|_| query.has_city()) {
            place.must(Clause::matching_all(CITY_FIELD, city));
        }
        clause.must(Clause::nested(LOCATIONS_PATH, place));
    }

    Some(clause)
}

fn select_sort(options: &SearchOptions, query: &Query) -> Sort {
    if query.keywords().is_some() {
        return Sort::Relevance;
    }

    match options.lat_lon.as_deref().and_then(parse_lat_lon) {
        Some(point) => Sort::GeoDistance {
            field: GEO_FIELD.to_string(),
            nested_path: LOCATIONS_PATH.to_string(),
            point,
        },
        None => Sort::Field {
            field: options.sort_field().to_string(),
            direction: SortDirection::Desc,
        },
    }
}

fn started_on_or_before(today: NaiveDate) -> Clause {
    Clause::range(
        "start_date",
        RangeBounds {
            lte: Some(today.format(DATE_FORMAT).to_string()),
            ..RangeBounds::default()
        },
    )
}
