//! OpenSearch wire format.
//!
//! This module turns typed clauses and requests into OpenSearch query DSL
//! bodies.

use serde_json::{json, Map, Value};

use crate::clause::{BoolClause, Clause, RangeBounds, SearchRequest, Sort, SortDirection};

/// Build the `_search` body for a request.
///
/// The scoring query (if any) goes under `bool.must` and the filters under
/// `bool.filter`, so filters never affect relevance.
pub fn search_body(request: &SearchRequest) -> Value {
    let mut body = Map::new();

    let mut root = Map::new();
    if let Some(query) = &request.query {
        root.insert("must".to_string(), json!([bool_query(query)]));
    }
    if !request.filters.is_empty() {
        let filters: Vec<Value> = request.filters.iter().map(clause_query).collect();
        root.insert("filter".to_string(), Value::Array(filters));
    }
    let query = if root.is_empty() {
        json!({ "match_all": {} })
    } else {
        json!({ "bool": root })
    };
    body.insert("query".to_string(), query);

    if let Some(sort) = sort_clause(&request.sort) {
        body.insert("sort".to_string(), json!([sort]));
    }

    body.insert("size".to_string(), json!(request.size));
    body.insert("from".to_string(), json!(request.from));
    body.insert("track_total_hits".to_string(), json!(true));

    if let Some(highlight) = &request.highlight {
        body.insert(
            "highlight".to_string(),
            json!({
                "fields": {
                    highlight.field.clone(): {
                        "number_of_fragments": highlight.number_of_fragments
                    }
                }
            }),
        );
    }

    if let Some(fields) = &request.source_fields {
        body.insert("_source".to_string(), json!(fields));
    }

    Value::Object(body)
}

/// Build a `_delete_by_query` body for a single clause.
pub fn delete_by_query_body(clause: &Clause) -> Value {
    json!({
        "query": {
            "bool": {
                "filter": [clause_query(clause)]
            }
        }
    })
}

/// Build the gazetteer lookup body: the place must match all tokens of
/// `location` within the exact `state`.
pub fn geocode_body(place: &str, region: &str) -> Value {
    let mut query = BoolClause::new();
    query
        .must(Clause::matching_all("location", place))
        .must(Clause::term("state", region));

    json!({
        "query": bool_query(&query),
        "size": 1,
        "_source": ["geo"]
    })
}

fn clause_query(clause: &Clause) -> Value {
    match clause {
        Clause::Term { field, value } => json!({ "term": { field.clone(): value } }),
        Clause::Terms { field, values } => json!({ "terms": { field.clone(): values } }),
        Clause::Prefix { field, value } => json!({ "prefix": { field.clone(): value } }),
        Clause::Match {
            field,
            query,
            require_all,
            analyzer,
        } => {
            let mut options = Map::new();
            options.insert("query".to_string(), json!(query));
            if *require_all {
                options.insert("operator".to_string(), json!("and"));
            }
            if let Some(analyzer) = analyzer {
                options.insert("analyzer".to_string(), json!(analyzer));
            }
            json!({ "match": { field.clone(): options } })
        }
        Clause::Range { field, bounds } => json!({ "range": { field.clone(): range_bounds(bounds) } }),
        Clause::Nested { path, query } => json!({
            "nested": {
                "path": path,
                "query": bool_query(query)
            }
        }),
    }
}

fn bool_query(query: &BoolClause) -> Value {
    let mut clause = Map::new();
    if !query.must.is_empty() {
        let must: Vec<Value> = query.must.iter().map(clause_query).collect();
        clause.insert("must".to_string(), Value::Array(must));
    }
    if !query.should.is_empty() {
        let should: Vec<Value> = query.should.iter().map(clause_query).collect();
        clause.insert("should".to_string(), Value::Array(should));

        // Only meaningful with SHOULD entries; without them it would reject every hit.
        if let Some(minimum) = query.minimum_should_match {
            clause.insert("minimum_should_match".to_string(), json!(minimum));
        }
    }
    json!({ "bool": clause })
}

fn range_bounds(bounds: &RangeBounds) -> Value {
    let mut range = Map::new();
    if let Some(lte) = &bounds.lte {
        range.insert("lte".to_string(), json!(lte));
    }
    if let Some(lt) = &bounds.lt {
        range.insert("lt".to_string(), json!(lt));
    }
    Value::Object(range)
}

fn sort_clause(sort: &Sort) -> Option<Value> {
    match sort {
        Sort::Relevance => None,
        Sort::Field { field, direction } => Some(json!({
            field.clone(): { "order": direction_name(*direction) }
        })),
        Sort::GeoDistance {
            field,
            nested_path,
            point,
        } => Some(json!({
            "_geo_distance": {
                field.clone(): { "lat": point.lat, "lon": point.lon },
                "order": "asc",
                "unit": "mi",
                "nested": { "path": nested_path }
            }
        })),
    }
}

fn direction_name(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Asc => "asc",
        SortDirection::Desc => "desc",
    }
}
