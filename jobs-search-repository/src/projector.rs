//! Projection of raw index hits into public search results.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

use crate::query_builder::TITLE_FIELD;
use crate::types::{SearchHit, SearchHits};
use jobs_search_shared::{position_opening_url, Location, PositionOpeningResult};

/// The subset of a stored document that a result is built from.
#[derive(Debug, Deserialize)]
struct StoredOpening {
    source: String,
    external_id: i64,
    position_title: String,
    #[serde(default)]
    organization_name: Option<String>,
    #[serde(default)]
    rate_interval_code: Option<String>,
    #[serde(default)]
    minimum: Option<f64>,
    #[serde(default)]
    maximum: Option<f64>,
    start_date: NaiveDate,
    #[serde(default)]
    end_date: Option<NaiveDate>,
    #[serde(default)]
    locations: Option<Vec<Location>>,
}

/// Project every decodable hit, in hit order.
///
/// When `highlight` is set, the title is replaced by its highlighted
/// fragment wherever the engine returned one.
pub fn project_hits(hits: &SearchHits, highlight: bool) -> Vec<PositionOpeningResult> {
    hits.hits
        .iter()
        .filter_map(|hit| project_hit(hit, highlight))
        .collect()
}

fn project_hit(hit: &SearchHit, highlight: bool) -> Option<PositionOpeningResult> {
    let stored: StoredOpening = match serde_json::from_value(hit.source.clone()) {
        Ok(stored) => stored,
        Err(e) => {
            warn!(id = %hit.id, error = %e, "Skipping undecodable hit");
            return None;
        }
    };

    let position_title = highlight
        .then(|| hit.highlight_fragment(TITLE_FIELD))
        .flatten()
        .map(str::to_string)
        .unwrap_or(stored.position_title);

    Some(PositionOpeningResult {
        id: hit.id.clone(),
        url: position_opening_url(&stored.source, stored.external_id),
        source: stored.source,
        external_id: stored.external_id,
        position_title,
        organization_name: stored.organization_name,
        rate_interval_code: stored.rate_interval_code,
        minimum: stored.minimum,
        maximum: stored.maximum,
        start_date: stored.start_date,
        end_date: stored.end_date,
        locations: stored
            .locations
            .unwrap_or_default()
            .iter()
            .map(ToString::to_string)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn nurse_hit() -> SearchHit {
        SearchHit {
            id: "usajobs:327358300".to_string(),
            source: json!({
                "type": "position_opening",
                "source": "usajobs",
                "external_id": 327358300,
                "position_title": "Nurse Practitioner",
                "organization_name": "Veterans Affairs, Veterans Health Administration",
                "rate_interval_code": "PA",
                "minimum": 42209.0,
                "maximum": 89711.0,
                "start_date": "2012-09-19",
                "end_date": "2012-10-19",
                "locations": [
                    { "city": "Odessa", "state": "TX", "geo": { "lat": 31.84, "lon": -102.37 } },
                    { "city": "Pittsburgh", "state": "PA" }
                ]
            }),
            highlight: HashMap::from([(
                "position_title".to_string(),
                vec!["<em>Nurse</em> Practitioner".to_string()],
            )]),
        }
    }

    fn hits(hits: Vec<SearchHit>) -> SearchHits {
        SearchHits {
            total: hits.len() as u64,
            hits,
        }
    }

    #[test]
    fn test_project_hit() {
        let results = project_hits(&hits(vec![nurse_hit()]), false);

        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.id, "usajobs:327358300");
        assert_eq!(result.position_title, "Nurse Practitioner");
        assert_eq!(result.minimum, Some(42209.0));
        assert_eq!(result.start_date, NaiveDate::from_ymd_opt(2012, 9, 19).unwrap());
        assert_eq!(result.locations, vec!["Odessa, TX", "Pittsburgh, PA"]);
        assert_eq!(
            result.url.as_deref(),
            Some("https://www.usajobs.gov/GetJob/ViewDetails/327358300")
        );
    }

    #[test]
    fn test_highlighted_title() {
        let results = project_hits(&hits(vec![nurse_hit()]), true);
        assert_eq!(results[0].position_title, "<em>Nurse</em> Practitioner");
    }

    #[test]
    fn test_highlight_requested_without_fragment() {
        let mut hit = nurse_hit();
        hit.highlight.clear();

        let results = project_hits(&hits(vec![hit]), true);
        assert_eq!(results[0].position_title, "Nurse Practitioner");
    }

    #[test]
    fn test_suppressed_locations_and_unknown_source() {
        let hit = SearchHit {
            id: "other:9".to_string(),
            source: json!({
                "source": "other",
                "external_id": 9,
                "position_title": "Clerk",
                "start_date": "2013-01-01"
            }),
            highlight: HashMap::new(),
        };

        let results = project_hits(&hits(vec![hit]), false);
        assert!(results[0].locations.is_empty());
        assert!(results[0].url.is_none());
        assert!(results[0].end_date.is_none());
    }

    #[test]
    fn test_undecodable_hit_skipped() {
        let broken = SearchHit {
            id: "usajobs:1".to_string(),
            source: json!({ "source": "usajobs" }),
            highlight: HashMap::new(),
        };

        let results = project_hits(&hits(vec![broken, nurse_hit()]), false);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].external_id, 327358300);
    }
}
