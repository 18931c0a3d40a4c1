//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the position
//! openings index.

use serde_json::{json, Value};

/// Synonyms file for the title analyzer, relative to the OpenSearch config
/// directory.
pub const SYNONYMS_PATH: &str = "analysis/synonyms.txt";

/// Get the index settings and mappings for the position openings index.
///
/// The configuration includes:
/// - **custom_analyzer**: whitespace tokenizer, lowercase, synonyms and
///   snowball stemming for titles
/// - **simple** analyzer for city names
/// - **Keyword fields**: source, tags, organization, state and rate interval
///   for exact filtering
/// - **Nested locations** with a `geo_point` for distance sorting
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1,
            "analysis": {
                "filter": {
                    "synonym": {
                        "type": "synonym",
                        "synonyms_path": SYNONYMS_PATH
                    },
                    "snowball": {
                        "type": "snowball",
                        "language": "English"
                    }
                },
                "analyzer": {
                    "custom_analyzer": {
                        "type": "custom",
                        "tokenizer": "whitespace",
                        "filter": ["lowercase", "synonym", "snowball"]
                    }
                }
            }
        },
        "mappings": {
            "properties": {
                "id": { "type": "keyword" },
                "type": { "type": "keyword" },
                "source": { "type": "keyword" },
                "tags": { "type": "keyword" },
                "external_id": { "type": "long" },
                "position_title": {
                    "type": "text",
                    "analyzer": "custom_analyzer",
                    "term_vector": "with_positions_offsets"
                },
                "organization_id": { "type": "keyword" },
                "organization_name": { "type": "keyword", "index": false },
                "locations": {
                    "type": "nested",
                    "properties": {
                        "city": { "type": "text", "analyzer": "simple" },
                        "state": { "type": "keyword" },
                        "geo": { "type": "geo_point" }
                    }
                },
                "start_date": { "type": "date", "format": "yyyy-MM-dd" },
                "end_date": { "type": "date", "format": "yyyy-MM-dd" },
                "minimum": { "type": "float" },
                "maximum": { "type": "float" },
                "position_offering_type_code": { "type": "integer" },
                "position_schedule_type_code": { "type": "integer" },
                "rate_interval_code": { "type": "keyword" },
                "timestamp": { "type": "date" }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_settings_structure() {
        let settings = get_index_settings();
        let properties = &settings["mappings"]["properties"];

        assert!(settings["settings"]["number_of_shards"].is_number());
        assert_eq!(
            settings["settings"]["analysis"]["analyzer"]["custom_analyzer"]["tokenizer"],
            "whitespace"
        );
        assert_eq!(properties["position_title"]["analyzer"], "custom_analyzer");
        assert_eq!(properties["locations"]["type"], "nested");
        assert_eq!(properties["locations"]["properties"]["geo"]["type"], "geo_point");
        assert_eq!(properties["locations"]["properties"]["city"]["analyzer"], "simple");
    }

    #[test]
    fn test_keyword_fields() {
        let settings = get_index_settings();
        let properties = &settings["mappings"]["properties"];

        for field in ["id", "source", "tags", "organization_id", "rate_interval_code"] {
            assert_eq!(properties[field]["type"], "keyword", "{field} should be a keyword");
        }
        assert_eq!(properties["locations"]["properties"]["state"]["type"], "keyword");
    }

    #[test]
    fn test_date_format() {
        let settings = get_index_settings();
        let properties = &settings["mappings"]["properties"];

        assert_eq!(properties["start_date"]["format"], "yyyy-MM-dd");
        assert_eq!(properties["end_date"]["format"], "yyyy-MM-dd");
        assert_eq!(properties["timestamp"]["type"], "date");
    }
}
