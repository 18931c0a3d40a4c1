//! The public shape of one search result.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A position opening as returned to search callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionOpeningResult {
    pub id: String,
    pub source: String,
    pub external_id: i64,
    pub position_title: String,
    pub organization_name: Option<String>,
    pub rate_interval_code: Option<String>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    /// Locations rendered as `"City, State"`.
    pub locations: Vec<String>,
    pub url: Option<String>,
}

/// Detail page URL for a posting, when its source has a known URL scheme.
pub fn position_opening_url(source: &str, external_id: i64) -> Option<String> {
    if source == "usajobs" {
        return Some(format!(
            "https://www.usajobs.gov/GetJob/ViewDetails/{}",
            external_id
        ));
    }

    let agency = source.strip_prefix("ng:").filter(|agency| !agency.is_empty())?;
    Some(format!(
        "https://agency.governmentjobs.com/{}/default.cfm?action=viewjob&jobid={}",
        agency, external_id
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usajobs_url() {
        let url = position_opening_url("usajobs", 12345).unwrap();
        assert_eq!(url, "https://www.usajobs.gov/GetJob/ViewDetails/12345");
    }

    #[test]
    fn test_agency_url() {
        let url = position_opening_url("ng:springfield", 77).unwrap();
        assert!(url.contains("/springfield/"));
        assert!(url.ends_with("jobid=77"));
    }

    #[test]
    fn test_unknown_source_has_no_url() {
        assert!(position_opening_url("other-unknown", 1).is_none());
        assert!(position_opening_url("ng:", 1).is_none());
    }
}
