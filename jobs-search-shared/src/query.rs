//! Parsed search intent.
//!
//! A `Query` is built once from the raw query text and organization id.
//! Structured filters (offering type, schedule, pay interval, location) are
//! lifted out of the text; whatever is left over becomes the keywords.
//! Parsing never fails: fragments that don't parse are left as keywords or
//! dropped.

use std::sync::LazyLock;

use regex::Regex;

use crate::location::QueryLocation;

/// Offering type phrases and the position offering type code they select.
static OFFERING_TYPES: LazyLock<Vec<(Regex, i64)>> = LazyLock::new(|| {
    [
        (r"\bvolunteer(?:ing)?\b", 15328),
        (r"\binternships?\b", 15326),
        (r"\bseasonal\b", 15322),
        (r"\btemp(?:orary)?\b", 15318),
    ]
    .into_iter()
    .map(|(pattern, code)| (Regex::new(pattern).expect("valid offering type pattern"), code))
    .collect()
});

static SCHEDULE_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(full|part)[- ]?time\b").expect("valid schedule pattern"));

/// Pay interval phrases and the rate interval code they select.
static RATE_INTERVALS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [(r"\bhourly\b", "PH"), (r"\bsalar(?:y|ied)\b", "PA")]
        .into_iter()
        .map(|(pattern, code)| (Regex::new(pattern).expect("valid rate interval pattern"), code))
        .collect()
});

static LOCATION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:in|near)\s+").expect("valid location pattern"));

static STOPWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:jobs?|positions?|openings?|vacanc(?:y|ies)|employment|careers?|opportunit(?:y|ies)|postings?|gov|government|federal|usajobs)\b",
    )
    .expect("valid stopword pattern")
});

/// Phrases that follow "in" / "near" without naming a place.
const NOT_PLACES: &[&str] = &[
    "person",
    "demand",
    "home",
    "house",
    "office",
    "the office",
    "the field",
    "training",
    "progress",
    "general",
];

/// How the organization filter matches `organization_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrganizationFormat {
    /// Exact keyword match.
    #[default]
    Term,
    /// Prefix match, for department codes covering many sub-agencies.
    Prefix,
}

impl OrganizationFormat {
    /// Pick the match mode for an organization id and return the id to match.
    ///
    /// A trailing `*` or a two-character department code selects `Prefix`.
    fn select(organization_id: &str) -> Option<(String, Self)> {
        let id = organization_id.trim().to_uppercase();
        let (id, format) = match id.strip_suffix('*') {
            Some(stripped) => (stripped.trim_end().to_string(), Self::Prefix),
            None if id.chars().count() == 2 => (id, Self::Prefix),
            None => (id, Self::Term),
        };
        (!id.is_empty()).then_some((id, format))
    }
}

/// The structured intent behind a search request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    keywords: Option<String>,
    organization_id: Option<String>,
    organization_format: OrganizationFormat,
    location: Option<QueryLocation>,
    position_offering_type_code: Option<i64>,
    position_schedule_type_code: Option<i64>,
    rate_interval_code: Option<String>,
}

impl Query {
    pub fn new(query: Option<&str>, organization_id: Option<&str>) -> Self {
        let mut parsed = Self::default();

        if let Some(text) = query {
            parsed.keywords = parsed.parse(&normalize(text));
        }

        if let Some((id, format)) = organization_id.and_then(OrganizationFormat::select) {
            parsed.organization_id = Some(id);
            parsed.organization_format = format;
        }

        parsed
    }

    /// Lift structured filters out of normalized text and return the keywords.
    fn parse(&mut self, text: &str) -> Option<String> {
        let mut text = text.to_string();

        for (pattern, code) in OFFERING_TYPES.iter() {
            if pattern.is_match(&text) {
                self.position_offering_type_code = Some(*code);
                text = pattern.replace_all(&text, " ").into_owned();
                break;
            }
        }

        if let Some(captures) = SCHEDULE_TYPE.captures(&text) {
            self.position_schedule_type_code = Some(if &captures[1] == "full" { 1 } else { 2 });
            text = SCHEDULE_TYPE.replace_all(&text, " ").into_owned();
        }

        for (pattern, code) in RATE_INTERVALS.iter() {
            if pattern.is_match(&text) {
                self.rate_interval_code = Some(code.to_string());
                text = pattern.replace_all(&text, " ").into_owned();
                break;
            }
        }

        self.location = take_location(&mut text);

        let text = STOPWORDS.replace_all(&text, " ");
        let keywords = squish(&text);
        (!keywords.is_empty()).then_some(keywords)
    }

    pub fn keywords(&self) -> Option<&str> {
        self.keywords.as_deref()
    }

    pub fn organization_id(&self) -> Option<&str> {
        self.organization_id.as_deref()
    }

    pub fn organization_format(&self) -> OrganizationFormat {
        self.organization_format
    }

    pub fn location(&self) -> Option<&QueryLocation> {
        self.location.as_ref()
    }

    pub fn position_offering_type_code(&self) -> Option<i64> {
        self.position_offering_type_code
    }

    pub fn position_schedule_type_code(&self) -> Option<i64> {
        self.position_schedule_type_code
    }

    pub fn rate_interval_code(&self) -> Option<&str> {
        self.rate_interval_code.as_deref()
    }

    pub fn has_state(&self) -> bool {
        self.location.as_ref().is_some_and(QueryLocation::has_state)
    }

    pub fn has_city(&self) -> bool {
        self.location.as_ref().is_some_and(QueryLocation::has_city)
    }

    /// True if the query carries anything to search or filter on.
    pub fn is_valid(&self) -> bool {
        self.keywords.is_some()
            || self.organization_id.is_some()
            || self.location.is_some()
            || self.position_offering_type_code.is_some()
            || self.position_schedule_type_code.is_some()
            || self.rate_interval_code.is_some()
    }
}

/// Cut a trailing `in <place>` / `near <place>` off the text.
///
/// The last marker wins, so "training in research in boston" keeps
/// "training in research" as keywords.
fn take_location(text: &mut String) -> Option<QueryLocation> {
    let (start, end) = LOCATION_MARKER
        .find_iter(text)
        .last()
        .map(|marker| (marker.start(), marker.end()))?;
    let place = text[end..].trim();

    // "near me" carries no place and no title words.
    if place == "me" {
        text.truncate(start);
        return None;
    }
    if NOT_PLACES.contains(&place) {
        return None;
    }

    let location = QueryLocation::parse(place)?;
    text.truncate(start);
    Some(location)
}

fn normalize(text: &str) -> String {
    squish(&text.to_lowercase())
}

fn squish(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
