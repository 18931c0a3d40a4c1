//! Place names as they appear in search queries.

/// US states and territories: postal code and full name.
const STATES: &[(&str, &str)] = &[
    ("AL", "alabama"),
    ("AK", "alaska"),
    ("AS", "american samoa"),
    ("AZ", "arizona"),
    ("AR", "arkansas"),
    ("CA", "california"),
    ("CO", "colorado"),
    ("CT", "connecticut"),
    ("DE", "delaware"),
    ("DC", "district of columbia"),
    ("FL", "florida"),
    ("GA", "georgia"),
    ("GU", "guam"),
    ("HI", "hawaii"),
    ("ID", "idaho"),
    ("IL", "illinois"),
    ("IN", "indiana"),
    ("IA", "iowa"),
    ("KS", "kansas"),
    ("KY", "kentucky"),
    ("LA", "louisiana"),
    ("ME", "maine"),
    ("MD", "maryland"),
    ("MA", "massachusetts"),
    ("MI", "michigan"),
    ("MN", "minnesota"),
    ("MS", "mississippi"),
    ("MO", "missouri"),
    ("MT", "montana"),
    ("NE", "nebraska"),
    ("NV", "nevada"),
    ("NH", "new hampshire"),
    ("NJ", "new jersey"),
    ("NM", "new mexico"),
    ("NY", "new york"),
    ("NC", "north carolina"),
    ("ND", "north dakota"),
    ("MP", "northern mariana islands"),
    ("OH", "ohio"),
    ("OK", "oklahoma"),
    ("OR", "oregon"),
    ("PA", "pennsylvania"),
    ("PR", "puerto rico"),
    ("RI", "rhode island"),
    ("SC", "south carolina"),
    ("SD", "south dakota"),
    ("TN", "tennessee"),
    ("TX", "texas"),
    ("UT", "utah"),
    ("VT", "vermont"),
    ("VI", "virgin islands"),
    ("VA", "virginia"),
    ("WA", "washington"),
    ("WV", "west virginia"),
    ("WI", "wisconsin"),
    ("WY", "wyoming"),
];

/// Longest state name, in words ("northern mariana islands").
const MAX_STATE_WORDS: usize = 3;

/// Resolve a state code or full state name (any case) to its postal code.
pub fn state_code(name: &str) -> Option<&'static str> {
    let name = name.trim().trim_end_matches('.');
    STATES
        .iter()
        .find(|(code, full)| code.eq_ignore_ascii_case(name) || full.eq_ignore_ascii_case(name))
        .map(|(code, _)| *code)
}

/// A location filter parsed from free text: a city, a state code, or both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryLocation {
    pub city: Option<String>,
    pub state: Option<String>,
}

impl QueryLocation {
    /// Parse `"city, state"`, `"city state"`, `"state"` or `"city"`.
    ///
    /// A bare two-letter state code is only read as a state after a comma or
    /// a city ("portland me"). On its own it is too ambiguous ("me", "or")
    /// and, like blank input, yields `None`.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim().trim_end_matches(',').trim();
        if text.is_empty() {
            return None;
        }

        if let Some((city, state)) = text.rsplit_once(',') {
            let city = non_blank(city);
            let state = state_code(state).map(str::to_string);
            if city.is_none() && state.is_none() {
                return None;
            }
            return Some(Self { city, state });
        }

        let words: Vec<&str> = text.split_whitespace().collect();
        for width in (1..=MAX_STATE_WORDS.min(words.len())).rev() {
            let (head, tail) = words.split_at(words.len() - width);
            let tail = tail.join(" ");
            if head.is_empty() && tail.len() == 2 {
                continue;
            }
            if let Some(code) = state_code(&tail) {
                return Some(Self {
                    city: non_blank(&head.join(" ")),
                    state: Some(code.to_string()),
                });
            }
        }

        if let [word] = words.as_slice() {
            if word.chars().count() <= 2 {
                return None;
            }
        }

        Some(Self {
            city: Some(words.join(" ")),
            state: None,
        })
    }

    pub fn has_city(&self) -> bool {
        self.city.as_deref().is_some_and(|c| !c.is_empty())
    }

    pub fn has_state(&self) -> bool {
        self.state.as_deref().is_some_and(|s| !s.is_empty())
    }
}

fn non_blank(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
