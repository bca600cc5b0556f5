//! Title / poem match counts
//!
//! Each search row carries a match-location field naming where the query
//! matched, either a string or an array of strings such as
//! `["title", "poem"]`. A row counts as a title match when any entry
//! mentions `title`, otherwise as a poem match when any entry mentions
//! `poem`. Rows are counted at most once, so the two counts never sum to
//! more than the number of rows.

use serde::Serialize;
use serde_json::Value;

/// Optional diagnostic counts added to a search response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchBreakdown {
    pub title_matches: usize,
    pub poem_matches: usize,
}

impl MatchBreakdown {
    pub fn from_rows(rows: &[Value], field: &str) -> Self {
        let mut breakdown = Self::default();
        for row in rows {
            let Some(location) = row.get(field) else {
                continue;
            };
            if mentions(location, "title") {
                breakdown.title_matches += 1;
            } else if mentions(location, "poem") {
                breakdown.poem_matches += 1;
            }
        }
        breakdown
    }
}

fn mentions(location: &Value, needle: &str) -> bool {
    match location {
        Value::String(text) => text.contains(needle),
        Value::Array(items) => items
            .iter()
            .any(|item| item.as_str().is_some_and(|text| text.contains(needle))),
        _ => false,
    }
}
