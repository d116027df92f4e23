//! Year fields in the N05 survey data.

use crate::geojson::PropertyValue;

/// Placeholder the survey uses for an unknown year.
const UNKNOWN_YEAR: i64 = 999;

/// Values at or above this mean "still in service" or "not applicable".
const OPEN_ENDED_FROM: i64 = 9000;

/// Returns true if `year` is a survey placeholder rather than a real year.
pub fn is_sentinel(year: i64) -> bool {
    year == UNKNOWN_YEAR || year >= OPEN_ENDED_FROM
}

/// Parse a start or end year property.
///
/// Strings are trimmed and read as base-10 integers; numbers are truncated
/// toward zero. Missing, unparsable and sentinel values all yield `None`,
/// which callers treat as an open bound.
pub fn parse_year_field(value: Option<&PropertyValue>) -> Option<i32> {
    let year = match value? {
        PropertyValue::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<i64>().ok()?
        }
        PropertyValue::Number(n) => match n.as_i64() {
            Some(i) => i,
            None => n.as_f64()?.trunc() as i64,
        },
        _ => return None,
    };

    if is_sentinel(year) {
        return None;
    }
    i32::try_from(year).ok()
}
