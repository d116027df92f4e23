//! Data transfer objects for web requests and responses.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Accepted `date` format.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Query string for the dataset endpoints.
#[derive(Debug, Default)]
pub struct DatasetQuery {
    /// Date in YYYY-MM-DD format (omit for the full dataset)
    pub date: Option<String>,
}

/// Error returned when `date` is not a valid YYYY-MM-DD date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date format, use YYYY-MM-DD")]
pub struct InvalidDate;

/// Returns true for exactly `DDDD-DD-DD`, ASCII digits and dashes only.
fn is_date_shaped(date: &str) -> bool {
    let bytes = date.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, &b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}

impl DatasetQuery {
    /// Build from decoded query pairs. A repeated `date` keeps the first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let date = pairs
            .into_iter()
            .find_map(|(key, value)| (key == "date").then_some(value));
        Self { date }
    }

    /// The year to filter for, or `None` when no date was given.
    pub fn filter_year(&self) -> Result<Option<i32>, InvalidDate> {
        let date = self.date.as_deref().map(str::trim).unwrap_or("");
        if date.is_empty() {
            return Ok(None);
        }
        if !is_date_shaped(date) {
            return Err(InvalidDate);
        }

        NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map(|d| Some(d.year()))
            .map_err(|_| InvalidDate)
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
