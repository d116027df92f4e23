//! Temporal filtering of features.

use crate::geojson::{Dataset, Feature};

use super::year::parse_year_field;
use super::{END_YEAR_KEY, NO_FILTER, START_YEAR_KEY};

/// Returns true if `feature` was in service during `year`.
///
/// Both bounds are inclusive. A missing or sentinel bound is open, and
/// [`NO_FILTER`] matches every feature.
pub fn is_active(feature: &Feature, year: i32) -> bool {
    if year == NO_FILTER {
        return true;
    }

    if let Some(start) = parse_year_field(feature.property(START_YEAR_KEY))
        && year < start
    {
        return false;
    }

    if let Some(end) = parse_year_field(feature.property(END_YEAR_KEY))
        && year > end
    {
        return false;
    }

    true
}

/// Features of `dataset` active in `year`, in source order.
pub fn filter_by_year(dataset: &Dataset, year: i32) -> Vec<&Feature> {
    dataset
        .features()
        .iter()
        .filter(|f| is_active(f, year))
        .collect()
}
