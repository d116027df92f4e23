//! Station visibility derived from active rail lines.
//!
//! A station is shown for a year only if the line it belongs to survives
//! that year's temporal filter on the rail dataset. Line names are compared
//! after trimming surrounding whitespace and nothing else.

use std::collections::HashSet;

use crate::geojson::{Dataset, Feature};

use super::filter::filter_by_year;
use super::{LINE_NAME_KEY, NO_FILTER};

/// Names of the lines carried by `features`, skipping blank names.
pub fn active_line_names<'a>(features: &[&'a Feature]) -> HashSet<&'a str> {
    features
        .iter()
        .map(|&f| f.property_str(LINE_NAME_KEY))
        .filter(|name| !name.is_empty())
        .collect()
}

/// A second-stage filter applied after the temporal filter.
pub trait CrossFilter {
    /// Narrow the features that survived the temporal filter for `year`.
    fn apply<'a>(&self, year: i32, features: Vec<&'a Feature>) -> Vec<&'a Feature>;

    /// Short label for logging.
    fn name(&self) -> &'static str;
}

/// Keeps only stations whose line is active in the rail dataset.
#[derive(Debug, Clone, Copy)]
pub struct LineMembership<'r> {
    rail: &'r Dataset,
}

impl<'r> LineMembership<'r> {
    pub fn new(rail: &'r Dataset) -> Self {
        Self { rail }
    }
}

impl CrossFilter for LineMembership<'_> {
    fn apply<'a>(&self, year: i32, features: Vec<&'a Feature>) -> Vec<&'a Feature> {
        if year == NO_FILTER {
            return features;
        }

        let active_rail = filter_by_year(self.rail, year);
        let allowed = active_line_names(&active_rail);
        if allowed.is_empty() {
            return Vec::new();
        }

        features
            .into_iter()
            .filter(|f| {
                let name = f.property_str(LINE_NAME_KEY);
                !name.is_empty() && allowed.contains(name)
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "line-membership"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rail() -> Dataset {
        Dataset::from_bytes(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":null,"properties":{"N05_002":"Yamanote","N05_005b":"1925","N05_005e":"9999"}},
                {"type":"Feature","geometry":null,"properties":{"N05_002":" Ginza ","N05_005b":"1927"}},
                {"type":"Feature","geometry":null,"properties":{"N05_002":"Old Line","N05_005b":"1900","N05_005e":"1950"}},
                {"type":"Feature","geometry":null,"properties":{"N05_002":"","N05_005b":"1800"}}
            ]}"#,
        )
        .unwrap()
    }

    fn stations() -> Dataset {
        Dataset::from_bytes(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":null,"properties":{"N05_011":"Shibuya","N05_002":"Yamanote"}},
                {"type":"Feature","geometry":null,"properties":{"N05_011":"Ueno","N05_002":"Ginza  "}},
                {"type":"Feature","geometry":null,"properties":{"N05_011":"Ghost","N05_002":"Old Line"}},
                {"type":"Feature","geometry":null,"properties":{"N05_011":"Nameless","N05_002":""}},
                {"type":"Feature","geometry":null,"properties":{"N05_011":"Shouty","N05_002":"YAMANOTE"}}
            ]}"#,
        )
        .unwrap()
    }

    fn names(features: &[&Feature]) -> Vec<String> {
        features
            .iter()
            .map(|f| f.property_str("N05_011").to_string())
            .collect()
    }

    fn all(dataset: &Dataset) -> Vec<&Feature> {
        dataset.features().iter().collect()
    }

    #[test]
    fn line_names_are_trimmed_and_blank_skipped() {
        let rail = rail();
        let names = active_line_names(&all(&rail));
        assert_eq!(names.len(), 3);
        assert!(names.contains("Ginza"));
        assert!(!names.contains(""));
    }

    #[test]
    fn shibuya_follows_yamanote() {
        let rail = rail();
        let stations = stations();
        let filter = LineMembership::new(&rail);

        let in_2020 = names(&filter.apply(2020, all(&stations)));
        assert_eq!(in_2020, vec!["Shibuya", "Ueno"]);

        let in_1926 = names(&filter.apply(1926, all(&stations)));
        assert_eq!(in_1926, vec!["Shibuya", "Ghost"]);
    }

    #[test]
    fn no_active_lines_means_no_stations() {
        let rail = Dataset::from_bytes(
            r#"{"features":[
                {"type":"Feature","geometry":null,"properties":{"N05_002":"Yamanote","N05_005b":"1925"}}
            ]}"#,
        )
        .unwrap();
        let stations = stations();
        let filter = LineMembership::new(&rail);

        assert!(filter.apply(1900, all(&stations)).is_empty());
    }

    #[test]
    fn case_is_not_folded() {
        let rail = rail();
        let stations = stations();
        let kept = names(&LineMembership::new(&rail).apply(2020, all(&stations)));
        assert!(!kept.contains(&"Shouty".to_string()));
    }

    #[test]
    fn zero_year_passes_through() {
        let rail = rail();
        let stations = stations();
        let kept = LineMembership::new(&rail).apply(NO_FILTER, all(&stations));
        assert_eq!(kept.len(), stations.len());
    }
}
