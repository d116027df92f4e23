//! Response payloads built from a dataset.
//!
//! Unfiltered payloads are the source bytes, untouched. Filtered payloads are
//! rebuilt from the source document's top-level members with a fresh
//! `features` array, so member order and whitespace may differ from the file.

use std::collections::BTreeMap;

use axum::body::Bytes;
use serde_json::value::RawValue;
use tracing::debug;

use crate::geojson::{Dataset, DatasetError};
use crate::timeline::{CrossFilter, filter_by_year};

/// A GeoJSON body ready to send.
#[derive(Debug, Clone)]
pub struct Payload {
    pub body: Bytes,

    /// Number of features in `body`.
    pub feature_count: usize,

    /// The year the body was filtered for, `None` when unfiltered.
    pub year: Option<i32>,
}

/// The source document exactly as loaded.
pub fn build_unfiltered(dataset: &Dataset) -> Payload {
    Payload {
        body: dataset.original_bytes().clone(),
        feature_count: dataset.len(),
        year: None,
    }
}

/// A copy of the document holding only the features active in `year`.
///
/// `cross` narrows the temporally filtered features further before encoding.
/// Fails only if a loaded feature cannot be encoded, which indicates a bug.
pub fn build_filtered(
    dataset: &Dataset,
    year: i32,
    cross: Option<&dyn CrossFilter>,
) -> Result<Payload, DatasetError> {
    let mut features = filter_by_year(dataset, year);
    if let Some(cross) = cross {
        let before = features.len();
        features = cross.apply(year, features);
        debug!(
            filter = cross.name(),
            year,
            before,
            after = features.len(),
            "applied cross filter"
        );
    }

    let encoded =
        serde_json::value::to_raw_value(&features).map_err(DatasetError::Serialization)?;

    let mut document: BTreeMap<&str, &RawValue> = dataset
        .fields()
        .iter()
        .map(|(key, value)| (key.as_str(), &**value))
        .collect();
    document.insert("features", &encoded);

    let body = serde_json::to_vec(&document).map_err(DatasetError::Serialization)?;

    Ok(Payload {
        body: Bytes::from(body),
        feature_count: features.len(),
        year: Some(year),
    })
}
