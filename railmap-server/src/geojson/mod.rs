//! GeoJSON documents that round-trip without losing members.
//!
//! Datasets are decoded once and kept for the lifetime of the server. Only
//! feature properties are parsed; geometry and any unrecognised members are
//! carried as raw JSON.

mod dataset;
mod error;
mod feature;

pub use dataset::{Dataset, TopLevelFields};
pub use error::DatasetError;
pub use feature::{Feature, FeatureId, KNOWN_KEYS, Properties, PropertyValue, is_known_key};
