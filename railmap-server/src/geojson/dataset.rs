//! Immutable GeoJSON datasets loaded once at startup.

use std::collections::BTreeMap;
use std::path::Path;

use axum::body::Bytes;
use serde_json::value::RawValue;
use tracing::info;

use super::error::DatasetError;
use super::feature::Feature;

/// Top-level members of a document, kept as unparsed JSON.
pub type TopLevelFields = BTreeMap<String, Box<RawValue>>;

/// A loaded feature collection.
///
/// Keeps the exact source bytes for unfiltered responses, every top-level
/// member as a template for rebuilding filtered documents, and the decoded
/// features in source order. Never mutated after construction.
#[derive(Debug)]
pub struct Dataset {
    original: Bytes,
    fields: TopLevelFields,
    features: Vec<Feature>,
}

impl Dataset {
    /// Read and decode a GeoJSON file.
    ///
    /// Either the whole document decodes or an error is returned; there is
    /// no partially loaded dataset.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let dataset = Self::from_bytes(bytes)?;
        info!(
            path = %path.display(),
            features = dataset.len(),
            bytes = dataset.original.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Decode a GeoJSON document held in memory.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Result<Self, DatasetError> {
        let original: Bytes = bytes.into();

        let fields: TopLevelFields =
            serde_json::from_slice(&original).map_err(|e| DatasetError::MalformedDocument {
                message: format!("root is not a JSON object: {e}"),
            })?;

        let features_raw = fields
            .get("features")
            .ok_or_else(|| DatasetError::MalformedDocument {
                message: "missing features array".to_string(),
            })?;

        let elements: Vec<&RawValue> =
            serde_json::from_str(features_raw.get()).map_err(|e| {
                DatasetError::MalformedDocument {
                    message: format!("features is not an array: {e}"),
                }
            })?;

        let features = elements
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                Feature::decode(raw.get())
                    .map_err(|source| DatasetError::MalformedFeature { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            original,
            fields,
            features,
        })
    }

    /// The source document, byte for byte.
    pub fn original_bytes(&self) -> &Bytes {
        &self.original
    }

    /// Top-level members of the source document.
    pub fn fields(&self) -> &TopLevelFields {
        &self.fields
    }

    pub fn top_level_keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Features in source order.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DOC: &str = r#"{
  "type": "FeatureCollection",
  "name": "N05-24_RailroadSection2",
  "crs": { "type": "name", "properties": { "name": "urn:ogc:def:crs:OGC:1.3:CRS84" } },
  "features": [
    { "type": "Feature", "properties": { "N05_002": "A" }, "geometry": null },
    { "type": "Feature", "properties": { "N05_002": "B" }, "geometry": null, "custom": 1 }
  ]
}
"#;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_from_disk() {
        let file = write_temp(DOC);
        let dataset = Dataset::load(file.path()).unwrap();

        assert_eq!(dataset.len(), 2);
        assert!(!dataset.is_empty());
        assert_eq!(dataset.original_bytes().as_ref(), DOC.as_bytes());
        assert_eq!(
            dataset.top_level_keys().collect::<Vec<_>>(),
            vec!["crs", "features", "name", "type"]
        );
        assert_eq!(dataset.features()[0].property_str("N05_002"), "A");
        assert_eq!(dataset.features()[1].property_str("N05_002"), "B");
        assert!(dataset.features()[1].extras().contains_key("custom"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Dataset::load(dir.path().join("nope.geojson")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn root_must_be_object() {
        let err = Dataset::from_bytes("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, DatasetError::MalformedDocument { .. }));

        let err = Dataset::from_bytes("not json").unwrap_err();
        assert!(matches!(err, DatasetError::MalformedDocument { .. }));
    }

    #[test]
    fn features_key_required() {
        let err = Dataset::from_bytes(r#"{"type":"FeatureCollection"}"#).unwrap_err();
        match err {
            DatasetError::MalformedDocument { message } => {
                assert_eq!(message, "missing features array")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn features_must_be_array() {
        let err = Dataset::from_bytes(r#"{"features":{"a":1}}"#).unwrap_err();
        assert!(matches!(err, DatasetError::MalformedDocument { .. }));
    }

    #[test]
    fn bad_feature_reports_index() {
        let doc = r#"{"features":[
            {"type":"Feature","properties":{},"geometry":null},
            {"type":"Feature","properties":"bad","geometry":null}
        ]}"#;
        let err = Dataset::from_bytes(doc).unwrap_err();
        assert!(matches!(err, DatasetError::MalformedFeature { index: 1, .. }));
    }

    #[test]
    fn empty_collection() {
        let dataset = Dataset::from_bytes(r#"{"type":"FeatureCollection","features":[]}"#).unwrap();
        assert!(dataset.is_empty());
    }
}
