//! GeoJSON feature model.
//!
//! A [`Feature`] decodes the five members the filters care about and keeps
//! every other member as raw JSON, so re-encoding a feature never drops a
//! vendor extension. Geometry and bounding boxes are carried as raw JSON and
//! never inspected.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use serde_json::value::RawValue;

/// Feature members decoded explicitly. Anything else lands in the extras.
pub const KNOWN_KEYS: [&str; 5] = ["type", "id", "properties", "geometry", "bbox"];

/// Returns true if `key` is one of the explicitly decoded feature members.
pub fn is_known_key(key: &str) -> bool {
    KNOWN_KEYS.contains(&key)
}

/// Attribute map of a feature.
pub type Properties = BTreeMap<String, PropertyValue>;

/// Feature identifier. Round-tripped, never interpreted.
///
/// Only strings and numbers are accepted; any other `id` shape fails the
/// feature (and so the dataset) at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureId {
    String(String),
    Number(Number),
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureId::String(s) => f.write_str(s),
            FeatureId::Number(n) => write!(f, "{n}"),
        }
    }
}

/// A single property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<PropertyValue>),
    Object(BTreeMap<String, PropertyValue>),
}

impl PropertyValue {
    /// Returns the string content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true for JSON `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }
}

/// One GeoJSON feature.
#[derive(Debug, Clone)]
pub struct Feature {
    kind: String,
    id: Option<FeatureId>,
    properties: Option<Properties>,
    geometry: Option<Box<RawValue>>,
    bbox: Option<Box<RawValue>>,
    /// Never contains a key from [`KNOWN_KEYS`].
    extras: BTreeMap<String, Box<RawValue>>,
}

impl Feature {
    /// Decode a feature from a JSON object.
    pub fn decode(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Encode the feature back to a JSON object.
    ///
    /// Member order is not preserved but the member set and values are.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// The `type` member, normally `"Feature"`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn id(&self) -> Option<&FeatureId> {
        self.id.as_ref()
    }

    /// The property map, or `None` if the source had `null` or no properties.
    pub fn properties(&self) -> Option<&Properties> {
        self.properties.as_ref()
    }

    /// Look up a single property.
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.as_ref()?.get(key)
    }

    /// Look up a string property with surrounding whitespace removed.
    ///
    /// Missing keys and non-string values yield an empty string.
    pub fn property_str(&self, key: &str) -> &str {
        self.property(key)
            .and_then(PropertyValue::as_str)
            .map(str::trim)
            .unwrap_or("")
    }

    /// Raw geometry JSON.
    pub fn geometry(&self) -> Option<&RawValue> {
        self.geometry.as_deref()
    }

    /// Raw bounding box JSON.
    pub fn bbox(&self) -> Option<&RawValue> {
        self.bbox.as_deref()
    }

    /// Members not covered by [`KNOWN_KEYS`].
    pub fn extras(&self) -> &BTreeMap<String, Box<RawValue>> {
        &self.extras
    }
}

/// Remove `key` from `fields` and decode it.
fn take<T: DeserializeOwned>(
    fields: &mut BTreeMap<String, Box<RawValue>>,
    key: &str,
) -> Result<Option<T>, serde_json::Error> {
    fields
        .remove(key)
        .map(|raw| serde_json::from_str(raw.get()))
        .transpose()
}

impl<'de> Deserialize<'de> for Feature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = BTreeMap::<String, Box<RawValue>>::deserialize(deserializer)?;

        let kind = take::<Option<String>>(&mut fields, "type")
            .map_err(|e| de::Error::custom(format!("invalid `type`: {e}")))?
            .flatten()
            .unwrap_or_default();
        let id = take::<Option<FeatureId>>(&mut fields, "id")
            .map_err(|e| de::Error::custom(format!("invalid `id`: {e}")))?
            .flatten();
        let properties = take::<Option<Properties>>(&mut fields, "properties")
            .map_err(|e| de::Error::custom(format!("invalid `properties`: {e}")))?
            .flatten();
        let geometry = fields.remove("geometry");
        let bbox = fields.remove("bbox");

        Ok(Feature {
            kind,
            id,
            properties,
            geometry,
            bbox,
            extras: fields,
        })
    }
}

impl Serialize for Feature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", &self.kind)?;
        if let Some(id) = &self.id {
            map.serialize_entry("id", id)?;
        }
        map.serialize_entry("properties", &self.properties)?;
        map.serialize_entry("geometry", &self.geometry)?;
        if let Some(bbox) = &self.bbox {
            map.serialize_entry("bbox", bbox)?;
        }
        for (key, value) in &self.extras {
            if is_known_key(key) {
                continue;
            }
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
