//! Raw record model
//!
//! A raw record is a point feature that passed geometry admission: it always
//! carries a finite longitude/latitude pair plus the feature's attribute map,
//! kept verbatim. Attribute access goes through [`PlaqueAttributes`], a typed
//! view where every recognised field is present (absent or null values read
//! as the empty string).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::geojson::Feature;
use crate::Error;

/// Stable identifier attribute
pub const ATTR_ID: &str = "id1";
pub const ATTR_TITLE: &str = "title";
pub const ATTR_INSCRIPTION: &str = "inscription";
pub const ATTR_ADDRESS: &str = "address";
/// Establishment year text ("1923", "Erected 1923", ...)
pub const ATTR_ERECTED: &str = "erected";
pub const ATTR_LEAD_SUBJECT_TYPE: &str = "lead_subject_type";
pub const ATTR_LEAD_SUBJECT_ROLES: &str = "lead_subject_roles";
pub const ATTR_ORGANISATIONS: &str = "organisations";

/// Longitude/latitude pair in WGS84 degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub longitude: f64,
    pub latitude: f64,
}

impl Position {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Shift by the given deltas, returning a new position
    pub fn offset(&self, d_longitude: f64, d_latitude: f64) -> Self {
        Self::new(self.longitude + d_longitude, self.latitude + d_latitude)
    }
}

/// Geometry-validated point feature with its raw attribute map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Feature", try_from = "Feature")]
pub struct RawRecord {
    pub position: Position,
    pub properties: Map<String, Value>,
}

impl RawRecord {
    pub fn new(position: Position, properties: Map<String, Value>) -> Self {
        Self {
            position,
            properties,
        }
    }

    /// Read an attribute as text
    ///
    /// Strings are returned as-is, numbers and booleans in their JSON text
    /// form. Missing, null, array and object values yield `None`.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.properties.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Read an attribute as text, empty when absent
    pub fn text_or_empty(&self, key: &str) -> String {
        self.text(key).unwrap_or_default()
    }

    /// Typed, total view over the recognised attributes
    pub fn attributes(&self) -> PlaqueAttributes {
        PlaqueAttributes {
            id: self.text_or_empty(ATTR_ID),
            title: self.text_or_empty(ATTR_TITLE),
            inscription: self.text_or_empty(ATTR_INSCRIPTION),
            address: self.text_or_empty(ATTR_ADDRESS),
            erected: self.text_or_empty(ATTR_ERECTED),
            lead_subject_type: self.text_or_empty(ATTR_LEAD_SUBJECT_TYPE),
            lead_subject_roles: self.text_or_empty(ATTR_LEAD_SUBJECT_ROLES),
            organisations: self.text_or_empty(ATTR_ORGANISATIONS),
        }
    }

    /// Copy of this record with one string attribute replaced
    pub fn with_text(&self, key: &str, value: impl Into<String>) -> Self {
        let mut properties = self.properties.clone();
        properties.insert(key.to_string(), Value::String(value.into()));
        Self {
            position: self.position,
            properties,
        }
    }
}

/// Recognised plaque attributes with empty-string defaults
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaqueAttributes {
    pub id: String,
    pub title: String,
    pub inscription: String,
    pub address: String,
    pub erected: String,
    pub lead_subject_type: String,
    pub lead_subject_roles: String,
    pub organisations: String,
}

impl From<RawRecord> for Feature {
    fn from(record: RawRecord) -> Self {
        Feature::point(record.position, record.properties)
    }
}

impl TryFrom<Feature> for RawRecord {
    type Error = Error;

    fn try_from(feature: Feature) -> Result<Self, Self::Error> {
        feature
            .into_record()
            .ok_or_else(|| Error::InvalidInput("feature lacks a valid point geometry".to_string()))
    }
}
