//! GeoJSON loading and geometry admission
//!
//! Only point features with exactly two finite numeric coordinates are
//! admitted into the pipeline. Everything else is dropped here and counted,
//! never surfaced as an error.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use crate::models::{Position, RawRecord};
use crate::{Error, Result};

fn feature_collection_type() -> String {
    "FeatureCollection".to_string()
}

fn feature_type() -> String {
    "Feature".to_string()
}

fn point_type() -> String {
    "Point".to_string()
}

/// GeoJSON FeatureCollection as exported by the plaque dataset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "feature_collection_type")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: feature_collection_type(),
            features,
        }
    }
}

/// A single GeoJSON feature, possibly with missing or malformed geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default = "feature_type")]
    pub kind: String,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

/// Feature geometry; coordinates are kept untyped until admission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type", default = "point_type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Value,
}

impl Feature {
    /// Build a point feature
    pub fn point(position: Position, properties: Map<String, Value>) -> Self {
        Self {
            kind: feature_type(),
            geometry: Some(Geometry {
                kind: point_type(),
                coordinates: json!([position.longitude, position.latitude]),
            }),
            properties: Some(properties),
        }
    }

    /// Validated position, if the geometry is a 2-element numeric pair
    pub fn position(&self) -> Option<Position> {
        let coords = self.geometry.as_ref()?.coordinates.as_array()?;
        if coords.len() != 2 {
            return None;
        }
        let longitude = coords[0].as_f64()?;
        let latitude = coords[1].as_f64()?;
        if !longitude.is_finite() || !latitude.is_finite() {
            return None;
        }
        Some(Position::new(longitude, latitude))
    }

    /// Admit this feature as a raw record, or `None` when geometry is invalid
    pub fn into_record(self) -> Option<RawRecord> {
        let position = self.position()?;
        Some(RawRecord::new(position, self.properties.unwrap_or_default()))
    }
}

/// Result of admitting a feature collection
#[derive(Debug, Clone, Default)]
pub struct Admission {
    /// Admitted records in source order
    pub records: Vec<RawRecord>,
    /// Number of features dropped for missing/invalid geometry
    pub dropped: usize,
}

/// Admit every feature with valid geometry, preserving order
pub fn admit_features(collection: FeatureCollection) -> Admission {
    let total = collection.features.len();
    let records: Vec<RawRecord> = collection
        .features
        .into_iter()
        .filter_map(Feature::into_record)
        .collect();
    let dropped = total - records.len();
    if dropped > 0 {
        debug!("Dropped {} of {} features without valid geometry", dropped, total);
    }
    Admission { records, dropped }
}

/// Parse a FeatureCollection from JSON text
pub fn parse_feature_collection(text: &str) -> Result<FeatureCollection> {
    let collection: FeatureCollection = serde_json::from_str(text)?;
    if collection.kind != "FeatureCollection" {
        return Err(Error::InvalidInput(format!(
            "expected a FeatureCollection, found type '{}'",
            collection.kind
        )));
    }
    Ok(collection)
}

/// Load and admit a GeoJSON dataset from disk
pub fn load_records(path: &Path) -> Result<Admission> {
    if !path.exists() {
        return Err(Error::NotFound(format!("dataset {}", path.display())));
    }
    let text = fs::read_to_string(path)?;
    let admission = admit_features(parse_feature_collection(&text)?);
    info!(
        "Loaded {} plaque features from {} ({} dropped)",
        admission.records.len(),
        path.display(),
        admission.dropped
    );
    Ok(admission)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(coordinates: Value) -> Feature {
        serde_json::from_value(json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": coordinates},
            "properties": {"title": "Plaque"}
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_point_is_admitted() {
        let record = feature(json!([-0.14, 51.52])).into_record().unwrap();
        assert_eq!(record.position, Position::new(-0.14, 51.52));
        assert_eq!(record.text("title").as_deref(), Some("Plaque"));
    }

    #[test]
    fn test_wrong_arity_is_dropped() {
        assert!(feature(json!([-0.14])).into_record().is_none());
        assert!(feature(json!([-0.14, 51.52, 10.0])).into_record().is_none());
        assert!(feature(json!([])).into_record().is_none());
    }

    #[test]
    fn test_non_numeric_coordinates_are_dropped() {
        assert!(feature(json!(["-0.14", 51.52])).into_record().is_none());
        assert!(feature(json!(null)).into_record().is_none());
    }

    #[test]
    fn test_missing_geometry_is_dropped() {
        let f: Feature = serde_json::from_value(json!({"type": "Feature", "properties": {}})).unwrap();
        assert!(f.into_record().is_none());
    }

    #[test]
    fn test_null_properties_become_empty_map() {
        let f: Feature = serde_json::from_value(json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [0.0, 51.0]},
            "properties": null
        }))
        .unwrap();
        let record = f.into_record().unwrap();
        assert!(record.properties.is_empty());
    }

    #[test]
    fn test_admit_features_counts_drops_and_keeps_order() {
        let collection = FeatureCollection::new(vec![
            feature(json!([1.0, 2.0])),
            feature(json!([1.0])),
            feature(json!([3.0, 4.0])),
        ]);
        let admission = admit_features(collection);
        assert_eq!(admission.dropped, 1);
        assert_eq!(admission.records.len(), 2);
        assert_eq!(admission.records[1].position, Position::new(3.0, 4.0));
    }

    #[test]
    fn test_parse_rejects_non_collection() {
        let err = parse_feature_collection(r#"{"type": "Feature", "features": []}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
