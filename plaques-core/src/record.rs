//! Normalized record and its derived attribute types

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use plaques_common::geojson::Feature;
use plaques_common::models::{ATTR_ADDRESS, ATTR_ID, ATTR_TITLE};
use plaques_common::{Position, RawRecord};

/// Display label of the unknown region sentinel
pub const UNKNOWN_REGION_LABEL: &str = "Other / unknown";

/// Property keys carrying derived attributes in feature output
pub const PROP_CATEGORY: &str = "plaqueType";
pub const PROP_REGION: &str = "borough";
pub const PROP_YEAR: &str = "year";

/// Closed plaque classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Historical person")]
    HistoricalPerson,
    Building,
    Event,
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::HistoricalPerson,
        Category::Building,
        Category::Event,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::HistoricalPerson => "Historical person",
            Category::Building => "Building",
            Category::Event => "Event",
            Category::Other => "Other",
        }
    }

    /// Parse a display label or variant name, ignoring case and separators
    pub fn from_label(label: &str) -> Option<Self> {
        let key: String = label
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "historicalperson" | "person" => Some(Category::HistoricalPerson),
            "building" => Some(Category::Building),
            "event" => Some(Category::Event),
            "other" => Some(Category::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Gazetteer borough (display name) or the unknown sentinel
///
/// Serialized as its display label; the unknown sentinel round-trips through
/// [`UNKNOWN_REGION_LABEL`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Region {
    Borough(String),
    Unknown,
}

impl Region {
    pub fn label(&self) -> &str {
        match self {
            Region::Borough(name) => name,
            Region::Unknown => UNKNOWN_REGION_LABEL,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Region::Unknown)
    }
}

impl From<String> for Region {
    fn from(label: String) -> Self {
        if label == UNKNOWN_REGION_LABEL {
            Region::Unknown
        } else {
            Region::Borough(label)
        }
    }
}

impl From<&str> for Region {
    fn from(label: &str) -> Self {
        Region::from(label.to_string())
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        match region {
            Region::Borough(name) => name,
            Region::Unknown => UNKNOWN_REGION_LABEL.to_string(),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw record plus its derived category, region and year
///
/// Serialized as a GeoJSON feature whose properties gain `plaqueType`,
/// `borough` and `year`, the shape map layers consume.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "Feature")]
pub struct NormalizedRecord {
    pub raw: RawRecord,
    pub category: Category,
    pub region: Region,
    pub year: Option<i32>,
}

impl NormalizedRecord {
    pub fn position(&self) -> Position {
        self.raw.position
    }

    pub fn id(&self) -> Option<String> {
        self.raw.text(ATTR_ID)
    }

    pub fn title(&self) -> Option<String> {
        self.raw.text(ATTR_TITLE)
    }

    pub fn address(&self) -> Option<String> {
        self.raw.text(ATTR_ADDRESS)
    }
}

impl From<NormalizedRecord> for Feature {
    fn from(record: NormalizedRecord) -> Self {
        let mut properties = record.raw.properties;
        properties.insert(
            PROP_CATEGORY.to_string(),
            Value::String(record.category.label().to_string()),
        );
        properties.insert(PROP_REGION.to_string(), Value::String(record.region.into()));
        properties.insert(
            PROP_YEAR.to_string(),
            record.year.map(Value::from).unwrap_or(Value::Null),
        );
        Feature::point(record.raw.position, properties)
    }
}
