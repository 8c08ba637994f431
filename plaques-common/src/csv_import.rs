//! CSV to GeoJSON conversion
//!
//! Turns a tabular plaque export (one row per plaque, with latitude and
//! longitude columns) into a point FeatureCollection. Every column,
//! coordinates included, is carried into the feature properties as text.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::geojson::{Feature, FeatureCollection};
use crate::models::Position;
use crate::{Error, Result};

/// Column mapping for CSV conversion
#[derive(Debug, Clone)]
pub struct CsvOptions {
    pub lat_field: String,
    pub lon_field: String,
    pub delimiter: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            lat_field: "latitude".to_string(),
            lon_field: "longitude".to_string(),
            delimiter: b',',
        }
    }
}

/// Converted collection plus the data rows that could not be placed
#[derive(Debug, Clone)]
pub struct CsvConversion {
    pub collection: FeatureCollection,
    /// 1-based data row numbers (header excluded) with unusable coordinates
    pub skipped_rows: Vec<usize>,
}

/// Convert CSV text from any reader
pub fn convert_csv<R: Read>(reader: R, options: &CsvOptions) -> Result<CsvConversion> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let lat_idx = column_index(&headers, &options.lat_field)?;
    let lon_idx = column_index(&headers, &options.lon_field)?;

    let mut features = Vec::new();
    let mut skipped_rows = Vec::new();

    for (row_idx, row) in csv_reader.records().enumerate() {
        let row = row?;
        let row_number = row_idx + 1;

        let latitude = row.get(lat_idx).and_then(parse_coordinate);
        let longitude = row.get(lon_idx).and_then(parse_coordinate);
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            debug!("Skipping CSV row {}: unusable coordinates", row_number);
            skipped_rows.push(row_number);
            continue;
        };

        let properties: Map<String, Value> = headers
            .iter()
            .zip(row.iter())
            .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
            .collect();

        features.push(Feature::point(Position::new(longitude, latitude), properties));
    }

    if !skipped_rows.is_empty() {
        warn!("{} CSV rows skipped for unusable coordinates", skipped_rows.len());
    }

    Ok(CsvConversion {
        collection: FeatureCollection::new(features),
        skipped_rows,
    })
}

/// Convert a CSV file on disk
pub fn convert_csv_file(path: &Path, options: &CsvOptions) -> Result<CsvConversion> {
    let file = File::open(path)
        .map_err(|e| Error::NotFound(format!("{}: {}", path.display(), e)))?;
    convert_csv(file, options)
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::InvalidInput(format!("CSV has no '{}' column", name)))
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}
