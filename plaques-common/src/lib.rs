//! # Plaques Common Library
//!
//! Shared code for the plaques explorer workspace including:
//! - Raw record model (GeoJSON point features with free-form attributes)
//! - GeoJSON loading and geometry admission
//! - CSV to GeoJSON conversion
//! - Configuration loading
//! - Common error type

pub mod config;
pub mod csv_import;
pub mod error;
pub mod geojson;
pub mod models;

pub use error::{Error, Result};
pub use models::{PlaqueAttributes, Position, RawRecord};
