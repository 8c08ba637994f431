//! Feature normalizer: attaches category, region and year to a raw record

use plaques_common::{PlaqueAttributes, RawRecord};

use crate::classify::Classifier;
use crate::record::NormalizedRecord;
use crate::region::resolve_region;
use crate::year::{inscription_year, parse_year};

/// Derive the display year of a plaque
///
/// A non-empty erected field is authoritative, even when it holds no year.
/// Only an absent or empty one falls back to the first 19xx/20xx token of
/// the inscription. A subject's birth year is never used.
pub fn derive_year(attrs: &PlaqueAttributes) -> Option<i32> {
    if attrs.erected.is_empty() {
        inscription_year(&attrs.inscription)
    } else {
        parse_year(Some(&attrs.erected))
    }
}

/// Normalize one record with the given classifier
///
/// The input is cloned, never modified.
pub fn normalize_with(classifier: &Classifier, record: &RawRecord) -> NormalizedRecord {
    let attrs = record.attributes();
    NormalizedRecord {
        raw: record.clone(),
        category: classifier.classify(record),
        region: resolve_region(record),
        year: derive_year(&attrs),
    }
}

/// Normalize one record with the default rules
pub fn normalize(record: &RawRecord) -> NormalizedRecord {
    normalize_with(&Classifier::default(), record)
}

/// Normalize a collection, preserving order
pub fn normalize_all(records: &[RawRecord]) -> Vec<NormalizedRecord> {
    let classifier = Classifier::default();
    records.iter().map(|r| normalize_with(&classifier, r)).collect()
}
