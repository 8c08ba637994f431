//! Dataset preparation: sample limit, fixture augmentation, normalization

use std::path::Path;

use tracing::info;

use plaques_common::config::{TomlConfig, DEFAULT_SAMPLE_LIMIT};
use plaques_common::geojson::load_records;
use plaques_common::{RawRecord, Result};

use crate::augment::augment;
use crate::normalize::normalize_all;
use crate::record::NormalizedRecord;

/// Pipeline knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Leading valid records kept before augmentation
    pub sample_limit: usize,
    /// Run the fixture augmenter
    pub augment: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            augment: true,
        }
    }
}

impl From<&TomlConfig> for PipelineOptions {
    fn from(config: &TomlConfig) -> Self {
        Self {
            sample_limit: config.sample_limit,
            augment: config.augment,
        }
    }
}

/// The raw records that enter normalization
pub fn sample(raw: &[RawRecord], options: &PipelineOptions) -> Vec<RawRecord> {
    let sample = &raw[..raw.len().min(options.sample_limit)];
    if options.augment {
        augment(sample)
    } else {
        sample.to_vec()
    }
}

/// Raw records → immutable normalized collection
pub fn prepare_dataset(raw: &[RawRecord], options: &PipelineOptions) -> Vec<NormalizedRecord> {
    let input = sample(raw, options);
    let records = normalize_all(&input);
    info!(
        "Prepared {} records from {} raw (sample limit {}, augment {})",
        records.len(),
        raw.len(),
        options.sample_limit,
        options.augment
    );
    records
}

/// Load a GeoJSON dataset and prepare it
pub fn load_dataset(path: &Path, options: &PipelineOptions) -> Result<Vec<NormalizedRecord>> {
    let admission = load_records(path)?;
    Ok(prepare_dataset(&admission.records, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaques_common::Position;
    use serde_json::{json, Map};

    fn raw(n: usize) -> Vec<RawRecord> {
        (0..n)
            .map(|i| {
                let mut props = Map::new();
                props.insert("id1".to_string(), json!(i.to_string()));
                props.insert("title".to_string(), json!(format!("Plaque {}", i)));
                RawRecord::new(Position::new(-0.1, 51.5), props)
            })
            .collect()
    }

    #[test]
    fn test_sample_limit_without_augment() {
        let options = PipelineOptions {
            sample_limit: 3,
            augment: false,
        };
        let records = prepare_dataset(&raw(10), &options);
        let ids: Vec<_> = records.iter().filter_map(|r| r.id()).collect();
        assert_eq!(ids, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_sample_limit_larger_than_input() {
        let options = PipelineOptions {
            sample_limit: 800,
            augment: false,
        };
        assert_eq!(prepare_dataset(&raw(4), &options).len(), 4);
    }

    #[test]
    fn test_augment_applies_recency_rewrite() {
        let records = prepare_dataset(&raw(6), &PipelineOptions::default());
        // No candidates match, so only the recency rewrite shows
        assert_eq!(records.len(), 6);
        assert_eq!(records[0].year, Some(2020));
        assert_eq!(records[5].year, Some(2021));
        assert_eq!(records[1].year, None);
    }
}
