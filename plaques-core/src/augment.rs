//! Fixture augmenter
//!
//! Deterministically enlarges a raw sample so every category and a broad
//! year span show up in charts: future-dated copies of building/event-like
//! plaques laid out on a small grid next to their source, plus a recency
//! rewrite of the `erected` field on part of the sample.
//!
//! Output is a pure function of input order and content. Snapshot tests
//! depend on the exact identifiers, coordinates and text produced here.

use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::debug;

use plaques_common::models::{ATTR_ERECTED, ATTR_ID, ATTR_INSCRIPTION, ATTR_TITLE};
use plaques_common::{RawRecord, Result};

/// Every n-th record (by input index) may become a candidate
pub const CANDIDATE_STRIDE: usize = 7;
/// Candidates per synthetic vintage
pub const VINTAGE_BATCH: usize = 20;
/// Columns of the synthetic coordinate grid
pub const GRID_COLUMNS: usize = 5;
/// Grid spacing in degrees
pub const GRID_STEP: f64 = 0.005;
/// Leading records eligible for the recency rewrite
pub const RECENCY_WINDOW: usize = 50;
/// Every n-th record of the window gets a recent `erected` year
pub const RECENCY_STRIDE: usize = 5;
pub const RECENCY_BASE_YEAR: i32 = 2020;
/// Number of years the recency rewrite cycles through
pub const RECENCY_SPAN: usize = 5;

/// Fixture override: this plaque is dated to the second vintage.
/// The id only matches when stored as a string.
const OVERRIDE_ID: &str = "6428";
const OVERRIDE_ADDRESS: &str = "470 Baker Street N2";

const CANDIDATE_INSCRIPTION_KEYWORDS: [&str; 4] = ["hall", "house", "theatre", "site"];
const CANDIDATE_TITLE_KEYWORDS: [&str; 2] = ["building", "event"];

/// Wording and dating of one synthetic batch
struct Vintage {
    year: i32,
    /// Year applied to the override plaque instead of `year`
    override_year: Option<i32>,
    building_prefix: &'static str,
    event_prefix: &'static str,
    suffix: &'static str,
}

const VINTAGE_A: Vintage = Vintage {
    year: 2025,
    override_year: Some(2026),
    building_prefix: "Modern building established here in 2025. ",
    event_prefix: "Historical event commemorated in 2025. ",
    suffix: " - Plaque erected 2025",
};

const VINTAGE_B: Vintage = Vintage {
    year: 2026,
    override_year: None,
    building_prefix: "New cultural center opened here in 2026. ",
    event_prefix: "Memorial event held at this site in 2026. ",
    suffix: " - Commemorative plaque installed 2026",
};

impl Vintage {
    fn synthesize(&self, batch: &[&RawRecord]) -> Vec<RawRecord> {
        batch
            .iter()
            .enumerate()
            .map(|(idx, record)| self.variant(idx, record))
            .collect()
    }

    fn variant(&self, idx: usize, record: &RawRecord) -> RawRecord {
        let attrs = record.attributes();

        let year = match self.override_year {
            Some(y) if is_override(record) => y,
            _ => self.year,
        };

        let inscription = match idx % 4 {
            0 => format!("{}{}", self.building_prefix, attrs.inscription),
            1 => format!("{}{}", self.event_prefix, attrs.inscription),
            _ => format!("{}{}", attrs.inscription, self.suffix),
        };

        let id = if attrs.id.is_empty() {
            format!("{}_{}", year, idx)
        } else {
            format!("{}_{}", year, attrs.id)
        };

        let title = if attrs.title.is_empty() {
            format!("Plaque ({})", year)
        } else {
            format!("{} ({})", attrs.title, year)
        };

        let mut variant = record
            .with_text(ATTR_ID, id)
            .with_text(ATTR_ERECTED, year.to_string())
            .with_text(ATTR_TITLE, title)
            .with_text(ATTR_INSCRIPTION, inscription);
        variant.position = record.position.offset(
            (idx % GRID_COLUMNS) as f64 * GRID_STEP,
            (idx / GRID_COLUMNS) as f64 * GRID_STEP,
        );
        variant
    }
}

fn is_override(record: &RawRecord) -> bool {
    let id_matches = matches!(
        record.properties.get(ATTR_ID),
        Some(Value::String(id)) if id == OVERRIDE_ID
    );
    id_matches || record.attributes().address.contains(OVERRIDE_ADDRESS)
}

/// Whether the record at `idx` qualifies as a synthesis candidate
fn is_candidate(idx: usize, record: &RawRecord) -> bool {
    if idx % CANDIDATE_STRIDE != 0 {
        return false;
    }
    let attrs = record.attributes();
    let inscription = attrs.inscription.to_lowercase();
    let title = attrs.title.to_lowercase();
    CANDIDATE_INSCRIPTION_KEYWORDS
        .iter()
        .any(|k| inscription.contains(k))
        || CANDIDATE_TITLE_KEYWORDS.iter().any(|k| title.contains(k))
}

/// Recent `erected` year for the record at `idx`, if it is rewritten
fn recency_year(idx: usize) -> Option<i32> {
    if idx >= RECENCY_WINDOW || idx % RECENCY_STRIDE != 0 {
        return None;
    }
    let step = (idx / RECENCY_STRIDE) % RECENCY_SPAN;
    Some(RECENCY_BASE_YEAR + step as i32)
}

/// Augment a raw sample
///
/// Output order: the first [`RECENCY_WINDOW`] records with the recency
/// rewrite applied, the remaining records unchanged, then the 2025 variants,
/// then the 2026 variants.
pub fn augment(records: &[RawRecord]) -> Vec<RawRecord> {
    let candidates: Vec<&RawRecord> = records
        .iter()
        .enumerate()
        .filter(|(idx, record)| is_candidate(*idx, record))
        .map(|(_, record)| record)
        .collect();

    let batch_a = &candidates[..candidates.len().min(VINTAGE_BATCH)];
    let batch_b = &candidates[batch_a.len()..candidates.len().min(2 * VINTAGE_BATCH)];

    let vintage_a = VINTAGE_A.synthesize(batch_a);
    let vintage_b = VINTAGE_B.synthesize(batch_b);

    let mut output = Vec::with_capacity(records.len() + vintage_a.len() + vintage_b.len());
    output.extend(records.iter().enumerate().map(|(idx, record)| {
        match recency_year(idx) {
            Some(year) => record.with_text(ATTR_ERECTED, year.to_string()),
            None => record.clone(),
        }
    }));
    output.extend(vintage_a);
    output.extend(vintage_b);

    debug!(
        "Augmented {} records: {} candidates, {} synthetic",
        records.len(),
        candidates.len(),
        output.len() - records.len()
    );
    output
}

/// Hex SHA-256 of the serialized collection
///
/// Two runs of [`augment`] on the same input yield the same fingerprint.
pub fn fingerprint(records: &[RawRecord]) -> Result<String> {
    let bytes = serde_json::to_vec(records)?;
    Ok(format!("{:x}", Sha256::digest(&bytes)))
}
