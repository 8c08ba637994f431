//! Dataset summary statistics

use std::collections::BTreeMap;

use serde::Serialize;

use crate::filter::YearRange;
use crate::record::{Category, NormalizedRecord};

/// Year range used when no record carries a year
pub const FALLBACK_YEAR_RANGE: YearRange = YearRange { min: 1900, max: 2020 };

/// Summary shown on the dashboard overview cards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub by_category: BTreeMap<Category, usize>,
    /// Record with the greatest year; the first one seen wins ties
    pub most_recent: Option<NormalizedRecord>,
}

impl Statistics {
    /// Categories by descending count, category order breaking ties
    pub fn top_categories(&self, n: usize) -> Vec<(Category, usize)> {
        let mut ranked: Vec<(Category, usize)> =
            self.by_category.iter().map(|(c, count)| (*c, *count)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(n);
        ranked
    }
}

/// Build statistics over any record sequence
pub fn build_statistics<'a, I>(records: I) -> Statistics
where
    I: IntoIterator<Item = &'a NormalizedRecord>,
{
    let mut total = 0;
    let mut by_category = BTreeMap::new();
    let mut most_recent: Option<&NormalizedRecord> = None;

    for record in records {
        total += 1;
        *by_category.entry(record.category).or_insert(0) += 1;

        if let Some(year) = record.year {
            let newer = match most_recent.and_then(|r| r.year) {
                Some(best) => year > best,
                None => true,
            };
            if newer {
                most_recent = Some(record);
            }
        }
    }

    Statistics {
        total,
        by_category,
        most_recent: most_recent.cloned(),
    }
}

/// Smallest and largest year present, or [`FALLBACK_YEAR_RANGE`]
pub fn year_extent<'a, I>(records: I) -> YearRange
where
    I: IntoIterator<Item = &'a NormalizedRecord>,
{
    records
        .into_iter()
        .filter_map(|r| r.year)
        .fold(None, |acc: Option<YearRange>, year| match acc {
            Some(range) => Some(YearRange {
                min: range.min.min(year),
                max: range.max.max(year),
            }),
            None => Some(YearRange { min: year, max: year }),
        })
        .unwrap_or(FALLBACK_YEAR_RANGE)
}
