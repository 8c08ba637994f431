//! Chart-ready count tables

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::record::{Category, NormalizedRecord, Region};

/// Count of plaques for one year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// The three chart aggregates over one record set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub by_category: BTreeMap<Category, usize>,
    pub by_year: Vec<YearCount>,
    pub by_region: BTreeMap<Region, usize>,
}

impl ChartData {
    pub fn build<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a NormalizedRecord> + Clone,
    {
        Self {
            by_category: aggregate_by_category(records.clone()),
            by_year: aggregate_by_year(records.clone()),
            by_region: aggregate_by_region(records),
        }
    }
}

/// Category → count; categories not present are absent
pub fn aggregate_by_category<'a, I>(records: I) -> BTreeMap<Category, usize>
where
    I: IntoIterator<Item = &'a NormalizedRecord>,
{
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.category).or_insert(0) += 1;
    }
    counts
}

/// Ascending (year, count) pairs over records that have a year
pub fn aggregate_by_year<'a, I>(records: I) -> Vec<YearCount>
where
    I: IntoIterator<Item = &'a NormalizedRecord>,
{
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for year in records.into_iter().filter_map(|r| r.year) {
        *counts.entry(year).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

/// Region → count, unknown regions under the sentinel
pub fn aggregate_by_region<'a, I>(records: I) -> BTreeMap<Region, usize>
where
    I: IntoIterator<Item = &'a NormalizedRecord>,
{
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.region.clone()).or_insert(0) += 1;
    }
    counts
}

/// Distinct regions sorted by display label (sidebar borough list)
pub fn region_options<'a, I>(records: I) -> Vec<Region>
where
    I: IntoIterator<Item = &'a NormalizedRecord>,
{
    let distinct: BTreeSet<Region> = records.into_iter().map(|r| r.region.clone()).collect();
    let mut options: Vec<Region> = distinct.into_iter().collect();
    options.sort_by(|a, b| a.label().cmp(b.label()));
    options
}
