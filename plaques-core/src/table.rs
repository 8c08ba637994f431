//! Table projection with sorting and pagination
//!
//! Sorts a record set by one column and cuts one page out of it. Absent
//! values sort last in both directions; the sort is stable so equal keys keep
//! their filtered order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use plaques_common::Error;

use crate::pagination::{calculate_pagination, DEFAULT_PAGE_SIZE};
use crate::record::NormalizedRecord;

/// Sortable table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    #[default]
    Title,
    Category,
    Year,
    Region,
    Address,
    /// Sorted by longitude
    Coordinates,
}

impl SortColumn {
    pub const ALL: [SortColumn; 6] = [
        SortColumn::Title,
        SortColumn::Category,
        SortColumn::Year,
        SortColumn::Region,
        SortColumn::Address,
        SortColumn::Coordinates,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Title => "title",
            SortColumn::Category => "category",
            SortColumn::Year => "year",
            SortColumn::Region => "region",
            SortColumn::Address => "address",
            SortColumn::Coordinates => "coordinates",
        }
    }

    fn key(&self, record: &NormalizedRecord) -> SortKey {
        match self {
            SortColumn::Title => SortKey::text(record.title()),
            SortColumn::Category => SortKey::text(Some(record.category.label().to_string())),
            SortColumn::Year => record.year.map_or(SortKey::Missing, |y| SortKey::Number(y as f64)),
            SortColumn::Region => SortKey::text(Some(record.region.label().to_string())),
            SortColumn::Address => SortKey::text(record.address()),
            SortColumn::Coordinates => SortKey::Number(record.position().longitude),
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortColumn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(SortColumn::Title),
            "category" | "type" | "plaquetype" => Ok(SortColumn::Category),
            "year" => Ok(SortColumn::Year),
            "region" | "borough" => Ok(SortColumn::Region),
            "address" => Ok(SortColumn::Address),
            "coordinates" | "coords" => Ok(SortColumn::Coordinates),
            other => Err(Error::InvalidInput(format!("Unknown sort column: {}", other))),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(Error::InvalidInput(format!("Unknown sort order: {}", other))),
        }
    }
}

enum SortKey {
    Missing,
    Number(f64),
    Text(String),
}

impl SortKey {
    fn text(value: Option<String>) -> Self {
        value.map_or(SortKey::Missing, |s| SortKey::Text(s.to_lowercase()))
    }
}

/// Compare two keys; missing values go last regardless of `order`
fn compare_keys(a: &SortKey, b: &SortKey, order: SortOrder) -> Ordering {
    let ordering = match (a, b) {
        (SortKey::Missing, SortKey::Missing) => return Ordering::Equal,
        (SortKey::Missing, _) => return Ordering::Greater,
        (_, SortKey::Missing) => return Ordering::Less,
        (SortKey::Number(x), SortKey::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
        // Mixed kinds never occur within one column
        (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
        (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
    };
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

/// Stable sort of a record set by one column
pub fn sort_records<'a>(
    records: &[&'a NormalizedRecord],
    column: SortColumn,
    order: SortOrder,
) -> Vec<&'a NormalizedRecord> {
    let mut keyed: Vec<(SortKey, &'a NormalizedRecord)> =
        records.iter().map(|r| (column.key(r), *r)).collect();
    keyed.sort_by(|a, b| compare_keys(&a.0, &b.0, order));
    keyed.into_iter().map(|(_, r)| r).collect()
}

/// Table view parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableQuery {
    pub sort: SortColumn,
    pub order: SortOrder,
    /// Page number (1-indexed)
    pub page: usize,
    pub page_size: usize,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            sort: SortColumn::Title,
            order: SortOrder::Asc,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One displayed table row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub id: Option<String>,
    pub title: Option<String>,
    pub category: String,
    pub year: Option<i32>,
    pub region: String,
    pub address: Option<String>,
    /// "lon, lat" with 4 decimals
    pub coordinates: String,
}

impl From<&NormalizedRecord> for TableRow {
    fn from(record: &NormalizedRecord) -> Self {
        let position = record.position();
        Self {
            id: record.id(),
            title: record.title(),
            category: record.category.label().to_string(),
            year: record.year,
            region: record.region.label().to_string(),
            address: record.address(),
            coordinates: format!("{:.4}, {:.4}", position.longitude, position.latitude),
        }
    }
}

/// One page of the table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePage {
    pub sort: SortColumn,
    pub order: SortOrder,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    /// 1-based index of the first shown row, 0 when empty
    pub first_row: usize,
    /// 1-based index of the last shown row, 0 when empty
    pub last_row: usize,
    pub rows: Vec<TableRow>,
}

/// Sort the record set and cut out the requested page
pub fn project_table(records: &[&NormalizedRecord], query: &TableQuery) -> TablePage {
    let sorted = sort_records(records, query.sort, query.order);
    let page_size = query.page_size.max(1);
    let pagination = calculate_pagination(sorted.len(), query.page, page_size);

    let rows: Vec<TableRow> = sorted
        .iter()
        .skip(pagination.offset)
        .take(page_size)
        .map(|r| TableRow::from(*r))
        .collect();

    let (first_row, last_row) = if rows.is_empty() {
        (0, 0)
    } else {
        (pagination.offset + 1, pagination.offset + rows.len())
    };

    TablePage {
        sort: query.sort,
        order: query.order,
        page: pagination.page,
        page_size,
        total_pages: pagination.total_pages,
        total_rows: sorted.len(),
        first_row,
        last_row,
        rows,
    }
}
