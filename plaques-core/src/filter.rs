//! Filter engine
//!
//! [`FilterState`] is the user-controlled narrowing shared by map, chart and
//! table views. It is an immutable value: form controls emit a partial
//! [`FilterUpdate`] which [`FilterState::apply`] merges into a new state.
//! A [`SelectionFilter`] is the transient narrowing emitted by a chart click.
//!
//! A record is visible when it passes every active clause. Selection and
//! filter-state narrowing on category/region are AND-combined here; keeping
//! them mutually exclusive is the caller's job (see `session`).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::record::{Category, NormalizedRecord, Region};
use crate::stats::FALLBACK_YEAR_RANGE;

/// Inclusive year range with `min <= max`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    /// Build a range, swapping bounds given in the wrong order
    pub fn new(a: i32, b: i32) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }
}

/// Category narrowing: everything, or one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "mode", content = "category")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn admits(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

/// Chart-origin selection
///
/// Year selections are carried for the view layer (the map switches to the
/// selected year's plaques by focus, not by filtering) and do not narrow
/// the filtered set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum SelectionFilter {
    Category(Category),
    Region(Region),
    Year(i32),
}

impl SelectionFilter {
    pub fn admits(&self, record: &NormalizedRecord) -> bool {
        match self {
            SelectionFilter::Category(c) => record.category == *c,
            SelectionFilter::Region(r) => record.region == *r,
            SelectionFilter::Year(_) => true,
        }
    }
}

/// Persisted narrowing criteria
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub year_range: YearRange,
    pub search: String,
    pub regions: BTreeSet<Region>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::with_year_range(FALLBACK_YEAR_RANGE)
    }
}

impl FilterState {
    /// "All" state spanning the given years
    pub fn with_year_range(year_range: YearRange) -> Self {
        Self {
            category: CategoryFilter::All,
            year_range,
            search: String::new(),
            regions: BTreeSet::new(),
        }
    }

    /// Merge a partial update, returning the new state
    ///
    /// Fields the update leaves unset keep their current value.
    pub fn apply(&self, update: &FilterUpdate) -> Self {
        Self {
            category: update.category.unwrap_or(self.category),
            year_range: update.year_range.unwrap_or(self.year_range),
            search: update.search.clone().unwrap_or_else(|| self.search.clone()),
            regions: update.regions.clone().unwrap_or_else(|| self.regions.clone()),
        }
    }

    /// Update that adds the region if absent, removes it if present
    pub fn toggle_region(&self, region: Region) -> FilterUpdate {
        let mut regions = self.regions.clone();
        if !regions.remove(&region) {
            regions.insert(region);
        }
        FilterUpdate {
            regions: Some(regions),
            ..FilterUpdate::default()
        }
    }

    /// Whether a record passes every active clause
    pub fn admits(&self, record: &NormalizedRecord, selection: Option<&SelectionFilter>) -> bool {
        if let Some(selection) = selection {
            if !selection.admits(record) {
                return false;
            }
        }

        if !self.category.admits(record.category) {
            return false;
        }

        if let Some(year) = record.year {
            if !self.year_range.contains(year) {
                return false;
            }
        }

        if !self.regions.is_empty() && !self.regions.contains(&record.region) {
            return false;
        }

        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty() {
            let haystack = format!(
                "{} {}",
                record.title().unwrap_or_default(),
                record.address().unwrap_or_default()
            )
            .to_lowercase();
            if !haystack.contains(&needle) {
                return false;
            }
        }

        true
    }
}

/// Partial filter state emitted by form controls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterUpdate {
    pub category: Option<CategoryFilter>,
    pub year_range: Option<YearRange>,
    pub search: Option<String>,
    pub regions: Option<BTreeSet<Region>>,
}

impl FilterUpdate {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.year_range.is_none()
            && self.search.is_none()
            && self.regions.is_none()
    }
}

/// Records passing the filter state and selection, in input order
pub fn apply_filters<'a>(
    records: &'a [NormalizedRecord],
    state: &FilterState,
    selection: Option<&SelectionFilter>,
) -> Vec<&'a NormalizedRecord> {
    records
        .iter()
        .filter(|r| state.admits(r, selection))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaques_common::{Position, RawRecord};
    use serde_json::{json, Map, Value};

    fn record(
        title: &str,
        address: Option<&str>,
        category: Category,
        region: Region,
        year: Option<i32>,
    ) -> NormalizedRecord {
        let mut props = Map::new();
        props.insert("title".to_string(), Value::String(title.to_string()));
        if let Some(address) = address {
            props.insert("address".to_string(), Value::String(address.to_string()));
        }
        NormalizedRecord {
            raw: RawRecord::new(Position::new(-0.1, 51.5), props),
            category,
            region,
            year,
        }
    }

    fn sample() -> Vec<NormalizedRecord> {
        vec![
            record("Town Hall", Some("Upper St"), Category::Building, Region::from("Islington"), Some(1901)),
            record("Battle site", None, Category::Event, Region::Unknown, None),
            record("Charles Dickens", Some("Doughty St"), Category::HistoricalPerson, Region::from("Camden"), Some(1850)),
            record("Old Theatre", Some("Camden High St"), Category::Building, Region::from("Camden"), Some(2025)),
        ]
    }

    fn titles(records: &[&NormalizedRecord]) -> Vec<String> {
        records.iter().filter_map(|r| r.title()).collect()
    }

    fn wide() -> FilterState {
        FilterState::with_year_range(YearRange::new(1800, 2030))
    }

    #[test]
    fn test_all_state_passes_everything() {
        let records = sample();
        assert_eq!(apply_filters(&records, &wide(), None).len(), 4);
    }

    #[test]
    fn test_category_clause() {
        let records = sample();
        let state = wide().apply(&FilterUpdate {
            category: Some(CategoryFilter::Only(Category::Building)),
            ..FilterUpdate::default()
        });
        assert_eq!(titles(&apply_filters(&records, &state, None)), vec!["Town Hall", "Old Theatre"]);
    }

    #[test]
    fn test_year_clause_keeps_missing_years() {
        let records = sample();
        let state = wide().apply(&FilterUpdate {
            year_range: Some(YearRange::new(1900, 2000)),
            ..FilterUpdate::default()
        });
        assert_eq!(titles(&apply_filters(&records, &state, None)), vec!["Town Hall", "Battle site"]);
    }

    #[test]
    fn test_year_range_is_inclusive() {
        let records = sample();
        let state = wide().apply(&FilterUpdate {
            year_range: Some(YearRange::new(1901, 1901)),
            ..FilterUpdate::default()
        });
        assert_eq!(titles(&apply_filters(&records, &state, None)), vec!["Town Hall", "Battle site"]);
    }

    #[test]
    fn test_region_clause() {
        let records = sample();
        let state = wide().apply(&FilterUpdate {
            regions: Some([Region::from("Camden"), Region::Unknown].into_iter().collect()),
            ..FilterUpdate::default()
        });
        assert_eq!(
            titles(&apply_filters(&records, &state, None)),
            vec!["Battle site", "Charles Dickens", "Old Theatre"]
        );
    }

    #[test]
    fn test_search_clause_title_and_address() {
        let records = sample();
        let state = wide().apply(&FilterUpdate {
            search: Some("  CAMDEN  ".to_string()),
            ..FilterUpdate::default()
        });
        assert_eq!(titles(&apply_filters(&records, &state, None)), vec!["Old Theatre"]);

        let state = wide().apply(&FilterUpdate {
            search: Some("dickens".to_string()),
            ..FilterUpdate::default()
        });
        assert_eq!(titles(&apply_filters(&records, &state, None)), vec!["Charles Dickens"]);
    }

    #[test]
    fn test_whitespace_search_is_inactive() {
        let records = sample();
        let state = wide().apply(&FilterUpdate {
            search: Some("   ".to_string()),
            ..FilterUpdate::default()
        });
        assert_eq!(apply_filters(&records, &state, None).len(), 4);
    }

    #[test]
    fn test_selection_and_state_are_and_combined() {
        let records = sample();
        let selection = SelectionFilter::Region(Region::from("Camden"));
        assert_eq!(
            titles(&apply_filters(&records, &wide(), Some(&selection))),
            vec!["Charles Dickens", "Old Theatre"]
        );

        let state = wide().apply(&FilterUpdate {
            category: Some(CategoryFilter::Only(Category::Building)),
            ..FilterUpdate::default()
        });
        assert_eq!(titles(&apply_filters(&records, &state, Some(&selection))), vec!["Old Theatre"]);

        let conflicting = SelectionFilter::Category(Category::Event);
        assert!(apply_filters(&records, &state, Some(&conflicting)).is_empty());
    }

    #[test]
    fn test_year_selection_does_not_narrow() {
        let records = sample();
        let selection = SelectionFilter::Year(1901);
        assert_eq!(apply_filters(&records, &wide(), Some(&selection)).len(), 4);
    }

    #[test]
    fn test_empty_update_is_noop() {
        let state = wide().apply(&FilterUpdate {
            search: Some("hall".to_string()),
            ..FilterUpdate::default()
        });
        let update = FilterUpdate::default();
        assert!(update.is_empty());
        assert_eq!(state.apply(&update), state);

        let records = sample();
        assert_eq!(
            apply_filters(&records, &state, None),
            apply_filters(&records, &state.apply(&update), None)
        );
    }

    #[test]
    fn test_update_merges_fields() {
        let state = wide()
            .apply(&FilterUpdate {
                search: Some("hall".to_string()),
                ..FilterUpdate::default()
            })
            .apply(&FilterUpdate {
                category: Some(CategoryFilter::Only(Category::Event)),
                ..FilterUpdate::default()
            });
        assert_eq!(state.search, "hall");
        assert_eq!(state.category, CategoryFilter::Only(Category::Event));
        assert_eq!(state.year_range, YearRange::new(1800, 2030));
    }

    #[test]
    fn test_toggle_region() {
        let state = wide();
        let added = state.apply(&state.toggle_region(Region::from("Camden")));
        assert!(added.regions.contains(&Region::from("Camden")));
        let removed = added.apply(&added.toggle_region(Region::from("Camden")));
        assert!(removed.regions.is_empty());
    }

    #[test]
    fn test_year_range_new_swaps_bounds() {
        assert_eq!(YearRange::new(2000, 1800), YearRange { min: 1800, max: 2000 });
    }

    #[test]
    fn test_selection_wire_shape() {
        let selection = SelectionFilter::Category(Category::Building);
        assert_eq!(
            serde_json::to_value(&selection).unwrap(),
            json!({"kind": "category", "value": "Building"})
        );
        let parsed: SelectionFilter =
            serde_json::from_value(json!({"kind": "region", "value": "Camden"})).unwrap();
        assert_eq!(parsed, SelectionFilter::Region(Region::from("Camden")));
    }

    #[test]
    fn test_partial_update_from_json() {
        let update: FilterUpdate = serde_json::from_value(json!({"search": "hall"})).unwrap();
        assert_eq!(update.search.as_deref(), Some("hall"));
        assert!(update.category.is_none());
    }
}
