//! Dashboard session
//!
//! Owns one normalized snapshot plus the current [`FilterState`] and
//! [`SelectionFilter`], and memoizes everything derived from them. Cached
//! values are dropped only when an input actually changes, so repeated reads
//! between updates are free and always agree with each other.

use std::cell::Cell;
use std::sync::Arc;

use once_cell::unsync::OnceCell;
use tracing::debug;

use crate::aggregate::{region_options, ChartData};
use crate::filter::{FilterState, FilterUpdate, SelectionFilter, YearRange};
use crate::record::{NormalizedRecord, Region};
use crate::stats::{build_statistics, year_extent, Statistics};
use crate::table::{project_table, TablePage, TableQuery};

pub struct Dashboard {
    records: Arc<[NormalizedRecord]>,
    extent: YearRange,
    filters: FilterState,
    selection: Option<SelectionFilter>,

    filtered: OnceCell<Vec<usize>>,
    aggregates: OnceCell<ChartData>,
    statistics: OnceCell<Statistics>,
    regions: OnceCell<Vec<Region>>,
    recomputations: Cell<usize>,
}

impl Dashboard {
    /// Start a session over a snapshot; the year range is seeded from its extent
    pub fn new(records: impl Into<Arc<[NormalizedRecord]>>) -> Self {
        let records = records.into();
        let extent = year_extent(records.iter());
        debug!(
            "Dashboard over {} records, years {}-{}",
            records.len(),
            extent.min,
            extent.max
        );
        Self {
            records,
            extent,
            filters: FilterState::with_year_range(extent),
            selection: None,
            filtered: OnceCell::new(),
            aggregates: OnceCell::new(),
            statistics: OnceCell::new(),
            regions: OnceCell::new(),
            recomputations: Cell::new(0),
        }
    }

    pub fn records(&self) -> &[NormalizedRecord] {
        &self.records
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn selection(&self) -> Option<&SelectionFilter> {
        self.selection.as_ref()
    }

    pub fn year_extent(&self) -> YearRange {
        self.extent
    }

    /// Merge-apply a partial update and clear the selection
    pub fn update(&mut self, update: &FilterUpdate) {
        let next = self.filters.apply(update);
        self.set_inputs(next, None);
    }

    /// Set or clear the chart selection
    pub fn select(&mut self, selection: Option<SelectionFilter>) {
        let filters = self.filters.clone();
        self.set_inputs(filters, selection);
    }

    /// Back to "all" over the dataset's year extent, no selection
    pub fn reset(&mut self) {
        self.set_inputs(FilterState::with_year_range(self.extent), None);
    }

    fn set_inputs(&mut self, filters: FilterState, selection: Option<SelectionFilter>) {
        if filters == self.filters && selection == self.selection {
            return;
        }
        self.filters = filters;
        self.selection = selection;
        self.filtered = OnceCell::new();
        self.aggregates = OnceCell::new();
    }

    /// Snapshot indices of the visible records, in snapshot order
    pub fn filtered_indices(&self) -> &[usize] {
        self.filtered.get_or_init(|| {
            self.recomputations.set(self.recomputations.get() + 1);
            let indices: Vec<usize> = self
                .records
                .iter()
                .enumerate()
                .filter(|(_, r)| self.filters.admits(r, self.selection.as_ref()))
                .map(|(idx, _)| idx)
                .collect();
            debug!(
                "Filtered {} of {} records",
                indices.len(),
                self.records.len()
            );
            indices
        })
    }

    /// Visible records, in snapshot order
    pub fn filtered(&self) -> Vec<&NormalizedRecord> {
        self.filtered_indices()
            .iter()
            .map(|&idx| &self.records[idx])
            .collect()
    }

    /// Chart aggregates over the visible records
    pub fn filtered_aggregates(&self) -> &ChartData {
        self.aggregates.get_or_init(|| {
            let indices = self.filtered_indices();
            ChartData::build(indices.iter().map(|&idx| &self.records[idx]))
        })
    }

    /// Statistics over the whole snapshot
    pub fn statistics(&self) -> &Statistics {
        self.statistics
            .get_or_init(|| build_statistics(self.records.iter()))
    }

    /// Sidebar region list over the whole snapshot
    pub fn region_options(&self) -> &[Region] {
        self.regions
            .get_or_init(|| region_options(self.records.iter()))
    }

    /// One page of the visible records
    pub fn table(&self, query: &TableQuery) -> TablePage {
        project_table(&self.filtered(), query)
    }

    /// Number of times the filtered set has been computed
    pub fn recomputations(&self) -> usize {
        self.recomputations.get()
    }
}
