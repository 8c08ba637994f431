//! Command-line arguments
//!
//! Dataset and filter flags are global so they may follow the subcommand:
//! `plaques-explorer table --sort year --category building`.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

use plaques_core::record::UNKNOWN_REGION_LABEL;
use plaques_core::region::title_case;
use plaques_core::table::{SortColumn, SortOrder};
use plaques_core::{Category, CategoryFilter, FilterUpdate, Region, SelectionFilter, YearRange};

/// London plaques explorer
#[derive(Parser, Debug)]
#[command(name = "plaques-explorer")]
#[command(about = "Summaries, charts data and table pages over London plaque datasets")]
#[command(version)]
pub struct Args {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(ClapArgs, Debug, Default)]
pub struct DatasetArgs {
    /// GeoJSON dataset (overrides PLAQUES_DATASET and the config file)
    #[arg(long, global = true, value_name = "PATH")]
    pub dataset: Option<PathBuf>,

    /// Skip the fixture augmenter
    #[arg(long, global = true)]
    pub no_augment: bool,

    /// Number of valid features admitted before augmentation
    #[arg(long, global = true, value_name = "N")]
    pub sample_limit: Option<usize>,
}

#[derive(ClapArgs, Debug, Default)]
pub struct FilterArgs {
    /// Category to show ("all", "building", "event", "historical person", "other")
    #[arg(long, global = true, value_parser = parse_category)]
    pub category: Option<CategoryFilter>,

    /// Lower bound of the year range (defaults to the dataset's earliest year)
    #[arg(long, global = true)]
    pub min_year: Option<i32>,

    /// Upper bound of the year range (defaults to the dataset's latest year)
    #[arg(long, global = true)]
    pub max_year: Option<i32>,

    /// Text matched against title and address
    #[arg(long, global = true)]
    pub search: Option<String>,

    /// Borough to include; repeat for several
    #[arg(long = "region", global = true, value_parser = parse_region)]
    pub regions: Vec<Region>,

    /// Chart selection kind
    #[arg(long, global = true, value_enum, requires = "select_value")]
    pub select_kind: Option<SelectKind>,

    /// Chart selection value
    #[arg(long, global = true, requires = "select_kind")]
    pub select_value: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Totals, category counts and the most recent plaque
    Summary,

    /// Chart aggregate over the filtered plaques
    Aggregate {
        #[arg(long, value_enum, default_value_t = AggregateBy::Category)]
        by: AggregateBy,
    },

    /// One page of the sorted, filtered plaque table
    Table {
        #[arg(long, default_value = "title", value_parser = parse_sort_column)]
        sort: SortColumn,

        #[arg(long, default_value = "asc", value_parser = parse_sort_order)]
        order: SortOrder,

        /// Page number (1-indexed, clamped)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Rows per page: 10, 20 or 50 (defaults to the config value)
        #[arg(long, value_parser = parse_page_size)]
        page_size: Option<usize>,
    },

    /// Sorted list of boroughs present in the dataset
    Boroughs,

    /// SHA-256 of the augmented sample
    Fingerprint,

    /// Convert a CSV file with latitude/longitude columns to GeoJSON
    ConvertCsv {
        input: PathBuf,

        #[arg(long, default_value = "latitude")]
        lat_field: String,

        #[arg(long, default_value = "longitude")]
        lon_field: String,

        /// Write the FeatureCollection here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AggregateBy {
    Category,
    Year,
    Region,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectKind {
    Category,
    Region,
    Year,
}

impl FilterArgs {
    /// Partial filter update; a year bound left unset falls back to `extent`
    /// but never crosses the bound that was given
    pub fn to_update(&self, extent: YearRange) -> FilterUpdate {
        let year_range = match (self.min_year, self.max_year) {
            (None, None) => None,
            (Some(min), None) => Some(YearRange::new(min, extent.max.max(min))),
            (None, Some(max)) => Some(YearRange::new(extent.min.min(max), max)),
            (Some(min), Some(max)) => Some(YearRange::new(min, max)),
        };

        FilterUpdate {
            category: self.category,
            year_range,
            search: self.search.clone(),
            regions: if self.regions.is_empty() {
                None
            } else {
                Some(self.regions.iter().cloned().collect())
            },
        }
    }

    /// Selection from `--select-kind` / `--select-value`
    pub fn selection(&self) -> Result<Option<SelectionFilter>, String> {
        let (Some(kind), Some(value)) = (self.select_kind, self.select_value.as_deref()) else {
            return Ok(None);
        };
        let selection = match kind {
            SelectKind::Category => Category::from_label(value)
                .map(SelectionFilter::Category)
                .ok_or_else(|| format!("Unknown category: {}", value))?,
            SelectKind::Region => SelectionFilter::Region(parse_region(value)?),
            SelectKind::Year => SelectionFilter::Year(
                value
                    .trim()
                    .parse()
                    .map_err(|_| format!("Invalid year: {}", value))?,
            ),
        };
        Ok(Some(selection))
    }
}

fn parse_category(s: &str) -> Result<CategoryFilter, String> {
    if s.trim().eq_ignore_ascii_case("all") {
        return Ok(CategoryFilter::All);
    }
    Category::from_label(s)
        .map(CategoryFilter::Only)
        .ok_or_else(|| format!("Unknown category: {}", s))
}

/// Borough names are matched case-insensitively; "unknown" selects the sentinel
fn parse_region(s: &str) -> Result<Region, String> {
    let name = s.trim().to_lowercase();
    if name.is_empty() {
        return Err("Empty region".to_string());
    }
    if name == "unknown" || name == UNKNOWN_REGION_LABEL.to_lowercase() {
        return Ok(Region::Unknown);
    }
    Ok(Region::Borough(title_case(&name)))
}

fn parse_sort_column(s: &str) -> Result<SortColumn, String> {
    s.parse().map_err(|e: plaques_core::Error| e.to_string())
}

fn parse_sort_order(s: &str) -> Result<SortOrder, String> {
    s.parse().map_err(|e: plaques_core::Error| e.to_string())
}

fn parse_page_size(s: &str) -> Result<usize, String> {
    let size: usize = s.parse().map_err(|_| format!("Invalid page size: {}", s))?;
    if plaques_core::pagination::PAGE_SIZES.contains(&size) {
        Ok(size)
    } else {
        Err(format!(
            "Page size must be one of {:?}",
            plaques_core::pagination::PAGE_SIZES
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_region() {
        assert_eq!(parse_region("camden"), Ok(Region::from("Camden")));
        assert_eq!(parse_region("CITY OF LONDON"), Ok(Region::from("City Of London")));
        assert_eq!(parse_region("Other / unknown"), Ok(Region::Unknown));
        assert!(parse_region("  ").is_err());
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("All"), Ok(CategoryFilter::All));
        assert_eq!(
            parse_category("historical person"),
            Ok(CategoryFilter::Only(Category::HistoricalPerson))
        );
        assert!(parse_category("statue").is_err());
    }

    #[test]
    fn test_parse_page_size() {
        assert_eq!(parse_page_size("20"), Ok(20));
        assert!(parse_page_size("15").is_err());
        assert!(parse_page_size("ten").is_err());
    }

    #[test]
    fn test_to_update_fills_missing_bound_from_extent() {
        let filters = FilterArgs {
            min_year: Some(1900),
            ..FilterArgs::default()
        };
        let update = filters.to_update(YearRange::new(1850, 2026));
        assert_eq!(update.year_range, Some(YearRange::new(1900, 2026)));
        assert!(update.category.is_none());
        assert!(update.regions.is_none());

        assert!(FilterArgs::default().to_update(YearRange::new(1850, 2026)).is_empty());
    }

    #[test]
    fn test_to_update_single_bound_outside_extent() {
        let extent = YearRange::new(1850, 2026);

        let above = FilterArgs {
            min_year: Some(2100),
            ..FilterArgs::default()
        };
        assert_eq!(above.to_update(extent).year_range, Some(YearRange::new(2100, 2100)));

        let below = FilterArgs {
            max_year: Some(1800),
            ..FilterArgs::default()
        };
        assert_eq!(below.to_update(extent).year_range, Some(YearRange::new(1800, 1800)));
    }

    #[test]
    fn test_selection() {
        let filters = FilterArgs {
            select_kind: Some(SelectKind::Year),
            select_value: Some("1901".to_string()),
            ..FilterArgs::default()
        };
        assert_eq!(filters.selection(), Ok(Some(SelectionFilter::Year(1901))));

        let bad = FilterArgs {
            select_kind: Some(SelectKind::Category),
            select_value: Some("statue".to_string()),
            ..FilterArgs::default()
        };
        assert!(bad.selection().is_err());
        assert_eq!(FilterArgs::default().selection(), Ok(None));
    }
}
