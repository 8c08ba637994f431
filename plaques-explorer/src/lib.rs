//! # Plaques Explorer
//!
//! Command-line host for the plaques pipeline. Loads a dataset, prepares the
//! normalized collection, applies the requested filters through a
//! [`Dashboard`] session and renders the requested view as JSON.

pub mod cli;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use plaques_common::config::{resolve_dataset_path, TomlConfig};
use plaques_common::csv_import::{convert_csv_file, CsvOptions};
use plaques_common::geojson::load_records;
use plaques_common::RawRecord;
use plaques_core::aggregate::YearCount;
use plaques_core::augment::fingerprint;
use plaques_core::normalize::normalize_all;
use plaques_core::pipeline::{sample, PipelineOptions};
use plaques_core::table::{TableQuery, TableRow};
use plaques_core::{Category, Dashboard, FilterState, Region, SelectionFilter, YearRange};

use cli::{AggregateBy, Args, Command, DatasetArgs};

/// Rows shown in the "top types" card
const TOP_CATEGORIES: usize = 3;

#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub dataset: String,
    pub total: usize,
    pub filtered: usize,
    pub year_extent: YearRange,
    pub filters: FilterState,
    pub selection: Option<SelectionFilter>,
    pub by_category: BTreeMap<Category, usize>,
    pub top_categories: Vec<CategoryCount>,
    pub most_recent: Option<TableRow>,
}

#[derive(Debug, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(tag = "by", content = "counts", rename_all = "lowercase")]
pub enum AggregateReport {
    Category(BTreeMap<Category, usize>),
    Year(Vec<YearCount>),
    Region(BTreeMap<Region, usize>),
}

#[derive(Debug, Serialize)]
pub struct FingerprintReport {
    pub records: usize,
    pub sha256: String,
}

#[derive(Debug, Serialize)]
pub struct ConversionReport {
    pub features: usize,
    pub skipped_rows: Vec<usize>,
    pub output: String,
}

/// Pipeline options from config, overridden by command-line flags
pub fn pipeline_options(args: &DatasetArgs, config: &TomlConfig) -> PipelineOptions {
    let mut options = PipelineOptions::from(config);
    if let Some(limit) = args.sample_limit {
        options.sample_limit = limit;
    }
    if args.no_augment {
        options.augment = false;
    }
    options
}

fn load_raw(args: &DatasetArgs, config: &TomlConfig) -> Result<(String, Vec<RawRecord>)> {
    let path = resolve_dataset_path(args.dataset.as_deref(), config);
    let admission = load_records(&path)
        .with_context(|| format!("Failed to load dataset {}", path.display()))?;
    Ok((path.display().to_string(), admission.records))
}

/// Load, prepare and filter the dataset named by the arguments
fn open_dashboard(args: &Args, config: &TomlConfig) -> Result<(String, Dashboard)> {
    let options = pipeline_options(&args.dataset, config);
    let (dataset, raw) = load_raw(&args.dataset, config)?;
    let mut dashboard = Dashboard::new(normalize_all(&sample(&raw, &options)));

    let update = args.filters.to_update(dashboard.year_extent());
    dashboard.update(&update);
    // Updates clear the selection, so it goes last
    let selection = args.filters.selection().map_err(|e| anyhow!(e))?;
    dashboard.select(selection);

    info!(
        "{} of {} plaques match the current filters",
        dashboard.filtered_indices().len(),
        dashboard.records().len()
    );
    Ok((dataset, dashboard))
}

/// Run one command and return its JSON report
pub fn run(args: &Args, config: &TomlConfig) -> Result<Value> {
    match &args.command {
        Command::ConvertCsv {
            input,
            lat_field,
            lon_field,
            output,
        } => {
            let options = CsvOptions {
                lat_field: lat_field.clone(),
                lon_field: lon_field.clone(),
                ..CsvOptions::default()
            };
            convert(input, &options, output.as_deref())
        }
        Command::Fingerprint => {
            let options = pipeline_options(&args.dataset, config);
            let (_, raw) = load_raw(&args.dataset, config)?;
            let records = sample(&raw, &options);
            let report = FingerprintReport {
                records: records.len(),
                sha256: fingerprint(&records)?,
            };
            Ok(serde_json::to_value(report)?)
        }
        Command::Summary => {
            let (dataset, dashboard) = open_dashboard(args, config)?;
            Ok(serde_json::to_value(summary(dataset, &dashboard))?)
        }
        Command::Aggregate { by } => {
            let (_, dashboard) = open_dashboard(args, config)?;
            let charts = dashboard.filtered_aggregates();
            let report = match by {
                AggregateBy::Category => AggregateReport::Category(charts.by_category.clone()),
                AggregateBy::Year => AggregateReport::Year(charts.by_year.clone()),
                AggregateBy::Region => AggregateReport::Region(charts.by_region.clone()),
            };
            Ok(serde_json::to_value(report)?)
        }
        Command::Table {
            sort,
            order,
            page,
            page_size,
        } => {
            let (_, dashboard) = open_dashboard(args, config)?;
            let query = TableQuery {
                sort: *sort,
                order: *order,
                page: *page,
                page_size: page_size.unwrap_or(config.page_size),
            };
            Ok(serde_json::to_value(dashboard.table(&query))?)
        }
        Command::Boroughs => {
            let (_, dashboard) = open_dashboard(args, config)?;
            let labels: Vec<&str> = dashboard.region_options().iter().map(|r| r.label()).collect();
            Ok(serde_json::to_value(labels)?)
        }
    }
}

fn summary(dataset: String, dashboard: &Dashboard) -> SummaryReport {
    let stats = dashboard.statistics();
    SummaryReport {
        dataset,
        total: stats.total,
        filtered: dashboard.filtered_indices().len(),
        year_extent: dashboard.year_extent(),
        filters: dashboard.filters().clone(),
        selection: dashboard.selection().cloned(),
        by_category: stats.by_category.clone(),
        top_categories: stats
            .top_categories(TOP_CATEGORIES)
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect(),
        most_recent: stats.most_recent.as_ref().map(TableRow::from),
    }
}

fn convert(input: &Path, options: &CsvOptions, output: Option<&Path>) -> Result<Value> {
    let conversion = convert_csv_file(input, options)
        .with_context(|| format!("Failed to convert {}", input.display()))?;
    info!(
        "Converted {} rows from {} ({} skipped)",
        conversion.collection.features.len(),
        input.display(),
        conversion.skipped_rows.len()
    );

    let Some(output) = output else {
        return Ok(serde_json::to_value(&conversion.collection)?);
    };

    let json = serde_json::to_string_pretty(&conversion.collection)?;
    fs::write(output, json).with_context(|| format!("Failed to write {}", output.display()))?;

    let report = ConversionReport {
        features: conversion.collection.features.len(),
        skipped_rows: conversion.skipped_rows,
        output: output.display().to_string(),
    };
    Ok(serde_json::to_value(report)?)
}
