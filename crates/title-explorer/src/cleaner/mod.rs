//! Cleaning pass turning a raw frame into immutable title records.
//!
//! This module provides:
//! - Permissive `date_added` parsing (failures become absent values)
//! - Sentinel defaults for absent `rating`, `country` and `duration`
//! - `year_added` derivation
//! - Skipping of rows without a recognizable `type`
//!
//! The frame is only read; a fresh record set is produced.

mod converters;
mod sanitizers;

use converters::{parse_date_added, parse_release_year};

use crate::error::Result;
use crate::loader::{
    COL_COUNTRY, COL_DATE_ADDED, COL_DURATION, COL_LISTED_IN, COL_RATING, COL_RELEASE_YEAR,
    COL_TITLE, COL_TYPE, ensure_required_columns,
};
use crate::types::{DEFAULT_DURATION, TitleRecord, TitleType, UNKNOWN};
use chrono::Datelike;
use polars::prelude::*;
use sanitizers::{fill_absent, string_values};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// What the cleaning pass did to the source rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSummary {
    /// Data rows present in the source.
    pub rows_read: usize,
    /// Rows that became title records.
    pub rows_loaded: usize,
    /// Rows dropped because `type` was absent or unrecognized.
    pub rows_skipped: usize,
    /// Non-empty `date_added` cells that could not be parsed.
    pub unparsed_dates: usize,
    /// Non-empty `release_year` cells that were not integers.
    pub unparsed_release_years: usize,
    /// Per column, how many cells received the sentinel default.
    pub filled_defaults: BTreeMap<String, usize>,
}

impl LoadSummary {
    fn record_fill(&mut self, column: &str, filled: bool) {
        if filled {
            *self.filled_defaults.entry(column.to_string()).or_insert(0) += 1;
        }
    }

    /// Human-readable lines describing the cleaning actions.
    pub fn describe(&self) -> Vec<String> {
        let mut actions = Vec::new();
        if self.rows_skipped > 0 {
            actions.push(format!(
                "Skipped {} rows without a recognizable type",
                self.rows_skipped
            ));
        }
        for (column, count) in &self.filled_defaults {
            actions.push(format!("Filled {} missing '{}' values", count, column));
        }
        if self.unparsed_dates > 0 {
            actions.push(format!(
                "Treated {} unparsable 'date_added' values as absent",
                self.unparsed_dates
            ));
        }
        if self.unparsed_release_years > 0 {
            actions.push(format!(
                "Treated {} non-integer 'release_year' values as absent",
                self.unparsed_release_years
            ));
        }
        actions
    }
}

/// Convert a raw frame into title records.
///
/// Fails only when a required column is missing.
pub fn normalize(frame: &DataFrame) -> Result<(Vec<TitleRecord>, LoadSummary)> {
    ensure_required_columns(frame)?;
    info!("Normalizing {} rows...", frame.height());

    let types = string_values(frame, COL_TYPE)?;
    let countries = string_values(frame, COL_COUNTRY)?;
    let ratings = string_values(frame, COL_RATING)?;
    let durations = string_values(frame, COL_DURATION)?;
    let genres = string_values(frame, COL_LISTED_IN)?;
    let years = string_values(frame, COL_RELEASE_YEAR)?;
    let dates = string_values(frame, COL_DATE_ADDED)?;
    let titles = if frame.column(COL_TITLE).is_ok() {
        Some(string_values(frame, COL_TITLE)?)
    } else {
        None
    };

    let mut summary = LoadSummary {
        rows_read: frame.height(),
        ..LoadSummary::default()
    };
    let mut records = Vec::with_capacity(frame.height());

    for row in 0..frame.height() {
        let raw_type = types[row].as_deref();
        let Some(title_type) = raw_type.and_then(TitleType::parse) else {
            warn!(
                "Skipping row {}: unrecognized type {:?}",
                row,
                raw_type.unwrap_or("")
            );
            summary.rows_skipped += 1;
            continue;
        };

        let (country, filled) = fill_absent(countries[row].as_deref(), UNKNOWN);
        summary.record_fill(COL_COUNTRY, filled);
        let (rating, filled) = fill_absent(ratings[row].as_deref(), UNKNOWN);
        summary.record_fill(COL_RATING, filled);
        let (duration, filled) = fill_absent(durations[row].as_deref(), DEFAULT_DURATION);
        summary.record_fill(COL_DURATION, filled);

        let raw_date = dates[row].as_deref().unwrap_or("");
        let date_added = parse_date_added(raw_date);
        if date_added.is_none() && !raw_date.trim().is_empty() {
            summary.unparsed_dates += 1;
        }

        let raw_year = years[row].as_deref().unwrap_or("");
        let release_year = parse_release_year(raw_year);
        if release_year.is_none() && !raw_year.trim().is_empty() {
            summary.unparsed_release_years += 1;
        }

        let title = titles
            .as_ref()
            .and_then(|t| t[row].as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_owned);

        records.push(TitleRecord {
            title,
            title_type,
            country,
            rating,
            duration,
            listed_in: genres[row].clone().unwrap_or_default(),
            release_year,
            year_added: date_added.map(|d| d.year()),
            date_added,
        });
    }

    summary.rows_loaded = records.len();
    debug!("Cleaning summary: {:?}", summary);
    info!(
        "Loaded {} titles ({} skipped)",
        summary.rows_loaded, summary.rows_skipped
    );

    Ok((records, summary))
}
