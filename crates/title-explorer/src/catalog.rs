//! The loaded, immutable title dataset.
//!
//! A [`Catalog`] is created once per session and handed to every consumer.
//! Cloning shares the underlying records, so there is no need for a
//! process-wide cache.

use crate::cleaner::{LoadSummary, normalize};
use crate::error::{Result, ResultExt};
use crate::filter::{FilterSelection, TitleView};
use crate::loader::{read_frame, read_frame_from_str};
use crate::types::{TitleRecord, TitleType};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

/// Country option meaning "no country filter".
pub const ALL_COUNTRIES: &str = "All";

#[derive(Debug, Clone)]
pub struct Catalog {
    records: Arc<[TitleRecord]>,
    summary: Arc<LoadSummary>,
}

// The catalog is shared read-only between consumers
static_assertions::assert_impl_all!(Catalog: Send, Sync);

impl Catalog {
    /// Load and clean a CSV file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let frame = read_frame(path)?;
        let (records, summary) =
            normalize(&frame).context(format!("Loading {}", path.display()))?;
        Ok(Self::with_summary(records, summary))
    }

    /// Load and clean CSV content held in memory.
    pub fn from_csv_str(content: &str) -> Result<Self> {
        let frame = read_frame_from_str(content)?;
        let (records, summary) = normalize(&frame)?;
        Ok(Self::with_summary(records, summary))
    }

    /// Wrap records that are already clean.
    pub fn from_records(records: Vec<TitleRecord>) -> Self {
        let summary = LoadSummary {
            rows_read: records.len(),
            rows_loaded: records.len(),
            ..LoadSummary::default()
        };
        Self::with_summary(records, summary)
    }

    fn with_summary(records: Vec<TitleRecord>, summary: LoadSummary) -> Self {
        Self {
            records: records.into(),
            summary: Arc::new(summary),
        }
    }

    pub fn records(&self) -> &[TitleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn load_summary(&self) -> &LoadSummary {
        &self.summary
    }

    /// Distinct title types in order of first appearance.
    pub fn observed_types(&self) -> Vec<TitleType> {
        let mut seen = Vec::new();
        for record in self.records.iter() {
            if !seen.contains(&record.title_type) {
                seen.push(record.title_type);
                if seen.len() == TitleType::ALL.len() {
                    break;
                }
            }
        }
        seen
    }

    /// Country filter choices: [`ALL_COUNTRIES`] followed by every distinct
    /// raw country value, sorted.
    pub fn country_options(&self) -> Vec<String> {
        let distinct: BTreeSet<&str> = self.records.iter().map(|r| r.country.as_str()).collect();
        std::iter::once(ALL_COUNTRIES)
            .chain(distinct)
            .map(str::to_owned)
            .collect()
    }

    /// Records matching `selection`, in source order.
    pub fn filter(&self, selection: &FilterSelection) -> TitleView<'_> {
        TitleView::new(
            self.records
                .iter()
                .filter(|record| selection.matches(record))
                .collect(),
        )
    }
}
