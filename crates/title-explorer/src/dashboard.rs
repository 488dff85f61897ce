//! Output contract for a presentation layer.
//!
//! [`Explorer`] pairs a loaded [`Catalog`] with an [`ExplorerConfig`] and
//! turns filter selections into [`DashboardSnapshot`]s.
//!
//! # Example
//!
//! ```rust,ignore
//! use title_explorer::{Catalog, Explorer, ExplorerConfig, FilterSelection, TitleType};
//!
//! let catalog = Catalog::load("netflix_titles.csv")?;
//! let explorer = Explorer::new(catalog, ExplorerConfig::default());
//!
//! let selection = explorer
//!     .default_selection()
//!     .with_types([TitleType::Movie])
//!     .with_country(Some("India"));
//! let snapshot = explorer.snapshot(&selection);
//! println!("Showing {} titles", snapshot.title_count);
//! ```

use crate::aggregate::{
    CategoryCount, Histogram, movie_duration_histogram, release_year_histogram, top_countries,
    top_genres, type_counts,
};
use crate::catalog::Catalog;
use crate::config::ExplorerConfig;
use crate::filter::{FilterSelection, TitleView};
use crate::types::TitleType;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Headline counts for the current selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCounts {
    pub total: usize,
    pub movies: usize,
    pub tv_shows: usize,
}

/// Everything a dashboard needs to render one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Number of titles in the filtered view.
    pub title_count: usize,
    pub type_counts: Vec<CategoryCount>,
    pub top_genres: Vec<CategoryCount>,
    pub release_years: Histogram,
    pub top_countries: Vec<CategoryCount>,
    /// `None` when there is no movie duration to show.
    pub movie_durations: Option<Histogram>,
    pub summary: SummaryCounts,
}

impl DashboardSnapshot {
    pub fn compute(view: &TitleView<'_>, config: &ExplorerConfig) -> Self {
        let summary = SummaryCounts {
            total: view.len(),
            movies: view.count_of(TitleType::Movie),
            tv_shows: view.count_of(TitleType::TvShow),
        };

        let snapshot = Self {
            title_count: view.len(),
            type_counts: type_counts(view),
            top_genres: top_genres(view, config.top_n),
            release_years: release_year_histogram(view, config.histogram_bins),
            top_countries: top_countries(view, config.top_n),
            movie_durations: movie_duration_histogram(view, config.histogram_bins),
            summary,
        };
        debug!(
            "Snapshot: {} titles ({} movies, {} TV shows)",
            snapshot.title_count, summary.movies, summary.tv_shows
        );
        snapshot
    }

    /// True when the selection matched nothing.
    pub fn is_empty(&self) -> bool {
        self.title_count == 0
    }
}

/// A catalog plus the settings used to summarize it.
#[derive(Debug, Clone)]
pub struct Explorer {
    catalog: Catalog,
    config: ExplorerConfig,
}

impl Explorer {
    pub fn new(catalog: Catalog, config: ExplorerConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// All observed types, no country filter.
    pub fn default_selection(&self) -> FilterSelection {
        FilterSelection::for_catalog(&self.catalog)
    }

    pub fn view(&self, selection: &FilterSelection) -> TitleView<'_> {
        self.catalog.filter(selection)
    }

    pub fn snapshot(&self, selection: &FilterSelection) -> DashboardSnapshot {
        DashboardSnapshot::compute(&self.view(selection), &self.config)
    }
}
