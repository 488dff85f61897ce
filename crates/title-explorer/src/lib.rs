//! Media Title Explorer Library
//!
//! Loads a catalog of movies and TV shows from CSV, normalizes it, and
//! computes the descriptive aggregates a dashboard renders.
//!
//! # Overview
//!
//! The flow is linear: **load → clean → filter → aggregate**.
//!
//! - **Loading**: CSV read with Polars, every column as text; missing required
//!   columns abort the load
//! - **Cleaning**: permissive date parsing, sentinel defaults for absent
//!   `rating` / `country` / `duration`, derived `year_added`
//! - **Filtering**: content-type set membership and case-sensitive country
//!   substring match, producing a borrowed read-only view
//! - **Aggregates**: type counts, top genres, top countries, release-year and
//!   movie-duration histograms, summary counts
//! - **Reporting**: JSON reports and CSV export of a filtered view
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use title_explorer::{Catalog, Explorer, ExplorerConfig, TitleType};
//!
//! // Load once, then share the handle
//! let catalog = Catalog::load("netflix_titles.csv")?;
//! let explorer = Explorer::new(catalog, ExplorerConfig::default());
//!
//! let selection = explorer
//!     .default_selection()
//!     .with_types([TitleType::Movie])
//!     .with_country(Some("India"));
//!
//! let snapshot = explorer.snapshot(&selection);
//! println!("Showing {} titles", snapshot.title_count);
//! for genre in &snapshot.top_genres {
//!     println!("{:<30} {}", genre.label, genre.count);
//! }
//! match &snapshot.movie_durations {
//!     Some(hist) => println!("{} movies with a duration", hist.total()),
//!     None => println!("No movie data available for the selected filters."),
//! }
//! ```
//!
//! # Configuration
//!
//! Use [`ExplorerConfig`] to size the aggregates:
//!
//! ```rust,ignore
//! let config = ExplorerConfig::builder()
//!     .top_n(5)            // top genres / countries
//!     .histogram_bins(20)  // release year / duration bins
//!     .build()?;
//! ```

pub mod aggregate;
pub mod catalog;
pub mod cleaner;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod loader;
pub mod reporting;
pub mod types;

// Re-exports for convenient access
pub use aggregate::{CategoryCount, FrequencyTable, Histogram, HistogramBin, parse_movie_minutes};
pub use catalog::{ALL_COUNTRIES, Catalog};
pub use cleaner::LoadSummary;
pub use config::{ConfigValidationError, ExplorerConfig, ExplorerConfigBuilder};
pub use dashboard::{DashboardSnapshot, Explorer, SummaryCounts};
pub use error::{ExplorerError, Result as ExplorerResult, ResultExt};
pub use filter::{FilterSelection, TitleView};
pub use reporting::{DashboardReport, ReportGenerator};
pub use types::{DEFAULT_DURATION, TitleRecord, TitleType, UNKNOWN};
