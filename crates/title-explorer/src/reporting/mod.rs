//! Report generation module.
//!
//! This module writes what the explorer computed to disk:
//! - JSON reports for a filter selection (`--json`, `--emit-report`)
//! - CSV export of the filtered titles (`--export`)
//!
//! # Example
//!
//! ```rust,ignore
//! use title_explorer::reporting::ReportGenerator;
//!
//! let report = ReportGenerator::build_report(
//!     "netflix_titles.csv",
//!     &selection,
//!     catalog.load_summary(),
//!     catalog.country_options().len(),
//!     snapshot,
//! );
//!
//! let generator = ReportGenerator::new("outputs");
//! generator.write_report_to_file(&report, "netflix_titles")?;
//! generator.export_view_csv(&catalog.filter(&selection), "netflix_titles")?;
//! ```

mod generator;

pub use generator::{DashboardReport, ReportGenerator};
