use crate::cleaner::LoadSummary;
use crate::dashboard::DashboardSnapshot;
use crate::error::{Result, ResultExt};
use crate::filter::{FilterSelection, TitleView};
use chrono::Local;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// ============================================================================
// Report Types
// ============================================================================

/// Report combining the load summary, the filter and its dashboard data.
///
/// Used for both JSON output (`--json`) and file writing (`--emit-report`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file
    pub input_file: String,
    /// Filter the dashboard was computed for
    pub filter: FilterSelection,
    /// What the cleaning pass changed
    pub load_summary: LoadSummary,
    /// Number of country choices (including "All")
    pub country_option_count: usize,
    pub dashboard: DashboardSnapshot,
}

/// Writes reports and filtered subsets to an output directory.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl ReportGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Assemble a report stamped with the current local time.
    pub fn build_report(
        input_file: &str,
        filter: &FilterSelection,
        load_summary: &LoadSummary,
        country_option_count: usize,
        dashboard: DashboardSnapshot,
    ) -> DashboardReport {
        DashboardReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.to_string(),
            filter: filter.clone(),
            load_summary: load_summary.clone(),
            country_option_count,
            dashboard,
        }
    }

    /// Write `<base_name>_report.json` and return its path.
    pub fn write_report_to_file(
        &self,
        report: &DashboardReport,
        report_base_name: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)
            .context(format!("Creating {}", self.output_dir.display()))?;

        let report_path = self
            .output_dir
            .join(format!("{}_report.json", report_base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());
        Ok(report_path)
    }

    /// Write the records of `view` to `<base_name>_filtered.csv`.
    pub fn export_view_csv(&self, view: &TitleView<'_>, base_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)
            .context(format!("Creating {}", self.output_dir.display()))?;

        let mut df = view_to_frame(view).context("Building export frame")?;
        let output_path = self
            .output_dir
            .join(format!("{}_filtered.csv", base_name));
        let mut file = File::create(&output_path)?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .with_quote_char(b'"')
            .finish(&mut df)
            .context(format!("Writing {}", output_path.display()))?;

        info!("Filtered titles saved: {}", output_path.display());
        Ok(output_path)
    }
}

/// Columnar copy of a view, in export column order.
fn view_to_frame(view: &TitleView<'_>) -> PolarsResult<DataFrame> {
    let mut titles = Vec::with_capacity(view.len());
    let mut types = Vec::with_capacity(view.len());
    let mut countries = Vec::with_capacity(view.len());
    let mut ratings = Vec::with_capacity(view.len());
    let mut durations = Vec::with_capacity(view.len());
    let mut genres = Vec::with_capacity(view.len());
    let mut release_years = Vec::with_capacity(view.len());
    let mut dates_added = Vec::with_capacity(view.len());
    let mut years_added = Vec::with_capacity(view.len());

    for record in view.iter() {
        titles.push(record.title.clone());
        types.push(record.title_type.as_str());
        countries.push(record.country.as_str());
        ratings.push(record.rating.as_str());
        durations.push(record.duration.as_str());
        genres.push(record.listed_in.as_str());
        release_years.push(record.release_year);
        dates_added.push(record.date_added.map(|d| d.format("%Y-%m-%d").to_string()));
        years_added.push(record.year_added);
    }
    debug!("Exporting {} rows", view.len());

    df![
        "title" => titles,
        "type" => types,
        "country" => countries,
        "rating" => ratings,
        "duration" => durations,
        "listed_in" => genres,
        "release_year" => release_years,
        "date_added" => dates_added,
        "year_added" => years_added,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::ExplorerConfig;
    use crate::loader::read_frame_from_str;

    const CSV: &str = "type,title,country,rating,duration,listed_in,release_year,date_added
Movie,Alpha,India,PG,90 min,Dramas,2019,\"March 1, 2020\"
TV Show,Beta,,TV-MA,2 Seasons,\"Kids' TV, TV Comedies\",2021,
";

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("title-explorer-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_report_round_trips_through_json() {
        let catalog = Catalog::from_csv_str(CSV).unwrap();
        let selection = FilterSelection::for_catalog(&catalog);
        let snapshot =
            DashboardSnapshot::compute(&catalog.filter(&selection), &ExplorerConfig::default());
        let report = ReportGenerator::build_report(
            "titles.csv",
            &selection,
            catalog.load_summary(),
            catalog.country_options().len(),
            snapshot,
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["input_file"], "titles.csv");
        assert_eq!(json["dashboard"]["title_count"], 2);
        assert_eq!(json["dashboard"]["summary"]["tv_shows"], 1);
        assert_eq!(json["country_option_count"], 3);
        assert_eq!(json["load_summary"]["filled_defaults"]["country"], 1);
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = scratch_dir("report");
        let catalog = Catalog::from_csv_str(CSV).unwrap();
        let selection = FilterSelection::for_catalog(&catalog);
        let snapshot =
            DashboardSnapshot::compute(&catalog.filter(&selection), &ExplorerConfig::default());
        let report =
            ReportGenerator::build_report("titles.csv", &selection, catalog.load_summary(), 3, snapshot);

        let path = ReportGenerator::new(&dir)
            .write_report_to_file(&report, "titles")
            .unwrap();
        assert_eq!(path.file_name().unwrap(), "titles_report.json");
        let written: DashboardReport =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.dashboard.summary, report.dashboard.summary);
        assert_eq!(written.dashboard.top_genres, report.dashboard.top_genres);
        assert_eq!(written.filter, selection);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_export_view_csv() {
        let dir = scratch_dir("export");
        let catalog = Catalog::from_csv_str(CSV).unwrap();
        let selection = FilterSelection::for_catalog(&catalog).with_country(Some("India"));
        let view = catalog.filter(&selection);

        let path = ReportGenerator::new(&dir)
            .export_view_csv(&view, "titles")
            .unwrap();
        let exported = read_frame_from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(exported.height(), 1);
        assert_eq!(exported.width(), 9);
        let dates = exported
            .column("date_added")
            .unwrap()
            .as_materialized_series()
            .clone();
        assert_eq!(dates.str().unwrap().get(0), Some("2020-03-01"));

        fs::remove_dir_all(&dir).ok();
    }
}
