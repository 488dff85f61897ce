//! CSV loading for title catalogs.
//!
//! Every column is read as text; typing happens in the cleaning pass so a
//! stray value deep in the file can never abort schema inference.

use crate::error::{ExplorerError, Result, ResultExt};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

pub const COL_TYPE: &str = "type";
pub const COL_COUNTRY: &str = "country";
pub const COL_RATING: &str = "rating";
pub const COL_DURATION: &str = "duration";
pub const COL_LISTED_IN: &str = "listed_in";
pub const COL_RELEASE_YEAR: &str = "release_year";
pub const COL_DATE_ADDED: &str = "date_added";
pub const COL_TITLE: &str = "title";

/// Columns that must exist for a load to succeed.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_TYPE,
    COL_COUNTRY,
    COL_RATING,
    COL_DURATION,
    COL_LISTED_IN,
    COL_RELEASE_YEAR,
    COL_DATE_ADDED,
];

fn read_options() -> CsvReadOptions {
    // infer_schema_length 0 keeps every column as String
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
}

/// Read a CSV file into a frame of string columns.
///
/// Falls back to re-reading the content with blank lines stripped when the
/// standard reader rejects the file.
pub fn read_frame(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    info!("Loading dataset from: {}", path.display());

    let standard = read_options()
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .context(format!("Opening {}", path.display()))?
        .finish();

    let frame = match standard {
        Ok(df) => df,
        Err(e) => {
            debug!("Standard loading failed: {}", e);
            let content = std::fs::read_to_string(path)
                .context(format!("Reading {}", path.display()))?;
            read_frame_from_str(&strip_blank_lines(&content))?
        }
    };

    info!("Dataset loaded: {:?}", frame.shape());
    Ok(frame)
}

/// Read CSV content held in memory.
pub fn read_frame_from_str(content: &str) -> Result<DataFrame> {
    read_options()
        .into_reader_with_file_handle(Cursor::new(content.to_owned()))
        .finish()
        .context("Parsing CSV content")
}

/// Fail with [`ExplorerError::MissingColumn`] for the first required column
/// the frame lacks.
pub fn ensure_required_columns(frame: &DataFrame) -> Result<()> {
    for name in REQUIRED_COLUMNS {
        if frame.column(name).is_err() {
            return Err(ExplorerError::MissingColumn(name.to_string()));
        }
    }
    Ok(())
}

fn strip_blank_lines(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
