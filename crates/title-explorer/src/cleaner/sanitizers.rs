//! Column extraction and default filling.

use crate::error::{ExplorerError, Result};
use polars::prelude::*;

/// Pull a column out of the frame as owned optional strings.
///
/// Non-string columns are cast first, so the helper also works on frames
/// that were read with schema inference.
pub(crate) fn string_values(frame: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = frame
        .column(name)
        .map_err(|_| ExplorerError::MissingColumn(name.to_string()))?;
    let series = column.as_materialized_series().cast(&DataType::String)?;
    let str_series = series.str()?;

    Ok(str_series
        .into_iter()
        .map(|opt_val| opt_val.map(str::to_owned))
        .collect())
}

/// Return the cell value, or `default` when it is null or blank.
///
/// The flag reports whether the default was used.
pub(crate) fn fill_absent(value: Option<&str>, default: &str) -> (String, bool) {
    match value {
        Some(v) if !v.trim().is_empty() => (v.to_string(), false),
        _ => (default.to_string(), true),
    }
}
