//! Permissive cell converters used by the cleaning pass.

use chrono::{NaiveDate, NaiveDateTime};

/// Date layouts accepted for `date_added`, tried in order.
const DATE_FORMATS: [&str; 6] = [
    "%B %d, %Y", // September 25, 2021
    "%b %d, %Y", // Sep 25, 2021
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%d-%b-%y",
];

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a `date_added` cell. Whitespace is trimmed first; anything that
/// matches none of the known layouts is `None`, never an error.
pub(crate) fn parse_date_added(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Parse a `release_year` cell: a plain integer, or a float with no
/// fractional part (`"2019.0"`).
pub(crate) fn parse_release_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if let Ok(year) = trimmed.parse::<i32>() {
        return Some(year);
    }

    let float_val = trimmed.parse::<f64>().ok()?;
    if float_val.is_finite()
        && float_val.fract() == 0.0
        && float_val >= i32::MIN as f64
        && float_val <= i32::MAX as f64
    {
        Some(float_val as i32)
    } else {
        None
    }
}
