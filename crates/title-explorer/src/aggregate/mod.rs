//! Aggregates computed over a filtered view.
//!
//! Frequency lists keep a deterministic order: counts descending, ties in
//! the order the value was first encountered.

mod histogram;

pub use histogram::{Histogram, HistogramBin};

use crate::filter::TitleView;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A run of ASCII digits, optionally followed by `" min"`.
static MOVIE_MINUTES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)(?: min)?$").expect("Invalid regex: movie minutes"));

/// A label and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

impl CategoryCount {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Occurrence counter that remembers first-seen order.
#[derive(Debug, Default)]
pub struct FrequencyTable {
    index: HashMap<String, usize>,
    entries: Vec<CategoryCount>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, label: &str) {
        match self.index.get(label) {
            Some(&i) => self.entries[i].count += 1,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push(CategoryCount::new(label, 1));
            }
        }
    }

    /// Entries in first-seen order.
    pub fn into_entries(self) -> Vec<CategoryCount> {
        self.entries
    }

    /// At most `n` entries, highest count first. The sort is stable so ties
    /// keep first-seen order.
    pub fn into_top(self, n: usize) -> Vec<CategoryCount> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries.truncate(n);
        entries
    }
}

/// Number of titles per type, in first-seen order.
pub fn type_counts(view: &TitleView<'_>) -> Vec<CategoryCount> {
    let mut table = FrequencyTable::new();
    for record in view.iter() {
        table.observe(record.title_type.as_str());
    }
    table.into_entries()
}

/// Most frequent genre tags. Each record contributes one occurrence per
/// comma-separated tag in `listed_in`.
pub fn top_genres(view: &TitleView<'_>, n: usize) -> Vec<CategoryCount> {
    let mut table = FrequencyTable::new();
    for record in view.iter() {
        for genre in record.genres() {
            table.observe(genre);
        }
    }
    table.into_top(n)
}

/// Most frequent raw `country` values. Multi-country strings are counted as
/// they appear, not split.
pub fn top_countries(view: &TitleView<'_>, n: usize) -> Vec<CategoryCount> {
    let mut table = FrequencyTable::new();
    for record in view.iter() {
        table.observe(&record.country);
    }
    table.into_top(n)
}

/// Distribution of release years; records without a year are ignored.
pub fn release_year_histogram(view: &TitleView<'_>, bins: usize) -> Histogram {
    let years: Vec<f64> = view
        .iter()
        .filter_map(|r| r.release_year)
        .map(f64::from)
        .collect();
    Histogram::from_values(&years, bins)
}

/// Minutes from a movie `duration` such as `"90 min"`.
///
/// A trailing `" min"` is stripped; the rest must be a non-empty run of
/// ASCII digits that fits a `u64`. Anything else (`"N/A"`, `"1 Season"`,
/// `"90min"`) is `None`.
pub fn parse_movie_minutes(duration: &str) -> Option<u64> {
    MOVIE_MINUTES
        .captures(duration)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

/// Distribution of movie running times in minutes.
///
/// `None` when the view holds no movie with a parseable duration, so callers
/// can show a "no data" notice instead of an empty chart.
pub fn movie_duration_histogram(view: &TitleView<'_>, bins: usize) -> Option<Histogram> {
    let minutes: Vec<f64> = view
        .movies()
        .filter_map(|r| parse_movie_minutes(&r.duration))
        .map(|minutes| minutes as f64)
        .collect();

    if minutes.is_empty() {
        return None;
    }
    Some(Histogram::from_values(&minutes, bins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::filter::FilterSelection;
    use crate::types::{TitleRecord, TitleType, UNKNOWN};
    use pretty_assertions::assert_eq;

    fn record(title_type: TitleType, country: &str, duration: &str, listed_in: &str) -> TitleRecord {
        TitleRecord {
            title: None,
            title_type,
            country: country.to_string(),
            rating: UNKNOWN.to_string(),
            duration: duration.to_string(),
            listed_in: listed_in.to_string(),
            release_year: Some(2020),
            date_added: None,
            year_added: None,
        }
    }

    fn everything(catalog: &Catalog) -> TitleView<'_> {
        catalog.filter(&FilterSelection::for_catalog(catalog))
    }

    #[test]
    fn test_genres_split_on_comma() {
        let catalog = Catalog::from_records(vec![record(
            TitleType::Movie,
            "India",
            "90 min",
            "Drama, Comedy",
        )]);
        let genres = top_genres(&everything(&catalog), 10);
        assert_eq!(
            genres,
            vec![CategoryCount::new("Drama", 1), CategoryCount::new("Comedy", 1)]
        );
    }

    #[test]
    fn test_empty_genre_parts_are_counted() {
        let catalog = Catalog::from_records(vec![
            record(TitleType::Movie, "India", "90 min", ""),
            record(TitleType::Movie, "India", "90 min", "Dramas, "),
        ]);
        let genres = top_genres(&everything(&catalog), 10);
        assert_eq!(
            genres,
            vec![CategoryCount::new("", 2), CategoryCount::new("Dramas", 1)]
        );
    }

    #[test]
    fn test_top_list_limit_and_tie_order() {
        let records: Vec<TitleRecord> = (0..12)
            .map(|i| record(TitleType::Movie, &format!("C{i:02}"), "90 min", "X"))
            .chain(std::iter::once(record(TitleType::Movie, "C11", "90 min", "X")))
            .collect();
        let catalog = Catalog::from_records(records);
        let top = top_countries(&everything(&catalog), 10);

        assert_eq!(top.len(), 10);
        assert_eq!(top[0], CategoryCount::new("C11", 2));
        // remaining ties keep first-seen order
        let rest: Vec<&str> = top[1..].iter().map(|c| c.label.as_str()).collect();
        assert_eq!(rest, vec!["C00", "C01", "C02", "C03", "C04", "C05", "C06", "C07", "C08"]);
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_countries_not_split() {
        let catalog = Catalog::from_records(vec![
            record(TitleType::Movie, "India, United States", "90 min", "X"),
            record(TitleType::Movie, "India", "90 min", "X"),
        ]);
        let top = top_countries(&everything(&catalog), 10);
        assert_eq!(
            top,
            vec![
                CategoryCount::new("India, United States", 1),
                CategoryCount::new("India", 1)
            ]
        );
    }

    #[test]
    fn test_type_counts_first_seen() {
        let catalog = Catalog::from_records(vec![
            record(TitleType::TvShow, "India", "1 Season", "X"),
            record(TitleType::Movie, "India", "90 min", "X"),
            record(TitleType::Movie, "India", "91 min", "X"),
        ]);
        assert_eq!(
            type_counts(&everything(&catalog)),
            vec![CategoryCount::new("TV Show", 1), CategoryCount::new("Movie", 2)]
        );
    }

    #[test]
    fn test_parse_movie_minutes() {
        assert_eq!(parse_movie_minutes("90 min"), Some(90));
        assert_eq!(parse_movie_minutes("0 min"), Some(0));
        assert_eq!(parse_movie_minutes("N/A"), None);
        assert_eq!(parse_movie_minutes("1 Season"), None);
        assert_eq!(parse_movie_minutes("90min"), None);
        assert_eq!(parse_movie_minutes(" min"), None);
        assert_eq!(parse_movie_minutes("-5 min"), None);
        assert_eq!(parse_movie_minutes("99999999999 min"), Some(99_999_999_999));
        assert_eq!(parse_movie_minutes("99999999999999999999999 min"), None);
    }

    #[test]
    fn test_parse_movie_minutes_ascii_digits_only() {
        // Arabic-Indic and full-width digits
        assert_eq!(parse_movie_minutes("\u{0669}\u{0660} min"), None);
        assert_eq!(parse_movie_minutes("\u{FF19}\u{FF10} min"), None);
    }

    #[test]
    fn test_duration_excludes_unparseable_movies() {
        let catalog = Catalog::from_records(vec![
            record(TitleType::Movie, "India", "90 min", "X"),
            record(TitleType::Movie, "India", "N/A", "X"),
            record(TitleType::TvShow, "India", "3 Seasons", "X"),
        ]);
        let hist = movie_duration_histogram(&everything(&catalog), 30).unwrap();
        assert_eq!(hist.total(), 1);
        assert_eq!(hist.bins[0].lower, 89.5);
    }

    #[test]
    fn test_duration_no_movies_is_none() {
        let catalog = Catalog::from_records(vec![record(
            TitleType::TvShow,
            "India",
            "2 Seasons",
            "X",
        )]);
        assert_eq!(movie_duration_histogram(&everything(&catalog), 30), None);
    }

    #[test]
    fn test_empty_view_aggregates() {
        let catalog = Catalog::from_records(Vec::new());
        let view = everything(&catalog);
        assert!(type_counts(&view).is_empty());
        assert!(top_genres(&view, 10).is_empty());
        assert!(top_countries(&view, 10).is_empty());
        assert!(release_year_histogram(&view, 30).is_empty());
        assert_eq!(movie_duration_histogram(&view, 30), None);
    }
}
