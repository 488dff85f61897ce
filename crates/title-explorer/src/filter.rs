use crate::catalog::{ALL_COUNTRIES, Catalog};
use crate::types::{TitleRecord, TitleType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Filter predicate
// ---------------------------------------------------------------------------

/// The user's current filter choices.
///
/// An empty `content_types` set selects nothing. `country: None` means no
/// country constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub content_types: BTreeSet<TitleType>,
    pub country: Option<String>,
}

impl FilterSelection {
    /// Every type the catalog contains, no country filter.
    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self {
            content_types: catalog.observed_types().into_iter().collect(),
            country: None,
        }
    }

    /// Replace the allowed types.
    pub fn with_types(mut self, types: impl IntoIterator<Item = TitleType>) -> Self {
        self.content_types = types.into_iter().collect();
        self
    }

    /// Set the country substring. [`ALL_COUNTRIES`] clears the filter.
    pub fn with_country(mut self, country: Option<impl Into<String>>) -> Self {
        self.country = country
            .map(Into::into)
            .filter(|c: &String| c.as_str() != ALL_COUNTRIES);
        self
    }

    /// A record passes when its type is selected and, if a country filter is
    /// set, its country contains the filter text (case-sensitive).
    pub fn matches(&self, record: &TitleRecord) -> bool {
        if !self.content_types.contains(&record.title_type) {
            return false;
        }
        match &self.country {
            None => true,
            Some(needle) => record.country.contains(needle.as_str()),
        }
    }

    /// Label for display: the country filter or "All".
    pub fn country_label(&self) -> &str {
        self.country.as_deref().unwrap_or(ALL_COUNTRIES)
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Read-only subset of a catalog, borrowed from it.
#[derive(Debug, Clone, Default)]
pub struct TitleView<'a> {
    records: Vec<&'a TitleRecord>,
}

impl<'a> TitleView<'a> {
    pub fn new(records: Vec<&'a TitleRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a TitleRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn count_of(&self, title_type: TitleType) -> usize {
        self.iter().filter(|r| r.title_type == title_type).count()
    }

    pub fn movies(&self) -> impl Iterator<Item = &'a TitleRecord> + '_ {
        self.iter().filter(|r| r.is_movie())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DEFAULT_DURATION, UNKNOWN};

    fn record(title_type: TitleType, country: &str) -> TitleRecord {
        TitleRecord {
            title: None,
            title_type,
            country: country.to_string(),
            rating: UNKNOWN.to_string(),
            duration: DEFAULT_DURATION.to_string(),
            listed_in: String::new(),
            release_year: None,
            date_added: None,
            year_added: None,
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_records(vec![
            record(TitleType::Movie, "India, United States"),
            record(TitleType::Movie, "United States"),
            record(TitleType::TvShow, "India"),
            record(TitleType::Movie, "india"),
            record(TitleType::TvShow, UNKNOWN),
        ])
    }

    #[test]
    fn test_default_selection_keeps_everything() {
        let catalog = catalog();
        let view = catalog.filter(&FilterSelection::for_catalog(&catalog));
        assert_eq!(view.len(), catalog.len());
    }

    #[test]
    fn test_country_substring_match() {
        let catalog = catalog();
        let selection = FilterSelection::for_catalog(&catalog).with_country(Some("India"));
        let view = catalog.filter(&selection);

        let countries: Vec<&str> = view.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(countries, vec!["India, United States", "India"]);
    }

    #[test]
    fn test_all_clears_country_filter() {
        let catalog = catalog();
        let selection = FilterSelection::for_catalog(&catalog).with_country(Some("All"));
        assert_eq!(selection.country, None);
        assert_eq!(selection.country_label(), "All");
        assert_eq!(catalog.filter(&selection).len(), 5);
    }

    #[test]
    fn test_type_filter() {
        let catalog = catalog();
        let selection = FilterSelection::for_catalog(&catalog).with_types([TitleType::TvShow]);
        let view = catalog.filter(&selection);
        assert_eq!(view.len(), 2);
        assert_eq!(view.count_of(TitleType::TvShow), 2);
        assert_eq!(view.movies().count(), 0);
    }

    #[test]
    fn test_empty_type_set_selects_nothing() {
        let catalog = catalog();
        let selection = FilterSelection::for_catalog(&catalog).with_types(Vec::new());
        assert!(catalog.filter(&selection).is_empty());
    }

    #[test]
    fn test_unknown_country_is_selectable() {
        let catalog = catalog();
        let selection = FilterSelection::for_catalog(&catalog).with_country(Some(UNKNOWN));
        assert_eq!(catalog.filter(&selection).len(), 1);
    }

    #[test]
    fn test_filter_does_not_touch_source() {
        let catalog = catalog();
        let before: Vec<TitleRecord> = catalog.records().to_vec();
        let selection = FilterSelection::for_catalog(&catalog)
            .with_types([TitleType::Movie])
            .with_country(Some("United"));
        let view = catalog.filter(&selection);
        assert_eq!(view.len(), 2);
        assert_eq!(catalog.records(), before.as_slice());
    }
}
