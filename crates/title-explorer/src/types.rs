use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel used for an absent `rating` or `country`.
pub const UNKNOWN: &str = "Unknown";

/// Sentinel used for an absent `duration`.
pub const DEFAULT_DURATION: &str = "0 min";

/// Kind of media entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TitleType {
    #[serde(rename = "Movie")]
    Movie,
    #[serde(rename = "TV Show")]
    TvShow,
}

impl TitleType {
    /// Both variants, in display order.
    pub const ALL: [TitleType; 2] = [TitleType::Movie, TitleType::TvShow];

    /// Parse a raw `type` cell. Case and inner whitespace are ignored, so
    /// `"TV Show"`, `"tv show"` and `"TVShow"` all map to [`TitleType::TvShow`].
    pub fn parse(raw: &str) -> Option<Self> {
        let folded: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        match folded.as_str() {
            "movie" => Some(TitleType::Movie),
            "tvshow" => Some(TitleType::TvShow),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TitleType::Movie => "Movie",
            TitleType::TvShow => "TV Show",
        }
    }
}

impl fmt::Display for TitleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cleaned dataset row.
///
/// Built once by the cleaning pass and never mutated afterwards. `rating`,
/// `country` and `duration` always hold a value; absent source cells carry
/// the [`UNKNOWN`] / [`DEFAULT_DURATION`] sentinels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub title_type: TitleType,
    pub country: String,
    pub rating: String,
    pub duration: String,
    pub listed_in: String,
    pub release_year: Option<i32>,
    pub date_added: Option<NaiveDate>,
    pub year_added: Option<i32>,
}

impl TitleRecord {
    pub fn is_movie(&self) -> bool {
        self.title_type == TitleType::Movie
    }

    /// Genre tags from `listed_in`, one per comma-separated part, trimmed.
    ///
    /// Empty parts are kept, so every record yields at least one tag.
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.listed_in.split(',').map(str::trim)
    }
}
