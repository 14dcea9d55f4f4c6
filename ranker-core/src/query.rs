use std::cmp::Ordering;

use ranker_state::AlbumRecord;
use serde::{Deserialize, Serialize};

/// How the collection is ordered for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SortBy {
    /// Highest rated first.
    #[default]
    #[serde(rename = "rating-desc")]
    RatingDesc,
    /// Lowest rated first.
    #[serde(rename = "rating-asc")]
    RatingAsc,
    /// By artist, ignoring case.
    #[serde(rename = "artist")]
    ArtistAsc,
    /// In the order albums were added.
    #[serde(rename = "added")]
    InsertionOrder,
}
impl SortBy {
    pub const ALL: [SortBy; 4] = [
        SortBy::RatingDesc,
        SortBy::RatingAsc,
        SortBy::ArtistAsc,
        SortBy::InsertionOrder,
    ];

    /// The name used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::RatingDesc => "rating-desc",
            SortBy::RatingAsc => "rating-asc",
            SortBy::ArtistAsc => "artist",
            SortBy::InsertionOrder => "added",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortBy::RatingDesc => "Rating (High→Low)",
            SortBy::RatingAsc => "Rating (Low→High)",
            SortBy::ArtistAsc => "Artist A–Z",
            SortBy::InsertionOrder => "Date Added",
        }
    }
}
impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortBy::ALL
            .into_iter()
            .find(|sort_by| sort_by.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<_> = SortBy::ALL.iter().map(SortBy::as_str).collect();
                format!("unknown sort order `{s}`, expected one of: {}", names.join(", "))
            })
    }
}

/// The sort and filter applied when displaying the collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewConfig {
    pub sort_by: SortBy,
    /// Only show albums whose genre contains this, ignoring case.
    pub genre_filter: Option<String>,
}

/// Derive the displayed view of `records` without touching them.
///
/// All sorts are stable, so records that compare equal stay in the order they
/// were added.
pub fn query<'a>(records: &'a [AlbumRecord], view: &ViewConfig) -> Vec<&'a AlbumRecord> {
    let genre_filter = view
        .genre_filter
        .as_deref()
        .map(|filter| filter.trim().to_lowercase())
        .filter(|filter| !filter.is_empty());

    let mut view_records: Vec<&AlbumRecord> = records
        .iter()
        .filter(|record| match &genre_filter {
            Some(filter) => record.genre.to_lowercase().contains(filter.as_str()),
            None => true,
        })
        .collect();

    /// Compare by artist name (case-insensitive, ascending).
    fn cmp_artist(a: &AlbumRecord, b: &AlbumRecord) -> Ordering {
        a.artist.to_lowercase().cmp(&b.artist.to_lowercase())
    }

    match view.sort_by {
        SortBy::RatingDesc => view_records.sort_by(|a, b| b.rating.cmp(&a.rating)),
        SortBy::RatingAsc => view_records.sort_by(|a, b| a.rating.cmp(&b.rating)),
        SortBy::ArtistAsc => view_records.sort_by(|a, b| cmp_artist(a, b)),
        SortBy::InsertionOrder => {}
    }

    view_records
}
