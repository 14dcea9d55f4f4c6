//! Representations of the ranker's state: rated album records, catalog
//! candidates, and the drafts that turn one into the other.
//!
//! Separated out to allow for use in other utilities.
#![deny(missing_docs)]

pub use ranker_spotify as bs;

mod rating;
pub use rating::Rating;

mod record;
pub use record::{AlbumRecord, RecordId};

mod candidate;
pub use candidate::{CandidateAlbum, year_from_release_date};

mod draft;
pub use draft::Draft;

/// Why a draft or rating was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The album title was empty after trimming.
    #[error("Album title is required")]
    EmptyTitle,
    /// The artist was empty after trimming.
    #[error("Artist is required")]
    EmptyArtist,
    /// The rating was outside 0.5 to 5.0, or not a multiple of 0.5.
    #[error("Rating {0} must be between 0.5 and 5.0 in steps of 0.5")]
    RatingOutOfRange(f64),
}
