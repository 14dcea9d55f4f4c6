use crate::{AlbumRecord, CandidateAlbum, Rating, RecordId, ValidationError};

/// An album that is about to be added to the collection.
///
/// Built either by hand or from a catalog candidate, then adjusted with the
/// `with_*` methods before being committed.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    /// The catalog's ID for the album; empty if entered by hand
    pub external_id: String,
    /// The album title
    pub title: String,
    /// The album artist
    pub artist: String,
    /// The release year
    pub year: String,
    /// The genre
    pub genre: String,
    /// The rating in stars. Validated when the draft is committed.
    pub rating: f64,
    /// The user's notes
    pub notes: String,
    /// The cover art URL
    pub cover_url: Option<String>,
    /// The catalog popularity
    pub popularity: u8,
    /// The record label
    pub label: String,
    /// The number of tracks
    pub total_tracks: Option<u32>,
}
impl Draft {
    /// A draft for an album that is not in the catalog.
    pub fn manual(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Draft {
            external_id: String::new(),
            title: title.into(),
            artist: artist.into(),
            year: String::new(),
            genre: String::new(),
            rating: Rating::DEFAULT.stars(),
            notes: String::new(),
            cover_url: None,
            popularity: 0,
            label: String::new(),
            total_tracks: None,
        }
    }

    /// A draft carrying over everything the catalog knows about the album.
    pub fn from_candidate(candidate: &CandidateAlbum) -> Self {
        Draft {
            external_id: candidate.external_id.clone(),
            year: candidate.year.clone(),
            genre: candidate.genres.clone(),
            cover_url: candidate.cover_url.clone(),
            popularity: candidate.popularity,
            label: candidate.label.clone(),
            total_tracks: candidate.total_tracks,
            ..Draft::manual(candidate.title.clone(), candidate.artist.clone())
        }
    }

    /// Replace the title.
    pub fn with_title(self, title: impl Into<String>) -> Self {
        Draft {
            title: title.into(),
            ..self
        }
    }

    /// Replace the artist.
    pub fn with_artist(self, artist: impl Into<String>) -> Self {
        Draft {
            artist: artist.into(),
            ..self
        }
    }

    /// Replace the year.
    pub fn with_year(self, year: impl Into<String>) -> Self {
        Draft {
            year: year.into(),
            ..self
        }
    }

    /// Replace the genre.
    pub fn with_genre(self, genre: impl Into<String>) -> Self {
        Draft {
            genre: genre.into(),
            ..self
        }
    }

    /// Replace the rating, in stars.
    pub fn with_rating(self, rating: f64) -> Self {
        Draft { rating, ..self }
    }

    /// Replace the notes.
    pub fn with_notes(self, notes: impl Into<String>) -> Self {
        Draft {
            notes: notes.into(),
            ..self
        }
    }

    /// Check the draft and turn it into a record with the given ID.
    ///
    /// Text fields the user types are trimmed; title and artist must not end
    /// up empty.
    pub fn into_record(self, id: RecordId) -> Result<AlbumRecord, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let artist = self.artist.trim();
        if artist.is_empty() {
            return Err(ValidationError::EmptyArtist);
        }
        let rating = Rating::new(self.rating)?;

        Ok(AlbumRecord {
            id,
            external_id: self.external_id,
            title: title.to_string(),
            artist: artist.to_string(),
            year: self.year.trim().to_string(),
            genre: self.genre.trim().to_string(),
            rating,
            notes: self.notes.trim().to_string(),
            cover_url: self.cover_url.filter(|url| !url.is_empty()),
            popularity: self.popularity.min(100),
            label: self.label,
            total_tracks: self.total_tracks,
            omitted: Default::default(),
        })
    }
}
