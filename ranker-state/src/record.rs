use serde::{Deserialize, Serialize};

use crate::Rating;

/// A record ID. Assigned once, when the record is added to the collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);
impl RecordId {
    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId(id.to_string())
    }
}

/// A rated album, as stored in the collection.
///
/// Field names on disk follow the `album_data.json` layout so that existing
/// collections keep loading. Optional keys that an older entry left out stay
/// out when it is written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredRecord", into = "StoredRecord")]
pub struct AlbumRecord {
    /// The record ID
    pub id: RecordId,
    /// The catalog's ID for the album; empty if entered by hand
    pub external_id: String,
    /// The album title
    pub title: String,
    /// The album artist
    pub artist: String,
    /// The release year. Free-form.
    pub year: String,
    /// The genre
    pub genre: String,
    /// The user's rating
    pub rating: Rating,
    /// The user's notes
    pub notes: String,
    /// The cover art URL
    pub cover_url: Option<String>,
    /// The catalog popularity, between 0 and 100
    pub popularity: u8,
    /// The record label
    pub label: String,
    /// The number of tracks, if known
    pub total_tracks: Option<u32>,

    pub(crate) omitted: OmittedKeys,
}

/// The optional keys missing from a stored entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct OmittedKeys {
    spotify_id: bool,
    year: bool,
    genre: bool,
    notes: bool,
    cover: bool,
    popularity: bool,
    label: bool,
    total_tracks: bool,
}

/// An `album_data.json` entry exactly as it is laid out on disk.
#[derive(Serialize, Deserialize)]
struct StoredRecord {
    id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    spotify_id: Option<String>,
    album: String,
    artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    genre: Option<String>,
    rating: Rating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    /// `Some(None)` is a `null` cover, `None` a missing key.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    cover: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    popularity: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "track_count")]
    total_tracks: Option<Option<u32>>,
}

fn present<'de, D: serde::Deserializer<'de>, T: Deserialize<'de>>(
    deserializer: D,
) -> Result<Option<T>, D::Error> {
    T::deserialize(deserializer).map(Some)
}

/// `None` only if the key was missing and the value is still the default.
fn keep<T: Default + PartialEq>(value: T, omitted: bool) -> Option<T> {
    (!omitted || value != T::default()).then_some(value)
}

impl From<StoredRecord> for AlbumRecord {
    fn from(stored: StoredRecord) -> Self {
        Self {
            omitted: OmittedKeys {
                spotify_id: stored.spotify_id.is_none(),
                year: stored.year.is_none(),
                genre: stored.genre.is_none(),
                notes: stored.notes.is_none(),
                cover: stored.cover.is_none(),
                popularity: stored.popularity.is_none(),
                label: stored.label.is_none(),
                total_tracks: stored.total_tracks.is_none(),
            },
            id: stored.id,
            external_id: stored.spotify_id.unwrap_or_default(),
            title: stored.album,
            artist: stored.artist,
            year: stored.year.unwrap_or_default(),
            genre: stored.genre.unwrap_or_default(),
            rating: stored.rating,
            notes: stored.notes.unwrap_or_default(),
            cover_url: stored.cover.flatten(),
            popularity: stored.popularity.unwrap_or_default(),
            label: stored.label.unwrap_or_default(),
            total_tracks: stored.total_tracks.flatten(),
        }
    }
}

impl From<AlbumRecord> for StoredRecord {
    fn from(record: AlbumRecord) -> Self {
        let omitted = record.omitted;
        Self {
            id: record.id,
            spotify_id: keep(record.external_id, omitted.spotify_id),
            album: record.title,
            artist: record.artist,
            year: keep(record.year, omitted.year),
            genre: keep(record.genre, omitted.genre),
            rating: record.rating,
            notes: keep(record.notes, omitted.notes),
            cover: keep(record.cover_url, omitted.cover),
            popularity: keep(record.popularity, omitted.popularity),
            label: keep(record.label, omitted.label),
            total_tracks: keep(record.total_tracks, omitted.total_tracks),
        }
    }
}

/// Unknown track counts are stored as `""` rather than `null`.
mod track_count {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub fn serialize<S: Serializer>(
        value: &Option<Option<u32>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value.flatten() {
            Some(count) => serializer.serialize_u32(count),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Option<u32>>, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Count(u32),
            Text(String),
        }

        let count = match Option::<Raw>::deserialize(deserializer)? {
            None => None,
            Some(Raw::Count(count)) => Some(count),
            Some(Raw::Text(text)) if text.trim().is_empty() => None,
            Some(Raw::Text(text)) => Some(
                text.trim()
                    .parse()
                    .map_err(|_| D::Error::custom(format!("invalid track count `{text}`")))?,
            ),
        };
        Ok(Some(count))
    }
}
