use crate::bs;

/// An album found in the catalog, not yet rated or stored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidateAlbum {
    /// The catalog's ID for the album
    pub external_id: String,
    /// The album title
    pub title: String,
    /// All credited artists, comma-separated
    pub artist: String,
    /// The release year, or empty if unknown
    pub year: String,
    /// The largest cover image, if any
    pub cover_url: Option<String>,
    /// The number of tracks, if known
    pub total_tracks: Option<u32>,
    /// The genres, comma-separated. Only filled in by a detail lookup.
    pub genres: String,
    /// The record label. Only filled in by a detail lookup.
    pub label: String,
    /// The catalog popularity. Only filled in by a detail lookup.
    pub popularity: u8,
}
impl CandidateAlbum {
    /// Combine a search result with its detail lookup. Detail fields take
    /// precedence wherever they carry a value.
    pub fn merge(self, details: CandidateAlbum) -> CandidateAlbum {
        fn prefer(detail: String, summary: String) -> String {
            if detail.is_empty() { summary } else { detail }
        }

        CandidateAlbum {
            external_id: prefer(details.external_id, self.external_id),
            title: prefer(details.title, self.title),
            artist: prefer(details.artist, self.artist),
            year: prefer(details.year, self.year),
            cover_url: details.cover_url.or(self.cover_url),
            total_tracks: details.total_tracks.or(self.total_tracks),
            genres: prefer(details.genres, self.genres),
            label: prefer(details.label, self.label),
            popularity: if details.popularity > 0 {
                details.popularity
            } else {
                self.popularity
            },
        }
    }
}
impl From<bs::SimplifiedAlbum> for CandidateAlbum {
    fn from(album: bs::SimplifiedAlbum) -> Self {
        CandidateAlbum {
            year: year_from_release_date(album.release_date.as_deref()),
            artist: join_artist_names(&album.artists),
            cover_url: album.images.into_iter().next().map(|image| image.url),
            external_id: album.id,
            title: album.name,
            total_tracks: album.total_tracks,
            genres: String::new(),
            label: String::new(),
            popularity: 0,
        }
    }
}
impl From<bs::Album> for CandidateAlbum {
    fn from(album: bs::Album) -> Self {
        CandidateAlbum {
            genres: album.genres.join(", "),
            label: album.label.unwrap_or_default(),
            popularity: album.popularity.unwrap_or_default().min(100),
            ..CandidateAlbum::from(album.album)
        }
    }
}

fn join_artist_names(artists: &[bs::SimplifiedArtist]) -> String {
    artists
        .iter()
        .map(|artist| artist.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The year part of a release date: its first four characters, or empty if
/// the date is missing or too short to contain one.
pub fn year_from_release_date(release_date: Option<&str>) -> String {
    let Some(release_date) = release_date else {
        return String::new();
    };
    let year: String = release_date.chars().take(4).collect();
    if year.chars().count() == 4 {
        year
    } else {
        String::new()
    }
}
