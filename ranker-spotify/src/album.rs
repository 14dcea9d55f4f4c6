use serde::{Deserialize, Serialize};

use crate::{Client, ClientResult};

/// A reference to an artist, as embedded in album objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifiedArtist {
    /// The Spotify ID of the artist
    pub id: Option<String>,
    /// The artist name
    pub name: String,
}

/// An image hosted by Spotify. Albums list these widest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    /// The source URL of the image
    pub url: String,
    /// The image height in pixels, if known
    pub height: Option<u32>,
    /// The image width in pixels, if known
    pub width: Option<u32>,
}

/// An album as returned by search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifiedAlbum {
    /// The Spotify ID of the album
    pub id: String,
    /// The album name
    pub name: String,
    /// The artists of the album
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
    /// The cover art for the album in various sizes
    #[serde(default)]
    pub images: Vec<Image>,
    /// The release date, as precise as Spotify knows it: `1981`, `1981-12` or `1981-12-15`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// The number of tracks in the album
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tracks: Option<u32>,
}

/// An album with its full metadata, as returned by the album endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    /// The summary fields shared with search results
    #[serde(flatten)]
    pub album: SimplifiedAlbum,
    /// The genres the album is associated with. Frequently empty.
    #[serde(default)]
    pub genres: Vec<String>,
    /// The label associated with the album
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// The popularity of the album, between 0 and 100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u8>,
}

/// Album-related endpoints.
impl Client {
    /// Get a specific album with its full metadata.
    pub async fn get_album(&self, id: impl AsRef<str>) -> ClientResult<Album> {
        self.request::<Album>(&format!("albums/{}", id.as_ref()), &[])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_album() {
        let album: Album = serde_json::from_str(
            r#"{
                "id": "3mH6qwIy9crq0I9YQbOuDf",
                "name": "Blonde",
                "album_type": "album",
                "artists": [{"id": "2h93pZq0e7k5yf4dywlkpM", "name": "Frank Ocean"}],
                "images": [{"url": "https://i.scdn.co/image/640", "height": 640, "width": 640}],
                "release_date": "2016-08-20",
                "total_tracks": 17,
                "genres": [],
                "label": "Boys Don't Cry",
                "popularity": 84
            }"#,
        )
        .unwrap();

        assert_eq!(album.album.name, "Blonde");
        assert_eq!(album.album.artists[0].name, "Frank Ocean");
        assert_eq!(album.album.total_tracks, Some(17));
        assert_eq!(album.label.as_deref(), Some("Boys Don't Cry"));
        assert_eq!(album.popularity, Some(84));
        assert!(album.genres.is_empty());
    }
}
