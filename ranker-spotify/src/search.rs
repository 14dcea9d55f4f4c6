use serde::{Deserialize, Serialize};

use crate::{Client, ClientResult, SimplifiedAlbum};

/// A request to the `search` endpoint, restricted to albums.
#[derive(Debug, Clone, Default)]
pub struct AlbumSearchRequest {
    /// The search query.
    pub query: String,
    /// The maximum number of albums to return (Spotify allows 1 to 50).
    pub limit: Option<u32>,
}

/// A page of results from the `search` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    /// The items on this page.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// The total number of items available.
    #[serde(default)]
    pub total: u32,
}

/// Search-related functionality.
impl Client {
    /// Search the catalog for albums matching a query.
    pub async fn search_albums(
        &self,
        request: &AlbumSearchRequest,
    ) -> ClientResult<Paging<SimplifiedAlbum>> {
        let mut parameters = vec![
            ("q", request.query.clone()),
            ("type", "album".to_string()),
        ];
        if let Some(limit) = request.limit {
            parameters.push(("limit", limit.clamp(1, 50).to_string()));
        }

        #[derive(Debug, Deserialize)]
        struct SearchApiResponse {
            albums: Option<Paging<SimplifiedAlbum>>,
        }

        Ok(self
            .request::<SearchApiResponse>("search", &parameters)
            .await?
            .albums
            .unwrap_or(Paging {
                items: vec![],
                total: 0,
            }))
    }
}
