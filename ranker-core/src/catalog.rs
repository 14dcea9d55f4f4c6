use std::{future::Future, time::Duration};

use ranker_state::{CandidateAlbum, bs};

/// Something that can look albums up in a music catalog.
pub trait CatalogProvider {
    /// Find up to `limit` albums matching `query`.
    fn find_albums(
        &self,
        query: &str,
        limit: u32,
    ) -> impl Future<Output = bs::ClientResult<Vec<CandidateAlbum>>> + Send;

    /// Fetch everything the catalog knows about one album.
    fn album_details(
        &self,
        external_id: &str,
    ) -> impl Future<Output = bs::ClientResult<CandidateAlbum>> + Send;
}

impl CatalogProvider for bs::Client {
    async fn find_albums(&self, query: &str, limit: u32) -> bs::ClientResult<Vec<CandidateAlbum>> {
        let page = self
            .search_albums(&bs::AlbumSearchRequest {
                query: query.to_string(),
                limit: Some(limit),
            })
            .await?;
        Ok(page.items.into_iter().map(CandidateAlbum::from).collect())
    }

    async fn album_details(&self, external_id: &str) -> bs::ClientResult<CandidateAlbum> {
        Ok(self.get_album(external_id).await?.into())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogProviderError {
    #[error(transparent)]
    Provider(#[from] bs::ClientError),
    #[error("Catalog did not respond within {0:?}")]
    Timeout(Duration),
}

/// The outcome of a catalog call. Failures never escape: `value` falls back to
/// an empty result and `error` says why, so the caller can still show "no
/// results" alongside the message.
#[derive(Debug)]
pub struct CatalogResponse<T> {
    pub value: T,
    pub error: Option<CatalogProviderError>,
}
impl<T> CatalogResponse<T> {
    fn ok(value: T) -> Self {
        Self { value, error: None }
    }

    fn failed(value: T, error: CatalogProviderError) -> Self {
        Self {
            value,
            error: Some(error),
        }
    }
}

/// The boundary between the application and the catalog provider.
pub struct Catalog<P> {
    provider: P,
    timeout: Duration,
}
impl<P: CatalogProvider> Catalog<P> {
    pub const DEFAULT_SEARCH_LIMIT: u32 = 8;
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(provider: P, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Search for albums. A blank query returns nothing without asking the provider.
    pub async fn search(&self, query: &str, limit: u32) -> CatalogResponse<Vec<CandidateAlbum>> {
        let query = query.trim();
        if query.is_empty() {
            return CatalogResponse::ok(vec![]);
        }

        match self
            .bounded(self.provider.find_albums(query, limit))
            .await
        {
            Ok(candidates) => {
                tracing::debug!("found {} albums for `{query}`", candidates.len());
                CatalogResponse::ok(candidates)
            }
            Err(e) => {
                tracing::warn!("album search for `{query}` failed: {e}");
                CatalogResponse::failed(vec![], e)
            }
        }
    }

    /// Look up the full details of one album.
    pub async fn get_details(&self, external_id: &str) -> CatalogResponse<Option<CandidateAlbum>> {
        match self
            .bounded(self.provider.album_details(external_id))
            .await
        {
            Ok(details) => CatalogResponse::ok(Some(details)),
            Err(e) => {
                tracing::warn!("album details for {external_id} failed: {e}");
                CatalogResponse::failed(None, e)
            }
        }
    }

    async fn bounded<T>(
        &self,
        request: impl Future<Output = bs::ClientResult<T>>,
    ) -> Result<T, CatalogProviderError> {
        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(CatalogProviderError::Timeout(self.timeout)),
        }
    }
}
