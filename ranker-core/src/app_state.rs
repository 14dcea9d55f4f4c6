use ranker_state::{AlbumRecord, CandidateAlbum, Draft, RecordId};

use crate::{
    Catalog, CatalogProvider, CollectionStats, CollectionStore, StoreError, ViewConfig, query,
};

/// Everything one session works with, owned by the presentation layer and
/// passed into each operation.
#[derive(Debug)]
pub struct AppState {
    pub collection: CollectionStore,
    pub last_query: String,
    pub search_results: Vec<CandidateAlbum>,
    /// The album picked from the search results, merged with its detail lookup.
    pub selected: Option<CandidateAlbum>,
    pub view: ViewConfig,

    pub error: Option<AppStateError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppStateError {
    SearchFailed { query: String, error: String },
    DetailsFailed { external_id: String, error: String },
    InvalidAlbum { error: String },
    StorageFailed { error: String },
}
impl AppStateError {
    /// Should be paired with [`Self::display_message`]
    pub fn display_name(&self) -> &'static str {
        match self {
            AppStateError::SearchFailed { .. } => "Catalog search failed",
            AppStateError::DetailsFailed { .. } => "Failed to load album details",
            AppStateError::InvalidAlbum { .. } => "Album not added",
            AppStateError::StorageFailed { .. } => "Failed to save collection",
        }
    }

    /// Should be paired with [`Self::display_name`]
    pub fn display_message(&self) -> String {
        match self {
            AppStateError::SearchFailed { query, error } => {
                format!("Searching for `{query}` failed: {error}")
            }
            AppStateError::DetailsFailed { external_id, error } => {
                format!("Album `{external_id}` failed to load: {error}")
            }
            AppStateError::InvalidAlbum { error } | AppStateError::StorageFailed { error } => {
                error.clone()
            }
        }
    }
}
impl From<&StoreError> for AppStateError {
    fn from(error: &StoreError) -> Self {
        match error {
            StoreError::Validation(e) => AppStateError::InvalidAlbum {
                error: e.to_string(),
            },
            e => AppStateError::StorageFailed {
                error: e.to_string(),
            },
        }
    }
}

impl AppState {
    pub fn new(collection: CollectionStore) -> Self {
        Self {
            collection,
            last_query: String::new(),
            search_results: vec![],
            selected: None,
            view: ViewConfig::default(),
            error: None,
        }
    }

    /// Search the catalog, replacing the previous results and selection.
    ///
    /// Repeating the last query keeps the results already shown.
    pub async fn search<P: CatalogProvider>(
        &mut self,
        catalog: &Catalog<P>,
        query: &str,
        limit: u32,
    ) -> &[CandidateAlbum] {
        if !query.is_empty() && query == self.last_query {
            return &self.search_results;
        }

        let response = catalog.search(query, limit).await;
        self.search_results = response.value;
        self.last_query = query.to_string();
        self.selected = None;
        self.error = response.error.map(|e| AppStateError::SearchFailed {
            query: query.to_string(),
            error: e.to_string(),
        });

        &self.search_results
    }

    /// Select an album by its catalog ID and fetch its details.
    ///
    /// If the detail lookup fails, the search result alone is selected, so the
    /// user can still rate the album.
    pub async fn select<P: CatalogProvider>(
        &mut self,
        catalog: &Catalog<P>,
        external_id: &str,
    ) -> Option<&CandidateAlbum> {
        let summary = self
            .search_results
            .iter()
            .find(|c| c.external_id == external_id)
            .cloned();

        let response = catalog.get_details(external_id).await;
        self.error = response.error.map(|e| AppStateError::DetailsFailed {
            external_id: external_id.to_string(),
            error: e.to_string(),
        });

        self.selected = match (summary, response.value) {
            (Some(summary), Some(details)) => Some(summary.merge(details)),
            (summary, details) => details.or(summary),
        };
        self.selected.as_ref()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// A draft prefilled from the selected album, or a blank manual one.
    pub fn draft(&self) -> Draft {
        match &self.selected {
            Some(candidate) => Draft::from_candidate(candidate),
            None => Draft::manual("", ""),
        }
    }

    /// Add `draft` to the collection.
    ///
    /// On success the search is reset, ready for the next album. On failure the
    /// reason is kept in [`Self::error`] as well as returned.
    pub fn submit(&mut self, draft: Draft) -> Result<AlbumRecord, StoreError> {
        match self.collection.add(draft) {
            Ok(record) => {
                self.selected = None;
                self.search_results.clear();
                self.last_query.clear();
                self.error = None;
                Ok(record)
            }
            Err(e) => {
                self.error = Some((&e).into());
                Err(e)
            }
        }
    }

    pub fn remove(&mut self, id: &RecordId) -> Result<Option<AlbumRecord>, StoreError> {
        let result = self.collection.remove(id);
        if let Err(e) = &result {
            self.error = Some(e.into());
        }
        result
    }

    /// The collection as it should be displayed under the current view.
    pub fn visible_albums(&self) -> Vec<&AlbumRecord> {
        query(self.collection.records(), &self.view)
    }

    pub fn stats(&self) -> CollectionStats<'_> {
        CollectionStats::compute(self.collection.records())
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::atomic::Ordering, time::Duration};

    use super::*;
    use crate::{
        SortBy,
        catalog::tests::{FakeCatalog, candidate},
    };

    fn setup(dir: &tempfile::TempDir) -> (AppState, Catalog<FakeCatalog>) {
        let store = CollectionStore::open(dir.path().join("album_data.json")).unwrap();
        let catalog = Catalog::new(
            FakeCatalog::with_albums(vec![
                candidate("1", "Selected Ambient Works 85-92", "Aphex Twin"),
                candidate("2", "Music Has the Right to Children", "Boards of Canada"),
            ]),
            Duration::from_secs(1),
        );
        (AppState::new(store), catalog)
    }

    #[tokio::test]
    async fn test_search_select_submit() {
        let dir = tempfile::tempdir().unwrap();
        let (mut state, catalog) = setup(&dir);

        assert_eq!(state.search(&catalog, "aphex", 8).await.len(), 1);
        let selected = state.select(&catalog, "1").await.unwrap();
        // Only the detail lookup knows the label.
        assert_eq!(selected.label, "Warp");

        let record = state.submit(state.draft().with_rating(4.5)).unwrap();
        assert_eq!(record.external_id, "1");
        assert_eq!(record.genre, "electronic");
        assert_eq!(record.popularity, 60);
        assert!(state.selected.is_none());
        assert!(state.search_results.is_empty());
        assert!(state.last_query.is_empty());
        assert_eq!(state.collection.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_selection_gives_blank_draft() {
        let dir = tempfile::tempdir().unwrap();
        let (mut state, catalog) = setup(&dir);

        state.search(&catalog, "aphex", 8).await;
        state.select(&catalog, "1").await.unwrap();
        assert_eq!(state.draft().title, "Selected Ambient Works 85-92");

        state.clear_selection();
        assert!(state.selected.is_none());
        assert_eq!(state.draft(), Draft::manual("", ""));
        // The results stay, so another album can be picked.
        assert_eq!(state.search_results.len(), 1);
    }

    #[tokio::test]
    async fn test_repeated_query_is_not_refetched() {
        let dir = tempfile::tempdir().unwrap();
        let (mut state, catalog) = setup(&dir);

        state.search(&catalog, "boards", 8).await;
        state.search(&catalog, "boards", 8).await;
        assert_eq!(catalog.provider().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_details_fall_back_to_summary() {
        let dir = tempfile::tempdir().unwrap();
        let (mut state, mut catalog) = setup(&dir);

        state.search(&catalog, "boards", 8).await;
        catalog = Catalog::new(
            FakeCatalog {
                fail_with_status: Some(503),
                ..FakeCatalog::default()
            },
            Duration::from_secs(1),
        );

        let selected = state.select(&catalog, "2").await.unwrap();
        assert_eq!(selected.title, "Music Has the Right to Children");
        assert_eq!(selected.label, "");
        assert!(matches!(
            state.error,
            Some(AppStateError::DetailsFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_failed_search_records_error() {
        let dir = tempfile::tempdir().unwrap();
        let (mut state, _) = setup(&dir);
        let catalog = Catalog::new(
            FakeCatalog {
                fail_with_status: Some(429),
                ..FakeCatalog::default()
            },
            Duration::from_secs(1),
        );

        assert!(state.search(&catalog, "anything", 8).await.is_empty());
        let error = state.error.as_ref().unwrap();
        assert_eq!(error.display_name(), "Catalog search failed");
        assert!(error.display_message().contains("anything"));
    }

    #[test]
    fn test_invalid_submit_keeps_collection() {
        let dir = tempfile::tempdir().unwrap();
        let (mut state, _) = setup(&dir);

        assert!(state.submit(state.draft()).is_err());
        assert_eq!(state.collection.len(), 0);
        assert!(matches!(
            state.error,
            Some(AppStateError::InvalidAlbum { .. })
        ));
    }

    #[test]
    fn test_visible_albums_follow_view() {
        let dir = tempfile::tempdir().unwrap();
        let (mut state, _) = setup(&dir);
        for (title, genre, rating) in [("A", "Jazz", 3.0), ("B", "Rock", 5.0), ("C", "Acid Jazz", 4.0)] {
            state
                .submit(Draft::manual(title, "Artist").with_genre(genre).with_rating(rating))
                .unwrap();
        }

        state.view = ViewConfig {
            sort_by: SortBy::RatingDesc,
            genre_filter: Some("jazz".to_string()),
        };
        let titles: Vec<_> = state.visible_albums().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["C", "A"]);

        // Stats always cover the whole collection.
        let stats = state.stats();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.top_album.map(|r| r.title.as_str()), Some("B"));

        let top_id = stats.top_album.unwrap().id.clone();
        let removed = state.remove(&top_id).unwrap();
        assert_eq!(removed.map(|r| r.title), Some("B".to_string()));
        assert_eq!(state.collection.len(), 2);
    }
}
