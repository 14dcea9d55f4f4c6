pub mod util;

mod app_state;
pub use app_state::{AppState, AppStateError};

mod catalog;
pub use catalog::{Catalog, CatalogProvider, CatalogProviderError, CatalogResponse};

mod query;
pub use query::{SortBy, ViewConfig, query};

mod stats;
pub use stats::CollectionStats;

mod store;
pub use store::{CollectionStore, StorageFailure, StoreError};

pub use ranker_state;
pub use ranker_state::bs;
