//! Persisted search parameters: the subset of search state that outlives a
//! view and restores it after a reload or a new CLI invocation.

use crate::model::TypeFilter;
use crate::storage::{KeyValueStore, StorageError};

/// Storage key for the last submitted query text.
pub const LAST_SEARCH_QUERY_KEY: &str = "lastSearchQuery";
/// Storage key for the last selected type filter.
pub const LAST_GENRE_KEY: &str = "lastGenre";
/// Storage key for the last viewed page number.
pub const LAST_PAGE_NUM_KEY: &str = "lastPageNum";

/// The {query, filter, page} triple mirrored to durable storage.
///
/// Written after every attempted lookup, read once at controller
/// initialization, cleared only by the explicit reset action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSearch {
    pub query: String,
    pub type_filter: TypeFilter,
    pub page: u32,
}

impl PersistedSearch {
    /// Load the persisted search, if one exists.
    ///
    /// Returns `None` when no query is stored. An unparseable filter or page
    /// falls back to its default rather than discarding the whole entry.
    ///
    /// # Errors
    ///
    /// - `StorageError` - The underlying store could not be read
    pub fn load(store: &dyn KeyValueStore) -> Result<Option<Self>, StorageError> {
        let query = match store.get(LAST_SEARCH_QUERY_KEY)? {
            Some(q) if !q.is_empty() => q,
            _ => return Ok(None),
        };

        let type_filter = store
            .get(LAST_GENRE_KEY)?
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default();

        let page = store
            .get(LAST_PAGE_NUM_KEY)?
            .and_then(|raw| raw.parse().ok())
            .filter(|&p| p >= 1)
            .unwrap_or(1);

        Ok(Some(Self {
            query,
            type_filter,
            page,
        }))
    }

    /// Write all three keys.
    ///
    /// # Errors
    ///
    /// - `StorageError` - The underlying store could not be written
    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        store.set(LAST_SEARCH_QUERY_KEY, &self.query)?;
        store.set(LAST_GENRE_KEY, self.type_filter.as_str())?;
        store.set(LAST_PAGE_NUM_KEY, &self.page.to_string())?;
        Ok(())
    }

    /// Remove all three keys.
    ///
    /// # Errors
    ///
    /// - `StorageError` - The underlying store could not be written
    pub fn clear(store: &dyn KeyValueStore) -> Result<(), StorageError> {
        store.remove(LAST_SEARCH_QUERY_KEY)?;
        store.remove(LAST_GENRE_KEY)?;
        store.remove(LAST_PAGE_NUM_KEY)?;
        Ok(())
    }

    /// The search route encoding these parameters: `/{query}/{page}` without
    /// a filter, `/{query}/{filter}/{page}` with one.
    pub fn route(&self) -> String {
        let query = urlencoding::encode(&self.query);
        if self.type_filter.is_none() {
            format!("/{}/{}", query, self.page)
        } else {
            format!("/{}/{}/{}", query, self.type_filter.as_str(), self.page)
        }
    }
}

/// Search route restoring the persisted search, or `/` when none exists.
///
/// Used by the detail view's back navigation; a storage read failure also
/// falls back to the bare home route.
pub fn restore_route(store: &dyn KeyValueStore) -> String {
    match PersistedSearch::load(store) {
        Ok(Some(persisted)) => persisted.route(),
        Ok(None) => "/".to_string(),
        Err(e) => {
            tracing::warn!("Failed to read persisted search: {e}");
            "/".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn save_load_round_trips() {
        let store = MemoryStore::new();
        let persisted = PersistedSearch {
            query: "batman".to_string(),
            type_filter: TypeFilter::Series,
            page: 2,
        };

        persisted.save(&store).unwrap();
        assert_eq!(PersistedSearch::load(&store).unwrap(), Some(persisted));
    }

    #[test]
    fn load_returns_none_without_a_query() {
        let store = MemoryStore::new();
        assert_eq!(PersistedSearch::load(&store).unwrap(), None);

        // An empty query reads the same as an absent one.
        store.set(LAST_SEARCH_QUERY_KEY, "").unwrap();
        store.set(LAST_PAGE_NUM_KEY, "4").unwrap();
        assert_eq!(PersistedSearch::load(&store).unwrap(), None);
    }

    #[test]
    fn unparseable_page_and_filter_fall_back_to_defaults() {
        let store = MemoryStore::new();
        store.set(LAST_SEARCH_QUERY_KEY, "alien").unwrap();
        store.set(LAST_GENRE_KEY, "not-a-filter").unwrap();
        store.set(LAST_PAGE_NUM_KEY, "zero").unwrap();

        let loaded = PersistedSearch::load(&store).unwrap().unwrap();
        assert_eq!(loaded.type_filter, TypeFilter::None);
        assert_eq!(loaded.page, 1);
    }

    #[test]
    fn clear_removes_every_key() {
        let store = MemoryStore::new();
        PersistedSearch {
            query: "dune".to_string(),
            type_filter: TypeFilter::Movie,
            page: 3,
        }
        .save(&store)
        .unwrap();

        PersistedSearch::clear(&store).unwrap();
        assert_eq!(store.get(LAST_SEARCH_QUERY_KEY).unwrap(), None);
        assert_eq!(store.get(LAST_GENRE_KEY).unwrap(), None);
        assert_eq!(store.get(LAST_PAGE_NUM_KEY).unwrap(), None);
    }

    #[test]
    fn route_encodes_filter_and_query() {
        let unfiltered = PersistedSearch {
            query: "the matrix".to_string(),
            type_filter: TypeFilter::None,
            page: 1,
        };
        assert_eq!(unfiltered.route(), "/the%20matrix/1");

        let filtered = PersistedSearch {
            query: "batman".to_string(),
            type_filter: TypeFilter::Episode,
            page: 5,
        };
        assert_eq!(filtered.route(), "/batman/episode/5");
    }

    #[test]
    fn restore_route_falls_back_to_home() {
        let store = MemoryStore::new();
        assert_eq!(restore_route(&store), "/");
    }
}
