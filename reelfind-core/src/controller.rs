//! Search state controller.
//!
//! Mediates between user input, the external lookup, the visible route, and
//! durable storage. The controller never performs HTTP itself: state-changing
//! operations hand back a [`LookupRequest`] describing the lookup to issue,
//! and the caller settles it with [`SearchController::apply_search_outcome`].
//! Each request carries a monotonically increasing ticket; a completion whose
//! ticket is older than the latest issued one is discarded, so out-of-order
//! responses can never overwrite newer state.

use std::sync::Arc;

use crate::model::{MovieSummary, RESULTS_PER_PAGE, SearchPage, TypeFilter};
use crate::session::PersistedSearch;
use crate::storage::{KeyValueStore, StorageError};

/// User-facing message for search lookups that failed in transit.
pub const GENERIC_SEARCH_ERROR: &str = "Failed to fetch movies. Please try again later.";

/// In-memory search state, owned exclusively by the controller.
///
/// Invariant: `results` is empty whenever `error` is set. Both may be empty
/// on initial load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub type_filter: TypeFilter,
    pub page: u32,
    pub results: Vec<MovieSummary>,
    pub total_results: u32,
    pub error: Option<String>,
}

/// One lookup the controller has decided to issue.
///
/// The ticket identifies the most recently issued lookup; an outcome applied
/// with an older ticket is stale and gets discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub ticket: u64,
    pub query: String,
    pub type_filter: TypeFilter,
    pub page: u32,
}

/// The settled result of one search lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Well-formed response with matches.
    Success(SearchPage),
    /// Well-formed response signaling no matches or an API-level error;
    /// the message is surfaced verbatim.
    ApiError(String),
    /// Network, timeout or malformed-response failure; mapped to
    /// [`GENERIC_SEARCH_ERROR`].
    TransportFailure,
}

/// Owns [`SearchState`] and synchronizes it with durable storage.
#[derive(Debug)]
pub struct SearchController {
    state: SearchState,
    store: Arc<dyn KeyValueStore>,
    lookup_seq: u64,
}

impl SearchController {
    /// Create a controller with default state backed by `store`.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            state: SearchState {
                page: 1,
                ..SearchState::default()
            },
            store,
            lookup_seq: 0,
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Seed state from route parameters if present, else from durable
    /// storage, else defaults. Returns a lookup when a non-empty query was
    /// seeded, `None` otherwise.
    pub fn initialize(
        &mut self,
        route_query: Option<&str>,
        route_filter: Option<TypeFilter>,
        route_page: Option<u32>,
    ) -> Option<LookupRequest> {
        let seeded = match route_query {
            Some(query) => SearchState {
                query: query.to_string(),
                type_filter: route_filter.unwrap_or_default(),
                page: route_page.unwrap_or(1).max(1),
                ..SearchState::default()
            },
            None => match PersistedSearch::load(self.store.as_ref()) {
                Ok(Some(persisted)) => SearchState {
                    query: persisted.query,
                    type_filter: persisted.type_filter,
                    page: persisted.page,
                    ..SearchState::default()
                },
                Ok(None) => SearchState {
                    page: 1,
                    ..SearchState::default()
                },
                Err(e) => {
                    tracing::warn!("Failed to restore persisted search: {e}");
                    SearchState {
                        page: 1,
                        ..SearchState::default()
                    }
                }
            },
        };

        self.state = seeded;
        if self.state.query.is_empty() {
            None
        } else {
            Some(self.begin_lookup())
        }
    }

    /// Submit a new search: page resets to 1, the type filter clears, and a
    /// lookup for `query` is issued. An empty query is a no-op.
    pub fn submit_search(&mut self, query: &str) -> Option<LookupRequest> {
        if query.is_empty() {
            return None;
        }
        self.state.query = query.to_string();
        self.state.type_filter = TypeFilter::None;
        self.state.page = 1;
        Some(self.begin_lookup())
    }

    /// Narrow the current search: page resets to 1 and a lookup with the
    /// filter applied is issued. A no-op until a query has been submitted.
    pub fn select_type_filter(&mut self, filter: TypeFilter) -> Option<LookupRequest> {
        if self.state.query.is_empty() {
            return None;
        }
        self.state.type_filter = filter;
        self.state.page = 1;
        Some(self.begin_lookup())
    }

    /// Move `delta` pages from the current one. Accepted only while
    /// `1 <= new_page <= total_pages()`; out-of-range deltas are no-ops.
    pub fn change_page(&mut self, delta: i64) -> Option<LookupRequest> {
        let new_page = i64::from(self.state.page) + delta;
        if new_page < 1 || new_page > i64::from(self.total_pages()) {
            return None;
        }
        self.state.page = new_page as u32;
        Some(self.begin_lookup())
    }

    /// Clear query, filter, page, results, error, and durable storage.
    /// Issues no lookup.
    ///
    /// # Errors
    ///
    /// - `StorageError` - The durable store could not be cleared; in-memory
    ///   state is still reset before the error is returned
    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.state = SearchState {
            page: 1,
            ..SearchState::default()
        };
        self.lookup_seq += 1;
        PersistedSearch::clear(self.store.as_ref())
    }

    /// Settle a lookup. Returns `false` when the request is stale (a newer
    /// lookup has been issued since), in which case state is untouched.
    ///
    /// After any non-stale outcome, success or failure alike, the attempted
    /// {query, filter, page} is persisted to durable storage.
    pub fn apply_search_outcome(&mut self, request: &LookupRequest, outcome: SearchOutcome) -> bool {
        if request.ticket != self.lookup_seq {
            tracing::debug!(
                ticket = request.ticket,
                latest = self.lookup_seq,
                "Discarding stale lookup completion"
            );
            return false;
        }

        match outcome {
            SearchOutcome::Success(page) => {
                self.state.results = page.results;
                self.state.total_results = page.total_results;
                self.state.error = None;
            }
            SearchOutcome::ApiError(message) => {
                self.state.results = Vec::new();
                self.state.error = Some(message);
            }
            SearchOutcome::TransportFailure => {
                self.state.results = Vec::new();
                self.state.error = Some(GENERIC_SEARCH_ERROR.to_string());
            }
        }

        let persisted = PersistedSearch {
            query: self.state.query.clone(),
            type_filter: self.state.type_filter,
            page: self.state.page,
        };
        if let Err(e) = persisted.save(self.store.as_ref()) {
            tracing::warn!("Failed to persist search parameters: {e}");
        }
        true
    }

    /// Number of result pages: `ceil(total_results / 10)`.
    pub fn total_pages(&self) -> u32 {
        self.state.total_results.div_ceil(RESULTS_PER_PAGE)
    }

    /// Whether a "Previous" transition is available.
    pub fn has_previous_page(&self) -> bool {
        self.state.page > 1
    }

    /// Whether a "Next" transition is available.
    pub fn has_next_page(&self) -> bool {
        self.state.page < self.total_pages()
    }

    /// The canonical route encoding the current query, filter and page.
    pub fn current_route(&self) -> String {
        if self.state.query.is_empty() {
            return "/".to_string();
        }
        PersistedSearch {
            query: self.state.query.clone(),
            type_filter: self.state.type_filter,
            page: self.state.page,
        }
        .route()
    }

    fn begin_lookup(&mut self) -> LookupRequest {
        self.lookup_seq += 1;
        LookupRequest {
            ticket: self.lookup_seq,
            query: self.state.query.clone(),
            type_filter: self.state.type_filter,
            page: self.state.page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{LAST_GENRE_KEY, LAST_PAGE_NUM_KEY, LAST_SEARCH_QUERY_KEY};
    use crate::storage::MemoryStore;

    fn controller() -> SearchController {
        SearchController::new(Arc::new(MemoryStore::new()))
    }

    fn page_of(total_results: u32) -> SearchPage {
        let results = (0..total_results.min(RESULTS_PER_PAGE))
            .map(|i| MovieSummary {
                imdb_id: format!("tt{i:07}"),
                title: format!("Title {i}"),
                year: "2020".to_string(),
                poster_url: "https://example.com/poster.jpg".to_string(),
            })
            .collect();
        SearchPage {
            results,
            total_results,
        }
    }

    #[test]
    fn initialize_defaults_without_route_or_storage() {
        let mut ctrl = controller();
        let request = ctrl.initialize(None, None, None);

        assert!(request.is_none());
        assert_eq!(ctrl.state().query, "");
        assert!(ctrl.state().type_filter.is_none());
        assert_eq!(ctrl.state().page, 1);
    }

    #[test]
    fn initialize_prefers_route_parameters() {
        let store = Arc::new(MemoryStore::new());
        PersistedSearch {
            query: "stored".to_string(),
            type_filter: TypeFilter::Movie,
            page: 4,
        }
        .save(store.as_ref())
        .unwrap();

        let mut ctrl = SearchController::new(store);
        let request = ctrl
            .initialize(Some("batman"), Some(TypeFilter::Series), Some(2))
            .unwrap();

        assert_eq!(request.query, "batman");
        assert_eq!(request.type_filter, TypeFilter::Series);
        assert_eq!(request.page, 2);
    }

    #[test]
    fn initialize_restores_from_storage_when_route_is_bare() {
        let store = Arc::new(MemoryStore::new());
        PersistedSearch {
            query: "alien".to_string(),
            type_filter: TypeFilter::Episode,
            page: 3,
        }
        .save(store.as_ref())
        .unwrap();

        let mut ctrl = SearchController::new(store);
        let request = ctrl.initialize(None, None, None).unwrap();

        assert_eq!(request.query, "alien");
        assert_eq!(request.type_filter, TypeFilter::Episode);
        assert_eq!(request.page, 3);
    }

    #[test]
    fn submit_search_resets_page_and_filter() {
        let mut ctrl = controller();
        ctrl.initialize(Some("old"), Some(TypeFilter::Movie), Some(7));

        let request = ctrl.submit_search("new query").unwrap();
        assert_eq!(request.query, "new query");
        assert_eq!(request.page, 1);
        assert!(request.type_filter.is_none());
    }

    #[test]
    fn submit_search_rejects_empty_query() {
        let mut ctrl = controller();
        assert!(ctrl.submit_search("").is_none());
    }

    #[test]
    fn select_type_filter_resets_page() {
        let mut ctrl = controller();
        let request = ctrl.initialize(Some("batman"), None, Some(5)).unwrap();
        ctrl.apply_search_outcome(&request, SearchOutcome::Success(page_of(60)));

        let filtered = ctrl.select_type_filter(TypeFilter::Series).unwrap();
        assert_eq!(filtered.page, 1);
        assert_eq!(filtered.type_filter, TypeFilter::Series);
    }

    #[test]
    fn select_type_filter_without_query_is_noop() {
        let mut ctrl = controller();
        assert!(ctrl.select_type_filter(TypeFilter::Movie).is_none());
    }

    #[test]
    fn page_change_respects_bounds() {
        let mut ctrl = controller();
        let request = ctrl.initialize(Some("batman"), None, Some(1)).unwrap();
        // 15 matches at 10 per page means exactly 2 pages.
        ctrl.apply_search_outcome(&request, SearchOutcome::Success(page_of(15)));

        assert_eq!(ctrl.total_pages(), 2);
        assert!(!ctrl.has_previous_page());
        assert!(ctrl.has_next_page());

        assert!(ctrl.change_page(-1).is_none(), "below page 1");

        let next = ctrl.change_page(1).unwrap();
        assert_eq!(next.page, 2);
        ctrl.apply_search_outcome(&next, SearchOutcome::Success(page_of(15)));
        assert!(ctrl.has_previous_page());
        assert!(!ctrl.has_next_page());

        assert!(ctrl.change_page(1).is_none(), "beyond the last page");
        assert_eq!(ctrl.state().page, 2, "rejected delta leaves page untouched");
    }

    #[test]
    fn api_error_clears_results_and_keeps_message_verbatim() {
        let mut ctrl = controller();
        let request = ctrl.initialize(Some("batman"), None, None).unwrap();
        ctrl.apply_search_outcome(&request, SearchOutcome::Success(page_of(15)));

        let retry = ctrl.submit_search("zzznotfound").unwrap();
        ctrl.apply_search_outcome(&retry, SearchOutcome::ApiError("Movie not found!".to_string()));

        assert!(ctrl.state().results.is_empty());
        assert_eq!(ctrl.state().error.as_deref(), Some("Movie not found!"));
    }

    #[test]
    fn transport_failure_maps_to_generic_message() {
        let mut ctrl = controller();
        let request = ctrl.initialize(Some("batman"), None, None).unwrap();
        ctrl.apply_search_outcome(&request, SearchOutcome::TransportFailure);

        assert!(ctrl.state().results.is_empty());
        assert_eq!(ctrl.state().error.as_deref(), Some(GENERIC_SEARCH_ERROR));
    }

    #[test]
    fn storage_reflects_attempted_search_even_on_failure() {
        let store = Arc::new(MemoryStore::new());
        let mut ctrl = SearchController::new(Arc::clone(&store) as Arc<dyn KeyValueStore>);

        let request = ctrl.initialize(Some("zzznotfound"), None, None).unwrap();
        ctrl.apply_search_outcome(&request, SearchOutcome::ApiError("Movie not found!".to_string()));

        assert_eq!(
            store.get(LAST_SEARCH_QUERY_KEY).unwrap(),
            Some("zzznotfound".to_string())
        );
        assert_eq!(store.get(LAST_PAGE_NUM_KEY).unwrap(), Some("1".to_string()));
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut ctrl = controller();
        let first = ctrl.initialize(Some("batman"), None, None).unwrap();
        let second = ctrl.submit_search("superman").unwrap();

        // The older lookup settles after the newer one was issued.
        assert!(!ctrl.apply_search_outcome(&first, SearchOutcome::Success(page_of(15))));
        assert!(ctrl.state().results.is_empty(), "stale data must not land");

        assert!(ctrl.apply_search_outcome(&second, SearchOutcome::Success(page_of(3))));
        assert_eq!(ctrl.state().total_results, 3);
    }

    #[test]
    fn reset_clears_state_and_storage_together() {
        let store = Arc::new(MemoryStore::new());
        let mut ctrl = SearchController::new(Arc::clone(&store) as Arc<dyn KeyValueStore>);

        let request = ctrl.initialize(Some("batman"), Some(TypeFilter::Movie), Some(2)).unwrap();
        ctrl.apply_search_outcome(&request, SearchOutcome::Success(page_of(15)));

        ctrl.reset().unwrap();

        assert_eq!(ctrl.state(), &SearchState { page: 1, ..SearchState::default() });
        assert_eq!(store.get(LAST_SEARCH_QUERY_KEY).unwrap(), None);
        assert_eq!(store.get(LAST_GENRE_KEY).unwrap(), None);
        assert_eq!(store.get(LAST_PAGE_NUM_KEY).unwrap(), None);
    }

    #[test]
    fn reset_invalidates_inflight_lookups() {
        let mut ctrl = controller();
        let request = ctrl.initialize(Some("batman"), None, None).unwrap();

        ctrl.reset().unwrap();
        assert!(!ctrl.apply_search_outcome(&request, SearchOutcome::Success(page_of(15))));
        assert!(ctrl.state().results.is_empty());
    }

    #[test]
    fn error_and_results_are_mutually_exclusive() {
        let mut ctrl = controller();
        let request = ctrl.initialize(Some("batman"), None, None).unwrap();
        ctrl.apply_search_outcome(&request, SearchOutcome::Success(page_of(15)));

        let failing = ctrl.change_page(1).unwrap();
        ctrl.apply_search_outcome(&failing, SearchOutcome::ApiError("boom".to_string()));
        assert!(ctrl.state().results.is_empty());

        let recovering = ctrl.submit_search("batman").unwrap();
        ctrl.apply_search_outcome(&recovering, SearchOutcome::Success(page_of(15)));
        assert!(ctrl.state().error.is_none());
        assert!(!ctrl.state().results.is_empty());
    }

    #[test]
    fn current_route_encodes_state() {
        let mut ctrl = controller();
        assert_eq!(ctrl.current_route(), "/");

        ctrl.initialize(Some("the matrix"), None, Some(2));
        assert_eq!(ctrl.current_route(), "/the%20matrix/2");

        ctrl.select_type_filter(TypeFilter::Movie);
        assert_eq!(ctrl.current_route(), "/the%20matrix/movie/1");
    }
}
