//! Detail view flow and back navigation.

use reelfind_core::detail::{DetailOutcome, DetailView, GENERIC_DETAIL_ERROR};
use reelfind_core::model::TypeFilter;
use reelfind_core::session::{PersistedSearch, restore_route};
use reelfind_core::storage::MemoryStore;
use reelfind_search::MovieLookupService;

use crate::support::{Script, ScriptedProvider};

#[tokio::test]
async fn detail_lookup_settles_into_the_full_record() {
    let service = MovieLookupService::with_provider(Box::new(ScriptedProvider {
        search: Script::Matches(1),
        detail: Script::Matches(1),
    }));

    let mut view = DetailView::new();
    view.apply(service.detail("tt0111161").await);

    match view {
        DetailView::Loaded(movie) => {
            assert_eq!(movie.imdb_id, "tt0111161");
            assert_eq!(movie.title, "The Shawshank Redemption");
            assert_eq!(movie.imdb_rating, "9.3");
        }
        other => panic!("expected loaded view, got {other:?}"),
    }
}

#[tokio::test]
async fn failed_detail_lookup_reports_and_stays_failed() {
    let service = MovieLookupService::with_provider(Box::new(ScriptedProvider {
        search: Script::Matches(1),
        detail: Script::NetworkDown,
    }));

    let mut view = DetailView::new();
    view.apply(service.detail("tt0111161").await);
    assert_eq!(view, DetailView::Failed(GENERIC_DETAIL_ERROR.to_string()));

    // A late success must not resurrect a settled view.
    view.apply(DetailOutcome::Success(crate::support::detail_record(
        "tt0111161",
    )));
    assert!(matches!(view, DetailView::Failed(_)));
}

#[test]
fn back_navigation_restores_the_saved_search_route() {
    let store = MemoryStore::new();
    PersistedSearch {
        query: "batman".to_string(),
        type_filter: TypeFilter::Series,
        page: 2,
    }
    .save(&store)
    .unwrap();

    assert_eq!(restore_route(&store), "/batman/series/2");
}

#[test]
fn back_navigation_without_a_saved_search_goes_home() {
    let store = MemoryStore::new();
    assert_eq!(restore_route(&store), "/");
}
