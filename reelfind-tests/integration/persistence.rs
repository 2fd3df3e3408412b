//! Durable storage across simulated application restarts.

use std::sync::Arc;

use reelfind_core::controller::SearchController;
use reelfind_core::model::TypeFilter;
use reelfind_core::session::PersistedSearch;
use reelfind_core::storage::{JsonFileStore, KeyValueStore};
use reelfind_search::MovieLookupService;

use crate::support::{Script, ScriptedProvider};

#[tokio::test]
async fn a_new_controller_restores_the_previous_search_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let service =
        MovieLookupService::with_provider(Box::new(ScriptedProvider::searching(Script::Matches(30))));

    // First session: search, filter, advance a page.
    {
        let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(&path).unwrap());
        let mut controller = SearchController::new(store);

        let request = controller.initialize(Some("batman"), None, None).unwrap();
        let outcome = service.search(&request).await;
        controller.apply_search_outcome(&request, outcome);

        let filtered = controller.select_type_filter(TypeFilter::Series).unwrap();
        let outcome = service.search(&filtered).await;
        controller.apply_search_outcome(&filtered, outcome);

        let paged = controller.change_page(1).unwrap();
        let outcome = service.search(&paged).await;
        controller.apply_search_outcome(&paged, outcome);
    }

    // Second session: a bare initialization picks up where we left off.
    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(&path).unwrap());
    let mut controller = SearchController::new(store);
    let restored = controller.initialize(None, None, None).unwrap();

    assert_eq!(restored.query, "batman");
    assert_eq!(restored.type_filter, TypeFilter::Series);
    assert_eq!(restored.page, 2);
}

#[tokio::test]
async fn reset_clears_the_state_file_for_later_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let service =
        MovieLookupService::with_provider(Box::new(ScriptedProvider::searching(Script::Matches(5))));

    {
        let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(&path).unwrap());
        let mut controller = SearchController::new(store);
        let request = controller.initialize(Some("batman"), None, None).unwrap();
        let outcome = service.search(&request).await;
        controller.apply_search_outcome(&request, outcome);

        controller.reset().unwrap();
    }

    let store = JsonFileStore::open(&path).unwrap();
    assert_eq!(PersistedSearch::load(&store).unwrap(), None);
}

#[tokio::test]
async fn storage_tracks_every_attempt_not_just_successes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(&path).unwrap());
    let mut controller = SearchController::new(Arc::clone(&store));

    let ok_service =
        MovieLookupService::with_provider(Box::new(ScriptedProvider::searching(Script::Matches(5))));
    let request = controller.initialize(Some("batman"), None, None).unwrap();
    let outcome = ok_service.search(&request).await;
    controller.apply_search_outcome(&request, outcome);

    let failing_service =
        MovieLookupService::with_provider(Box::new(ScriptedProvider::searching(Script::NetworkDown)));
    let request = controller.submit_search("unreachable").unwrap();
    let outcome = failing_service.search(&request).await;
    controller.apply_search_outcome(&request, outcome);

    let saved = PersistedSearch::load(store.as_ref()).unwrap().unwrap();
    assert_eq!(saved.query, "unreachable");
    assert_eq!(saved.page, 1);
}
