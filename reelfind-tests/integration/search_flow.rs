//! Search flow: controller plus lookup service end to end.

use std::sync::Arc;

use reelfind_core::controller::{GENERIC_SEARCH_ERROR, SearchController};
use reelfind_core::storage::{KeyValueStore, MemoryStore};
use reelfind_search::MovieLookupService;

use crate::support::{Script, ScriptedProvider};

fn service(script: Script) -> MovieLookupService {
    MovieLookupService::with_provider(Box::new(ScriptedProvider::searching(script)))
}

fn controller() -> (SearchController, Arc<dyn KeyValueStore>) {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    (SearchController::new(Arc::clone(&store)), store)
}

#[tokio::test]
async fn fifteen_matches_paginate_into_two_pages() {
    let service = service(Script::Matches(15));
    let (mut controller, _store) = controller();

    let request = controller.initialize(Some("batman"), None, Some(1)).unwrap();
    let outcome = service.search(&request).await;
    assert!(controller.apply_search_outcome(&request, outcome));

    assert_eq!(controller.state().total_results, 15);
    assert_eq!(controller.total_pages(), 2);
    assert_eq!(controller.state().results.len(), 10);
    assert!(controller.has_next_page());
    assert!(!controller.has_previous_page());

    // The second page holds the remaining five matches.
    let next = controller.change_page(1).unwrap();
    let outcome = service.search(&next).await;
    controller.apply_search_outcome(&next, outcome);

    assert_eq!(controller.state().results.len(), 5);
    assert!(!controller.has_next_page());
    assert!(controller.change_page(1).is_none());
}

#[tokio::test]
async fn not_found_surfaces_api_message_and_still_persists() {
    let service = service(Script::NotFound);
    let (mut controller, store) = controller();

    let request = controller.initialize(Some("zzznotfound"), None, None).unwrap();
    let outcome = service.search(&request).await;
    controller.apply_search_outcome(&request, outcome);

    assert!(controller.state().results.is_empty());
    assert_eq!(controller.state().error.as_deref(), Some("Movie not found!"));
    assert_eq!(
        store.get("lastSearchQuery").unwrap(),
        Some("zzznotfound".to_string())
    );
}

#[tokio::test]
async fn network_failure_maps_to_generic_message() {
    let service = service(Script::NetworkDown);
    let (mut controller, _store) = controller();

    let request = controller.initialize(Some("batman"), None, None).unwrap();
    let outcome = service.search(&request).await;
    controller.apply_search_outcome(&request, outcome);

    assert!(controller.state().results.is_empty());
    assert_eq!(controller.state().error.as_deref(), Some(GENERIC_SEARCH_ERROR));
}

#[tokio::test]
async fn slow_lookup_cannot_overwrite_a_newer_one() {
    let slow_service = service(Script::Matches(40));
    let fast_service = service(Script::Matches(3));
    let (mut controller, _store) = controller();

    // First lookup is issued, then the user types a new query before it
    // settles.
    let first = controller.initialize(Some("batman"), None, None).unwrap();
    let second = controller.submit_search("superman").unwrap();

    let second_outcome = fast_service.search(&second).await;
    assert!(controller.apply_search_outcome(&second, second_outcome));

    // The older completion arrives late and must be dropped.
    let first_outcome = slow_service.search(&first).await;
    assert!(!controller.apply_search_outcome(&first, first_outcome));

    assert_eq!(controller.state().query, "superman");
    assert_eq!(controller.state().total_results, 3);
}
