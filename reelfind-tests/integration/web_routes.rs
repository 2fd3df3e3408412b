//! Web route surface driven through the router without a socket.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use reelfind_core::model::TypeFilter;
use reelfind_core::session::PersistedSearch;
use reelfind_core::storage::{KeyValueStore, MemoryStore};
use reelfind_search::MovieLookupService;
use reelfind_web::{AppState, build_router};
use tower::ServiceExt;

use crate::support::{Script, ScriptedProvider};

fn app(script: ScriptedProvider) -> (Router, Arc<dyn KeyValueStore>) {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let state = AppState::new(
        Arc::clone(&store),
        MovieLookupService::with_provider(Box::new(script)),
    );
    (build_router(state), store)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let location = response
        .headers()
        .get("location")
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, location, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn home_shows_the_empty_prompt_without_a_saved_search() {
    let (router, _store) = app(ScriptedProvider::searching(Script::Matches(15)));

    let (status, _, body) = get(&router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("- Search Your Movie Please -"));
}

#[tokio::test]
async fn home_restores_the_saved_search_and_redirects_to_its_route() {
    let (router, store) = app(ScriptedProvider::searching(Script::Matches(15)));

    PersistedSearch {
        query: "batman".to_string(),
        type_filter: TypeFilter::None,
        page: 2,
    }
    .save(store.as_ref())
    .unwrap();

    let (status, location, _) = get(&router, "/").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/batman/2"));
}

#[tokio::test]
async fn search_route_renders_results_and_persists_parameters() {
    let (router, store) = app(ScriptedProvider::searching(Script::Matches(15)));

    let (status, _, body) = get(&router, "/batman/1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("batman #0"));
    assert!(body.contains("/movie/tt0000000"));

    assert_eq!(
        store.get("lastSearchQuery").unwrap(),
        Some("batman".to_string())
    );
    assert_eq!(store.get("lastPageNum").unwrap(), Some("1".to_string()));
}

#[tokio::test]
async fn filtered_route_marks_the_active_filter() {
    let (router, store) = app(ScriptedProvider::searching(Script::Matches(15)));

    let (status, _, body) = get(&router, "/batman/series/1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"<option value="series" selected>"#));
    assert_eq!(store.get("lastGenre").unwrap(), Some("series".to_string()));
}

#[tokio::test]
async fn unknown_filter_segment_redirects_to_the_unfiltered_route() {
    let (router, _store) = app(ScriptedProvider::searching(Script::Matches(15)));

    let (status, location, _) = get(&router, "/batman/cartoon/1").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/batman/1"));
}

#[tokio::test]
async fn submitting_the_form_redirects_to_the_canonical_route() {
    let (router, _store) = app(ScriptedProvider::searching(Script::Matches(15)));

    let (status, location, _) = get(&router, "/search?query=batman").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/batman/1"));
}

#[tokio::test]
async fn empty_form_submission_goes_home() {
    let (router, _store) = app(ScriptedProvider::searching(Script::Matches(15)));

    let (status, location, _) = get(&router, "/search?query=").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/"));
}

#[tokio::test]
async fn api_failure_renders_the_message_and_still_persists() {
    let (router, store) = app(ScriptedProvider::searching(Script::NotFound));

    let (status, _, body) = get(&router, "/zzznotfound/1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Movie not found!"));
    assert!(!body.contains("Previous"), "no controls without results");

    assert_eq!(
        store.get("lastSearchQuery").unwrap(),
        Some("zzznotfound".to_string())
    );
}

#[tokio::test]
async fn out_of_range_pagination_is_a_noop_redirect() {
    let (router, _store) = app(ScriptedProvider::searching(Script::Matches(15)));

    // Land on the last page, then try to go further.
    let (status, _, _) = get(&router, "/batman/2").await;
    assert_eq!(status, StatusCode::OK);

    let (status, location, _) = get(&router, "/paginate?delta=1").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/batman/2"));
}

#[tokio::test]
async fn reset_clears_storage_and_redirects_home() {
    let (router, store) = app(ScriptedProvider::searching(Script::Matches(15)));

    let (_, _, _) = get(&router, "/batman/1").await;
    assert!(store.get("lastSearchQuery").unwrap().is_some());

    let (status, location, _) = get(&router, "/reset").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/"));
    assert_eq!(store.get("lastSearchQuery").unwrap(), None);
    assert_eq!(store.get("lastGenre").unwrap(), None);
    assert_eq!(store.get("lastPageNum").unwrap(), None);
}

#[tokio::test]
async fn detail_page_renders_fields_and_back_route() {
    let (router, store) = app(ScriptedProvider {
        search: Script::Matches(15),
        detail: Script::Matches(1),
    });

    PersistedSearch {
        query: "batman".to_string(),
        type_filter: TypeFilter::None,
        page: 2,
    }
    .save(store.as_ref())
    .unwrap();

    let (status, _, body) = get(&router, "/movie/tt0111161").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("The Shawshank Redemption"));
    for label in ["Year", "Genre", "Plot", "Cast", "Ratings"] {
        assert!(body.contains(&format!("{label} :")), "missing {label}");
    }
    assert!(body.contains(r#"href="/batman/2""#));
}

#[tokio::test]
async fn detail_transport_failure_shows_generic_message() {
    let (router, _store) = app(ScriptedProvider {
        search: Script::Matches(15),
        detail: Script::NetworkDown,
    });

    let (status, _, body) = get(&router, "/movie/tt0111161").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Failed to fetch movie details. Please try again later."));
}

#[tokio::test]
async fn api_search_returns_the_state_snapshot() {
    let (router, _store) = app(ScriptedProvider::searching(Script::Matches(15)));

    let (status, _, body) = get(&router, "/api/search?q=batman&page=1").await;
    assert_eq!(status, StatusCode::OK);

    let snapshot: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(snapshot["query"], "batman");
    assert_eq!(snapshot["totalResults"], 15);
    assert_eq!(snapshot["totalPages"], 2);
    assert_eq!(snapshot["results"].as_array().unwrap().len(), 10);
    assert!(snapshot["error"].is_null());
}

#[tokio::test]
async fn api_detail_returns_the_record_or_error() {
    let (router, _store) = app(ScriptedProvider {
        search: Script::Matches(1),
        detail: Script::NotFound,
    });

    let (status, _, body) = get(&router, "/api/movie/tt0000000").await;
    assert_eq!(status, StatusCode::OK);

    let payload: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(payload["error"], "Incorrect IMDb ID.");
}
