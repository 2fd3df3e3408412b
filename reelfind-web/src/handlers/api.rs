//! JSON API handlers mirroring the page flows.
//!
//! The API drives the same process-wide controller as the HTML pages, so
//! durable storage and the visible search state stay consistent however a
//! lookup was triggered.

use axum::extract::{Path, Query, State};
use axum::response::Json;
use reelfind_core::controller::SearchController;
use reelfind_core::detail::{DetailOutcome, GENERIC_DETAIL_ERROR};
use reelfind_core::model::TypeFilter;
use serde::Deserialize;
use serde_json::json;

use crate::server::AppState;

#[derive(Deserialize)]
pub struct ApiSearchParams {
    q: Option<String>,
    #[serde(rename = "type")]
    media_type: Option<String>,
    page: Option<u32>,
}

fn state_json(controller: &SearchController) -> serde_json::Value {
    let state = controller.state();
    json!({
        "query": state.query,
        "type": state.type_filter.as_str(),
        "page": state.page,
        "totalResults": state.total_results,
        "totalPages": controller.total_pages(),
        "results": state.results,
        "error": state.error,
    })
}

/// `GET /api/search?q=&type=&page=` - run a search and return the settled
/// state snapshot.
pub async fn api_search(
    State(app): State<AppState>,
    Query(params): Query<ApiSearchParams>,
) -> Json<serde_json::Value> {
    let query = params.q.unwrap_or_default();
    if query.is_empty() {
        return Json(json!({"error": "Missing query parameter 'q'"}));
    }

    let filter = match params.media_type.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<TypeFilter>() {
            Ok(filter) => Some(filter),
            Err(_) => {
                return Json(json!({
                    "error": format!("Invalid type filter: {raw}")
                }));
            }
        },
    };

    let request = {
        app.controller
            .write()
            .await
            .initialize(Some(&query), filter, params.page)
    };

    match request {
        Some(request) => {
            let outcome = app.lookup.search(&request).await;
            let mut controller = app.controller.write().await;
            controller.apply_search_outcome(&request, outcome);
            Json(state_json(&controller))
        }
        None => Json(state_json(&*app.controller.read().await)),
    }
}

/// `GET /api/movie/{id}` - fetch one title's full record.
pub async fn api_movie_detail(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Json<serde_json::Value> {
    match app.lookup.detail(&id).await {
        DetailOutcome::Success(detail) => Json(json!(detail)),
        DetailOutcome::ApiError(message) => Json(json!({"error": message})),
        DetailOutcome::TransportFailure => Json(json!({"error": GENERIC_DETAIL_ERROR})),
    }
}
