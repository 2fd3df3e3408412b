//! Page handlers for the search and detail views.
//!
//! Form-style endpoints (`/search`, `/filter`, `/paginate`) follow
//! redirect-after-success: a settled lookup without an error redirects to
//! the canonical route encoding {query, filter, page}, so the visible URL
//! always reflects the last successful search. Failed lookups render
//! inline and leave the URL where the user acted.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use reelfind_core::controller::{LookupRequest, SearchController, SearchState};
use reelfind_core::detail::DetailView;
use reelfind_core::model::TypeFilter;
use reelfind_core::session::restore_route;
use serde::Deserialize;

use crate::components::{layout, movie};
use crate::server::AppState;

/// Controller snapshot plus derived pagination flags, captured under a
/// single lock acquisition.
struct SearchViewModel {
    state: SearchState,
    has_previous: bool,
    has_next: bool,
    route: String,
}

fn capture(controller: &SearchController) -> SearchViewModel {
    SearchViewModel {
        state: controller.state().clone(),
        has_previous: controller.has_previous_page(),
        has_next: controller.has_next_page(),
        route: controller.current_route(),
    }
}

/// Perform the lookup (if one was issued), settle it into the controller,
/// and capture the resulting view model. The controller lock is never held
/// across the HTTP await.
async fn settle_search(app: &AppState, request: Option<LookupRequest>) -> SearchViewModel {
    match request {
        Some(request) => {
            let outcome = app.lookup.search(&request).await;
            let mut controller = app.controller.write().await;
            controller.apply_search_outcome(&request, outcome);
            capture(&controller)
        }
        None => capture(&*app.controller.read().await),
    }
}

fn render_search(view: &SearchViewModel) -> Html<String> {
    let mut content = movie::search_banner(&view.state.query);

    if let Some(error) = &view.state.error {
        content.push_str(&movie::error_banner(error));
    } else if view.state.results.is_empty() {
        content.push_str(&movie::empty_prompt());
    }

    if !view.state.results.is_empty() {
        content.push_str(&movie::controls_row(
            view.state.type_filter,
            view.has_previous,
            view.has_next,
        ));
        content.push_str(&movie::results_grid(&view.state.results));
    }

    Html(layout::page("Movie Search", &content))
}

/// Redirect to the canonical search route after a successful lookup,
/// render inline otherwise.
fn redirect_or_render(view: SearchViewModel) -> Response {
    if view.state.error.is_none() && !view.state.query.is_empty() {
        Redirect::to(&view.route).into_response()
    } else {
        render_search(&view).into_response()
    }
}

/// `GET /` - home; restores the persisted search if one exists.
///
/// A successfully restored search redirects to its canonical route so the
/// visible URL encodes {query, filter, page} again.
pub async fn home_page(State(app): State<AppState>) -> Response {
    let request = { app.controller.write().await.initialize(None, None, None) };
    let view = settle_search(&app, request).await;
    redirect_or_render(view)
}

/// `GET /{query}/{page}` - search without a type filter.
pub async fn search_results_page(
    State(app): State<AppState>,
    Path((query, page)): Path<(String, String)>,
) -> Html<String> {
    let page = page.parse().ok();
    let request = {
        app.controller
            .write()
            .await
            .initialize(Some(&query), None, page)
    };
    let view = settle_search(&app, request).await;
    render_search(&view)
}

/// `GET /{query}/{filter}/{page}` - search narrowed to one media type.
///
/// An unknown filter segment drops the filter and redirects to the
/// unfiltered route.
pub async fn search_filtered_page(
    State(app): State<AppState>,
    Path((query, filter, page)): Path<(String, String, String)>,
) -> Response {
    let Ok(filter) = filter.parse::<TypeFilter>() else {
        let fallback = format!("/{}/{}", urlencoding::encode(&query), page);
        return Redirect::to(&fallback).into_response();
    };

    let page = page.parse().ok();
    let request = {
        app.controller
            .write()
            .await
            .initialize(Some(&query), Some(filter), page)
    };
    let view = settle_search(&app, request).await;
    render_search(&view).into_response()
}

#[derive(Deserialize)]
pub struct SearchForm {
    query: Option<String>,
}

/// `GET /search?query=` - search form target; resets to page 1 without a
/// filter.
pub async fn submit_search(
    State(app): State<AppState>,
    Query(form): Query<SearchForm>,
) -> Response {
    let query = form.query.unwrap_or_default();
    if query.is_empty() {
        return Redirect::to("/").into_response();
    }

    let request = { app.controller.write().await.submit_search(&query) };
    let view = settle_search(&app, request).await;
    redirect_or_render(view)
}

#[derive(Deserialize)]
pub struct FilterForm {
    #[serde(rename = "type")]
    media_type: Option<String>,
}

/// `GET /filter?type=` - type filter select target; resets to page 1.
pub async fn select_filter(
    State(app): State<AppState>,
    Query(form): Query<FilterForm>,
) -> Response {
    let Ok(filter) = form.media_type.unwrap_or_default().parse::<TypeFilter>() else {
        let route = { app.controller.read().await.current_route() };
        return Redirect::to(&route).into_response();
    };

    let request = { app.controller.write().await.select_type_filter(filter) };
    match request {
        Some(request) => {
            let view = settle_search(&app, Some(request)).await;
            redirect_or_render(view)
        }
        // No search to narrow yet.
        None => Redirect::to("/").into_response(),
    }
}

#[derive(Deserialize)]
pub struct PaginateForm {
    delta: Option<i64>,
}

/// `GET /paginate?delta=` - Previous/Next target.
///
/// An out-of-range transition is a no-op that redirects back to the
/// current route.
pub async fn paginate(State(app): State<AppState>, Query(form): Query<PaginateForm>) -> Response {
    let delta = form.delta.unwrap_or(0);

    let (request, route) = {
        let mut controller = app.controller.write().await;
        (controller.change_page(delta), controller.current_route())
    };

    match request {
        Some(request) => {
            let view = settle_search(&app, Some(request)).await;
            redirect_or_render(view)
        }
        None => Redirect::to(&route).into_response(),
    }
}

/// `GET /reset` - logo/home action; clears state and durable storage.
pub async fn reset_search(State(app): State<AppState>) -> Response {
    let cleared = { app.controller.write().await.reset() };
    match cleared {
        Ok(()) => Redirect::to("/").into_response(),
        Err(e) => {
            tracing::error!("Reset failed to clear durable storage: {e}");
            let content = movie::error_banner("Saved search state could not be cleared.");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(layout::page("Error", &content)),
            )
                .into_response()
        }
    }
}

/// `GET /movie/{id}` - detail view for one title.
pub async fn movie_detail_page(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Html<String> {
    let mut view = DetailView::new();
    view.apply(app.lookup.detail(&id).await);

    let back = restore_route(app.store.as_ref());
    let content = match &view {
        DetailView::Loaded(detail) => movie::detail_panel(detail, &back),
        DetailView::Failed(message) => movie::detail_error(message, &back),
        DetailView::Loading => {
            r#"<h2 class="text-2xl text-white font-semibold text-center mt-10">Processing...</h2>"#
                .to_string()
        }
    };

    Html(layout::page("Movie Details", &content))
}
