//! Web server wiring for Reelfind.
//!
//! One process-wide search controller backs both the HTML pages and the
//! JSON API, mirroring the single search view the application models.
//! Handlers lock it only to mutate state, never across the await of an
//! HTTP lookup; lookup tickets handle out-of-order completions.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use reelfind_core::config::ReelfindConfig;
use reelfind_core::controller::SearchController;
use reelfind_core::storage::{JsonFileStore, KeyValueStore};
use reelfind_core::{ReelfindError, Result};
use reelfind_search::MovieLookupService;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use crate::handlers::{
    api_movie_detail, api_search, home_page, movie_detail_page, paginate, reset_search,
    search_filtered_page, search_results_page, select_filter, submit_search,
};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// The process-wide search controller.
    pub controller: Arc<RwLock<SearchController>>,
    /// Movie lookup client.
    pub lookup: Arc<MovieLookupService>,
    /// Durable store, also read directly for back-navigation.
    pub store: Arc<dyn KeyValueStore>,
}

impl AppState {
    /// Assemble state from parts.
    pub fn new(store: Arc<dyn KeyValueStore>, lookup: MovieLookupService) -> Self {
        Self {
            controller: Arc::new(RwLock::new(SearchController::new(Arc::clone(&store)))),
            lookup: Arc::new(lookup),
            store,
        }
    }
}

/// Build the full route table over `state`.
///
/// Static prefixes (`/movie`, `/api`, the form endpoints) take precedence
/// over the `/{query}/{page}` captures, so search routes may not shadow
/// them.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home_page))
        .route("/search", get(submit_search))
        .route("/filter", get(select_filter))
        .route("/paginate", get(paginate))
        .route("/reset", get(reset_search))
        .route("/movie/{id}", get(movie_detail_page))
        .route("/api/search", get(api_search))
        .route("/api/movie/{id}", get(api_movie_detail))
        .route("/{query}/{page}", get(search_results_page))
        .route("/{query}/{filter}/{page}", get(search_filtered_page))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run the web server until shutdown.
///
/// # Errors
///
/// - `ReelfindError::Storage` - The durable state file could not be opened
/// - `ReelfindError::Io` - Binding or serving on the configured address failed
pub async fn run_server(config: ReelfindConfig, demo: bool) -> Result<()> {
    let store: Arc<dyn KeyValueStore> =
        Arc::new(JsonFileStore::open(&config.storage.state_file)?);

    let lookup = if demo {
        MovieLookupService::new_demo()
    } else {
        MovieLookupService::new(&config.api)
    };

    let state = AppState::new(store, lookup);
    let router = build_router(state);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    tracing::info!("Reelfind web server listening on http://{bind_address}");

    axum::serve(listener, router)
        .await
        .map_err(ReelfindError::from_web_ui_error)
}
