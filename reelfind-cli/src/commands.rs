//! CLI command implementations

use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Subcommand;
use reelfind_core::config::ReelfindConfig;
use reelfind_core::controller::SearchController;
use reelfind_core::detail::DetailView;
use reelfind_core::model::TypeFilter;
use reelfind_core::session::PersistedSearch;
use reelfind_core::storage::{JsonFileStore, KeyValueStore};
use reelfind_search::MovieLookupService;

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Search for titles by name
    Search {
        /// Query text to search for
        query: String,
        /// Narrow results to one media type (movie, series or episode)
        #[arg(long = "type")]
        media_type: Option<String>,
        /// Result page to fetch
        #[arg(short, long)]
        page: Option<u32>,
        /// Use fabricated demo data instead of the real API
        #[arg(long)]
        demo: bool,
    },
    /// Show the full record for one title
    Detail {
        /// IMDb identifier, e.g. tt0111161
        id: String,
        /// Use fabricated demo data instead of the real API
        #[arg(long)]
        demo: bool,
    },
    /// Show the saved search that the next session restores
    Last,
    /// Clear the saved search
    Reset,
    /// Start the web server
    Server {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
        /// Use fabricated demo data instead of the real API
        #[arg(long)]
        demo: bool,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns appropriate error based on the command that fails
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Search {
            query,
            media_type,
            page,
            demo,
        } => run_search(query, media_type, page, demo).await,
        Commands::Detail { id, demo } => show_detail(id, demo).await,
        Commands::Last => show_last_search(),
        Commands::Reset => reset_saved_search(),
        Commands::Server { host, port, demo } => start_server(host, port, demo).await,
    }
}

fn open_store(config: &ReelfindConfig) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    let store = JsonFileStore::open(&config.storage.state_file).with_context(|| {
        format!(
            "opening state file {}",
            config.storage.state_file.display()
        )
    })?;
    Ok(Arc::new(store))
}

fn lookup_service(config: &ReelfindConfig, demo: bool) -> MovieLookupService {
    if demo {
        MovieLookupService::new_demo()
    } else {
        MovieLookupService::new(&config.api)
    }
}

fn parse_type_filter(raw: Option<&str>) -> anyhow::Result<Option<TypeFilter>> {
    match raw {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|e: String| anyhow::anyhow!(e)),
    }
}

/// Run one search through the controller, persisting {query, filter, page}
/// like every other surface.
async fn run_search(
    query: String,
    media_type: Option<String>,
    page: Option<u32>,
    demo: bool,
) -> anyhow::Result<()> {
    if query.is_empty() {
        bail!("Query must not be empty");
    }

    let config = ReelfindConfig::from_env();
    let store = open_store(&config)?;
    let service = lookup_service(&config, demo);
    let filter = parse_type_filter(media_type.as_deref())?;

    let mut controller = SearchController::new(store);
    let Some(request) = controller.initialize(Some(&query), filter, page) else {
        bail!("Query must not be empty");
    };

    let outcome = service.search(&request).await;
    controller.apply_search_outcome(&request, outcome);

    println!("{}", format_search_report(&controller));
    Ok(())
}

/// Render the settled search state the way 'reelfind search' prints it.
fn format_search_report(controller: &SearchController) -> String {
    let state = controller.state();
    let mut out = String::new();

    out.push_str(&format!("Search results for '{}'\n", state.query));
    out.push_str(&format!("{:-<60}\n", ""));

    if let Some(error) = &state.error {
        out.push_str(&format!("{error}\n"));
        return out;
    }

    if state.results.is_empty() {
        out.push_str("No results on this page.\n");
        return out;
    }

    let first_index = (state.page - 1) * reelfind_core::model::RESULTS_PER_PAGE;
    for (offset, movie) in state.results.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {} ({}) [{}]\n",
            first_index as usize + offset + 1,
            movie.title,
            movie.year,
            movie.imdb_id
        ));
    }

    out.push_str(&format!(
        "\nPage {} of {} ({} results)\n",
        state.page,
        controller.total_pages(),
        state.total_results
    ));
    if controller.has_next_page() {
        out.push_str(&format!(
            "Use --page {} to see the next page.\n",
            state.page + 1
        ));
    }
    out
}

/// Fetch and print one title's record
async fn show_detail(id: String, demo: bool) -> anyhow::Result<()> {
    let config = ReelfindConfig::from_env();
    let service = lookup_service(&config, demo);

    let mut view = DetailView::new();
    view.apply(service.detail(&id).await);

    match view {
        DetailView::Loaded(movie) => {
            println!("{}", movie.title);
            println!("{:-<60}", "");
            println!("Year    : {}", movie.year);
            println!("Genre   : {}", movie.genre);
            println!("Plot    : {}", movie.plot);
            println!("Cast    : {}", movie.actors);
            println!("Ratings : {}", movie.imdb_rating);
            println!("Poster  : {}", movie.poster_url);
        }
        DetailView::Failed(message) => println!("{message}"),
        DetailView::Loading => println!("Processing..."),
    }

    Ok(())
}

/// Print the persisted search parameters
fn show_last_search() -> anyhow::Result<()> {
    let config = ReelfindConfig::from_env();
    let store = open_store(&config)?;

    match PersistedSearch::load(store.as_ref())? {
        Some(saved) => {
            println!("Saved search");
            println!("{:-<60}", "");
            println!("Query  : {}", saved.query);
            if !saved.type_filter.is_none() {
                println!("Type   : {}", saved.type_filter);
            }
            println!("Page   : {}", saved.page);
            println!("Route  : {}", saved.route());
        }
        None => {
            println!("No saved search.");
            println!("Use 'reelfind search <query>' to create one.");
        }
    }

    Ok(())
}

/// Clear the persisted search parameters
fn reset_saved_search() -> anyhow::Result<()> {
    let config = ReelfindConfig::from_env();
    let store = open_store(&config)?;

    PersistedSearch::clear(store.as_ref())?;
    println!("Saved search cleared.");
    Ok(())
}

/// Start the web server for browsing and API access
///
/// # Errors
/// - Binding the configured address or opening the state file failed
async fn start_server(host: String, port: u16, demo: bool) -> anyhow::Result<()> {
    let mut config = ReelfindConfig::from_env();
    config.server.host = host;
    config.server.port = port;

    println!("Starting Reelfind web server...");
    println!("URL: http://{}:{}", config.server.host, config.server.port);
    if demo {
        println!("Mode: Demo (using sample data)");
    }
    println!("{:-<50}", "");
    println!("Press Ctrl+C to stop the server");

    reelfind_web::run_server(config, demo).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use reelfind_core::controller::SearchOutcome;
    use reelfind_core::storage::MemoryStore;

    use super::*;

    #[test]
    fn type_filter_arguments_parse() {
        assert_eq!(
            parse_type_filter(Some("series")).unwrap(),
            Some(TypeFilter::Series)
        );
        assert_eq!(parse_type_filter(None).unwrap(), None);
        assert!(parse_type_filter(Some("documentary")).is_err());
    }

    #[tokio::test]
    async fn demo_search_persists_parameters() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let service = MovieLookupService::new_demo();

        let mut controller = SearchController::new(Arc::clone(&store));
        let request = controller
            .initialize(Some("inception"), None, Some(2))
            .unwrap();
        let outcome = service.search(&request).await;
        controller.apply_search_outcome(&request, outcome);

        let saved = PersistedSearch::load(store.as_ref()).unwrap().unwrap();
        assert_eq!(saved.query, "inception");
        assert_eq!(saved.page, 2);
    }

    #[test]
    fn search_report_lists_numbered_results() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut controller = SearchController::new(store);

        let request = controller.initialize(Some("batman"), None, Some(2)).unwrap();
        controller.apply_search_outcome(
            &request,
            SearchOutcome::Success(reelfind_core::model::SearchPage {
                results: vec![reelfind_core::model::MovieSummary {
                    imdb_id: "tt0372784".to_string(),
                    title: "Batman Begins".to_string(),
                    year: "2005".to_string(),
                    poster_url: String::new(),
                }],
                total_results: 15,
            }),
        );

        let report = format_search_report(&controller);
        assert!(report.contains(" 11. Batman Begins (2005) [tt0372784]"));
        assert!(report.contains("Page 2 of 2 (15 results)"));
        assert!(!report.contains("--page 3"));
    }

    #[test]
    fn search_report_shows_error_verbatim() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut controller = SearchController::new(store);

        let request = controller.initialize(Some("zzznotfound"), None, None).unwrap();
        controller
            .apply_search_outcome(&request, SearchOutcome::ApiError("Movie not found!".to_string()));

        let report = format_search_report(&controller);
        assert!(report.contains("Movie not found!"));
        assert!(!report.contains("Page "));
    }
}
