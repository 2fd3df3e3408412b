//! Demo provider for development and UI work without external API calls.

use async_trait::async_trait;
use reelfind_core::model::{
    MovieDetail, MovieSummary, RESULTS_PER_PAGE, SearchPage, TypeFilter,
};

use super::MovieLookupProvider;
use crate::errors::MovieLookupError;

/// Number of fabricated matches per demo search, chosen so pagination has
/// a middle page and an uneven last page to exercise.
const DEMO_CATALOG_SIZE: u32 = 23;

/// Returns a deterministic fabricated catalog for any query.
///
/// The full search and pagination workflow can be exercised offline: every
/// query matches, every identifier resolves, and
/// the page arithmetic behaves exactly as with live data.
#[derive(Debug, Default)]
pub struct DemoProvider;

impl DemoProvider {
    /// Create a demo provider.
    pub fn new() -> Self {
        Self
    }

    fn demo_summary(query: &str, index: u32) -> MovieSummary {
        MovieSummary {
            imdb_id: format!("tt9{index:06}"),
            title: format!("{query} Part {}", index + 1),
            year: (1990 + (index % 30)).to_string(),
            poster_url: format!("https://demo.invalid/posters/{index}.jpg"),
        }
    }
}

#[async_trait]
impl MovieLookupProvider for DemoProvider {
    async fn search_titles(
        &self,
        query: &str,
        filter: TypeFilter,
        page: u32,
    ) -> Result<SearchPage, MovieLookupError> {
        // Mirror the real API's failure shape for out-of-range pages.
        let total_pages = DEMO_CATALOG_SIZE.div_ceil(RESULTS_PER_PAGE);
        if page < 1 || page > total_pages {
            return Err(MovieLookupError::ApiFailure {
                message: "Movie not found!".to_string(),
            });
        }

        let start = (page - 1) * RESULTS_PER_PAGE;
        let end = (start + RESULTS_PER_PAGE).min(DEMO_CATALOG_SIZE);
        let label = if filter.is_none() {
            query.to_string()
        } else {
            format!("{query} ({})", filter.as_str())
        };

        Ok(SearchPage {
            results: (start..end)
                .map(|i| Self::demo_summary(&label, i))
                .collect(),
            total_results: DEMO_CATALOG_SIZE,
        })
    }

    async fn fetch_detail(&self, imdb_id: &str) -> Result<MovieDetail, MovieLookupError> {
        Ok(MovieDetail {
            imdb_id: imdb_id.to_string(),
            title: "Demo Feature".to_string(),
            year: "2024".to_string(),
            genre: "Action, Adventure".to_string(),
            plot: "A placeholder plot for interface development.".to_string(),
            actors: "Ada Archetype, Sam Sample".to_string(),
            imdb_rating: "7.9".to_string(),
            poster_url: "https://demo.invalid/posters/detail.jpg".to_string(),
        })
    }
}
