//! Mock provider for testing.

use async_trait::async_trait;
use reelfind_core::model::{MovieDetail, MovieSummary, SearchPage, TypeFilter};

use super::MovieLookupProvider;
use crate::errors::MovieLookupError;

/// Scripted provider returning a fixed search page and detail record.
#[derive(Debug)]
pub struct MockProvider {
    total_results: u32,
}

impl MockProvider {
    /// Mock provider reporting `total_results` matches.
    pub fn with_total(total_results: u32) -> Self {
        Self { total_results }
    }
}

#[async_trait]
impl MovieLookupProvider for MockProvider {
    async fn search_titles(
        &self,
        query: &str,
        _filter: TypeFilter,
        page: u32,
    ) -> Result<SearchPage, MovieLookupError> {
        Ok(SearchPage {
            results: vec![MovieSummary {
                imdb_id: format!("tt{page:07}"),
                title: query.to_string(),
                year: "2024".to_string(),
                poster_url: "https://mock.invalid/poster.jpg".to_string(),
            }],
            total_results: self.total_results,
        })
    }

    async fn fetch_detail(&self, imdb_id: &str) -> Result<MovieDetail, MovieLookupError> {
        Ok(MovieDetail {
            imdb_id: imdb_id.to_string(),
            title: "Mock Movie".to_string(),
            year: "2024".to_string(),
            genre: "Drama".to_string(),
            plot: "Mock plot description".to_string(),
            actors: "Mock Actor".to_string(),
            imdb_rating: "8.5".to_string(),
            poster_url: "https://mock.invalid/poster.jpg".to_string(),
        })
    }
}
