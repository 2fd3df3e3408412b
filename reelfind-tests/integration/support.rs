//! Scripted lookup provider shared by the integration tests.

use async_trait::async_trait;
use reelfind_core::model::{MovieDetail, MovieSummary, RESULTS_PER_PAGE, SearchPage, TypeFilter};
use reelfind_search::{MovieLookupError, MovieLookupProvider};

/// What a scripted search lookup should produce.
#[derive(Debug, Clone, Copy)]
pub enum Script {
    /// A successful page out of `total` matches.
    Matches(u32),
    /// An API-reported failure with the classic not-found message.
    NotFound,
    /// A transport-level failure.
    NetworkDown,
}

/// Provider whose search and detail behavior is fixed up front.
#[derive(Debug)]
pub struct ScriptedProvider {
    pub search: Script,
    pub detail: Script,
}

impl ScriptedProvider {
    pub fn searching(search: Script) -> Self {
        Self {
            search,
            detail: Script::Matches(1),
        }
    }
}

pub fn summary(query: &str, index: u32) -> MovieSummary {
    MovieSummary {
        imdb_id: format!("tt{index:07}"),
        title: format!("{query} #{index}"),
        year: "2020".to_string(),
        poster_url: "https://test.invalid/poster.jpg".to_string(),
    }
}

pub fn detail_record(imdb_id: &str) -> MovieDetail {
    MovieDetail {
        imdb_id: imdb_id.to_string(),
        title: "The Shawshank Redemption".to_string(),
        year: "1994".to_string(),
        genre: "Drama".to_string(),
        plot: "Two imprisoned men bond over a number of years.".to_string(),
        actors: "Tim Robbins, Morgan Freeman".to_string(),
        imdb_rating: "9.3".to_string(),
        poster_url: "https://test.invalid/shawshank.jpg".to_string(),
    }
}

#[async_trait]
impl MovieLookupProvider for ScriptedProvider {
    async fn search_titles(
        &self,
        query: &str,
        _filter: TypeFilter,
        page: u32,
    ) -> Result<SearchPage, MovieLookupError> {
        match self.search {
            Script::Matches(total) => {
                let start = (page - 1) * RESULTS_PER_PAGE;
                let end = (start + RESULTS_PER_PAGE).min(total);
                Ok(SearchPage {
                    results: (start..end).map(|i| summary(query, i)).collect(),
                    total_results: total,
                })
            }
            Script::NotFound => Err(MovieLookupError::ApiFailure {
                message: "Movie not found!".to_string(),
            }),
            Script::NetworkDown => Err(MovieLookupError::Network {
                reason: "connection refused".to_string(),
            }),
        }
    }

    async fn fetch_detail(&self, imdb_id: &str) -> Result<MovieDetail, MovieLookupError> {
        match self.detail {
            Script::Matches(_) => Ok(detail_record(imdb_id)),
            Script::NotFound => Err(MovieLookupError::ApiFailure {
                message: "Incorrect IMDb ID.".to_string(),
            }),
            Script::NetworkDown => Err(MovieLookupError::Network {
                reason: "connection refused".to_string(),
            }),
        }
    }
}
