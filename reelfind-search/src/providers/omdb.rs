//! OMDb HTTP provider for production use.

use std::time::Duration;

use async_trait::async_trait;
use reelfind_core::config::ApiConfig;
use reelfind_core::model::{MovieDetail, MovieSummary, SearchPage, TypeFilter};
use serde::Deserialize;

use super::MovieLookupProvider;
use crate::errors::MovieLookupError;

/// Movie lookup provider backed by the OMDb API.
///
/// Issues one GET per lookup with string query parameters; no retries. The
/// API signals failure in-band with `Response: "False"` and an `Error`
/// message, which maps to [`MovieLookupError::ApiFailure`].
#[derive(Debug, Clone)]
pub struct OmdbProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    request_timeout: Duration,
}

/// Response from the OMDb search endpoint (`?s=`).
#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    /// "True" on success, "False" on an API-reported failure
    #[serde(rename = "Response")]
    response: Option<String>,
    /// One page of matches, absent on failure
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchItem>,
    /// Total match count across all pages, as a string
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
    /// Error message if the request failed
    #[serde(rename = "Error")]
    error: Option<String>,
}

/// Single row of a search response.
#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "Poster")]
    poster: String,
}

/// Response from the OMDb detail endpoint (`?i=`).
#[derive(Debug, Deserialize)]
struct OmdbDetailResponse {
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
    #[serde(rename = "Actors")]
    actors: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

impl OmdbProvider {
    /// Create a provider from API configuration.
    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            request_timeout: config.request_timeout,
        }
    }

    /// Create a provider with an explicit endpoint and key, bypassing
    /// configuration. Useful for pointing tests at a local stub.
    pub fn with_endpoint(base_url: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
            request_timeout: Duration::from_secs(10),
        }
    }

    fn search_url(&self, query: &str, filter: TypeFilter, page: u32) -> String {
        let mut url = format!(
            "{}/?s={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(query)
        );
        if !filter.is_none() {
            url.push_str(&format!("&type={}", filter.as_str()));
        }
        url.push_str(&format!("&page={page}"));
        if let Some(ref api_key) = self.api_key {
            url.push_str(&format!("&apikey={api_key}"));
        }
        url
    }

    fn detail_url(&self, imdb_id: &str) -> String {
        let mut url = format!(
            "{}/?i={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(imdb_id)
        );
        if let Some(ref api_key) = self.api_key {
            url.push_str(&format!("&apikey={api_key}"));
        }
        url
    }

    fn parse_search_response(payload: OmdbSearchResponse) -> Result<SearchPage, MovieLookupError> {
        if payload.response.as_deref() != Some("True") {
            return Err(MovieLookupError::ApiFailure {
                message: payload
                    .error
                    .unwrap_or_else(|| "Unknown error".to_string()),
            });
        }

        let results = payload
            .search
            .into_iter()
            .map(|item| MovieSummary {
                imdb_id: item.imdb_id,
                title: item.title,
                year: item.year,
                poster_url: item.poster,
            })
            .collect();

        // totalResults arrives as a string; an unparseable count reads as 0
        // so pagination simply offers no further pages.
        let total_results = payload
            .total_results
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0);

        Ok(SearchPage {
            results,
            total_results,
        })
    }

    fn parse_detail_response(payload: OmdbDetailResponse) -> Result<MovieDetail, MovieLookupError> {
        if payload.response.as_deref() != Some("True") {
            return Err(MovieLookupError::ApiFailure {
                message: payload
                    .error
                    .unwrap_or_else(|| "Unknown error".to_string()),
            });
        }

        // Missing fields surface as the API's own "N/A" placeholder so the
        // detail view renders them the way the API reports them.
        let field = |value: Option<String>| value.unwrap_or_else(|| "N/A".to_string());

        Ok(MovieDetail {
            imdb_id: field(payload.imdb_id),
            title: field(payload.title),
            year: field(payload.year),
            genre: field(payload.genre),
            plot: field(payload.plot),
            actors: field(payload.actors),
            imdb_rating: field(payload.imdb_rating),
            poster_url: field(payload.poster),
        })
    }
}

#[async_trait]
impl MovieLookupProvider for OmdbProvider {
    async fn search_titles(
        &self,
        query: &str,
        filter: TypeFilter,
        page: u32,
    ) -> Result<SearchPage, MovieLookupError> {
        let url = self.search_url(query, filter, page);

        let response = self
            .client
            .get(&url)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| MovieLookupError::Network {
                reason: format!("HTTP request failed: {e}"),
            })?;

        let payload: OmdbSearchResponse =
            response
                .json()
                .await
                .map_err(|e| MovieLookupError::Parse {
                    reason: format!("JSON parsing failed: {e}"),
                })?;

        Self::parse_search_response(payload)
    }

    async fn fetch_detail(&self, imdb_id: &str) -> Result<MovieDetail, MovieLookupError> {
        let url = self.detail_url(imdb_id);

        let response = self
            .client
            .get(&url)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| MovieLookupError::Network {
                reason: format!("HTTP request failed: {e}"),
            })?;

        let payload: OmdbDetailResponse =
            response
                .json()
                .await
                .map_err(|e| MovieLookupError::Parse {
                    reason: format!("JSON parsing failed: {e}"),
                })?;

        Self::parse_detail_response(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> OmdbProvider {
        OmdbProvider::with_endpoint(
            "https://www.omdbapi.com".to_string(),
            Some("testkey".to_string()),
        )
    }

    #[test]
    fn search_url_encodes_query_and_filter() {
        let p = provider();
        assert_eq!(
            p.search_url("the matrix", TypeFilter::None, 2),
            "https://www.omdbapi.com/?s=the%20matrix&page=2&apikey=testkey"
        );
        assert_eq!(
            p.search_url("batman", TypeFilter::Series, 1),
            "https://www.omdbapi.com/?s=batman&type=series&page=1&apikey=testkey"
        );
    }

    #[test]
    fn url_omits_missing_api_key() {
        let p = OmdbProvider::with_endpoint("https://www.omdbapi.com".to_string(), None);
        assert_eq!(
            p.detail_url("tt0111161"),
            "https://www.omdbapi.com/?i=tt0111161"
        );
    }

    #[test]
    fn parses_successful_search_response() {
        let raw = r#"{
            "Search": [
                {"Title": "Batman Begins", "Year": "2005", "imdbID": "tt0372784", "Type": "movie", "Poster": "https://example.com/bb.jpg"},
                {"Title": "The Batman", "Year": "2022", "imdbID": "tt1877830", "Type": "movie", "Poster": "https://example.com/tb.jpg"}
            ],
            "totalResults": "15",
            "Response": "True"
        }"#;

        let payload: OmdbSearchResponse = serde_json::from_str(raw).unwrap();
        let page = OmdbProvider::parse_search_response(payload).unwrap();

        assert_eq!(page.total_results, 15);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].imdb_id, "tt0372784");
        assert_eq!(page.results[1].title, "The Batman");
    }

    #[test]
    fn search_failure_carries_api_message_verbatim() {
        let raw = r#"{"Response": "False", "Error": "Movie not found!"}"#;

        let payload: OmdbSearchResponse = serde_json::from_str(raw).unwrap();
        let err = OmdbProvider::parse_search_response(payload).unwrap_err();

        assert!(
            matches!(err, MovieLookupError::ApiFailure { ref message } if message == "Movie not found!")
        );
    }

    #[test]
    fn unparseable_total_results_reads_as_zero() {
        let raw = r#"{"Search": [], "totalResults": "many", "Response": "True"}"#;

        let payload: OmdbSearchResponse = serde_json::from_str(raw).unwrap();
        let page = OmdbProvider::parse_search_response(payload).unwrap();
        assert_eq!(page.total_results, 0);
    }

    #[test]
    fn parses_detail_response() {
        let raw = r#"{
            "Title": "The Shawshank Redemption",
            "Year": "1994",
            "Genre": "Drama",
            "Plot": "Two imprisoned men bond over a number of years.",
            "Actors": "Tim Robbins, Morgan Freeman",
            "imdbRating": "9.3",
            "Poster": "https://example.com/shawshank.jpg",
            "imdbID": "tt0111161",
            "Response": "True"
        }"#;

        let payload: OmdbDetailResponse = serde_json::from_str(raw).unwrap();
        let detail = OmdbProvider::parse_detail_response(payload).unwrap();

        assert_eq!(detail.title, "The Shawshank Redemption");
        assert_eq!(detail.actors, "Tim Robbins, Morgan Freeman");
        assert_eq!(detail.imdb_rating, "9.3");
    }

    #[test]
    fn missing_detail_fields_become_not_available() {
        let raw = r#"{"Response": "True", "Title": "Obscure Film", "imdbID": "tt0000001"}"#;

        let payload: OmdbDetailResponse = serde_json::from_str(raw).unwrap();
        let detail = OmdbProvider::parse_detail_response(payload).unwrap();

        assert_eq!(detail.genre, "N/A");
        assert_eq!(detail.imdb_rating, "N/A");
    }

    #[test]
    fn detail_failure_carries_api_message_verbatim() {
        let raw = r#"{"Response": "False", "Error": "Incorrect IMDb ID."}"#;

        let payload: OmdbDetailResponse = serde_json::from_str(raw).unwrap();
        let err = OmdbProvider::parse_detail_response(payload).unwrap_err();

        assert!(
            matches!(err, MovieLookupError::ApiFailure { ref message } if message == "Incorrect IMDb ID.")
        );
    }
}
