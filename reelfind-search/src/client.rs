//! Movie lookup service tying providers to the controller's outcome types.

use reelfind_core::config::ApiConfig;
use reelfind_core::controller::{LookupRequest, SearchOutcome};
use reelfind_core::detail::DetailOutcome;

use crate::errors::MovieLookupError;
use crate::providers::{DemoProvider, MovieLookupProvider, OmdbProvider};

/// Movie lookup service owning a boxed provider.
///
/// Converts provider results into the outcome enums the search controller
/// and detail view consume: an API-reported failure keeps its message,
/// while network and parse failures collapse into the transport variant
/// whose user-facing wording is owned by the core crate.
#[derive(Debug)]
pub struct MovieLookupService {
    provider: Box<dyn MovieLookupProvider>,
}

impl MovieLookupService {
    /// Lookup service backed by the real OMDb API.
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            provider: Box::new(OmdbProvider::from_config(config)),
        }
    }

    /// Lookup service returning fabricated demo data, for development
    /// without external API calls.
    pub fn new_demo() -> Self {
        Self {
            provider: Box::new(DemoProvider::new()),
        }
    }

    /// Lookup service with an explicit provider, for tests.
    pub fn with_provider(provider: Box<dyn MovieLookupProvider>) -> Self {
        Self { provider }
    }

    /// Perform the search lookup described by `request` and settle it into
    /// a [`SearchOutcome`].
    pub async fn search(&self, request: &LookupRequest) -> SearchOutcome {
        let result = self
            .provider
            .search_titles(&request.query, request.type_filter, request.page)
            .await;

        match result {
            Ok(page) => SearchOutcome::Success(page),
            Err(MovieLookupError::ApiFailure { message }) => SearchOutcome::ApiError(message),
            Err(e) => {
                tracing::warn!(query = %request.query, "Search lookup failed: {e}");
                SearchOutcome::TransportFailure
            }
        }
    }

    /// Fetch the record identified by `imdb_id` and settle it into a
    /// [`DetailOutcome`].
    pub async fn detail(&self, imdb_id: &str) -> DetailOutcome {
        match self.provider.fetch_detail(imdb_id).await {
            Ok(detail) => DetailOutcome::Success(detail),
            Err(MovieLookupError::ApiFailure { message }) => DetailOutcome::ApiError(message),
            Err(e) => {
                tracing::warn!(imdb_id, "Detail lookup failed: {e}");
                DetailOutcome::TransportFailure
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use reelfind_core::model::{MovieDetail, SearchPage, TypeFilter};

    use super::*;
    use crate::providers::MockProvider;

    #[derive(Debug)]
    struct FailingProvider(MovieLookupError);

    #[async_trait]
    impl MovieLookupProvider for FailingProvider {
        async fn search_titles(
            &self,
            _query: &str,
            _filter: TypeFilter,
            _page: u32,
        ) -> Result<SearchPage, MovieLookupError> {
            Err(clone_error(&self.0))
        }

        async fn fetch_detail(&self, _imdb_id: &str) -> Result<MovieDetail, MovieLookupError> {
            Err(clone_error(&self.0))
        }
    }

    fn clone_error(e: &MovieLookupError) -> MovieLookupError {
        match e {
            MovieLookupError::ApiFailure { message } => MovieLookupError::ApiFailure {
                message: message.clone(),
            },
            MovieLookupError::Network { reason } => MovieLookupError::Network {
                reason: reason.clone(),
            },
            MovieLookupError::Parse { reason } => MovieLookupError::Parse {
                reason: reason.clone(),
            },
        }
    }

    fn request(query: &str) -> LookupRequest {
        LookupRequest {
            ticket: 1,
            query: query.to_string(),
            type_filter: TypeFilter::None,
            page: 1,
        }
    }

    #[tokio::test]
    async fn successful_search_becomes_success_outcome() {
        let service = MovieLookupService::with_provider(Box::new(MockProvider::with_total(15)));
        let outcome = service.search(&request("Test Movie")).await;

        match outcome {
            SearchOutcome::Success(page) => {
                assert_eq!(page.total_results, 15);
                assert_eq!(page.results[0].title, "Test Movie");
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn api_failure_keeps_its_message() {
        let service = MovieLookupService::with_provider(Box::new(FailingProvider(
            MovieLookupError::ApiFailure {
                message: "Movie not found!".to_string(),
            },
        )));

        let outcome = service.search(&request("zzznotfound")).await;
        assert_eq!(outcome, SearchOutcome::ApiError("Movie not found!".to_string()));
    }

    #[tokio::test]
    async fn network_and_parse_failures_become_transport() {
        for error in [
            MovieLookupError::Network {
                reason: "connection refused".to_string(),
            },
            MovieLookupError::Parse {
                reason: "unexpected EOF".to_string(),
            },
        ] {
            let service = MovieLookupService::with_provider(Box::new(FailingProvider(error)));
            assert_eq!(
                service.search(&request("batman")).await,
                SearchOutcome::TransportFailure
            );
        }
    }

    #[tokio::test]
    async fn detail_outcomes_mirror_search_mapping() {
        let service = MovieLookupService::with_provider(Box::new(MockProvider::with_total(1)));
        match service.detail("tt0111161").await {
            DetailOutcome::Success(detail) => assert_eq!(detail.imdb_id, "tt0111161"),
            other => panic!("expected success, got {other:?}"),
        }

        let failing = MovieLookupService::with_provider(Box::new(FailingProvider(
            MovieLookupError::Network {
                reason: "timeout".to_string(),
            },
        )));
        assert_eq!(
            failing.detail("tt0111161").await,
            DetailOutcome::TransportFailure
        );
    }
}
