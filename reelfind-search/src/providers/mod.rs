//! Provider implementations for movie lookups.

use async_trait::async_trait;
use reelfind_core::model::{MovieDetail, SearchPage, TypeFilter};

use crate::errors::MovieLookupError;

pub mod demo;
#[cfg(test)]
pub mod mock;
pub mod omdb;

pub use demo::DemoProvider;
#[cfg(test)]
pub use mock::MockProvider;
pub use omdb::OmdbProvider;

/// Trait for movie lookup providers.
///
/// Implementations answer paginated title searches and per-title detail
/// lookups through different backends (the real OMDb API, demo data, mock
/// providers for testing).
#[async_trait]
pub trait MovieLookupProvider: Send + Sync + std::fmt::Debug {
    /// Search titles matching `query`, optionally narrowed by `filter`,
    /// returning the requested result page.
    ///
    /// # Errors
    /// - `MovieLookupError::ApiFailure` - The API reported no matches or an error
    /// - `MovieLookupError::Network` - Network connectivity issues
    /// - `MovieLookupError::Parse` - Malformed response payload
    async fn search_titles(
        &self,
        query: &str,
        filter: TypeFilter,
        page: u32,
    ) -> Result<SearchPage, MovieLookupError>;

    /// Fetch the full record for one title by its opaque identifier.
    ///
    /// # Errors
    /// - `MovieLookupError::ApiFailure` - The API reported an unknown identifier or an error
    /// - `MovieLookupError::Network` - Network connectivity issues
    /// - `MovieLookupError::Parse` - Malformed response payload
    async fn fetch_detail(&self, imdb_id: &str) -> Result<MovieDetail, MovieLookupError>;
}
